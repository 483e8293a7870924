use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::secret::SecretRole;

/// Pipeline stage an error escaped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveTargets,
    StageSecrets,
    BuildCommands,
    Execute,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::ResolveTargets => "resolve playbooks",
            Stage::StageSecrets => "prepare credential files",
            Stage::BuildCommands => "build commands",
            Stage::Execute => "execute commands",
        };
        f.write_str(label)
    }
}

/// Why a single external invocation did not succeed.
#[derive(Debug, Error)]
pub enum RunFailure {
    /// The executable could not be started.
    #[error("failed to start: {0}")]
    Spawn(#[source] io::Error),

    /// The process ran and exited unsuccessfully.
    #[error("{0}")]
    Exit(String),

    /// The cancel token fired while the process was running.
    #[error("cancelled")]
    Cancelled,
}

/// Library-wide error type for playrun operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// An input file exists but could not be read.
    #[error("could not read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file passed on the command line does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Output serialization failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// No playbook patterns were configured.
    #[error("no playbooks specified")]
    NoTargetsSpecified,

    /// Every pattern was processed but nothing resolved.
    #[error("no playbook files found")]
    NoTargetsResolved,

    /// A literal or glob-expanded playbook path does not exist.
    #[error("playbook not found: {target}")]
    TargetNotFound {
        target: String,
        #[source]
        source: Option<io::Error>,
    },

    /// Galaxy requirements file is configured but missing.
    #[error("galaxy file not found: {}", .0.display())]
    RequirementsFileMissing(PathBuf),

    /// File-based inventory is configured but missing.
    #[error("inventory not found: {0}")]
    InventoryNotFound(String),

    /// No inventory was configured.
    #[error("no inventories specified")]
    NoInventories,

    /// Key material failed structural validation.
    #[error("invalid {role} material: {reason}")]
    InvalidCredentialMaterial { role: SecretRole, reason: String },

    /// Creating, writing or restricting a credential file failed.
    #[error("could not {action} {role} file: {source}")]
    StagingIo {
        role: SecretRole,
        action: &'static str,
        #[source]
        source: io::Error,
    },

    /// An external command exited unsuccessfully or could not be started.
    #[error("error executing {executable} (command {position}/{total}): {failure}")]
    Subprocess {
        position: usize,
        total: usize,
        executable: String,
        #[source]
        failure: RunFailure,
    },

    /// Cancellation fired before or during a command.
    #[error("cancelled while executing {executable} (command {position}/{total})")]
    Cancelled { position: usize, total: usize, executable: String },

    /// Wraps an error with the pipeline stage it escaped from.
    #[error("failed to {stage}: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Wrap this error with stage context.
    pub fn in_stage(self, stage: Stage) -> Self {
        AppError::Stage { stage, source: Box::new(self) }
    }

    /// Innermost error, skipping stage wrappers.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Stage the error escaped from, if it was wrapped.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers that map errors to exit behaviour.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::StagingIo { source, .. } | AppError::ReadFile { source, .. } => {
                source.kind()
            }
            AppError::Stage { source, .. } => source.kind(),
            AppError::Configuration(_)
            | AppError::TomlParse(_)
            | AppError::Serialization(_)
            | AppError::NoTargetsSpecified
            | AppError::NoInventories
            | AppError::InvalidCredentialMaterial { .. } => io::ErrorKind::InvalidInput,
            AppError::ConfigNotFound(_)
            | AppError::NoTargetsResolved
            | AppError::TargetNotFound { .. }
            | AppError::RequirementsFileMissing(_)
            | AppError::InventoryNotFound(_) => io::ErrorKind::NotFound,
            AppError::Cancelled { .. } => io::ErrorKind::Interrupted,
            AppError::Subprocess { failure: RunFailure::Spawn(source), .. } => source.kind(),
            AppError::Subprocess { .. } => io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wrapper_renders_context_and_keeps_root() {
        let err = AppError::InventoryNotFound("hosts.ini".into()).in_stage(Stage::BuildCommands);

        assert_eq!(err.to_string(), "failed to build commands: inventory not found: hosts.ini");
        assert!(matches!(err.root(), AppError::InventoryNotFound(inv) if inv == "hosts.ini"));
        assert_eq!(err.stage(), Some(Stage::BuildCommands));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn subprocess_error_names_position() {
        let err = AppError::Subprocess {
            position: 3,
            total: 5,
            executable: "ansible-playbook".into(),
            failure: RunFailure::Exit("exit status: 2".into()),
        };
        assert_eq!(
            err.to_string(),
            "error executing ansible-playbook (command 3/5): exit status: 2"
        );
    }

    #[test]
    fn subprocess_error_keeps_the_spawn_failure_as_source() {
        use std::error::Error as _;

        let err = AppError::Subprocess {
            position: 1,
            total: 2,
            executable: "ansible".into(),
            failure: RunFailure::Spawn(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        };

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "failed to start: no such file");
        assert!(source.source().unwrap().downcast_ref::<io::Error>().is_some());
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn read_file_error_names_the_path() {
        let err = AppError::ReadFile {
            path: PathBuf::from("/keys/id_rsa"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "could not read /keys/id_rsa: No such file or directory");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn credential_errors_name_the_role() {
        let err = AppError::InvalidCredentialMaterial {
            role: SecretRole::PrivateKey,
            reason: "missing END marker".into(),
        };
        assert_eq!(err.to_string(), "invalid private key material: missing END marker");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
