//! Transient credential files.
//!
//! Secrets are written to owner-only files inside the staging directory and
//! removed when the [`SecretStage`] is released or dropped, whichever comes
//! first.

use std::fs;
#[cfg(unix)]
use std::fs::Permissions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use tracing::{debug, info, warn};

use crate::domain::{AppError, SecretRole, normalize_line_endings, validate_key_envelope};

/// One secret materialized on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSecret {
    role: SecretRole,
    path: PathBuf,
}

impl StagedSecret {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Owns every credential file created for one run.
#[derive(Debug)]
pub struct SecretStage {
    directory: PathBuf,
    staged: Vec<StagedSecret>,
}

impl SecretStage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into(), staged: Vec::new() }
    }

    /// Write `secret` to a fresh owner-only file. Empty secrets are not staged.
    ///
    /// Key material must carry a matching `BEGIN`/`END ... PRIVATE KEY`
    /// envelope; it is validated before anything touches the disk.
    pub fn stage(
        &mut self,
        role: SecretRole,
        secret: &str,
    ) -> Result<Option<&StagedSecret>, AppError> {
        if secret.is_empty() {
            return Ok(None);
        }

        let content = normalize_line_endings(secret);
        if role.requires_envelope() {
            validate_key_envelope(&content)
                .map_err(|reason| AppError::InvalidCredentialMaterial { role, reason })?;
        }

        let path = write_restricted(&self.directory, role, &content)?;
        info!(%role, path = %path.display(), "staged credential file");
        self.staged.push(StagedSecret { role, path });
        Ok(self.staged.last())
    }

    /// Path of the most recently staged file for `role`.
    pub fn path_for(&self, role: SecretRole) -> Option<&Path> {
        self.staged.iter().rev().find(|s| s.role == role).map(StagedSecret::path)
    }

    pub fn staged(&self) -> &[StagedSecret] {
        &self.staged
    }

    /// Remove every staged file. Already-missing files are tolerated; other
    /// failures are logged. Calling this again is a no-op.
    pub fn release(&mut self) {
        for secret in self.staged.drain(..) {
            match fs::remove_file(&secret.path) {
                Ok(()) => {
                    debug!(
                        role = %secret.role,
                        path = %secret.path.display(),
                        "removed credential file"
                    );
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %secret.path.display(), "credential file already removed");
                }
                Err(e) => {
                    warn!(
                        path = %secret.path.display(),
                        error = %e,
                        "could not remove credential file"
                    );
                }
            }
        }
    }
}

impl Drop for SecretStage {
    fn drop(&mut self) {
        self.release();
    }
}

/// Create a uniquely named file that is owner-only from the moment it exists,
/// then write the content.
fn write_restricted(
    directory: &Path,
    role: SecretRole,
    content: &str,
) -> Result<PathBuf, AppError> {
    let mut builder = Builder::new();
    builder.prefix(role.file_prefix());
    #[cfg(unix)]
    builder.permissions(owner_only());

    let mut file = builder.tempfile_in(directory).map_err(staging_io(role, "create"))?;

    #[cfg(unix)]
    fs::set_permissions(file.path(), owner_only())
        .map_err(staging_io(role, "restrict permissions on"))?;

    file.write_all(content.as_bytes()).map_err(staging_io(role, "write"))?;
    file.as_file().sync_all().map_err(staging_io(role, "write"))?;

    let (_, path) = file.keep().map_err(|e| staging_io(role, "persist")(e.error))?;
    Ok(path)
}

fn staging_io(role: SecretRole, action: &'static str) -> impl Fn(io::Error) -> AppError {
    move |source| AppError::StagingIo { role, action, source }
}

#[cfg(unix)]
fn owner_only() -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    Permissions::from_mode(0o600)
}
