//! Sequential command execution.

use std::io::Write;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::{AppError, CancelToken, CommandSpec, Environment, RunConfig};
use crate::ports::{ProcessRunner, RunFailure};

pub const FORCE_COLOR_VAR: &str = "ANSIBLE_FORCE_COLOR";
pub const GALAXY_PROGRESS_VAR: &str = "ANSIBLE_GALAXY_DISPLAY_PROGRESS";
pub const CONFIG_VAR: &str = "ANSIBLE_CONFIG";
pub const FACT_CACHING_VAR: &str = "ANSIBLE_FACT_CACHING";
pub const FACT_CACHING_TIMEOUT_VAR: &str = "ANSIBLE_FACT_CACHING_TIMEOUT";

/// Variables layered over the host environment for every command.
pub fn derived_environment(config: &RunConfig) -> Environment {
    let mut env = Environment::new();
    env.set(FORCE_COLOR_VAR, "1");
    env.set(GALAXY_PROGRESS_VAR, "0");

    if !config.config_file.is_empty() {
        if Path::new(&config.config_file).exists() {
            env.set(CONFIG_VAR, config.config_file.as_str());
        } else {
            warn!(path = %config.config_file, "ansible config file not found; not exporting");
        }
    }
    if !config.facts.caching.is_empty() {
        env.set(FACT_CACHING_VAR, config.facts.caching.as_str());
    }
    if config.facts.caching_timeout > 0 {
        env.set(FACT_CACHING_TIMEOUT_VAR, config.facts.caching_timeout.to_string());
    }
    env
}

/// Runs built commands strictly in order, stopping at the first failure.
pub struct Orchestrator<'a, R: ProcessRunner> {
    runner: &'a R,
    environment: Environment,
    trace: Option<&'a mut dyn Write>,
}

impl<'a, R: ProcessRunner> Orchestrator<'a, R> {
    /// `environment` is the complete environment each command receives.
    pub fn new(runner: &'a R, environment: Environment) -> Self {
        Self { runner, environment, trace: None }
    }

    /// Echo `$ <command line>` to `out` before each command.
    pub fn with_trace(mut self, out: &'a mut dyn Write) -> Self {
        self.trace = Some(out);
        self
    }

    pub fn execute(
        &mut self,
        commands: &[CommandSpec],
        cancel: &CancelToken,
    ) -> Result<(), AppError> {
        let total = commands.len();
        for (index, command) in commands.iter().enumerate() {
            let position = index + 1;
            let executable = executable_name(command);

            if cancel.is_cancelled() {
                return Err(AppError::Cancelled { position, total, executable });
            }

            self.write_trace(command);
            info!(position, total, %executable, "running command");

            match self.runner.run(command, &self.environment, cancel) {
                Ok(()) => {}
                Err(RunFailure::Cancelled) => {
                    return Err(AppError::Cancelled { position, total, executable });
                }
                Err(failure) => {
                    return Err(AppError::Subprocess { position, total, executable, failure });
                }
            }
        }
        Ok(())
    }

    fn write_trace(&mut self, command: &CommandSpec) {
        if let Some(out) = self.trace.as_mut() {
            if let Err(e) = writeln!(out, "$ {}", command.command_line()) {
                warn!(error = %e, "could not write trace line");
            }
        }
    }
}

/// Base name of the program, e.g. `ansible-playbook` for `/usr/bin/ansible-playbook`.
fn executable_name(command: &CommandSpec) -> String {
    Path::new(command.program())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| command.program().to_string())
}
