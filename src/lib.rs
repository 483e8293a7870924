//! playrun: compile a declarative playbook run into ordered `ansible` invocations.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::SystemProcessRunner;
use app::commands;

pub use app::commands::{RunOptions, RunOutcome};
pub use app::config::{ConfigOverrides, load_config, parse_config_content};
pub use domain::{
    AppError, CancelToken, CommandKind, CommandSpec, Environment, KeyEnvelope, RunConfig,
    SecretRole, Stage,
};
pub use ports::{ProcessRunner, RunFailure};

// =============================================================================
// Run API
// =============================================================================

/// Execute a run with real child processes and the current host environment.
///
/// Commands run strictly in order; the first failure stops the run. Staged
/// credential files are removed before this returns.
pub fn run(config: &RunConfig, cancel: &CancelToken) -> Result<RunOutcome, AppError> {
    let runner = SystemProcessRunner::new();
    let host = Environment::from_host();
    commands::run::execute(config, &runner, &host, cancel, RunOptions::default())
}

/// Execute a run through a caller-supplied [`ProcessRunner`].
pub fn run_with<R: ProcessRunner>(
    config: &RunConfig,
    runner: &R,
    host_environment: &Environment,
    cancel: &CancelToken,
    options: RunOptions<'_>,
) -> Result<RunOutcome, AppError> {
    commands::run::execute(config, runner, host_environment, cancel, options)
}

// =============================================================================
// Inspection API
// =============================================================================

/// Build the commands a run would execute, without executing them.
pub fn plan(config: &RunConfig) -> Result<Vec<CommandSpec>, AppError> {
    commands::plan::execute(config)
}

/// Validate the private key envelope of a key file.
pub fn check_key(path: &Path) -> Result<KeyEnvelope, AppError> {
    commands::check_key::execute(path)
}
