use crate::domain::{CancelToken, CommandSpec, Environment, RunFailure};

/// Port for running one external command to completion.
pub trait ProcessRunner {
    /// Run `command` with exactly `env` as its environment, blocking until it
    /// exits. Implementations must terminate the process when `cancel` fires.
    fn run(
        &self,
        command: &CommandSpec,
        env: &Environment,
        cancel: &CancelToken,
    ) -> Result<(), RunFailure>;
}
