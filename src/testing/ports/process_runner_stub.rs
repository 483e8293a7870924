use std::sync::Mutex;

use crate::domain::{CancelToken, CommandSpec, Environment};
use crate::ports::{ProcessRunner, RunFailure};

/// One recorded call to [`FakeRunner::run`].
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: CommandSpec,
    pub environment: Environment,
}

/// Records invocations instead of spawning processes.
#[derive(Default)]
pub struct FakeRunner {
    invocations: Mutex<Vec<Invocation>>,
    fail_at: Option<usize>,
    cancel_at: Option<usize>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `position`-th (1-based) invocation exit unsuccessfully.
    pub fn fail_at(mut self, position: usize) -> Self {
        self.fail_at = Some(position);
        self
    }

    /// Make the `position`-th (1-based) invocation fire the cancel token.
    pub fn cancel_at(mut self, position: usize) -> Self {
        self.cancel_at = Some(position);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(
        &self,
        command: &CommandSpec,
        env: &Environment,
        cancel: &CancelToken,
    ) -> Result<(), RunFailure> {
        let mut invocations = self.invocations.lock().unwrap();
        invocations.push(Invocation { command: command.clone(), environment: env.clone() });
        let position = invocations.len();

        if self.cancel_at == Some(position) {
            cancel.cancel();
            return Err(RunFailure::Cancelled);
        }
        if self.fail_at == Some(position) {
            return Err(RunFailure::Exit("exit status: 2".into()));
        }
        Ok(())
    }
}
