use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{CancelToken, CommandSpec, Environment};
use crate::ports::{ProcessRunner, RunFailure};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Runs commands as child processes with inherited stdout/stderr.
#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    poll_interval: Duration,
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self { poll_interval: POLL_INTERVAL }
    }
}

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn wait(&self, child: &mut Child, cancel: &CancelToken) -> Result<ExitStatus, RunFailure> {
        loop {
            if cancel.is_cancelled() {
                terminate(child);
                return Err(RunFailure::Cancelled);
            }
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    terminate(child);
                    return Err(RunFailure::Spawn(e));
                }
            }
        }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        command: &CommandSpec,
        env: &Environment,
        cancel: &CancelToken,
    ) -> Result<(), RunFailure> {
        if cancel.is_cancelled() {
            return Err(RunFailure::Cancelled);
        }

        let mut process = Command::new(command.program());
        process
            .args(command.args())
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = process.spawn().map_err(RunFailure::Spawn)?;
        debug!(pid = child.id(), program = command.program(), "spawned");

        let status = self.wait(&mut child, cancel)?;
        if status.success() {
            Ok(())
        } else if cancel.is_cancelled() {
            // The child saw the same interrupt and exited first.
            Err(RunFailure::Cancelled)
        } else {
            Err(RunFailure::Exit(status.to_string()))
        }
    }
}

/// Kill and reap a child that must not outlive the run.
fn terminate(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!(pid = child.id(), error = %e, "kill failed; process may have exited");
    }
    if let Err(e) = child.wait() {
        warn!(pid = child.id(), error = %e, "could not reap child process");
    }
}
