mod process_runner;

pub use crate::domain::RunFailure;
pub use process_runner::ProcessRunner;
