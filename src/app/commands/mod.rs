pub mod check_key;
pub mod plan;
pub mod prepare;
pub mod run;

pub use prepare::{PreparedRun, prepare};
pub use run::{RunOptions, RunOutcome};
