mod process_runner_stub;

pub use self::process_runner_stub::{FakeRunner, Invocation};
