pub mod ports;

pub use ports::FakeRunner;
#[allow(unused_imports)]
pub use ports::Invocation;
