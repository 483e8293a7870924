pub mod command_builder;
pub mod orchestrator;
pub mod secret_stage;
pub mod target_resolver;

pub use command_builder::{CommandBuilder, CredentialPaths, validate_inventory};
pub use orchestrator::{Orchestrator, derived_environment};
pub use secret_stage::{SecretStage, StagedSecret};
pub use target_resolver::TargetResolver;
