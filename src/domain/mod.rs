pub mod cancel;
pub mod command;
pub mod config;
pub mod error;
pub mod options;
pub mod secret;
pub mod target;

pub use cancel::CancelToken;
pub use command::{
    ANSIBLE_EXECUTABLE, CommandKind, CommandSpec, Environment, GALAXY_EXECUTABLE,
    PLAYBOOK_EXECUTABLE,
};
pub use config::{
    BecomeConfig, ConnectionConfig, ExecutionConfig, FactsConfig, GalaxyConfig, RunConfig,
    VaultConfig,
};
pub use error::{AppError, RunFailure, Stage};
pub use options::{OptionDescriptor, OptionValue, render_options, verbosity_flag};
pub use secret::{KeyEnvelope, SecretRole, normalize_line_endings, validate_key_envelope};
pub use target::{ResolvedTarget, TargetKind, is_collection_reference};
