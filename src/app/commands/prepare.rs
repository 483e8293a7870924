//! Resolve, stage and build: everything a run needs before execution.

use tracing::debug;

use crate::app::services::{CommandBuilder, CredentialPaths, SecretStage, TargetResolver};
use crate::domain::{AppError, CommandSpec, RunConfig, SecretRole, Stage};

/// Commands ready to run plus the credential files they reference.
///
/// Dropping this removes the staged files.
#[derive(Debug)]
pub struct PreparedRun {
    pub commands: Vec<CommandSpec>,
    pub secrets: SecretStage,
}

pub fn prepare(config: &RunConfig) -> Result<PreparedRun, AppError> {
    config.validate()?;

    let targets = TargetResolver::resolve(&config.playbooks)
        .map_err(|e| e.in_stage(Stage::ResolveTargets))?;

    let mut secrets = SecretStage::new(&config.temp_dir);
    stage_secrets(config, &mut secrets).map_err(|e| e.in_stage(Stage::StageSecrets))?;

    let credentials = CredentialPaths::from_stage(config, &secrets);
    let commands = CommandBuilder::new(config, &targets, credentials)
        .build()
        .map_err(|e| e.in_stage(Stage::BuildCommands))?;
    debug!(count = commands.len(), "built commands");

    Ok(PreparedRun { commands, secrets })
}

fn stage_secrets(config: &RunConfig, secrets: &mut SecretStage) -> Result<(), AppError> {
    secrets.stage(SecretRole::PrivateKey, &config.connection.private_key)?;
    secrets.stage(SecretRole::VaultPassword, &config.vault.password)?;
    Ok(())
}
