//! Command construction.
//!
//! Maps a [`RunConfig`] onto the ordered list of invocations for one run:
//! version probe, optional galaxy installs, then one playbook run per
//! inventory. Flag order is fixed by the descriptor tables below.

use std::path::Path;

use crate::domain::{
    ANSIBLE_EXECUTABLE, AppError, CommandKind, CommandSpec, GALAXY_EXECUTABLE, OptionDescriptor,
    PLAYBOOK_EXECUTABLE, ResolvedTarget, RunConfig, SecretRole, render_options, verbosity_flag,
};

use super::secret_stage::SecretStage;

/// Inventory values containing this separator are inline host lists.
const INLINE_INVENTORY_SEPARATOR: char = ',';

/// Credential file paths handed to the interpreter.
///
/// Staged files take precedence over files configured directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialPaths {
    pub private_key_file: String,
    pub vault_password_file: String,
}

impl CredentialPaths {
    pub fn from_stage(config: &RunConfig, stage: &SecretStage) -> Self {
        let pick = |role: SecretRole, configured: &str| {
            stage
                .path_for(role)
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| configured.to_string())
        };
        Self {
            private_key_file: pick(SecretRole::PrivateKey, &config.connection.private_key_file),
            vault_password_file: pick(SecretRole::VaultPassword, &config.vault.password_file),
        }
    }
}

/// Builds every command of a run from resolved inputs.
pub struct CommandBuilder<'a> {
    config: &'a RunConfig,
    targets: &'a [ResolvedTarget],
    credentials: CredentialPaths,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(
        config: &'a RunConfig,
        targets: &'a [ResolvedTarget],
        credentials: CredentialPaths,
    ) -> Self {
        Self { config, targets, credentials }
    }

    /// Produce the full ordered command list, failing on the first missing
    /// requirements file or inventory.
    pub fn build(&self) -> Result<Vec<CommandSpec>, AppError> {
        let mut commands = vec![version_command()];

        let galaxy_file = &self.config.galaxy.file;
        if !galaxy_file.is_empty() {
            if !Path::new(galaxy_file).exists() {
                return Err(AppError::RequirementsFileMissing(galaxy_file.into()));
            }
            commands.push(self.galaxy_role_command());
            commands.push(self.galaxy_collection_command());
        }

        for inventory in &self.config.inventories {
            validate_inventory(inventory)?;
            commands.push(self.playbook_command(inventory));
        }

        Ok(commands)
    }

    fn galaxy_command(
        &self,
        kind: CommandKind,
        base: [&str; 2],
        options: &[OptionDescriptor<'_>],
    ) -> CommandSpec {
        let mut args: Vec<String> = base.iter().map(|s| s.to_string()).collect();
        render_options(&mut args, options);
        args.extend(verbosity_flag(self.config.verbose));
        CommandSpec::new(kind, GALAXY_EXECUTABLE, args)
    }

    fn galaxy_role_command(&self) -> CommandSpec {
        let galaxy = &self.config.galaxy;
        self.galaxy_command(
            CommandKind::RoleInstall,
            ["role", "install"],
            &[
                OptionDescriptor::single("--role-file", &galaxy.file),
                OptionDescriptor::single("--server", &galaxy.server),
                OptionDescriptor::single("--api-key", &galaxy.api_key),
                OptionDescriptor::presence("--ignore-certs", galaxy.ignore_certs),
                OptionDescriptor::number("--timeout", galaxy.timeout),
                OptionDescriptor::presence("--force", galaxy.force),
                OptionDescriptor::presence("--no-deps", galaxy.no_deps),
                OptionDescriptor::presence("--force-with-deps", galaxy.force_with_deps),
            ],
        )
    }

    fn galaxy_collection_command(&self) -> CommandSpec {
        let galaxy = &self.config.galaxy;
        self.galaxy_command(
            CommandKind::CollectionInstall,
            ["collection", "install"],
            &[
                OptionDescriptor::single("--requirements-file", &galaxy.file),
                OptionDescriptor::single("--server", &galaxy.server),
                OptionDescriptor::single("--api-key", &galaxy.api_key),
                OptionDescriptor::presence("--ignore-certs", galaxy.ignore_certs),
                OptionDescriptor::number("--timeout", galaxy.timeout),
                OptionDescriptor::presence("--force-with-deps", galaxy.force_with_deps),
                OptionDescriptor::single("--collections-path", &galaxy.collections_path),
                OptionDescriptor::presence("--pre", galaxy.pre),
                OptionDescriptor::presence("--upgrade", galaxy.upgrade),
                OptionDescriptor::presence("--force", galaxy.force),
            ],
        )
    }

    fn playbook_command(&self, inventory: &str) -> CommandSpec {
        let config = self.config;
        let mut args = vec!["--inventory".to_string(), inventory.to_string()];

        // Inspection modes reject most behavioral flags.
        if config.is_inspection() {
            let flag = if config.execution.list_hosts { "--list-hosts" } else { "--syntax-check" };
            args.push(flag.to_string());
            self.push_targets(&mut args);
            return CommandSpec::new(CommandKind::Playbook, PLAYBOOK_EXECUTABLE, args);
        }

        let connection = &config.connection;
        let privilege = &config.privilege;
        let execution = &config.execution;
        let vault = &config.vault;
        render_options(
            &mut args,
            &[
                OptionDescriptor::presence("--check", execution.check),
                OptionDescriptor::presence("--diff", execution.diff),
                OptionDescriptor::presence("--flush-cache", execution.flush_cache),
                OptionDescriptor::presence("--force-handlers", execution.force_handlers),
                OptionDescriptor::presence("--step", execution.step),
                OptionDescriptor::presence("--no-color", execution.no_color),
                OptionDescriptor::number("--forks", connection.forks),
                OptionDescriptor::single("--user", &connection.user),
                OptionDescriptor::single("--connection", &connection.connection),
                OptionDescriptor::number("--timeout", connection.timeout),
                OptionDescriptor::single("--limit", &config.limit),
                OptionDescriptor::single("--ssh-common-args", &connection.ssh_common_args),
                OptionDescriptor::single("--sftp-extra-args", &connection.sftp_extra_args),
                OptionDescriptor::single("--scp-extra-args", &connection.scp_extra_args),
                OptionDescriptor::single("--ssh-extra-args", &connection.ssh_extra_args),
                OptionDescriptor::single("--ssh-transfer-method", &connection.ssh_transfer_method),
                OptionDescriptor::presence("--ask-become-pass", privilege.ask_pass),
                OptionDescriptor::presence("--ask-pass", connection.ask_pass),
                OptionDescriptor::presence("--ask-vault-pass", vault.ask_pass),
                OptionDescriptor::presence("--become", privilege.enabled),
                OptionDescriptor::single("--become-method", &privilege.method),
                OptionDescriptor::single("--become-user", &privilege.user),
                OptionDescriptor::single("--private-key", &self.credentials.private_key_file),
                OptionDescriptor::single("--vault-id", &vault.id),
                OptionDescriptor::single(
                    "--vault-password-file",
                    &self.credentials.vault_password_file,
                ),
                OptionDescriptor::single("--callback-whitelist", &execution.callback_whitelist),
                OptionDescriptor::number("--poll-interval", execution.poll_interval),
                OptionDescriptor::single("--strategy", &execution.strategy),
                OptionDescriptor::number("--max-fail-percentage", execution.max_fail_percentage),
                OptionDescriptor::presence("--any-errors-fatal", execution.any_errors_fatal),
                OptionDescriptor::single("--gather-subset", &execution.gather_subset),
                OptionDescriptor::number("--gather-timeout", execution.gather_timeout),
                OptionDescriptor::single("--tags", &execution.tags),
                OptionDescriptor::single("--skip-tags", &execution.skip_tags),
                OptionDescriptor::single("--start-at-task", &execution.start_at_task),
                OptionDescriptor::repeated("--extra-vars", &config.extra_vars),
            ],
        );
        args.extend(verbosity_flag(config.verbose));
        self.push_targets(&mut args);
        CommandSpec::new(CommandKind::Playbook, PLAYBOOK_EXECUTABLE, args)
    }

    fn push_targets(&self, args: &mut Vec<String>) {
        args.extend(self.targets.iter().map(|t| t.as_str().to_string()));
    }
}

fn version_command() -> CommandSpec {
    CommandSpec::new(CommandKind::VersionProbe, ANSIBLE_EXECUTABLE, vec!["--version".to_string()])
}

/// Inline inventories are accepted as-is; file inventories must exist.
pub fn validate_inventory(inventory: &str) -> Result<(), AppError> {
    if inventory.contains(INLINE_INVENTORY_SEPARATOR) || Path::new(inventory).exists() {
        Ok(())
    } else {
        Err(AppError::InventoryNotFound(inventory.to_string()))
    }
}
