//! Run configuration domain models.

use std::path::PathBuf;

use serde::Deserialize;

use super::AppError;

/// Configuration for one automation run, loaded from `playrun.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Playbook patterns: globs, literal paths or collection references.
    #[serde(default)]
    pub playbooks: Vec<String>,
    /// Inventory files or inline host lists (`"host1,host2,"`).
    #[serde(default)]
    pub inventories: Vec<String>,
    /// Values passed as repeated `--extra-vars`.
    #[serde(default)]
    pub extra_vars: Vec<String>,
    /// Host pattern passed as `--limit`.
    #[serde(default)]
    pub limit: String,
    /// Verbosity level, rendered as `-v` .. `-vvvv`.
    #[serde(default)]
    pub verbose: u8,
    /// Exported as `ANSIBLE_CONFIG` when the file exists.
    #[serde(default)]
    pub config_file: String,
    /// Directory receiving staged credential files.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default, rename = "become")]
    pub privilege: BecomeConfig,
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub facts: FactsConfig,
    #[serde(default)]
    pub galaxy: GalaxyConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            playbooks: Vec::new(),
            inventories: Vec::new(),
            extra_vars: Vec::new(),
            limit: String::new(),
            verbose: 0,
            config_file: String::new(),
            temp_dir: default_temp_dir(),
            connection: ConnectionConfig::default(),
            privilege: BecomeConfig::default(),
            vault: VaultConfig::default(),
            execution: ExecutionConfig::default(),
            facts: FactsConfig::default(),
            galaxy: GalaxyConfig::default(),
        }
    }
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_forks() -> u32 {
    5
}

/// Connection and SSH transport settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub connection: String,
    /// Connection timeout in seconds.
    #[serde(default)]
    pub timeout: u32,
    #[serde(default = "default_forks")]
    pub forks: u32,
    /// Inline private key content, staged to a temporary file.
    #[serde(default)]
    pub private_key: String,
    /// Existing private key file, passed through as-is.
    #[serde(default)]
    pub private_key_file: String,
    #[serde(default)]
    pub ssh_common_args: String,
    #[serde(default)]
    pub ssh_extra_args: String,
    #[serde(default)]
    pub scp_extra_args: String,
    #[serde(default)]
    pub sftp_extra_args: String,
    #[serde(default)]
    pub ssh_transfer_method: String,
    #[serde(default)]
    pub ask_pass: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            connection: String::new(),
            timeout: 0,
            forks: default_forks(),
            private_key: String::new(),
            private_key_file: String::new(),
            ssh_common_args: String::new(),
            ssh_extra_args: String::new(),
            scp_extra_args: String::new(),
            sftp_extra_args: String::new(),
            ssh_transfer_method: String::new(),
            ask_pass: false,
        }
    }
}

/// Privilege escalation settings (`[become]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BecomeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub ask_pass: bool,
}

/// Vault settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    #[serde(default)]
    pub id: String,
    /// Inline vault password, staged to a temporary file.
    #[serde(default)]
    pub password: String,
    /// Existing vault password file, passed through as-is.
    #[serde(default)]
    pub password_file: String,
    #[serde(default)]
    pub ask_pass: bool,
}

/// Behavioral switches for `ansible-playbook`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    #[serde(default)]
    pub check: bool,
    #[serde(default)]
    pub diff: bool,
    #[serde(default)]
    pub flush_cache: bool,
    #[serde(default)]
    pub force_handlers: bool,
    #[serde(default)]
    pub step: bool,
    #[serde(default)]
    pub no_color: bool,
    /// Run `--syntax-check` only.
    #[serde(default)]
    pub syntax_check: bool,
    /// Run `--list-hosts` only.
    #[serde(default)]
    pub list_hosts: bool,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub skip_tags: String,
    #[serde(default)]
    pub start_at_task: String,
    #[serde(default)]
    pub callback_whitelist: String,
    #[serde(default)]
    pub poll_interval: u32,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub max_fail_percentage: u32,
    #[serde(default)]
    pub any_errors_fatal: bool,
    #[serde(default)]
    pub gather_subset: String,
    #[serde(default)]
    pub gather_timeout: u32,
}

/// Fact cache backend settings, exported through the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactsConfig {
    #[serde(default)]
    pub caching: String,
    /// Timeout in seconds.
    #[serde(default)]
    pub caching_timeout: u32,
}

/// `ansible-galaxy` dependency installation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalaxyConfig {
    /// Requirements file. Galaxy commands are only built when set.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub collections_path: String,
    #[serde(default)]
    pub ignore_certs: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub force_with_deps: bool,
    #[serde(default)]
    pub no_deps: bool,
    #[serde(default)]
    pub pre: bool,
    #[serde(default)]
    pub upgrade: bool,
    #[serde(default)]
    pub timeout: u32,
}

impl RunConfig {
    /// Reject combinations the interpreter would refuse or that are ambiguous.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.inventories.is_empty() {
            return Err(AppError::NoInventories);
        }
        if self.execution.syntax_check && self.execution.list_hosts {
            return Err(AppError::config_error(
                "syntax_check and list_hosts are mutually exclusive",
            ));
        }
        if !self.connection.private_key.is_empty() && !self.connection.private_key_file.is_empty()
        {
            return Err(AppError::config_error(
                "set either connection.private_key or connection.private_key_file, not both",
            ));
        }
        if !self.vault.password.is_empty() && !self.vault.password_file.is_empty() {
            return Err(AppError::config_error(
                "set either vault.password or vault.password_file, not both",
            ));
        }
        Ok(())
    }

    /// True when the run only inspects playbooks instead of executing them.
    pub fn is_inspection(&self) -> bool {
        self.execution.syntax_check || self.execution.list_hosts
    }
}
