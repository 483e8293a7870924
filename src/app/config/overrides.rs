//! Command-line overrides layered on top of a loaded [`RunConfig`].

use crate::domain::RunConfig;

/// Values supplied on the command line.
///
/// Non-empty lists replace the file's lists; set flags are OR-ed in; scalar
/// values replace the file's value when present.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub playbooks: Vec<String>,
    pub inventories: Vec<String>,
    pub extra_vars: Vec<String>,
    pub limit: Option<String>,
    pub verbose: u8,
    pub check: bool,
    pub diff: bool,
    pub syntax_check: bool,
    pub list_hosts: bool,
    pub tags: Option<String>,
    pub skip_tags: Option<String>,
    pub private_key: Option<String>,
    pub vault_password: Option<String>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut RunConfig) {
        replace_if_set(&mut config.playbooks, self.playbooks);
        replace_if_set(&mut config.inventories, self.inventories);
        replace_if_set(&mut config.extra_vars, self.extra_vars);

        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if self.verbose > 0 {
            config.verbose = self.verbose;
        }

        let execution = &mut config.execution;
        execution.check |= self.check;
        execution.diff |= self.diff;
        if self.syntax_check || self.list_hosts {
            execution.syntax_check = self.syntax_check;
            execution.list_hosts = self.list_hosts;
        }
        if let Some(tags) = self.tags {
            execution.tags = tags;
        }
        if let Some(skip_tags) = self.skip_tags {
            execution.skip_tags = skip_tags;
        }

        if let Some(key) = self.private_key.filter(|k| !k.is_empty()) {
            config.connection.private_key = key;
            config.connection.private_key_file.clear();
        }
        if let Some(password) = self.vault_password.filter(|p| !p.is_empty()) {
            config.vault.password = password;
            config.vault.password_file.clear();
        }
    }
}

fn replace_if_set(target: &mut Vec<String>, values: Vec<String>) {
    if !values.is_empty() {
        *target = values;
    }
}
