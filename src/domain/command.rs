use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

use serde::Serialize;

/// Executable for playbook runs.
pub const PLAYBOOK_EXECUTABLE: &str = "ansible-playbook";
/// Executable that answers the version probe.
pub const ANSIBLE_EXECUTABLE: &str = "ansible";
/// Dependency installer executable.
pub const GALAXY_EXECUTABLE: &str = "ansible-galaxy";

/// Which part of the run a command belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    VersionProbe,
    RoleInstall,
    CollectionInstall,
    Playbook,
}

/// One fully formed external invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    kind: CommandKind,
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(kind: CommandKind, program: impl Into<String>, args: Vec<String>) -> Self {
        Self { kind, program: program.into(), args }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Executable plus every argument, space-joined.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Process environment passed explicitly to every invocation.
///
/// Captured once from the host and overlaid; the host environment itself is
/// never mutated. Keys and values are kept as raw OS strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<OsString, OsString>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment, including entries that
    /// are not valid UTF-8.
    pub fn from_host() -> Self {
        Self { vars: std::env::vars_os().collect() }
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Copy of `self` with every entry of `overlay` applied on top.
    pub fn overlaid(&self, overlay: &Environment) -> Environment {
        let mut merged = self.clone();
        merged.vars.extend(overlay.vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Value of `key` when it is valid UTF-8.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
