//! Shared testing utilities for playrun CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated working directory for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    secrets_dir: PathBuf,
    bin_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        let secrets_dir = root.path().join("secrets");
        let bin_dir = root.path().join("bin");
        for dir in [&work_dir, &secrets_dir, &bin_dir] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }
        Self { root, work_dir, secrets_dir, bin_dir }
    }

    /// Directory CLI invocations run in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Directory used as `temp_dir` for staged credentials.
    pub fn secrets_dir(&self) -> &Path {
        &self.secrets_dir
    }

    /// Build a command for invoking the compiled `playrun` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("playrun").expect("Failed to locate playrun binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("PLAYRUN_PRIVATE_KEY")
            .env_remove("PLAYRUN_VAULT_PASSWORD")
            .env_remove("PLAYRUN_LOG");
        cmd
    }

    /// Build a command whose PATH resolves `ansible*` to the fake scripts.
    pub fn cli_with_fake_ansible(&self) -> Command {
        let mut cmd = self.cli();
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.env("PATH", format!("{}:{}", self.bin_dir.display(), path));
        cmd
    }

    /// Write a file relative to the work directory.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a minimal playbook.
    pub fn write_playbook(&self, relative: &str) -> PathBuf {
        self.write(relative, "- hosts: all\n  tasks: []\n")
    }

    /// Write `playrun.toml` with `temp_dir` pointing at the secrets directory.
    pub fn write_config(&self, body: &str) -> PathBuf {
        let content = format!("temp_dir = {:?}\n{}", self.secrets_dir.display().to_string(), body);
        self.write("playrun.toml", &content)
    }

    /// Number of files currently in the secrets directory.
    pub fn staged_file_count(&self) -> usize {
        fs::read_dir(&self.secrets_dir).expect("Failed to read secrets dir").count()
    }

    /// Install fake `ansible`, `ansible-galaxy` and `ansible-playbook` scripts
    /// that append their invocation to `calls.log`. `ansible-playbook` exits
    /// with `playbook_exit`.
    #[cfg(unix)]
    pub fn install_fake_ansible(&self, playbook_exit: i32) {
        self.install_fake_ansible_with(&format!("exit {playbook_exit}"));
    }

    /// Like [`install_fake_ansible`](Self::install_fake_ansible), with
    /// `playbook_tail` run by `ansible-playbook` after logging its call.
    #[cfg(unix)]
    pub fn install_fake_ansible_with(&self, playbook_tail: &str) {
        use std::os::unix::fs::PermissionsExt;

        let log = self.calls_log();
        for (name, tail) in
            [("ansible", "exit 0"), ("ansible-galaxy", "exit 0"), ("ansible-playbook", playbook_tail)]
        {
            let script = format!(
                "#!/bin/sh\necho \"{name} $*\" >> \"{log}\"\nif [ -n \"$ANSIBLE_FORCE_COLOR\" ]; then echo \"{name} color=$ANSIBLE_FORCE_COLOR\" >> \"{log}\"; fi\n{tail}\n",
                log = log.display(),
            );
            let path = self.bin_dir.join(name);
            fs::write(&path, script).expect("Failed to write fake script");
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
                .expect("Failed to mark fake script executable");
        }
    }

    /// Unwrapped `std::process::Command` for tests that need to signal the
    /// running binary.
    pub fn spawnable_cli_with_fake_ansible(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_playrun"));
        let path = std::env::var("PATH").unwrap_or_default();
        cmd.current_dir(&self.work_dir)
            .env_remove("PLAYRUN_PRIVATE_KEY")
            .env_remove("PLAYRUN_VAULT_PASSWORD")
            .env_remove("PLAYRUN_LOG")
            .env("PATH", format!("{}:{}", self.bin_dir.display(), path));
        cmd
    }

    /// Names of the files currently in the secrets directory.
    pub fn staged_files(&self) -> Vec<String> {
        fs::read_dir(&self.secrets_dir)
            .expect("Failed to read secrets dir")
            .map(|entry| entry.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Path of the log written by the fake scripts.
    pub fn calls_log(&self) -> PathBuf {
        self.root.path().join("calls.log")
    }

    /// Lines of the fake-script log.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}
