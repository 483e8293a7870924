//! Run and plan command implementation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args};
use tracing::{info, warn};

use crate::app::commands::{RunOptions, plan, run};
use crate::app::config::{ConfigOverrides, DEFAULT_CONFIG_FILE, load_config};
use crate::adapters::SystemProcessRunner;
use crate::domain::{AppError, CancelToken, Environment, RunConfig};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Playbook files, glob patterns or namespace.collection.playbook references
    playbooks: Vec<String>,
    /// Run configuration file (defaults to ./playrun.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
    /// Inventory file or inline host list; repeat for several inventories
    #[arg(short = 'i', long = "inventory")]
    inventories: Vec<String>,
    /// Extra variables passed as --extra-vars; repeatable
    #[arg(short = 'e', long = "extra-vars")]
    extra_vars: Vec<String>,
    /// Limit the run to a host pattern
    #[arg(short = 'l', long)]
    limit: Option<String>,
    /// Increase verbosity (up to -vvvv)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbose: u8,
    /// Dry run without making changes
    #[arg(long)]
    check: bool,
    /// Show differences in changed files
    #[arg(long)]
    diff: bool,
    /// Only check playbook syntax
    #[arg(long, conflicts_with = "list_hosts")]
    syntax_check: bool,
    /// Only list matching hosts
    #[arg(long)]
    list_hosts: bool,
    /// Only run tasks tagged with these values
    #[arg(long)]
    tags: Option<String>,
    /// Skip tasks tagged with these values
    #[arg(long)]
    skip_tags: Option<String>,
    /// Private key content staged to a temporary file for the run
    #[arg(long, env = "PLAYRUN_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,
    /// Vault password staged to a temporary file for the run
    #[arg(long, env = "PLAYRUN_VAULT_PASSWORD", hide_env_values = true)]
    vault_password: Option<String>,
}

impl RunArgs {
    /// Load the config file, if any, and layer these arguments over it.
    fn into_config(self) -> Result<RunConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                load_config(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => RunConfig::default(),
        };

        ConfigOverrides {
            playbooks: self.playbooks,
            inventories: self.inventories,
            extra_vars: self.extra_vars,
            limit: self.limit,
            verbose: self.verbose,
            check: self.check,
            diff: self.diff,
            syntax_check: self.syntax_check,
            list_hosts: self.list_hosts,
            tags: self.tags,
            skip_tags: self.skip_tags,
            private_key: self.private_key,
            vault_password: self.vault_password,
        }
        .apply(&mut config);
        Ok(config)
    }
}

pub fn run_playbooks(args: RunArgs, trace: bool) -> Result<(), AppError> {
    let config = args.into_config()?;
    let runner = SystemProcessRunner::new();
    let host = Environment::from_host();
    let mut stdout = io::stdout();
    let trace: Option<&mut dyn Write> = if trace { Some(&mut stdout) } else { None };

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel);

    let outcome = run::execute(&config, &runner, &host, &cancel, RunOptions { trace })?;
    println!("✅ Completed {} command(s)", outcome.commands_run);
    Ok(())
}

/// Route SIGINT, SIGTERM and SIGHUP to `cancel` so the running command is
/// stopped and staged credential files are removed before exiting.
fn install_interrupt_handler(cancel: &CancelToken) {
    let token = cancel.clone();
    let installed = ctrlc::set_handler(move || {
        info!("received termination signal; cancelling run");
        token.cancel();
    });
    if let Err(e) = installed {
        warn!(error = %e, "could not install signal handler");
    }
}

pub fn run_plan(args: RunArgs, json: bool) -> Result<(), AppError> {
    let config = args.into_config()?;
    let commands = plan::execute(&config)?;
    if json {
        println!("{}", plan::render_json(&commands)?);
    } else {
        print!("{}", plan::render_text(&commands));
    }
    Ok(())
}
