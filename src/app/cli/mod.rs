//! CLI Adapter.

mod check_key;
mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "PLAYRUN_LOG";

#[derive(Parser)]
#[command(name = "playrun")]
#[command(version)]
#[command(
    about = "Compile a playbook run configuration into ansible invocations and execute them",
    long_about = None
)]
struct Cli {
    /// Echo every command line before running it and enable debug logging
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install galaxy requirements and run playbooks against each inventory
    #[clap(visible_alias = "r")]
    Run {
        #[command(flatten)]
        args: run::RunArgs,
    },
    /// Print the commands a run would execute without executing them
    #[clap(visible_alias = "p")]
    Plan {
        #[command(flatten)]
        args: run::RunArgs,
        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the envelope of a private key file
    CheckKey {
        /// Private key file to check
        path: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result: Result<(), AppError> = match cli.command {
        Commands::Run { args } => run::run_playbooks(args, cli.debug),
        Commands::Plan { args, json } => run::run_plan(args, json),
        Commands::CheckKey { path } => check_key::run_check_key(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
