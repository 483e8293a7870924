use serde::Serialize;

use super::prepare::{PreparedRun, prepare};
use crate::domain::{AppError, CommandSpec, RunConfig};

/// Build the command list without executing anything.
///
/// Credential files are staged so the listing shows real paths, then removed
/// before returning.
pub fn execute(config: &RunConfig) -> Result<Vec<CommandSpec>, AppError> {
    let PreparedRun { commands, secrets } = prepare(config)?;
    drop(secrets);
    Ok(commands)
}

#[derive(Serialize)]
struct PlanEntry<'a> {
    position: usize,
    #[serde(flatten)]
    command: &'a CommandSpec,
}

/// Render commands as `$ <command line>` lines.
pub fn render_text(commands: &[CommandSpec]) -> String {
    commands.iter().map(|c| format!("$ {}\n", c.command_line())).collect()
}

/// Render commands as a JSON array of `{position, kind, program, args}`.
pub fn render_json(commands: &[CommandSpec]) -> Result<String, AppError> {
    let entries: Vec<PlanEntry<'_>> = commands
        .iter()
        .enumerate()
        .map(|(index, command)| PlanEntry { position: index + 1, command })
        .collect();
    serde_json::to_string_pretty(&entries).map_err(|e| AppError::Serialization(e.to_string()))
}
