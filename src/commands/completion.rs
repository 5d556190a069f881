use clap::CommandFactory;
use clap_complete::{Shell, generate};

use super::CommandResult;
use crate::cli::Cli;

/// Print the completion script for `shell` to stdout.
pub(crate) fn handle_completion(shell: Shell) -> CommandResult {
    let mut command = Cli::command();
    generate(shell, &mut command, "phantom", &mut std::io::stdout());
    Ok(0)
}
