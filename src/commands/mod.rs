//! Command handlers for the `phantom` binary.
//!
//! Handlers turn parsed arguments into lifecycle operations and print the
//! results. Each returns the process exit code on success.

pub(crate) mod completion;
pub(crate) mod context;
pub(crate) mod list;
pub(crate) mod process;
pub(crate) mod worktree;

use phantom::PhantomError;
use phantom::styling::error_message;
use phantom::worktree::error::{EXIT_GENERAL_ERROR, EXIT_VALIDATION_ERROR};

use crate::cli::{Cli, Commands};
use context::Session;

/// Failure of a command handler.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CommandError {
    #[error(transparent)]
    Phantom(#[from] PhantomError),

    /// Invalid combination of arguments (exit 3)
    #[error("{0}")]
    Usage(String),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl CommandError {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        CommandError::Usage(message.into())
    }

    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            CommandError::Phantom(e) => e.exit_code(),
            CommandError::Usage(_) => EXIT_VALIDATION_ERROR,
            CommandError::Other(_) => EXIT_GENERAL_ERROR,
        }
    }

    pub(crate) fn styled(&self) -> String {
        match self {
            CommandError::Phantom(e) => e.styled(),
            other => error_message(other.to_string()),
        }
    }
}

pub(crate) type CommandResult = Result<i32, CommandError>;

/// Run the parsed command line.
pub(crate) fn run(cli: Cli) -> CommandResult {
    let directory = cli.directory.as_deref();
    match cli.command {
        Commands::Create {
            name,
            base,
            copy_files,
            open,
            tmux,
        } => worktree::handle_create(
            &Session::open(directory)?,
            &name,
            base,
            copy_files,
            &open,
            &tmux,
        ),
        Commands::Attach {
            name,
            copy_files,
            open,
        } => worktree::handle_attach(&Session::open(directory)?, &name, copy_files, &open),
        Commands::Delete {
            name,
            force,
            current,
        } => worktree::handle_delete(&Session::open(directory)?, name.as_deref(), force, current),
        Commands::List { names } => list::handle_list(&Session::open(directory)?, names),
        Commands::Where { name } => list::handle_where(&Session::open(directory)?, &name),
        Commands::Exec {
            name,
            command,
            tmux,
        } => process::handle_exec(&Session::open(directory)?, &name, &command, &tmux),
        Commands::Shell { name, tmux } => {
            process::handle_shell(&Session::open(directory)?, &name, &tmux)
        }
        Commands::Completion { shell } => completion::handle_completion(shell),
        Commands::Version => {
            phantom::styling::println!("phantom {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}
