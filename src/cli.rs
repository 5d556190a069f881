use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "phantom")]
#[command(about = "Manage Git worktrees as named, disposable working copies", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Run as if phantom was started in <DIR>
    #[arg(short = 'C', global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Verbose output (-v: info, -vv: debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a worktree on a new branch
    Create {
        /// Worktree name, also used as the branch name
        name: String,

        /// Start the branch from this ref (default: HEAD)
        #[arg(short, long, value_name = "REF")]
        base: Option<String>,

        /// Copy a file or directory from the repository root (repeatable)
        #[arg(long = "copy-file", value_name = "PATH")]
        copy_files: Vec<String>,

        #[command(flatten)]
        open: OpenArgs,

        #[command(flatten)]
        tmux: TmuxArgs,
    },

    /// Create a worktree for an existing branch
    Attach {
        /// Name of the existing branch
        name: String,

        /// Copy a file or directory from the repository root (repeatable)
        #[arg(long = "copy-file", value_name = "PATH")]
        copy_files: Vec<String>,

        #[command(flatten)]
        open: OpenArgs,
    },

    /// Delete a worktree and its branch
    Delete {
        /// Worktree to delete
        name: Option<String>,

        /// Delete even with uncommitted changes
        #[arg(short, long)]
        force: bool,

        /// Delete the worktree you are standing in
        #[arg(long)]
        current: bool,
    },

    /// List worktrees
    List {
        /// Print only names, one per line
        #[arg(long)]
        names: bool,
    },

    /// Print the path of a worktree
    Where {
        /// Worktree to locate
        name: String,
    },

    /// Run a command inside a worktree
    Exec {
        /// Worktree to run in
        name: String,

        /// Command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,

        #[command(flatten)]
        tmux: TmuxArgs,
    },

    /// Open an interactive shell inside a worktree
    Shell {
        /// Worktree to enter
        name: String,

        #[command(flatten)]
        tmux: TmuxArgs,
    },

    /// Generate a shell completion script
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the version
    Version,
}

/// What to open once a worktree exists.
#[derive(Args, Debug, Default, Clone)]
pub struct OpenArgs {
    /// Open an interactive shell in the new worktree
    #[arg(short, long)]
    pub shell: bool,

    /// Run a command in the new worktree
    #[arg(short = 'x', long, value_name = "COMMAND")]
    pub exec: Option<String>,
}

/// Run in a new tmux window or pane instead of the current terminal.
#[derive(Args, Debug, Default, Clone)]
pub struct TmuxArgs {
    /// Open in a new tmux window
    #[arg(short, long)]
    pub tmux: bool,

    /// Open in a tmux pane split vertically
    #[arg(long)]
    pub tmux_vertical: bool,

    /// Open in a tmux pane split horizontally
    #[arg(long)]
    pub tmux_horizontal: bool,
}
