pub mod config;
pub mod context;
pub mod git;
pub mod path;
pub mod process;
pub mod shell_exec;
pub mod styling;
pub mod worktree;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for the common entry points
pub use context::PhantomContext;
pub use worktree::PhantomError;
