//! Styling for terminal output.
//!
//! - anstream for auto-detecting color support (respects NO_COLOR, CLICOLOR_FORCE)
//! - color-print `cformat!` for inline markup
//!
//! Every user-facing line goes through one of the message helpers so the
//! emoji and color vocabulary stays consistent across commands and errors.

use anstyle::{AnsiColor, Color, Style};
use color_print::cformat;

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

/// Success emoji: `cformat!("{SUCCESS_EMOJI} <green>message</>")`
pub const SUCCESS_EMOJI: &str = "✅";

/// Error emoji: `cformat!("{ERROR_EMOJI} <red>message</>")`
pub const ERROR_EMOJI: &str = "❌";

/// Warning emoji: `cformat!("{WARNING_EMOJI} <yellow>message</>")`
pub const WARNING_EMOJI: &str = "🟡";

/// Hint emoji: `cformat!("{HINT_EMOJI} <dim>message</>")`
pub const HINT_EMOJI: &str = "💡";

/// Info emoji for neutral status
pub const INFO_EMOJI: &str = "⚪";

/// Worktree names in `list` output
pub const NAME: Style = Style::new().bold();

/// The `dirty` marker in `list` output
pub const DIRTY: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Branch names in `list` output
pub const BRANCH: Style = Style::new().dimmed();

/// Format an error message with emoji and red styling
///
/// Content can include inner styling like `<bold>`:
/// ```ignore
/// error_message(cformat!("Worktree <bold>{name}</> not found"))
/// ```
pub fn error_message(content: impl AsRef<str>) -> String {
    cformat!("{ERROR_EMOJI} <red>{}</>", content.as_ref())
}

/// Format a hint message with emoji and dim styling
pub fn hint_message(content: impl AsRef<str>) -> String {
    cformat!("{HINT_EMOJI} <dim>{}</>", content.as_ref())
}

/// Format a warning message with emoji and yellow styling
pub fn warning_message(content: impl AsRef<str>) -> String {
    cformat!("{WARNING_EMOJI} <yellow>{}</>", content.as_ref())
}

/// Format a success message with emoji and green styling
pub fn success_message(content: impl AsRef<str>) -> String {
    cformat!("{SUCCESS_EMOJI} <green>{}</>", content.as_ref())
}

/// Format an info message with emoji (no color)
pub fn info_message(content: impl AsRef<str>) -> String {
    cformat!("{INFO_EMOJI} {}", content.as_ref())
}
