//! Terminal colorization for validation and listing output
//!
//! Applies ANSI escape codes using crossterm. Callers decide whether color
//! is wanted; with `colorize == false` every function returns plain text.

use crossterm::style::{Color, Stylize};

/// Format a `✓`/`✗` status line
///
/// - valid: green check mark
/// - invalid: red cross, message in default color
pub fn status_line(valid: bool, message: &str, colorize: bool) -> String {
    let mark = if valid { "✓" } else { "✗" };
    if !colorize {
        return format!("{} {}", mark, message);
    }
    let color = if valid { Color::Green } else { Color::Red };
    format!("{} {}", mark.with(color).bold(), message)
}

/// Format a group heading in a listing
pub fn heading(text: &str, colorize: bool) -> String {
    if colorize {
        format!("{}", text.with(Color::Cyan).bold())
    } else {
        text.to_string()
    }
}
