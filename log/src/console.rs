//!
//! Terminal styling for emitted lines.
//!
//! Styling goes through the [`console`] crate, which only emits escape
//! codes when stdout is a color-capable terminal. Redirected output stays
//! plain `[LABEL] message` text.
//!

pub use console::style;
use console::StyledObject;

use crate::levels::{host_level, label, Level};

/// The level label, colored by severity.
pub fn styled_label(level: Level) -> StyledObject<&'static str> {
    let text = label(level);
    match host_level(level) {
        Level::Error => style(text).red().bold(),
        Level::Warn => style(text).yellow(),
        Level::Info => style(text).green(),
        _ => style(text).dim(),
    }
}

/// A complete styled line, newline terminated.
pub fn styled_line(level: Level, message: &str) -> String {
    format!("[{}] {message}\n", styled_label(level))
}
