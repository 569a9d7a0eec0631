use chrono::{DateTime, Local};
use colored::Color;

use crate::severity::{Severity, UNKNOWN_TAG};

/// Resets every text attribute.
pub const RESET: &str = "\x1b[0m";
/// Underlines until the next reset.
pub const UNDERLINE: &str = "\x1b[4m";

/// Source location attached to a line by `log_warning!`/`log_error!`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
}

/// Escape sequence selecting `color` as foreground.
pub fn escape(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

/// `YYYY-MM-DD HH:MM:SS: `
pub fn timestamp(time: DateTime<Local>) -> String {
    time.format("%F %T: ").to_string()
}

/// Timestamp followed by the level tag, wrapped in the level color when
/// `colorize` is set. `None` stands for an ordinal outside the severity set
/// and is never colored.
pub fn prefix(severity: Option<Severity>, time: DateTime<Local>, colorize: bool) -> String {
    let tag = severity.map_or(UNKNOWN_TAG, Severity::tag);
    let plain = timestamp(time) + tag;
    match severity.and_then(Severity::color) {
        Some(color) if colorize => format!("{}{plain}{RESET}", escape(color)),
        _ => plain,
    }
}

/// `file:line::function: `, the location part underlined in `color` when
/// `colorize` is set.
pub fn call_site(site: &CallSite<'_>, color: Option<Color>, colorize: bool) -> String {
    let CallSite {
        file,
        line,
        function,
    } = site;
    match color {
        Some(color) if colorize => {
            format!("{}{UNDERLINE}{file}:{line}{RESET}::{function}: ", escape(color))
        }
        _ => format!("{file}:{line}::{function}: "),
    }
}

/// A complete line without its terminator. `Simple` lines are the message
/// alone; otherwise the call site, if any, sits between prefix and message.
pub fn line(
    severity: Option<Severity>,
    site: Option<&CallSite<'_>>,
    message: &str,
    time: DateTime<Local>,
    colorize: bool,
) -> String {
    if severity == Some(Severity::Simple) {
        return message.to_string();
    }
    let mut line = prefix(severity, time, colorize);
    if let Some(site) = site {
        line += &call_site(site, severity.and_then(Severity::color), colorize);
    }
    line + message
}
