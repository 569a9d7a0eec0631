use std::fmt;

use colored::Color;
use log::Level;

/// Tag written for ordinals outside the severity set.
pub const UNKNOWN_TAG: &str = " [UNKNOWN]: ";

/// Severity of a console line.
///
/// `Simple` is raw passthrough: no timestamp, no tag, no color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Simple,
    Input,
    Result,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub const COUNT: usize = 6;

    pub const ALL: [Severity; Severity::COUNT] = [
        Severity::Simple,
        Severity::Input,
        Severity::Result,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
    ];

    /// Position of the level in the destination table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Tag inserted between the timestamp and the message. `Simple` has none.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Simple => "",
            Severity::Input => " [INPUT]:   ",
            Severity::Result => " [RESULT]:  ",
            Severity::Info => " [INFO]:    ",
            Severity::Warning => " [WARNING]: ",
            Severity::Error => " [ERROR]:   ",
        }
    }

    /// Foreground color of the prefix on a console destination.
    pub fn color(self) -> Option<Color> {
        match self {
            Severity::Simple => None,
            Severity::Input => Some(Color::Blue),
            Severity::Result => Some(Color::Cyan),
            Severity::Info => Some(Color::Green),
            Severity::Warning => Some(Color::Yellow),
            Severity::Error => Some(Color::Red),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Simple => "SIMPLE",
            Severity::Input => "INPUT",
            Severity::Result => "RESULT",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(name)
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warning,
            Level::Info => Severity::Info,
            Level::Debug => Severity::Result,
            Level::Trace => Severity::Input,
        }
    }
}
