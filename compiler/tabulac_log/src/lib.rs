//! Provides the severity tags and the terminal message formatting used when
//! logging/printing compiler messages to the console.

use std::fmt::Display;

use colored::Colorize;
use derive_new::new;

/// Represents the severity of a message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The message reports an error; the compilation is considered failed.
    Error,

    /// The message reports a warning; the compilation carries on.
    Warning,

    /// The message is informational.
    Info,
}

/// Represents a severity-tagged message line.
///
/// The [`Display`] implementation renders the colored severity header
/// followed by the message, e.g. `[error]: duplicate table name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Message<T> {
    /// The severity of the message.
    pub severity: Severity,

    /// The content of the message.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = match self.severity {
            Severity::Error => "[error]:".bright_red().bold(),
            Severity::Warning => "[warning]:".yellow().bold(),
            Severity::Info => "[info]:".bright_green().bold(),
        };

        write!(f, "{header} {}", self.display.to_string().bold())
    }
}
