//! Leveled, user-facing console output.
//!
//! A [`Reporter`] is created once per invocation from the verbosity flag and
//! handed to every command. INFO, WARNING and ERROR lines are gated by the
//! reporter's threshold; MESSAGE lines (completion banners) are always shown.
//!
//! Each line is the bracketed tag left-aligned in an eight-column field, one
//! space, then the text:
//!
//! ```text
//! [INFO]   Create directory mock.
//! [WARNING] Found config.json exist.
//! [ERROR]  Invalid regex: (invalid
//! [MESSAGE] Push completed!
//! ```

use std::fmt;
use std::io::{self, Write};

/// Severity of a gated report line, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Progress detail, shown only in verbose mode.
    Info,
    /// A recoverable surprise such as a pre-existing file.
    Warning,
    /// A failure that aborts the current command.
    Error,
}

impl Severity {
    /// Lowest severity shown for the given verbosity flag.
    #[must_use]
    pub const fn threshold_for(verbose: bool) -> Self {
        if verbose { Self::Info } else { Self::Warning }
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

const MESSAGE_TAG: &str = "MESSAGE";

/// Logging context holding the output sink and the severity threshold.
#[derive(Debug)]
pub struct Reporter<W: Write = io::Stdout> {
    sink: W,
    threshold: Severity,
}

impl Reporter {
    /// Reporter writing to standard output.
    #[must_use]
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), Severity::threshold_for(verbose))
    }
}

impl<W: Write> Reporter<W> {
    /// Create a reporter over an arbitrary sink.
    pub const fn new(sink: W, threshold: Severity) -> Self {
        Self { sink, threshold }
    }

    /// The lowest severity this reporter emits.
    #[must_use]
    pub const fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Emit an INFO line.
    pub fn info(&mut self, text: impl fmt::Display) {
        self.gated(Severity::Info, &text);
    }

    /// Emit a WARNING line.
    pub fn warning(&mut self, text: impl fmt::Display) {
        self.gated(Severity::Warning, &text);
    }

    /// Emit an ERROR line.
    pub fn error(&mut self, text: impl fmt::Display) {
        self.gated(Severity::Error, &text);
    }

    /// Emit a MESSAGE line regardless of the threshold.
    pub fn message(&mut self, text: impl fmt::Display) {
        self.write_line(MESSAGE_TAG, &text);
    }

    /// Consume the reporter and return its sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn gated(&mut self, severity: Severity, text: &dyn fmt::Display) {
        if severity >= self.threshold {
            self.write_line(severity.tag(), text);
        }
    }

    fn write_line(&mut self, tag: &str, text: &dyn fmt::Display) {
        let label = format!("[{tag}]");
        // A closed stdout must not turn a finished command into a failure.
        if let Err(error) = writeln!(self.sink, "{label:<8} {text}") {
            tracing::debug!(%error, "dropping report line");
        }
    }
}
