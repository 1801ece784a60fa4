//! Diagnostic Emitters
//!
//! Rendering is split in two: [`format_prefix`] builds the
//! `name(line, column): Tag` prefix from a [`LocationLookup`], and an
//! emitter writes the prefix and message to its output.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write as _;
use std::io;
use std::sync::Arc;

use lyir_ir::Location;
use parking_lot::Mutex;

use crate::{Diagnostic, LocationLookup, Severity};

/// ANSI color codes for terminal output.
pub(crate) mod colors {
    pub const CYAN: &str = "\x1b[36m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const RED: &str = "\x1b[31m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const RESET: &str = "\x1b[0m";
}

impl Severity {
    /// ANSI color for this severity's tag.
    pub(crate) const fn color(self) -> &'static str {
        match self {
            Severity::Info => colors::CYAN,
            Severity::Note => colors::BRIGHT_GREEN,
            Severity::Warning => colors::YELLOW,
            Severity::Error => colors::RED,
            Severity::Fatal => colors::BRIGHT_RED,
            Severity::InternalError => colors::MAGENTA,
        }
    }
}

/// How to render a diagnostic prefix.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PrefixStyle {
    /// Print `name[offset]` instead of `name(line, column)`.
    pub byte_positions: bool,
    /// Wrap the severity tag in ANSI color codes.
    pub colors: bool,
}

/// Render `location` as `name(line, column)` or, with `byte_positions`,
/// `name[offset]`.
///
/// Unknown sources render as `<unknown>`; locations that fail to resolve
/// render as `(0, 0)`.
pub fn format_location(
    lookup: &dyn LocationLookup,
    location: Location,
    byte_positions: bool,
) -> String {
    let name = lookup.source_name(location.sourceid).unwrap_or("<unknown>");
    let mut out = String::with_capacity(name.len() + 16);
    out.push_str(name);

    if byte_positions {
        let _ = write!(out, "[{}]", location.offset);
    } else {
        match lookup.line_column(location) {
            Some(lc) => {
                let _ = write!(out, "{lc}");
            }
            None => out.push_str("(0, 0)"),
        }
    }
    out
}

/// Build the `name(line, column): Tag` prefix for a diagnostic.
pub fn format_prefix(
    lookup: &dyn LocationLookup,
    location: Location,
    severity: Severity,
    style: PrefixStyle,
) -> String {
    let mut prefix = format_location(lookup, location, style.byte_positions);
    prefix.push_str(": ");
    if style.colors {
        let _ = write!(
            prefix,
            "{}{}{}",
            severity.color(),
            severity.tag(),
            colors::RESET
        );
    } else {
        prefix.push_str(severity.tag());
    }
    prefix
}

/// Trait for writing rendered diagnostics somewhere.
pub trait DiagnosticEmitter {
    /// Write one diagnostic whose prefix has already been formatted.
    fn emit(&mut self, prefix: &str, diagnostic: &Diagnostic);

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a summary of errors/warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Cloneable in-memory writer.
///
/// Lets a caller keep a handle on output written by an emitter that has been
/// moved into a reporter.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
