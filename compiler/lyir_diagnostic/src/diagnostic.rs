//! Core diagnostic types.

use std::fmt;

use lyir_ir::Location;

/// Severity level for diagnostics.
///
/// Ordered from least to most severe. Only the split between
/// [`is_error`](Self::is_error) and the rest affects control flow.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Info,
    Note,
    Warning,
    Error,
    Fatal,
    /// Invariant violation inside the compiler itself.
    InternalError,
}

impl Severity {
    pub const ALL: [Severity; 6] = [
        Severity::Info,
        Severity::Note,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
        Severity::InternalError,
    ];

    /// Error, fatal, and internal-error diagnostics mark the run as failed.
    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Severity::Error | Severity::Fatal | Severity::InternalError
        )
    }

    /// Tag printed after the location prefix.
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Info => "Info:",
            Severity::Note => "Note:",
            Severity::Warning => "Warning:",
            Severity::Error => "Error:",
            Severity::Fatal => "Fatal:",
            Severity::InternalError => "Internal Compiler Exception:",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
            Severity::InternalError => write!(f, "internal compiler error"),
        }
    }
}

/// A message tied to a source location.
///
/// Value type: build it, hand it to a [`Reporter`](crate::Reporter), drop it.
/// Messages are formatted at the call site:
///
/// ```
/// use lyir_diagnostic::Diagnostic;
/// use lyir_ir::{Location, SourceId};
///
/// let loc = Location::new(SourceId::new(0), 4, 3);
/// let diag = Diagnostic::error(loc, format!("unknown identifier `{}`", "foo"));
/// assert!(diag.is_error());
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub location: Location,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: Location, message: impl Into<String>) -> Self {
        Diagnostic {
            location,
            severity,
            message: message.into(),
        }
    }

    pub fn info(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, location, message)
    }

    pub fn note(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, location, message)
    }

    pub fn warn(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, location, message)
    }

    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, message)
    }

    pub fn fatal(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, location, message)
    }

    /// Internal compiler error.
    pub fn ice(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::InternalError, location, message)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}
