//! Diagnostic reporting with a persistent error flag.

use std::fmt;

use tracing::debug;

use crate::{
    format_prefix, Diagnostic, DiagnosticEmitter, ErrorGuaranteed, LocationLookup, PrefixStyle,
    Severity,
};

/// Routes diagnostics to an emitter and remembers whether any error was seen.
///
/// The error flag is monotone: once an error, fatal, or internal-error
/// diagnostic has been emitted it stays set for the reporter's lifetime.
pub struct Reporter {
    emitter: Box<dyn DiagnosticEmitter + Send>,
    style: PrefixStyle,
    has_reported_errors: bool,
    counts: [usize; Severity::ALL.len()],
}

impl Reporter {
    pub fn new(emitter: Box<dyn DiagnosticEmitter + Send>, style: PrefixStyle) -> Self {
        Reporter {
            emitter,
            style,
            has_reported_errors: false,
            counts: [0; Severity::ALL.len()],
        }
    }

    #[inline]
    pub fn style(&self) -> PrefixStyle {
        self.style
    }

    pub fn set_style(&mut self, style: PrefixStyle) {
        self.style = style;
    }

    /// Render and write one diagnostic.
    ///
    /// Returns a proof token when the diagnostic is error-or-worse.
    pub fn emit(
        &mut self,
        diagnostic: &Diagnostic,
        lookup: &dyn LocationLookup,
    ) -> Option<ErrorGuaranteed> {
        let prefix = format_prefix(lookup, diagnostic.location, diagnostic.severity, self.style);
        self.emitter.emit(&prefix, diagnostic);
        self.counts[diagnostic.severity.index()] += 1;

        debug!(
            severity = %diagnostic.severity,
            source = diagnostic.location.sourceid.raw(),
            offset = diagnostic.location.offset,
            "diagnostic emitted"
        );

        if diagnostic.is_error() {
            self.has_reported_errors = true;
            Some(ErrorGuaranteed::new())
        } else {
            None
        }
    }

    /// Emit a diagnostic known to be error-or-worse.
    ///
    /// # Panics
    /// Panics before emitting anything if `diagnostic` is below error
    /// severity.
    pub fn emit_error(
        &mut self,
        diagnostic: &Diagnostic,
        lookup: &dyn LocationLookup,
    ) -> ErrorGuaranteed {
        assert!(
            diagnostic.is_error(),
            "emit_error called with a {} diagnostic",
            diagnostic.severity
        );
        match self.emit(diagnostic, lookup) {
            Some(guarantee) => guarantee,
            None => unreachable!("error diagnostics always yield a guarantee"),
        }
    }

    #[inline]
    pub fn has_reported_errors(&self) -> bool {
        self.has_reported_errors
    }

    /// Number of diagnostics emitted at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.counts[severity.index()]
    }

    /// Error, fatal, and internal-error diagnostics combined.
    pub fn error_count(&self) -> usize {
        Severity::ALL
            .into_iter()
            .filter(|s| s.is_error())
            .map(|s| self.count(s))
            .sum()
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Proof of a prior error, if one was reported.
    pub fn error_guaranteed(&self) -> Option<ErrorGuaranteed> {
        self.has_reported_errors.then(ErrorGuaranteed::new)
    }

    pub fn flush(&mut self) {
        self.emitter.flush();
    }

    /// Write the "aborting due to ..." summary line, if there is anything to say.
    pub fn emit_summary(&mut self) {
        let (errors, warnings) = (self.error_count(), self.warning_count());
        self.emitter.emit_summary(errors, warnings);
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("style", &self.style)
            .field("has_reported_errors", &self.has_reported_errors)
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}
