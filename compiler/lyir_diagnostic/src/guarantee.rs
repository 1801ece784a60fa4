//! Type-level proof that an error was reported.

use std::fmt;

/// Proof that at least one error-or-worse diagnostic has been emitted.
///
/// Only [`Reporter`](crate::Reporter) can create one, so a function returning
/// `Result<T, ErrorGuaranteed>` cannot fail without having told the user why.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    #[inline]
    pub(crate) const fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Recover the proof from an error count.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}
