//! Diagnostic system for the Lyir compiler.
//!
//! A diagnostic is a location, a severity, and a message. It is rendered as
//!
//! ```text
//! <source-name>(<line>, <column>): <Tag> <message>
//! <source-name>[<byte-offset>]: <Tag> <message>
//! ```
//!
//! depending on [`PrefixStyle::byte_positions`], with the tag colorized when
//! color output is enabled.
//!
//! # Error Tracking
//!
//! [`Reporter`] owns the emitter and a persistent "has reported errors" flag.
//! Emitting an error, fatal, or internal-error diagnostic sets the flag and
//! yields an [`ErrorGuaranteed`] token; nothing unwinds. Pipeline stages
//! check the flag at their checkpoints.

mod diagnostic;
pub mod emitter;
mod guarantee;
mod lookup;
mod reporter;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{
    format_location, format_prefix, ColorMode, DiagnosticEmitter, PrefixStyle, SharedBuffer,
    TerminalEmitter,
};
pub use guarantee::ErrorGuaranteed;
pub use lookup::LocationLookup;
pub use reporter::Reporter;
pub use span_utils::{LineColumn, LineOffsetTable};
