//! Source lookup seam between diagnostics and whatever owns the sources.

use lyir_ir::{Location, SourceId};

use crate::LineColumn;

/// Source information needed to render a diagnostic prefix.
///
/// This trait keeps the diagnostic crate independent of the source registry:
/// anything that can name a source and resolve a location can drive an
/// emitter.
pub trait LocationLookup {
    /// Display name of a source, or `None` if the id is unknown.
    fn source_name(&self, sourceid: SourceId) -> Option<&str>;

    /// 1-based line and column, or `None` if the location is out of range.
    fn line_column(&self, location: Location) -> Option<LineColumn>;
}
