//! Source registry.
//!
//! Maps every input (file or synthetic string) to a stable [`SourceId`] equal
//! to its registration index, and resolves byte locations to line/column.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use lyir_diagnostic::{LineColumn, LineOffsetTable, LocationLookup};
use lyir_ir::{Location, SourceId};
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

/// A source file could not be loaded. The registry is unchanged.
#[derive(Debug, Error)]
pub enum SourceLoadError {
    #[error("could not read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("too many sources registered")]
    TooManySources,
}

/// A location could not be resolved to a line and column.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown source {0}")]
    UnknownSource(SourceId),
    #[error("location {offset}+{length} is outside a source of {source_len} bytes")]
    OutOfRange {
        offset: u32,
        length: u32,
        source_len: usize,
    },
}

/// One registered input.
pub struct Source {
    name: String,
    text: Box<[u8]>,
    lines: LineOffsetTable,
}

impl Source {
    fn new(name: String, text: Box<[u8]>) -> Self {
        let lines = LineOffsetTable::build(&text);
        Source { name, text, lines }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw bytes; no encoding is enforced.
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Resolve `offset..offset + length` within this source.
    pub fn resolve(&self, offset: u32, length: u32) -> Result<LineColumn, ResolveError> {
        let source_len = self.text.len();
        let end = u64::from(offset) + u64::from(length);
        if offset as usize >= source_len || end > source_len as u64 {
            return Err(ResolveError::OutOfRange {
                offset,
                length,
                source_len,
            });
        }
        Ok(self.lines.offset_to_line_col(offset))
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish_non_exhaustive()
    }
}

/// Every source registered in a compilation.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
    /// First source registered under each name.
    by_name: FxHashMap<String, SourceId>,
    /// Files by the exact path they were loaded from.
    by_path: FxHashMap<PathBuf, SourceId>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `path`, loading it on first use.
    ///
    /// Paths are matched exactly, byte for byte; a path that was already
    /// registered is never read again. The source's name is the path's
    /// lossy display form.
    pub fn get_or_add_from_file(&mut self, path: impl AsRef<Path>) -> Result<SourceId, SourceLoadError> {
        let path = path.as_ref();
        if let Some(&id) = self.by_path.get(path) {
            return Ok(id);
        }

        let text = std::fs::read(path).map_err(|source| SourceLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.to_string_lossy().into_owned();
        let id = self.insert(name, text.into_boxed_slice())?;
        self.by_path.insert(path.to_path_buf(), id);
        debug!(%id, path = %path.display(), "source loaded");
        Ok(id)
    }

    /// Register in-memory text under `name`.
    ///
    /// Always creates a new entry, even if `name` is already taken.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` sources are registered.
    pub fn add_from_string(&mut self, name: impl Into<String>, text: impl Into<Vec<u8>>) -> SourceId {
        let text = text.into().into_boxed_slice();
        let id = self
            .insert(name.into(), text)
            .unwrap_or_else(|e| panic!("{}", e));
        debug!(%id, "source added from string");
        id
    }

    fn insert(&mut self, name: String, text: Box<[u8]>) -> Result<SourceId, SourceLoadError> {
        let raw = u32::try_from(self.sources.len()).map_err(|_| SourceLoadError::TooManySources)?;
        let id = SourceId::new(raw);
        self.by_name.entry(name.clone()).or_insert(id);
        self.sources.push(Source::new(name, text));
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: SourceId) -> Option<&Source> {
        self.sources.get(id.index())
    }

    pub fn name(&self, id: SourceId) -> Option<&str> {
        self.get(id).map(Source::name)
    }

    pub fn text(&self, id: SourceId) -> Option<&[u8]> {
        self.get(id).map(Source::text)
    }

    /// Id of the first source registered under `name`.
    pub fn find(&self, name: &str) -> Option<SourceId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "insert caps the source count at u32::MAX"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (SourceId, &Source)> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| (SourceId::new(i as u32), source))
    }

    /// 1-based line and byte column of `location`.
    pub fn resolve_location(&self, location: Location) -> Result<LineColumn, ResolveError> {
        let source = self
            .get(location.sourceid)
            .ok_or(ResolveError::UnknownSource(location.sourceid))?;
        source.resolve(location.offset, location.length)
    }

    /// Drop every source, returning how many there were and their total size.
    pub(crate) fn clear(&mut self) -> (usize, usize) {
        let count = self.sources.len();
        let bytes = self.sources.iter().map(|s| s.text.len()).sum();
        self.sources.clear();
        self.by_name.clear();
        self.by_path.clear();
        (count, bytes)
    }
}

impl LocationLookup for SourceRegistry {
    fn source_name(&self, sourceid: SourceId) -> Option<&str> {
        self.name(sourceid)
    }

    fn line_column(&self, location: Location) -> Option<LineColumn> {
        self.resolve_location(location).ok()
    }
}
