//! Source ids and byte-range locations.

use std::fmt;

use thiserror::Error;

/// Stable identifier of a registered source.
///
/// Equal to the source's insertion index in the registry.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct SourceId(u32);

impl SourceId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        SourceId(raw)
    }

    /// Registry index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceId({})", self.0)
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error when building a location from raw signed values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location offset {0} is negative")]
    NegativeOffset(i64),
    #[error("location length {0} is negative")]
    NegativeLength(i64),
    #[error("location offset {0} (0x{0:X}) exceeds u32::MAX")]
    OffsetTooLarge(i64),
    #[error("location length {0} (0x{0:X}) exceeds u32::MAX")]
    LengthTooLarge(i64),
}

/// Half-open byte range `[offset, offset + length)` in a registered source.
///
/// Layout: 12 bytes. Offsets are unsigned, so a negative offset cannot be
/// stored; use [`Location::try_new`] to validate raw signed values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Location {
    pub sourceid: SourceId,
    pub offset: u32,
    pub length: u32,
}

impl Location {
    #[inline]
    pub const fn new(sourceid: SourceId, offset: u32, length: u32) -> Self {
        Location {
            sourceid,
            offset,
            length,
        }
    }

    /// Validate raw signed offset/length values.
    pub fn try_new(sourceid: SourceId, offset: i64, length: i64) -> Result<Self, LocationError> {
        if offset < 0 {
            return Err(LocationError::NegativeOffset(offset));
        }
        if length < 0 {
            return Err(LocationError::NegativeLength(length));
        }
        let offset_u32 = u32::try_from(offset).map_err(|_| LocationError::OffsetTooLarge(offset))?;
        let length_u32 = u32::try_from(length).map_err(|_| LocationError::LengthTooLarge(length))?;
        Ok(Location::new(sourceid, offset_u32, length_u32))
    }

    /// Zero-length location.
    #[inline]
    pub const fn point(sourceid: SourceId, offset: u32) -> Self {
        Location::new(sourceid, offset, 0)
    }

    /// Exclusive end offset (widened so it cannot overflow).
    #[inline]
    pub const fn end(&self) -> u64 {
        self.offset as u64 + self.length as u64
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Merge two locations in the same source into one covering both.
    ///
    /// Returns `None` when the sources differ.
    #[must_use]
    pub fn merge(self, other: Location) -> Option<Location> {
        if self.sourceid != other.sourceid {
            return None;
        }
        let start = self.offset.min(other.offset);
        let end = self.end().max(other.end());
        let length = u32::try_from(end - u64::from(start)).unwrap_or(u32::MAX);
        Some(Location::new(self.sourceid, start, length))
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.sourceid, self.offset, self.length)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Location, SourceId};
    crate::static_assert_size!(SourceId, 4);
    crate::static_assert_size!(Location, 12);
}
