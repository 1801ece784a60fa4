//! Arena-backed string interner.
//!
//! Content up to the size cap is copied into arena blocks; larger content
//! goes to a separately owned heap list. Every stored string carries a
//! trailing NUL so C-facing consumers can borrow it as a `CStr`.
//!
//! Equal content is deduplicated: interning the same bytes twice returns
//! the same [`Symbol`].

use std::ffi::CStr;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{Arena, ArenaError, ArenaStats, Symbol};

/// Default cap for arena-interned strings (1 MiB, including the NUL).
pub const DEFAULT_MAX_INTERNED_SIZE: usize = 1024 * 1024;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternError {
    /// More than `u32::MAX` distinct strings.
    #[error("interner exceeded capacity: {count} strings")]
    Overflow { count: usize },
    /// The arena refused a request that should have fit.
    #[error(transparent)]
    Arena(#[from] ArenaError),
}

/// Where a symbol's bytes (plus NUL) live.
#[derive(Copy, Clone, Debug)]
enum Slot {
    Arena(crate::ArenaSlice),
    Heap(usize),
}

/// Memory accounting snapshot for a [`StringInterner`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct InternerStats {
    /// Distinct strings, including the pre-interned empty string.
    pub symbols: usize,
    /// String arena usage.
    pub arena: ArenaStats,
    /// Strings stored outside the arena.
    pub oversized: usize,
    /// Bytes held by oversized strings, NULs included.
    pub oversized_bytes: usize,
}

/// Deduplicating string interner with stable views.
///
/// Views returned by [`get`](Self::get) stay valid and unchanged for the
/// interner's lifetime: arena blocks never move and the oversized list is
/// append-only.
///
/// # Thread Safety
/// None. Interning takes `&mut self`; the owning context serializes access.
pub struct StringInterner {
    arena: Arena,
    oversized: Vec<Box<[u8]>>,
    slots: Vec<Slot>,
    /// Content hash to the symbols sharing it.
    index: FxHashMap<u64, SmallVec<[Symbol; 1]>>,
    max_interned_size: usize,
}

impl StringInterner {
    /// Create an interner with the default 1 MiB cap.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_INTERNED_SIZE)
    }

    /// Create an interner whose arena blocks hold `max_interned_size` bytes.
    ///
    /// Strings whose length plus NUL exceeds the cap are heap-allocated.
    pub fn with_max_size(max_interned_size: usize) -> Self {
        let mut interner = StringInterner {
            arena: Arena::new(max_interned_size),
            oversized: Vec::new(),
            slots: Vec::with_capacity(256),
            index: FxHashMap::default(),
            max_interned_size,
        };
        let empty = interner.intern(b"");
        debug_assert_eq!(empty, Symbol::EMPTY);
        interner
    }

    /// Size cap for arena-backed strings, NUL included.
    #[inline]
    pub fn max_interned_size(&self) -> usize {
        self.max_interned_size
    }

    /// Try to intern `content`, returning its Symbol or an error on overflow.
    pub fn try_intern(&mut self, content: impl AsRef<[u8]>) -> Result<Symbol, InternError> {
        let bytes = content.as_ref();
        let hash = content_hash(bytes);

        if let Some(sym) = self.find_hashed(hash, bytes) {
            return Ok(sym);
        }

        let raw = u32::try_from(self.slots.len()).map_err(|_| InternError::Overflow {
            count: self.slots.len(),
        })?;
        let slot = self.store(bytes)?;
        let sym = Symbol::from_raw(raw);

        self.slots.push(slot);
        self.index.entry(hash).or_default().push(sym);
        Ok(sym)
    }

    /// Intern `content`, returning its Symbol.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&mut self, content: impl AsRef<[u8]>) -> Symbol {
        self.try_intern(content).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up `content` without interning it.
    pub fn find(&self, content: impl AsRef<[u8]>) -> Option<Symbol> {
        let bytes = content.as_ref();
        self.find_hashed(content_hash(bytes), bytes)
    }

    /// Bytes of an interned string (without the NUL).
    ///
    /// # Panics
    /// Panics if `sym` came from a different interner.
    pub fn get(&self, sym: Symbol) -> &[u8] {
        let with_nul = self.get_with_nul(sym);
        with_nul.split_last().map_or(with_nul, |(_, content)| content)
    }

    /// Interned content as UTF-8, if it is valid UTF-8.
    pub fn get_str(&self, sym: Symbol) -> Option<&str> {
        std::str::from_utf8(self.get(sym)).ok()
    }

    /// Interned content as a C string.
    ///
    /// Returns `None` if the content itself contains a NUL byte.
    pub fn get_c_str(&self, sym: Symbol) -> Option<&CStr> {
        CStr::from_bytes_with_nul(self.get_with_nul(sym)).ok()
    }

    /// Number of distinct interned strings (including the empty string).
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if only the empty string is interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    /// Memory accounting snapshot.
    pub fn stats(&self) -> InternerStats {
        InternerStats {
            symbols: self.slots.len(),
            arena: self.arena.stats(),
            oversized: self.oversized.len(),
            oversized_bytes: self.oversized.iter().map(|s| s.len()).sum(),
        }
    }

    fn get_with_nul(&self, sym: Symbol) -> &[u8] {
        match self.slots[sym.index()] {
            Slot::Arena(slice) => self.arena.get(slice),
            Slot::Heap(idx) => &self.oversized[idx],
        }
    }

    fn find_hashed(&self, hash: u64, bytes: &[u8]) -> Option<Symbol> {
        self.index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&sym| self.get(sym) == bytes)
    }

    fn store(&mut self, bytes: &[u8]) -> Result<Slot, InternError> {
        if bytes.len() < self.max_interned_size {
            let slice = self.arena.push_zeroed(bytes.len() + 1)?;
            self.arena.get_mut(slice)[..bytes.len()].copy_from_slice(bytes);
            return Ok(Slot::Arena(slice));
        }

        debug!(
            len = bytes.len(),
            cap = self.max_interned_size,
            "interning oversized string on the heap"
        );
        let mut owned = Vec::with_capacity(bytes.len() + 1);
        owned.extend_from_slice(bytes);
        owned.push(0);
        self.oversized.push(owned.into_boxed_slice());
        Ok(Slot::Heap(self.oversized.len() - 1))
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("max_interned_size", &self.max_interned_size)
            .field("stats", &self.stats())
            .finish()
    }
}

#[inline]
fn content_hash(bytes: &[u8]) -> u64 {
    let mut hasher = FxHasher::default();
    bytes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests;
