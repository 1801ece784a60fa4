//! Block arena for bulk-freed byte data.
//!
//! Each block is a `Vec<u8>` reserved at `block_capacity` and never grown
//! past it, so bytes never move once pushed. Allocations are addressed by
//! [`ArenaSlice`] handles and are only released when the arena drops.

use thiserror::Error;
use tracing::debug;

/// Default block size (1 MiB).
pub const DEFAULT_BLOCK_CAPACITY: usize = 1024 * 1024;

/// Error when pushing into an arena fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// A single request does not fit in an empty block.
    #[error("arena request of {requested} bytes exceeds block capacity of {capacity} bytes")]
    TooLarge { requested: usize, capacity: usize },
    /// Block index no longer fits in a handle.
    #[error("arena exceeded {count} blocks")]
    TooManyBlocks { count: usize },
}

/// Handle to a byte range inside an [`Arena`].
///
/// Layout: 12 bytes (block index, start offset, length).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ArenaSlice {
    block: u32,
    start: u32,
    len: u32,
}

impl ArenaSlice {
    /// Length of the allocation in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Check if the allocation is zero-sized.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Index of the block holding this allocation.
    #[inline]
    pub const fn block(self) -> usize {
        self.block as usize
    }

    #[inline]
    fn range(self) -> std::ops::Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

/// Memory accounting snapshot for an [`Arena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ArenaStats {
    /// Number of blocks currently held.
    pub blocks: usize,
    /// Bytes handed out across all blocks.
    pub bytes_used: usize,
    /// Bytes reserved across all blocks.
    pub bytes_reserved: usize,
}

/// Bump arena over fixed-capacity blocks.
///
/// # Thread Safety
/// None. Pushing takes `&mut self`; share behind a lock if needed.
pub struct Arena {
    blocks: Vec<Vec<u8>>,
    block_capacity: usize,
}

impl Arena {
    /// Create an empty arena. No block is reserved until the first push.
    ///
    /// Capacities above `u32::MAX` are clamped so offsets fit a handle.
    pub fn new(block_capacity: usize) -> Self {
        Arena {
            blocks: Vec::new(),
            block_capacity: block_capacity.min(u32::MAX as usize),
        }
    }

    /// Maximum size of a single block (and so of a single request).
    #[inline]
    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    /// Copy `bytes` into the arena.
    pub fn push(&mut self, bytes: &[u8]) -> Result<ArenaSlice, ArenaError> {
        let slice = self.reserve(bytes.len())?;
        self.blocks[slice.block()].extend_from_slice(bytes);
        Ok(slice)
    }

    /// Reserve `len` zeroed bytes in the arena.
    pub fn push_zeroed(&mut self, len: usize) -> Result<ArenaSlice, ArenaError> {
        let slice = self.reserve(len)?;
        let block = &mut self.blocks[slice.block()];
        block.resize(block.len() + len, 0);
        Ok(slice)
    }

    /// Read an allocation.
    ///
    /// # Panics
    /// Panics if `slice` was produced by a different arena.
    #[inline]
    pub fn get(&self, slice: ArenaSlice) -> &[u8] {
        &self.blocks[slice.block()][slice.range()]
    }

    /// Mutably access an allocation.
    ///
    /// # Panics
    /// Panics if `slice` was produced by a different arena.
    #[inline]
    pub fn get_mut(&mut self, slice: ArenaSlice) -> &mut [u8] {
        &mut self.blocks[slice.block()][slice.range()]
    }

    /// Memory accounting snapshot.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            blocks: self.blocks.len(),
            bytes_used: self.blocks.iter().map(Vec::len).sum(),
            bytes_reserved: self.blocks.len() * self.block_capacity,
        }
    }

    /// Pick the block for a `len`-byte request and return its handle.
    ///
    /// The caller must append exactly `len` bytes to that block.
    fn reserve(&mut self, len: usize) -> Result<ArenaSlice, ArenaError> {
        if len > self.block_capacity {
            return Err(ArenaError::TooLarge {
                requested: len,
                capacity: self.block_capacity,
            });
        }

        let fits = self
            .blocks
            .last()
            .is_some_and(|block| self.block_capacity - block.len() >= len);

        if !fits {
            debug!(
                block = self.blocks.len(),
                capacity = self.block_capacity,
                "opening arena block"
            );
            self.blocks.push(Vec::with_capacity(self.block_capacity));
        }

        let block = self.blocks.len() - 1;
        let block_u32 = u32::try_from(block).map_err(|_| ArenaError::TooManyBlocks {
            count: self.blocks.len(),
        })?;

        // Both values are bounded by block_capacity, which fits in u32.
        let start = u32::try_from(self.blocks[block].len()).unwrap_or(u32::MAX);
        let len = u32::try_from(len).unwrap_or(u32::MAX);

        Ok(ArenaSlice {
            block: block_u32,
            start,
            len,
        })
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_CAPACITY)
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("block_capacity", &self.block_capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::ArenaSlice;
    crate::static_assert_size!(ArenaSlice, 12);
}
