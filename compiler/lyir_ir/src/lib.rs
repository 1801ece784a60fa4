//! Lyir IR - Core Primitives
//!
//! This crate contains the leaf data structures every compiler phase shares:
//! - Block arena for bulk-freed byte data
//! - String interning with stable `Symbol` handles
//! - Source ids and byte-range locations
//! - Target ABI presets
//!
//! # Design Philosophy
//!
//! - **Handles, not pointers**: strings are `Symbol(u32)`, sources are
//!   `SourceId(u32)`. Handles are `Copy` and resolve through their owner.
//! - **Bulk lifetime**: arena data is released all at once when its owner
//!   drops; nothing is freed individually.
//! - **Shared presets**: target descriptors are `static`, never copied.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied handles.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
mod interner;
mod location;
mod symbol;
pub mod target;

pub use arena::{Arena, ArenaError, ArenaSlice, ArenaStats, DEFAULT_BLOCK_CAPACITY};
pub use interner::{InternError, InternerStats, StringInterner, DEFAULT_MAX_INTERNED_SIZE};
pub use location::{Location, LocationError, SourceId};
pub use symbol::Symbol;
pub use target::{FfiLayout, TargetInfo, TargetKind, TargetParseError};
