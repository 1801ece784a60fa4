//! Type table for the Lyir compiler.
//!
//! Every type lives in a [`TypePool`] owned by the compilation context and
//! is referenced by a 32-bit [`TypeId`]. The twelve built-in types are
//! constructed when the pool is created and sit at fixed ids `0..=11`, so
//! downstream code compares them by id without a lookup:
//!
//! ```
//! use lyir_ir::target::X86_64_LINUX;
//! use lyir_types::{TypeId, TypePool};
//!
//! let mut pool = TypePool::new(&X86_64_LINUX, 0);
//! assert_eq!(pool.get(TypeId::INT).bit_width, 64);
//!
//! let ptr = pool.pointer(TypeId::I8);
//! assert_eq!(pool.pointer(TypeId::I8), ptr);
//! assert_eq!(pool.display(ptr), "i8*");
//! ```

mod builtin;
mod flags;
mod id;
mod node;
mod pool;
mod tag;

pub use builtin::BuiltinType;
pub use flags::TypeFlags;
pub use id::TypeId;
pub use node::TypeNode;
pub use pool::{TypePool, TypePoolStats};
pub use tag::Tag;
