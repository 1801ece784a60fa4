//! Type kind tag.

use std::fmt;

/// Type kind discriminant.
///
/// Integers of every width share [`Tag::Int`]; width and signedness live on
/// the node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Tag {
    // === Special (0-15) ===
    Type = 0,
    Poison = 1,
    Unknown = 2,
    Var = 3,
    Void = 4,
    NoReturn = 5,

    // === Primitives (16-31) ===
    Bool = 16,
    Int = 17,
    Float = 18,

    // === Containers (32-47) ===
    // element: child TypeId
    /// `T[*]`: unsized run of elements.
    Buffer = 32,
    /// `T*`
    Pointer = 33,
    /// `T[]`: pointer plus length.
    Slice = 34,
}

impl Tag {
    #[inline]
    pub const fn is_primitive(self) -> bool {
        matches!(self, Tag::Bool | Tag::Int | Tag::Float)
    }

    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Tag::Buffer | Tag::Pointer | Tag::Slice)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::Type => "type",
            Tag::Poison => "poison",
            Tag::Unknown => "unknown",
            Tag::Var => "var",
            Tag::Void => "void",
            Tag::NoReturn => "noreturn",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Float => "float",
            Tag::Buffer => "buffer",
            Tag::Pointer => "pointer",
            Tag::Slice => "slice",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(std::mem::size_of::<Tag>() == 1);
