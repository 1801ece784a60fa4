//! Type index handle.

use std::fmt;

/// A 32-bit index into the [`TypePool`](crate::TypePool).
///
/// Built-in types have fixed indices, assigned in construction order.
/// Equality is index equality.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Built-in Types (indices 0-11) ===

    /// The type of types.
    pub const TYPE: Self = Self(0);
    /// Result of a failed type computation; suppresses cascading errors.
    pub const POISON: Self = Self(1);
    /// Not yet inferred.
    pub const UNKNOWN: Self = Self(2);
    /// Placeholder for `var` declarations.
    pub const VAR: Self = Self(3);
    pub const VOID: Self = Self(4);
    pub const NORETURN: Self = Self(5);
    pub const BOOL: Self = Self(6);
    pub const I8: Self = Self(7);
    /// Pointer-width signed integer.
    pub const INT: Self = Self(8);
    /// Pointer-width unsigned integer.
    pub const UINT: Self = Self(9);
    pub const FLOAT: Self = Self(10);
    /// Buffer of `i8`, the C string type.
    pub const I8_BUFFER: Self = Self(11);

    /// First index handed out for derived types.
    pub const FIRST_DYNAMIC: u32 = 12;

    /// Sentinel for "no type", e.g. the element of a scalar.
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TYPE => write!(f, "TypeId::TYPE"),
            Self::POISON => write!(f, "TypeId::POISON"),
            Self::UNKNOWN => write!(f, "TypeId::UNKNOWN"),
            Self::VAR => write!(f, "TypeId::VAR"),
            Self::VOID => write!(f, "TypeId::VOID"),
            Self::NORETURN => write!(f, "TypeId::NORETURN"),
            Self::BOOL => write!(f, "TypeId::BOOL"),
            Self::I8 => write!(f, "TypeId::I8"),
            Self::INT => write!(f, "TypeId::INT"),
            Self::UINT => write!(f, "TypeId::UINT"),
            Self::FLOAT => write!(f, "TypeId::FLOAT"),
            Self::I8_BUFFER => write!(f, "TypeId::I8_BUFFER"),
            Self::NONE => write!(f, "TypeId::NONE"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<TypeId>() == 4);
