//! Per-node type flags.

use bitflags::bitflags;

bitflags! {
    /// Properties cached on each [`TypeNode`](crate::TypeNode).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        /// Semantic analysis has finished with this type.
        const SEMA_OK = 1 << 0;
        /// Width comes from the target rather than the source text.
        const PLATFORM_SPECIFIED = 1 << 1;
        /// Signed integer.
        const SIGNED = 1 << 2;

        const IS_PRIMITIVE = 1 << 8;
        const IS_CONTAINER = 1 << 9;
    }
}

impl TypeFlags {
    #[inline]
    pub fn is_resolved(self) -> bool {
        self.contains(Self::SEMA_OK)
    }

    #[inline]
    pub fn is_signed(self) -> bool {
        self.contains(Self::SIGNED)
    }
}
