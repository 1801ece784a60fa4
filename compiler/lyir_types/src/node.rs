use std::fmt;

use crate::{Tag, TypeFlags, TypeId};

/// One entry in the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeNode {
    pub tag: Tag,
    /// Type of this type. `TypeId::TYPE` for every node in the table.
    pub ty: TypeId,
    pub flags: TypeFlags,
    /// Size in bits; 0 when the kind has no fixed size.
    pub bit_width: u16,
    /// Child type for containers, `TypeId::NONE` otherwise.
    pub element: TypeId,
}

impl TypeNode {
    pub(crate) const fn new(tag: Tag, flags: TypeFlags, bit_width: u16, element: TypeId) -> Self {
        TypeNode {
            tag,
            ty: TypeId::TYPE,
            flags,
            bit_width,
            element,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.flags.is_resolved()
    }
}

impl fmt::Debug for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TypeNode");
        s.field("tag", &self.tag).field("flags", &self.flags);
        if self.bit_width != 0 {
            s.field("bit_width", &self.bit_width);
        }
        if !self.element.is_none() {
            s.field("element", &self.element);
        }
        s.finish()
    }
}

const _: () = assert!(std::mem::size_of::<TypeNode>() == 16);
