use crate::TypeId;

/// The built-in types, in construction order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    Type,
    Poison,
    Unknown,
    Var,
    Void,
    NoReturn,
    Bool,
    I8,
    Int,
    UInt,
    Float,
    I8Buffer,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 12] = [
        BuiltinType::Type,
        BuiltinType::Poison,
        BuiltinType::Unknown,
        BuiltinType::Var,
        BuiltinType::Void,
        BuiltinType::NoReturn,
        BuiltinType::Bool,
        BuiltinType::I8,
        BuiltinType::Int,
        BuiltinType::UInt,
        BuiltinType::Float,
        BuiltinType::I8Buffer,
    ];

    /// Fixed pool index of this built-in.
    #[inline]
    pub const fn id(self) -> TypeId {
        TypeId::from_raw(self as u32)
    }

    /// Source-level spelling.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinType::Type => "type",
            BuiltinType::Poison => "poison",
            BuiltinType::Unknown => "unknown",
            BuiltinType::Var => "var",
            BuiltinType::Void => "void",
            BuiltinType::NoReturn => "noreturn",
            BuiltinType::Bool => "bool",
            BuiltinType::I8 => "i8",
            BuiltinType::Int => "int",
            BuiltinType::UInt => "uint",
            BuiltinType::Float => "float",
            BuiltinType::I8Buffer => "i8[*]",
        }
    }

    pub fn from_id(id: TypeId) -> Option<Self> {
        Self::ALL.get(id.index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_construction_order() {
        for (i, b) in BuiltinType::ALL.into_iter().enumerate() {
            assert_eq!(b.id().index(), i);
            assert_eq!(BuiltinType::from_id(b.id()), Some(b));
        }
        assert_eq!(BuiltinType::I8Buffer.id(), TypeId::I8_BUFFER);
        assert_eq!(BuiltinType::from_id(TypeId::from_raw(12)), None);
    }
}
