//! The type pool.
//!
//! Nodes are appended and never removed, so a `TypeId` stays valid for the
//! pool's lifetime. Built-ins occupy `0..TypeId::FIRST_DYNAMIC`; derived
//! types are hash-consed on their structure.

use std::fmt;

use lyir_ir::TargetInfo;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{BuiltinType, Tag, TypeFlags, TypeId, TypeNode};

/// Structural identity of a derived type.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
struct DerivedKey {
    tag: Tag,
    bit_width: u16,
    signed: bool,
    element: TypeId,
}

impl DerivedKey {
    fn of(node: &TypeNode) -> Self {
        DerivedKey {
            tag: node.tag,
            bit_width: node.bit_width,
            signed: node.flags.is_signed(),
            element: node.element,
        }
    }
}

/// Counters reported by [`TypePool::stats`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct TypePoolStats {
    pub builtins: usize,
    pub derived: usize,
    /// Node slots reserved up front from the size hint.
    pub reserved: usize,
}

/// Owner of every type node in a compilation.
pub struct TypePool {
    nodes: Vec<TypeNode>,
    dedup: FxHashMap<DerivedKey, TypeId>,
    target: &'static TargetInfo,
    reserved: usize,
}

impl TypePool {
    /// Build a pool holding the built-in types for `target`.
    ///
    /// `block_size_hint` is a byte budget for node storage; the pool reserves
    /// room for that many bytes of nodes up front (at least the built-ins).
    pub fn new(target: &'static TargetInfo, block_size_hint: usize) -> Self {
        let reserved = (block_size_hint / std::mem::size_of::<TypeNode>())
            .max(BuiltinType::ALL.len());
        let mut pool = TypePool {
            nodes: Vec::with_capacity(reserved),
            dedup: FxHashMap::default(),
            target,
            reserved,
        };

        for builtin in BuiltinType::ALL {
            let node = builtin_node(builtin, target);
            let id = pool.push(node);
            debug_assert_eq!(id, builtin.id());
        }

        // Derived requests that name a built-in shape resolve to the built-in.
        pool.dedup.insert(DerivedKey::of(&pool.nodes[TypeId::I8.index()]), TypeId::I8);
        pool.dedup.insert(
            DerivedKey::of(&pool.nodes[TypeId::I8_BUFFER.index()]),
            TypeId::I8_BUFFER,
        );

        debug!(target = target.name, builtins = pool.nodes.len(), "type pool created");
        pool
    }

    #[inline]
    pub fn target(&self) -> &'static TargetInfo {
        self.target
    }

    /// Size derived types built from now on for `target`.
    ///
    /// Built-ins and already-derived types keep their widths. The dedup key
    /// includes the width, so a request under the new target never returns
    /// a node sized for the old one.
    pub fn set_target(&mut self, target: &'static TargetInfo) {
        debug!(from = self.target.name, to = target.name, "type pool target changed");
        self.target = target;
    }

    /// Node for `id`.
    ///
    /// # Panics
    /// Panics if `id` was not minted by this pool.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn try_get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn builtin(&self, builtin: BuiltinType) -> &TypeNode {
        self.get(builtin.id())
    }

    #[inline]
    pub fn tag(&self, id: TypeId) -> Tag {
        self.get(id).tag
    }

    #[inline]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.get(id).flags
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the built-ins are present from construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn stats(&self) -> TypePoolStats {
        let builtins = BuiltinType::ALL.len().min(self.nodes.len());
        TypePoolStats {
            builtins,
            derived: self.nodes.len() - builtins,
            reserved: self.reserved,
        }
    }

    // === Derived Constructors ===

    /// Integer of explicit width. `int(8, true)` is the built-in `i8`.
    pub fn int(&mut self, bit_width: u16, signed: bool) -> TypeId {
        let mut flags = TypeFlags::IS_PRIMITIVE;
        if signed {
            flags |= TypeFlags::SIGNED;
        }
        self.intern(TypeNode::new(Tag::Int, flags, bit_width, TypeId::NONE))
    }

    /// `elem[*]`. `buffer(TypeId::I8)` is the built-in `i8[*]`.
    pub fn buffer(&mut self, elem: TypeId) -> TypeId {
        let width = self.target.size_of_pointer;
        self.intern_container(Tag::Buffer, width, elem)
    }

    /// `elem*`
    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        let width = self.target.size_of_pointer;
        self.intern_container(Tag::Pointer, width, elem)
    }

    /// `elem[]`: a pointer and a pointer-width length.
    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        let width = self.target.size_of_pointer.saturating_mul(2);
        self.intern_container(Tag::Slice, width, elem)
    }

    /// Mark a type as having passed semantic analysis.
    ///
    /// Returns `false` if it was already marked.
    pub fn mark_resolved(&mut self, id: TypeId) -> bool {
        let node = &mut self.nodes[id.index()];
        let was = node.flags.is_resolved();
        node.flags |= TypeFlags::SEMA_OK;
        !was
    }

    // === Formatting ===

    /// Render a type the way it is spelled in source.
    pub fn display(&self, id: TypeId) -> String {
        let mut buf = String::new();
        self.display_into(id, &mut buf);
        buf
    }

    pub fn display_into(&self, id: TypeId, buf: &mut String) {
        if let Some(builtin) = BuiltinType::from_id(id) {
            buf.push_str(builtin.name());
            return;
        }
        let Some(node) = self.try_get(id) else {
            buf.push_str("<invalid>");
            return;
        };
        match node.tag {
            Tag::Int => {
                buf.push(if node.flags.is_signed() { 'i' } else { 'u' });
                buf.push_str(&node.bit_width.to_string());
            }
            Tag::Buffer => {
                self.display_into(node.element, buf);
                buf.push_str("[*]");
            }
            Tag::Pointer => {
                self.display_into(node.element, buf);
                buf.push('*');
            }
            Tag::Slice => {
                self.display_into(node.element, buf);
                buf.push_str("[]");
            }
            other => buf.push_str(other.name()),
        }
    }

    // === Internals ===

    fn intern_container(&mut self, tag: Tag, bit_width: u16, elem: TypeId) -> TypeId {
        debug_assert!(
            self.try_get(elem).is_some(),
            "element {elem:?} not in this pool"
        );
        self.intern(TypeNode::new(tag, TypeFlags::IS_CONTAINER, bit_width, elem))
    }

    fn intern(&mut self, node: TypeNode) -> TypeId {
        let key = DerivedKey::of(&node);
        if let Some(&id) = self.dedup.get(&key) {
            return id;
        }
        let id = self.push(node);
        self.dedup.insert(key, id);
        trace!(?id, tag = %node.tag, "derived type allocated");
        id
    }

    fn push(&mut self, node: TypeNode) -> TypeId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or_else(|_| {
            panic!("type pool exceeded {} entries", u32::MAX)
        });
        self.nodes.push(node);
        TypeId::from_raw(raw)
    }
}

/// Node for a built-in on `target`. Every built-in is born resolved.
fn builtin_node(builtin: BuiltinType, target: &TargetInfo) -> TypeNode {
    let ok = TypeFlags::SEMA_OK;
    let prim = TypeFlags::SEMA_OK | TypeFlags::IS_PRIMITIVE;
    let platform = prim | TypeFlags::PLATFORM_SPECIFIED;
    let none = TypeId::NONE;

    match builtin {
        BuiltinType::Type => TypeNode::new(Tag::Type, ok, 0, none),
        BuiltinType::Poison => TypeNode::new(Tag::Poison, ok, 0, none),
        BuiltinType::Unknown => TypeNode::new(Tag::Unknown, ok, 0, none),
        BuiltinType::Var => TypeNode::new(Tag::Var, ok, 0, none),
        BuiltinType::Void => TypeNode::new(Tag::Void, ok, 0, none),
        BuiltinType::NoReturn => TypeNode::new(Tag::NoReturn, ok, 0, none),
        BuiltinType::Bool => TypeNode::new(Tag::Bool, prim, 8, none),
        BuiltinType::I8 => TypeNode::new(Tag::Int, prim | TypeFlags::SIGNED, 8, none),
        BuiltinType::Int => TypeNode::new(
            Tag::Int,
            platform | TypeFlags::SIGNED,
            target.size_of_pointer,
            none,
        ),
        BuiltinType::UInt => TypeNode::new(Tag::Int, platform, target.size_of_pointer, none),
        BuiltinType::Float => TypeNode::new(Tag::Float, platform, 64, none),
        BuiltinType::I8Buffer => TypeNode::new(
            Tag::Buffer,
            ok | TypeFlags::IS_CONTAINER,
            target.size_of_pointer,
            TypeId::I8,
        ),
    }
}

impl fmt::Debug for TypePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePool")
            .field("target", &self.target.name)
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
