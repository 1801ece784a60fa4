//! Dependency graphs between sources.
//!
//! Tracks which source depends on which. Graphs are created through the
//! context, which keeps every one alive until teardown.

use std::collections::VecDeque;
use std::fmt;

use lyir_ir::SourceId;
use rustc_hash::{FxHashMap, FxHashSet};

/// Handle to a graph owned by a [`Context`](crate::Context).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DepGraphId(u32);

impl DepGraphId {
    /// The graph every context creates on construction.
    pub const PRIMARY: Self = Self(0);

    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DepGraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DepGraphId({})", self.0)
    }
}

/// Directed "depends on" edges between sources.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Direct dependencies of each node, in insertion order.
    imports: FxHashMap<SourceId, Vec<SourceId>>,
    /// Reverse map: node -> nodes that depend on it.
    dependents: FxHashMap<SourceId, FxHashSet<SourceId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no edges. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: SourceId) {
        self.imports.entry(node).or_default();
    }

    /// Record that `from` depends on `to`. Both become nodes.
    ///
    /// Returns `false` if the edge was already present.
    pub fn depends_on(&mut self, from: SourceId, to: SourceId) -> bool {
        self.add_node(to);
        let deps = self.imports.entry(from).or_default();
        if deps.contains(&to) {
            return false;
        }
        deps.push(to);
        self.dependents.entry(to).or_default().insert(from);
        true
    }

    /// Direct dependencies of `node`.
    pub fn dependencies(&self, node: SourceId) -> Option<&[SourceId]> {
        self.imports.get(&node).map(Vec::as_slice)
    }

    /// Nodes that directly depend on `node`.
    pub fn dependents(&self, node: SourceId) -> Option<&FxHashSet<SourceId>> {
        self.dependents.get(&node)
    }

    pub fn contains(&self, node: SourceId) -> bool {
        self.imports.contains_key(&node)
    }

    /// Every node reachable from `node` through dependency edges.
    pub fn transitive_dependencies(&self, node: SourceId) -> FxHashSet<SourceId> {
        let mut visited = FxHashSet::default();
        let mut queue = VecDeque::new();
        queue.push_back(node);

        while let Some(current) = queue.pop_front() {
            for &dep in self.dependencies(current).unwrap_or(&[]) {
                if visited.insert(dep) {
                    queue.push_back(dep);
                }
            }
        }
        visited
    }

    pub fn nodes(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.imports.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.imports.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: u32) -> SourceId {
        SourceId::new(n)
    }

    #[test]
    fn edges_and_reverse_edges() {
        let mut g = DependencyGraph::new();
        assert!(g.depends_on(s(0), s(1)));
        assert!(g.depends_on(s(0), s(2)));
        assert!(!g.depends_on(s(0), s(1)));

        assert_eq!(g.dependencies(s(0)), Some(&[s(1), s(2)][..]));
        assert_eq!(g.dependencies(s(1)), Some(&[] as &[SourceId]));
        assert!(g.dependents(s(2)).is_some_and(|d| d.contains(&s(0))));
        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn isolated_nodes() {
        let mut g = DependencyGraph::new();
        g.add_node(s(4));
        g.add_node(s(4));
        assert!(g.contains(s(4)));
        assert_eq!(g.len(), 1);
        assert_eq!(g.edge_count(), 0);
        assert!(!g.contains(s(5)));
    }

    #[test]
    fn transitive_closure_handles_cycles() {
        let mut g = DependencyGraph::new();
        g.depends_on(s(0), s(1));
        g.depends_on(s(1), s(2));
        g.depends_on(s(2), s(0));
        g.depends_on(s(3), s(0));

        let deps = g.transitive_dependencies(s(1));
        assert_eq!(deps.len(), 3);
        assert!(!deps.contains(&s(3)));
    }
}
