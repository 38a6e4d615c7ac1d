//! Arena identifiers for the semantic model.
//!
//! Definitions and scopes live in flat arenas owned by the symbol table.
//! Everything that would otherwise be a back-pointer (enclosing scope,
//! subclasses, implementors) is one of these plain indices.

use std::fmt;

use crate::base::FileId;
use crate::syntax::NodeId;

/// Index of a definition in the symbol table arena.
///
/// Assigned sequentially in discovery order during the table-building walk.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DefId(pub u32);

impl DefId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DefId({})", self.0)
    }
}

/// Index of a scope in the symbol table arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The root scope that holds all top-level packages.
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// A node of one registered syntax tree.
///
/// Stable for the lifetime of one forest generation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeRef {
    pub file: FileId,
    pub node: NodeId,
}

impl NodeRef {
    #[inline]
    pub const fn new(file: FileId, node: NodeId) -> Self {
        Self { file, node }
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.file, self.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ref_equality() {
        let a = NodeRef::new(FileId::new(1), NodeId(4));
        let b = NodeRef::new(FileId::new(1), NodeId(4));
        let c = NodeRef::new(FileId::new(2), NodeId(4));

        assert_eq!(a, b);
        assert_ne!(a, c); // different file
        assert!(a < c);
    }

    #[test]
    fn test_id_sizes() {
        assert_eq!(std::mem::size_of::<DefId>(), 4);
        assert_eq!(std::mem::size_of::<NodeRef>(), 8);
    }
}
