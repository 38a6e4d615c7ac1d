//! Immutable per-file syntax trees and their builder.

use std::fmt;
use std::path::Path;

use smol_str::SmolStr;

use super::SyntaxKind;
use crate::base::LineCol;
use crate::error::{Error, Result};

/// Index of a node within one [`SyntaxTree`].
///
/// Ids are assigned in pre-order, so a parent always has a smaller id than
/// any of its descendants and the root is always `NodeId(0)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: SyntaxKind,
    text: SmolStr,
    position: LineCol,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// The parsed tree of one source file, as handed over by the parser.
///
/// Nodes carry their kind, token text and start position. Composite nodes
/// created by the parser usually have empty text.
#[derive(Clone)]
pub struct SyntaxTree {
    path: SmolStr,
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Path of the file this tree was parsed from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parent directory of the file, or `""` when the path has none.
    pub fn parent_dir(&self) -> &str {
        Path::new(self.path.as_str())
            .parent()
            .and_then(|p| p.to_str())
            .unwrap_or("")
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in pre-order.
    pub fn node_ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub fn kind(&self, node: NodeId) -> SyntaxKind {
        self.nodes[node.index()].kind
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.index()].text
    }

    pub fn position(&self, node: NodeId) -> LineCol {
        self.nodes[node.index()].position
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].first_child
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].next_sibling
    }

    /// Direct children, in source order.
    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(node),
        }
    }

    /// Children that are not punctuation.
    pub fn significant_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node).filter(|&c| !self.kind(c).is_punct())
    }

    /// First direct child of the given kind.
    pub fn child_of_kind(&self, node: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.children(node).find(|&c| self.kind(c) == kind)
    }

    /// Next sibling that is not punctuation.
    pub fn next_significant_sibling(&self, node: NodeId) -> Option<NodeId> {
        let mut cur = self.next_sibling(node);
        while let Some(n) = cur {
            if !self.kind(n).is_punct() {
                return Some(n);
            }
            cur = self.next_sibling(n);
        }
        None
    }

    /// Joins the identifiers of an `Ident` or nested `Dot` node with `.`.
    pub fn dotted_name(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.push_dotted(node, &mut out);
        out
    }

    fn push_dotted(&self, node: NodeId, out: &mut String) {
        if self.kind(node) == SyntaxKind::Dot {
            for (i, part) in self.significant_children(node).enumerate() {
                if i > 0 {
                    out.push('.');
                }
                self.push_dotted(part, out);
            }
        } else {
            out.push_str(self.text(node));
        }
    }

    /// The segments of a dotted name, leftmost first.
    pub fn dotted_segments(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_segments(node, &mut out);
        out
    }

    fn collect_segments(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if self.kind(node) == SyntaxKind::Dot {
            for part in self.significant_children(node) {
                self.collect_segments(part, out);
            }
        } else {
            out.push(node);
        }
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("path", &self.path)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// Iterator over the direct children of a node.
pub struct Children<'a> {
    tree: &'a SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.tree.next_sibling(cur);
        Some(cur)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Event-style builder producing a [`SyntaxTree`].
///
/// Nodes are opened with [`TreeBuilder::start_node`], leaves are added with
/// [`TreeBuilder::token`], and every opened node must be closed with
/// [`TreeBuilder::finish_node`]. Exactly one root node is allowed.
#[derive(Debug)]
pub struct TreeBuilder {
    path: SmolStr,
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
    closed_root: bool,
}

impl TreeBuilder {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        Self {
            path: path.into(),
            nodes: Vec::new(),
            stack: Vec::new(),
            closed_root: false,
        }
    }

    /// Open a composite node as the last child of the current node.
    pub fn start_node(
        &mut self,
        kind: SyntaxKind,
        text: impl Into<SmolStr>,
        position: LineCol,
    ) -> Result<NodeId> {
        let id = self.push(kind, text.into(), position)?;
        self.stack.push(id);
        Ok(id)
    }

    /// Add a leaf node as the last child of the current node.
    pub fn token(
        &mut self,
        kind: SyntaxKind,
        text: impl Into<SmolStr>,
        position: LineCol,
    ) -> Result<NodeId> {
        let id = self.push(kind, text.into(), position)?;
        if self.stack.is_empty() {
            self.closed_root = true;
        }
        Ok(id)
    }

    /// Close the most recently opened node.
    pub fn finish_node(&mut self) -> Result<()> {
        if self.stack.pop().is_none() {
            return Err(Error::UnbalancedTree {
                reason: "finish_node without matching start_node",
            });
        }
        if self.stack.is_empty() {
            self.closed_root = true;
        }
        Ok(())
    }

    /// Number of nodes currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn finish(self) -> Result<SyntaxTree> {
        if !self.stack.is_empty() {
            return Err(Error::UnbalancedTree {
                reason: "nodes left open at finish",
            });
        }
        if self.nodes.is_empty() {
            return Err(Error::EmptyTree);
        }
        Ok(SyntaxTree {
            path: self.path,
            nodes: self.nodes,
        })
    }

    fn push(&mut self, kind: SyntaxKind, text: SmolStr, position: LineCol) -> Result<NodeId> {
        let parent = self.stack.last().copied();
        if parent.is_none() && self.closed_root {
            return Err(Error::UnbalancedTree {
                reason: "second root node",
            });
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            text,
            position,
            parent,
            first_child: None,
            last_child: None,
            next_sibling: None,
        });

        if let Some(parent) = parent {
            let prev = self.nodes[parent.index()].last_child;
            match prev {
                Some(prev) => self.nodes[prev.index()].next_sibling = Some(id),
                None => self.nodes[parent.index()].first_child = Some(id),
            }
            self.nodes[parent.index()].last_child = Some(id);
        }
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(line: u32, col: u32) -> LineCol {
        LineCol::new(line, col)
    }

    fn dotted_tree() -> SyntaxTree {
        // java.util.List
        let mut b = TreeBuilder::new("src/A.java");
        b.start_node(SyntaxKind::Import, "import", pos(0, 0)).unwrap();
        b.start_node(SyntaxKind::Dot, ".", pos(0, 16)).unwrap();
        b.start_node(SyntaxKind::Dot, ".", pos(0, 11)).unwrap();
        b.token(SyntaxKind::Ident, "java", pos(0, 7)).unwrap();
        b.token(SyntaxKind::Ident, "util", pos(0, 12)).unwrap();
        b.finish_node().unwrap();
        b.token(SyntaxKind::Ident, "List", pos(0, 17)).unwrap();
        b.finish_node().unwrap();
        b.token(SyntaxKind::Semi, ";", pos(0, 21)).unwrap();
        b.finish_node().unwrap();
        b.finish().unwrap()
    }

    #[test]
    fn test_pre_order_ids_and_links() {
        let tree = dotted_tree();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.kind(NodeId::ROOT), SyntaxKind::Import);

        let children: Vec<_> = tree.children(NodeId::ROOT).collect();
        assert_eq!(children, vec![NodeId(1), NodeId(6)]);
        assert_eq!(tree.parent(NodeId(3)), Some(NodeId(2)));
        assert_eq!(tree.next_sibling(NodeId(3)), Some(NodeId(4)));
        assert_eq!(tree.parent(NodeId::ROOT), None);
    }

    #[test]
    fn test_dotted_name_and_segments() {
        let tree = dotted_tree();
        assert_eq!(tree.dotted_name(NodeId(1)), "java.util.List");
        let segments: Vec<_> = tree
            .dotted_segments(NodeId(1))
            .into_iter()
            .map(|n| tree.text(n).to_string())
            .collect();
        assert_eq!(segments, vec!["java", "util", "List"]);
    }

    #[test]
    fn test_significant_children_skip_punctuation() {
        let tree = dotted_tree();
        let sig: Vec<_> = tree.significant_children(NodeId::ROOT).collect();
        assert_eq!(sig, vec![NodeId(1)]);
        assert_eq!(tree.next_significant_sibling(NodeId(1)), None);
    }

    #[test]
    fn test_unbalanced_close_is_rejected() {
        let mut b = TreeBuilder::new("A.java");
        assert!(matches!(
            b.finish_node(),
            Err(Error::UnbalancedTree { .. })
        ));
    }

    #[test]
    fn test_open_nodes_at_finish_are_rejected() {
        let mut b = TreeBuilder::new("A.java");
        b.start_node(SyntaxKind::CompilationUnit, "", pos(0, 0)).unwrap();
        assert!(matches!(b.finish(), Err(Error::UnbalancedTree { .. })));
    }

    #[test]
    fn test_second_root_is_rejected() {
        let mut b = TreeBuilder::new("A.java");
        b.start_node(SyntaxKind::CompilationUnit, "", pos(0, 0)).unwrap();
        b.finish_node().unwrap();
        let second = b.start_node(SyntaxKind::CompilationUnit, "", pos(1, 0));
        assert!(matches!(second, Err(Error::UnbalancedTree { .. })));
    }

    #[test]
    fn test_empty_builder() {
        let b = TreeBuilder::new("A.java");
        assert!(matches!(b.finish(), Err(Error::EmptyTree)));
    }

    #[test]
    fn test_parent_dir() {
        let tree = dotted_tree();
        assert_eq!(tree.parent_dir(), "src");

        let mut b = TreeBuilder::new("A.java");
        b.token(SyntaxKind::CompilationUnit, "", pos(0, 0)).unwrap();
        assert_eq!(b.finish().unwrap().parent_dir(), "");
    }
}
