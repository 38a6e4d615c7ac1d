//! Per-node metadata layered over the immutable syntax trees.
//!
//! The tree owns node identity and structure; a [`NodeTable`] owns only what
//! analysis derives for each node (span, resolved symbol, meaningfulness),
//! indexed by [`NodeId`]. [`AnnotatedNode`] is a borrowed view joining both.

use std::sync::Arc;

use super::ids::NodeRef;
use super::table::SymbolTable;
use super::types::Symbol;
use crate::base::{FileId, Occurrence, Span};
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};

/// What analysis knows about one node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
    /// Own text extent widened to cover all descendants. `None` when neither
    /// the node nor any descendant has text.
    pub span: Option<Span>,
    /// Resolved symbol, set at most once by the resolver.
    pub symbol: Option<Symbol>,
    /// Whether the node counts as a name use. Annotation names, package
    /// names and import prefixes do not.
    pub meaningful: bool,
    /// The node is the name token of a declaration.
    pub declares: bool,
    /// A reference was recorded for this node.
    pub(crate) referenced: bool,
}

/// Derived metadata for every node of one file.
#[derive(Clone, Debug)]
pub struct NodeTable {
    file: FileId,
    tree: Arc<SyntaxTree>,
    infos: Vec<NodeInfo>,
}

impl NodeTable {
    /// Computes spans bottom-up and initial meaningfulness.
    pub fn new(file: FileId, tree: Arc<SyntaxTree>) -> Self {
        let mut infos = vec![NodeInfo::default(); tree.len()];

        // Pre-order ids: every child comes after its parent, so walking in
        // reverse finishes all children before their parent.
        for id in tree.node_ids().rev() {
            let own = Span::of_text(tree.position(id), tree.text(id));
            Span::compose_opt(&mut infos[id.index()].span, own);
            if let Some(parent) = tree.parent(id) {
                let span = infos[id.index()].span;
                Span::compose_opt(&mut infos[parent.index()].span, span);
            }
        }

        for id in tree.node_ids() {
            infos[id.index()].meaningful =
                tree.kind(id) == SyntaxKind::Ident && !under_non_semantic(&tree, id);
        }

        Self { file, tree, infos }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn tree(&self) -> &Arc<SyntaxTree> {
        &self.tree
    }

    pub fn info(&self, node: NodeId) -> &NodeInfo {
        &self.infos[node.index()]
    }

    pub(crate) fn info_mut(&mut self, node: NodeId) -> &mut NodeInfo {
        &mut self.infos[node.index()]
    }

    pub fn span(&self, node: NodeId) -> Option<Span> {
        self.infos[node.index()].span
    }

    pub fn occurrence(&self, node: NodeId) -> Occurrence {
        Occurrence::new(self.file, self.tree.position(node))
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

/// Identifiers inside these constructs are markers, not name uses.
fn under_non_semantic(tree: &SyntaxTree, node: NodeId) -> bool {
    let mut cur = tree.parent(node);
    while let Some(id) = cur {
        if matches!(
            tree.kind(id),
            SyntaxKind::Annotation | SyntaxKind::PackageDef | SyntaxKind::Import
        ) {
            return true;
        }
        cur = tree.parent(id);
    }
    false
}

// ============================================================================
// ANNOTATED NODE VIEW
// ============================================================================

/// A syntax node together with its analysis metadata.
#[derive(Copy, Clone)]
pub struct AnnotatedNode<'a> {
    table: &'a NodeTable,
    id: NodeId,
}

impl<'a> AnnotatedNode<'a> {
    pub(crate) fn new(table: &'a NodeTable, id: NodeId) -> Self {
        Self { table, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.table.file, self.id)
    }

    pub fn file(&self) -> FileId {
        self.table.file
    }

    pub fn kind(&self) -> SyntaxKind {
        self.table.tree.kind(self.id)
    }

    pub fn text(&self) -> &'a str {
        self.table.tree.text(self.id)
    }

    pub fn occurrence(&self) -> Occurrence {
        self.table.occurrence(self.id)
    }

    pub fn span(&self) -> Option<Span> {
        self.table.span(self.id)
    }

    pub fn symbol(&self) -> Option<&'a Symbol> {
        self.table.info(self.id).symbol.as_ref()
    }

    pub fn is_meaningful(&self) -> bool {
        self.table.info(self.id).meaningful
    }

    pub fn is_declaration(&self) -> bool {
        self.table.info(self.id).declares
    }

    pub fn parent(&self) -> Option<AnnotatedNode<'a>> {
        self.table.tree.parent(self.id).map(|id| Self::new(self.table, id))
    }

    pub fn next_sibling(&self) -> Option<AnnotatedNode<'a>> {
        self.table
            .tree
            .next_sibling(self.id)
            .map(|id| Self::new(self.table, id))
    }

    pub fn children(&self) -> impl Iterator<Item = AnnotatedNode<'a>> + 'a {
        let table = self.table;
        table.tree.children(self.id).map(move |id| Self::new(table, id))
    }
}

impl std::fmt::Debug for AnnotatedNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} {:?} {:?}", self.node_ref(), self.kind(), self.text())
    }
}

impl SymbolTable {
    /// Annotated view of a node, if its file belongs to this table.
    pub fn node(&self, node: NodeRef) -> Option<AnnotatedNode<'_>> {
        let table = self.node_table(node.file)?;
        (node.node.index() < table.len()).then(|| AnnotatedNode::new(table, node.node))
    }
}
