//! QueryEngine - read-only name and reference queries over a built table.

use std::sync::Arc;

use crate::base::{Occurrence, Span};
use crate::hir::{AnnotatedNode, NodeRef, Reference, ScopeId, Symbol, SymbolTable};
use crate::syntax::SyntaxKind;

/// Position-based queries over one table generation.
///
/// Cloning is cheap. Results stay valid only for the generation the engine
/// was created from.
#[derive(Clone, Debug)]
pub struct QueryEngine {
    table: Arc<SymbolTable>,
}

impl QueryEngine {
    pub fn new(table: Arc<SymbolTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Arc<SymbolTable> {
        &self.table
    }

    /// Resolve `name` as if written at `occurrence`.
    ///
    /// Never fails: a name that cannot be resolved yields an `Unknown`
    /// target. The reference is not attached to a tree node.
    pub fn resolve_symbol(&self, name: &str, occurrence: Occurrence) -> Reference {
        Reference {
            occurrence,
            node: None,
            target: self.definition_of(name, occurrence),
        }
    }

    /// What `name` means at `occurrence`.
    pub fn definition_of(&self, name: &str, occurrence: Occurrence) -> Symbol {
        let scope = self.table.scope_at(occurrence).unwrap_or(ScopeId::ROOT);
        self.table.resolve_name(scope, name)
    }

    /// The symbol of the innermost name token covering `occurrence`.
    pub fn definition_at(&self, occurrence: Occurrence) -> Option<Symbol> {
        self.name_at(occurrence)
            .and_then(|node| node.symbol())
            .cloned()
    }

    /// The innermost identifier token covering `occurrence`.
    pub fn name_at(&self, occurrence: Occurrence) -> Option<AnnotatedNode<'_>> {
        let nodes = self.table.node_table(occurrence.file)?;
        let tree = nodes.tree();

        let mut best: Option<(Span, AnnotatedNode<'_>)> = None;
        for id in tree.node_ids() {
            if tree.kind(id) != SyntaxKind::Ident {
                continue;
            }
            let Some(span) = nodes.span(id) else {
                continue;
            };
            if !span.contains(occurrence.position) {
                continue;
            }
            let narrower = best
                .as_ref()
                .is_none_or(|(current, _)| current.contains_span(&span));
            if narrower {
                best = self
                    .table
                    .node(NodeRef::new(occurrence.file, id))
                    .map(|node| (span, node));
            }
        }
        best.map(|(_, node)| node)
    }

    /// Use sites of whatever `name` means at `occurrence`.
    pub fn references_to(&self, name: &str, occurrence: Occurrence) -> Vec<Reference> {
        let symbol = self.definition_of(name, occurrence);
        self.table.references(&symbol).to_vec()
    }

    /// Use sites of the symbol named at `occurrence`.
    pub fn references_at(&self, occurrence: Occurrence) -> Vec<Reference> {
        match self.definition_at(occurrence) {
            Some(symbol) => self.table.references(&symbol).to_vec(),
            None => Vec::new(),
        }
    }
}
