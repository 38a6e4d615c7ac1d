//! Lexical scopes and their namespaces.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::ids::{DefId, NodeRef, ScopeId};
use crate::base::{FileId, Span};

/// What opened a scope.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ScopeKind {
    /// Holds the top-level packages of the forest.
    Root,
    Package,
    Class,
    Method,
    /// A statement block, loop, branch, handler or initializer.
    Block,
}

/// A lexical scope.
///
/// Namespaces are kept apart: classes, variables, methods (overloads share a
/// name), labels and sub-packages. Insertion order is declaration order.
#[derive(Clone, Debug)]
pub struct Scope {
    pub(crate) kind: ScopeKind,
    /// The package, class or method definition that opened this scope.
    pub(crate) owner: Option<DefId>,
    pub(crate) parent: Option<ScopeId>,
    pub(crate) file: Option<FileId>,
    pub(crate) node: Option<NodeRef>,
    pub(crate) span: Option<Span>,
    pub(crate) classes: IndexMap<SmolStr, DefId>,
    pub(crate) variables: IndexMap<SmolStr, DefId>,
    pub(crate) methods: IndexMap<SmolStr, Vec<DefId>>,
    pub(crate) labels: IndexMap<SmolStr, DefId>,
    pub(crate) packages: IndexMap<SmolStr, DefId>,
    pub(crate) children: Vec<ScopeId>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind, owner: Option<DefId>, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            owner,
            parent,
            file: None,
            node: None,
            span: None,
            classes: IndexMap::new(),
            variables: IndexMap::new(),
            methods: IndexMap::new(),
            labels: IndexMap::new(),
            packages: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn owner(&self) -> Option<DefId> {
        self.owner
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// File the scope was declared in; `None` for the root and packages.
    pub fn file(&self) -> Option<FileId> {
        self.file
    }

    pub fn node(&self) -> Option<NodeRef> {
        self.node
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn class(&self, name: &str) -> Option<DefId> {
        self.classes.get(name).copied()
    }

    pub fn variable(&self, name: &str) -> Option<DefId> {
        self.variables.get(name).copied()
    }

    /// All overloads registered under `name`, in declaration order.
    pub fn methods_named(&self, name: &str) -> &[DefId] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn label(&self, name: &str) -> Option<DefId> {
        self.labels.get(name).copied()
    }

    pub fn package(&self, name: &str) -> Option<DefId> {
        self.packages.get(name).copied()
    }

    pub fn classes(&self) -> impl Iterator<Item = (&SmolStr, DefId)> + '_ {
        self.classes.iter().map(|(name, def)| (name, *def))
    }

    pub fn variables(&self) -> impl Iterator<Item = (&SmolStr, DefId)> + '_ {
        self.variables.iter().map(|(name, def)| (name, *def))
    }

    pub fn methods(&self) -> impl Iterator<Item = DefId> + '_ {
        self.methods.values().flatten().copied()
    }

    /// Nested scopes, in discovery order.
    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    pub fn is_class(&self) -> bool {
        self.kind == ScopeKind::Class
    }

    pub(crate) fn add_method(&mut self, name: SmolStr, def: DefId) {
        self.methods.entry(name).or_default().push(def);
    }

    /// Drop one overload; removes the name once no overload is left.
    pub(crate) fn remove_method(&mut self, name: &str, def: DefId) {
        if let Some(overloads) = self.methods.get_mut(name) {
            overloads.retain(|m| *m != def);
            if overloads.is_empty() {
                self.methods.shift_remove(name);
            }
        }
    }
}
