//! The symbol table of one forest generation.
//!
//! Definitions and scopes live in flat arenas addressed by [`DefId`] and
//! [`ScopeId`]. Construction runs in fixed phases over all registered files:
//!
//! 1. spans and meaningfulness per node ([`NodeTable::new`])
//! 2. the definition walk ([`TableMaker`])
//! 3. the finish pass: imports, hierarchy, member types and signatures
//! 4. the reference walk ([`Resolver`])
//!
//! After [`SymbolTable::build`] returns, the table is read-only.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use tracing::debug;

use super::definition::{Definition, Reference};
use super::external::ClassCache;
use super::ids::{DefId, NodeRef, ScopeId};
use super::maker::TableMaker;
use super::node::NodeTable;
use super::resolve::Resolver;
use super::scope::{Scope, ScopeKind};
use super::scope_index::ScopeIndex;
use super::types::{ClassType, Symbol};
use crate::base::{FileId, Occurrence};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::syntax::{NodeId, SyntaxKind, SyntaxTree};

/// A definition or block awaiting the reference walk, in discovery order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Entity {
    Class(DefId),
    Method(DefId),
    Variable(DefId),
    Label(DefId),
    Block(ScopeId),
}

/// Definitions, scopes and resolved names over a set of syntax trees.
pub struct SymbolTable {
    pub(crate) defs: Vec<Definition>,
    pub(crate) scopes: Vec<Scope>,
    pub(crate) files: IndexMap<FileId, NodeTable>,
    pub(crate) scope_index: ScopeIndex,
    /// Declared classes by qualified name.
    pub(crate) class_index: FxHashMap<SmolStr, DefId>,
    /// Declared packages by qualified name.
    pub(crate) packages: IndexMap<SmolStr, DefId>,
    pub(crate) file_packages: FxHashMap<FileId, ScopeId>,
    pub(crate) file_imports: FxHashMap<FileId, Vec<NodeId>>,
    /// Classes named by single-type imports, keyed by import node.
    pub(crate) import_targets: FxHashMap<NodeRef, ClassType>,
    /// References to symbols that have no declared definition.
    pub(crate) external_refs: IndexMap<Symbol, Vec<Reference>>,
    pub(crate) entities: Vec<Entity>,
    pub(crate) anonymous_classes: u32,
    cache: Arc<ClassCache>,
    config: AnalysisConfig,
}

impl SymbolTable {
    fn empty(cache: Arc<ClassCache>, config: AnalysisConfig) -> Self {
        Self {
            defs: Vec::new(),
            scopes: vec![Scope::new(ScopeKind::Root, None, None)],
            files: IndexMap::new(),
            scope_index: ScopeIndex::new(),
            class_index: FxHashMap::default(),
            packages: IndexMap::new(),
            file_packages: FxHashMap::default(),
            file_imports: FxHashMap::default(),
            import_targets: FxHashMap::default(),
            external_refs: IndexMap::new(),
            entities: Vec::new(),
            anonymous_classes: 0,
            cache,
            config,
        }
    }

    /// Build the table over `trees`.
    ///
    /// Fails only on structurally invalid input: a tree whose root is not a
    /// compilation unit. Unresolvable names never fail the build.
    pub fn build<I>(trees: I, cache: Arc<ClassCache>, config: AnalysisConfig) -> Result<Self>
    where
        I: IntoIterator<Item = (FileId, Arc<SyntaxTree>)>,
    {
        let mut table = Self::empty(cache, config);

        for (file, tree) in trees {
            let root = tree.kind(tree.root());
            if root != SyntaxKind::CompilationUnit {
                return Err(Error::UnexpectedRoot {
                    path: SmolStr::new(tree.path()),
                    kind: root,
                });
            }
            table.files.insert(file, NodeTable::new(file, tree));
        }
        debug!(files = table.files.len(), "spans computed");

        let files: Vec<(FileId, Arc<SyntaxTree>)> = table
            .files
            .iter()
            .map(|(file, nodes)| (*file, Arc::clone(nodes.tree())))
            .collect();
        for (file, tree) in files {
            TableMaker::new(&mut table, file, tree).walk_file();
        }
        debug!(
            definitions = table.defs.len(),
            scopes = table.scopes.len(),
            "definitions created"
        );

        table.finish_definitions();
        debug!(classes = table.class_index.len(), "definitions finished");

        Resolver::new(&mut table).resolve();
        debug!(
            references = table.reference_total(),
            external = table.external_refs.len(),
            "references resolved"
        );

        Ok(table)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn definition(&self, def: DefId) -> &Definition {
        &self.defs[def.index()]
    }

    pub fn definitions(&self) -> impl Iterator<Item = (DefId, &Definition)> + '_ {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (DefId(i as u32), def))
    }

    pub fn scope(&self, scope: ScopeId) -> &Scope {
        &self.scopes[scope.index()]
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> + '_ {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, scope)| (ScopeId(i as u32), scope))
    }

    pub fn root_scope(&self) -> ScopeId {
        ScopeId::ROOT
    }

    /// Declared package by qualified name.
    pub fn package(&self, qualified_name: &str) -> Option<DefId> {
        self.packages.get(qualified_name).copied()
    }

    pub fn packages(&self) -> impl Iterator<Item = (&SmolStr, DefId)> + '_ {
        self.packages.iter().map(|(name, def)| (name, *def))
    }

    /// Declared class by qualified name.
    pub fn class_named(&self, qualified_name: &str) -> Option<DefId> {
        self.class_index.get(qualified_name).copied()
    }

    /// The package scope a file's top-level classes are declared in.
    pub fn file_package(&self, file: FileId) -> Option<ScopeId> {
        self.file_packages.get(&file).copied()
    }

    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        self.files.keys().copied()
    }

    pub fn node_table(&self, file: FileId) -> Option<&NodeTable> {
        self.files.get(&file)
    }

    pub fn tree(&self, file: FileId) -> Option<&Arc<SyntaxTree>> {
        self.files.get(&file).map(NodeTable::tree)
    }

    pub fn scope_index(&self) -> &ScopeIndex {
        &self.scope_index
    }

    pub fn cache(&self) -> &Arc<ClassCache> {
        &self.cache
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The innermost scope at `occurrence`, falling back to the file's
    /// package scope when no declared scope contains it.
    pub fn scope_at(&self, occurrence: Occurrence) -> Option<ScopeId> {
        self.scope_index
            .lookup(occurrence.file, occurrence.position)
            .or_else(|| self.file_package(occurrence.file))
    }

    /// The class whose body contains `scope`, if any.
    pub fn enclosing_class(&self, scope: ScopeId) -> Option<DefId> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let s = self.scope(id);
            if s.kind == ScopeKind::Class {
                return s.owner;
            }
            cur = s.parent;
        }
        None
    }

    /// Dotted name through enclosing packages, classes and methods. Blocks
    /// and the unnamed package contribute nothing.
    pub fn qualified_name(&self, def: DefId) -> String {
        let mut parts = vec![self.definition(def).name.as_str()];
        let mut cur = self.definition(def).parent;
        while let Some(id) = cur {
            let scope = self.scope(id);
            if let Some(owner) = scope.owner {
                parts.push(self.definition(owner).name.as_str());
            }
            cur = scope.parent;
        }
        parts.retain(|part| !part.is_empty());
        parts.reverse();
        parts.join(".")
    }

    /// Use sites resolved to `symbol`.
    pub fn references(&self, symbol: &Symbol) -> &[Reference] {
        match symbol.declared() {
            Some(def) => &self.definition(def).references,
            None => self
                .external_refs
                .get(symbol)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Total number of references recorded in this generation.
    pub fn reference_total(&self) -> usize {
        self.defs.iter().map(|d| d.references.len()).sum::<usize>()
            + self.external_refs.values().map(Vec::len).sum::<usize>()
    }

    // ========================================================================
    // CONSTRUCTION HELPERS
    // ========================================================================

    pub(crate) fn alloc_def(&mut self, def: Definition) -> DefId {
        let id = DefId(self.defs.len() as u32);
        self.defs.push(def);
        id
    }

    pub(crate) fn alloc_scope(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        if let Some(parent) = scope.parent {
            self.scopes[parent.index()].children.push(id);
        }
        self.scopes.push(scope);
        id
    }

    pub(crate) fn definition_mut(&mut self, def: DefId) -> &mut Definition {
        &mut self.defs[def.index()]
    }

    pub(crate) fn scope_mut(&mut self, scope: ScopeId) -> &mut Scope {
        &mut self.scopes[scope.index()]
    }

    pub(crate) fn node_table_mut(&mut self, file: FileId) -> Option<&mut NodeTable> {
        self.files.get_mut(&file)
    }

    pub(crate) fn add_reference(&mut self, reference: Reference) {
        match reference.target.declared() {
            Some(def) => self.defs[def.index()].references.push(reference),
            None => self
                .external_refs
                .entry(reference.target.clone())
                .or_default()
                .push(reference),
        }
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("files", &self.files.len())
            .field("definitions", &self.defs.len())
            .field("scopes", &self.scopes.len())
            .finish()
    }
}
