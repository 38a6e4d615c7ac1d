//! ForestManager - owns the registered trees and the symbol table built over
//! them.
//!
//! Registration is cheap: adding a tree only records it and drops whatever
//! was built before. The table is built on first demand and shared behind an
//! `Arc` until the file set or the configuration changes.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use smol_str::SmolStr;
use tracing::debug;

use super::query::QueryEngine;
use crate::base::FileId;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::hir::{ClassCache, ClassLoader, FileSet, NodeRef, SymbolTable};
use crate::project::bootstrap_library;
use crate::syntax::SyntaxTree;

/// Identifies one analysis sharing the forest.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckId(pub SmolStr);

impl From<&str> for CheckId {
    fn from(name: &str) -> Self {
        CheckId(SmolStr::new(name))
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-generation manager of the analysed forest.
///
/// ```ignore
/// let mut forest = ForestManager::default();
/// forest.add_tree(tree_a);
/// forest.add_tree(tree_b);
/// let query = forest.query()?;
/// ```
pub struct ForestManager {
    files: FileSet,
    cache: Arc<ClassCache>,
    config: AnalysisConfig,
    table: RwLock<Option<Arc<SymbolTable>>>,
    checks: IndexMap<CheckId, Vec<NodeRef>>,
}

impl ForestManager {
    pub fn new(loader: Arc<dyn ClassLoader>) -> Self {
        Self {
            files: FileSet::new(),
            cache: Arc::new(ClassCache::new(loader)),
            config: AnalysisConfig::default(),
            table: RwLock::new(None),
            checks: IndexMap::new(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Replace the configuration. Any built table is discarded.
    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
        self.invalidate();
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<ClassCache> {
        &self.cache
    }

    /// Register a tree under its own path, replacing any tree previously
    /// registered there. All built state is discarded.
    pub fn add_tree(&mut self, tree: impl Into<Arc<SyntaxTree>>) -> FileId {
        let tree = tree.into();
        let file = self.files.insert(tree);
        debug!(?file, files = self.files.len(), "tree registered");
        self.invalidate();
        file
    }

    /// Drop a file from the forest. All built state is discarded.
    pub fn remove_file(&mut self, file: FileId) {
        self.files.remove(file);
        self.invalidate();
    }

    /// The id of a registered path, if any.
    pub fn file_id(&self, path: &str) -> Option<FileId> {
        self.files.lookup(path)
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    /// Whether the current generation has been built.
    pub fn is_built(&self) -> bool {
        self.table.read().is_some()
    }

    /// The symbol table of the current generation, building it if needed.
    pub fn table(&self) -> Result<Arc<SymbolTable>> {
        if let Some(table) = self.table.read().as_ref() {
            return Ok(Arc::clone(table));
        }

        let mut slot = self.table.write();
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }

        debug!(files = self.files.len(), "building symbol table");
        let table = Arc::new(SymbolTable::build(
            self.files.trees(),
            Arc::clone(&self.cache),
            self.config.clone(),
        )?);
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    pub fn query(&self) -> Result<QueryEngine> {
        Ok(QueryEngine::new(self.table()?))
    }

    // ========================================================================
    // CHECK REGISTRATION
    // ========================================================================

    /// Record that `check` is interested in `node`.
    pub fn register_check_node(&mut self, check: impl Into<CheckId>, node: NodeRef) {
        self.checks.entry(check.into()).or_default().push(node);
    }

    /// Nodes registered for `check`, in registration order.
    pub fn check_nodes_for(&self, check: &CheckId) -> &[NodeRef] {
        self.checks.get(check).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn checks(&self) -> impl Iterator<Item = &CheckId> + '_ {
        self.checks.keys()
    }

    /// Detach `check`. Removing the last check tears the forest down.
    pub fn remove_check(&mut self, check: &CheckId) {
        if self.checks.shift_remove(check).is_some() && self.checks.is_empty() {
            debug!("last check removed, forest reset");
            self.files.clear();
            self.invalidate();
        }
    }

    fn invalidate(&mut self) {
        *self.table.get_mut() = None;
    }
}

impl Default for ForestManager {
    fn default() -> Self {
        Self::new(Arc::new(bootstrap_library()))
    }
}

impl fmt::Debug for ForestManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForestManager")
            .field("files", &self.files.len())
            .field("built", &self.is_built())
            .field("checks", &self.checks.len())
            .finish()
    }
}
