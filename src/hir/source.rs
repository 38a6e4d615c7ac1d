//! File set management for registered syntax trees.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::syntax::SyntaxTree;

/// Assigns stable ids to file paths and holds the tree of each file.
///
/// Re-registering a path replaces its tree but keeps its id.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    /// Path → FileId mapping
    path_to_id: FxHashMap<SmolStr, FileId>,
    /// FileId → Path mapping
    id_to_path: FxHashMap<FileId, SmolStr>,
    /// FileId → Tree, in registration order
    trees: IndexMap<FileId, Arc<SyntaxTree>>,
    /// Next FileId to assign
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The FileId of an already known path. Never assigns one.
    pub fn lookup(&self, path: &str) -> Option<FileId> {
        self.inner.read().path_to_id.get(path).copied()
    }

    /// Get or create the FileId for a path.
    pub fn file_id(&self, path: &str) -> FileId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        let path = SmolStr::new(path);
        inner.path_to_id.insert(path.clone(), id);
        inner.id_to_path.insert(id, path);
        id
    }

    /// Register a tree under its own path.
    pub fn insert(&self, tree: Arc<SyntaxTree>) -> FileId {
        let id = self.file_id(tree.path());
        self.inner.write().trees.insert(id, tree);
        id
    }

    pub fn tree(&self, file: FileId) -> Option<Arc<SyntaxTree>> {
        self.inner.read().trees.get(&file).cloned()
    }

    pub fn path(&self, file: FileId) -> Option<SmolStr> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    /// Remove a file. Its id is not reused.
    pub fn remove(&self, file: FileId) {
        let mut inner = self.inner.write();
        inner.trees.shift_remove(&file);
        if let Some(path) = inner.id_to_path.remove(&file) {
            inner.path_to_id.remove(&path);
        }
    }

    /// Number of files holding a tree.
    pub fn len(&self) -> usize {
        self.inner.read().trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().trees.keys().copied().collect()
    }

    /// All registered trees, in registration order.
    pub fn trees(&self) -> Vec<(FileId, Arc<SyntaxTree>)> {
        self.inner
            .read()
            .trees
            .iter()
            .map(|(id, tree)| (*id, Arc::clone(tree)))
            .collect()
    }

    /// Drop every tree and path.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.trees.clear();
        inner.path_to_id.clear();
        inner.id_to_path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::LineCol;
    use crate::syntax::{SyntaxKind, TreeBuilder};

    fn unit(path: &str) -> Arc<SyntaxTree> {
        let mut b = TreeBuilder::new(path);
        b.start_node(SyntaxKind::CompilationUnit, "", LineCol::new(0, 0)).unwrap();
        b.finish_node().unwrap();
        Arc::new(b.finish().unwrap())
    }

    #[test]
    fn test_file_set_id_assignment() {
        let files = FileSet::new();

        let id1 = files.file_id("app/A.java");
        let id2 = files.file_id("app/B.java");
        let id3 = files.file_id("app/A.java"); // same as id1

        assert_ne!(id1, id2);
        assert_eq!(id1, id3); // stable ID for same path
    }

    #[test]
    fn test_reinsert_keeps_id() {
        let files = FileSet::new();
        let first = files.insert(unit("app/A.java"));
        let second = files.insert(unit("app/A.java"));

        assert_eq!(first, second);
        assert_eq!(files.len(), 1);
        assert_eq!(files.path(first).as_deref(), Some("app/A.java"));
    }

    #[test]
    fn test_lookup_does_not_assign() {
        let files = FileSet::new();
        assert_eq!(files.lookup("app/A.java"), None);
        assert_eq!(files.path(FileId::new(0)), None);

        let a = files.insert(unit("app/A.java"));
        assert_eq!(files.lookup("app/A.java"), Some(a));
        assert_eq!(files.lookup("app/B.java"), None);
        // a failed lookup leaves the next id untouched
        assert_eq!(files.file_id("app/B.java"), FileId::new(1));
    }

    #[test]
    fn test_remove_and_clear() {
        let files = FileSet::new();
        let a = files.insert(unit("app/A.java"));
        let b = files.insert(unit("app/B.java"));

        files.remove(a);
        assert!(files.tree(a).is_none());
        assert_eq!(files.path(a), None);
        assert_eq!(files.lookup("app/A.java"), None);
        assert_eq!(files.files(), vec![b]);

        files.clear();
        assert!(files.is_empty());
        assert_ne!(files.file_id("app/A.java"), a);
    }
}
