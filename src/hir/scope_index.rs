//! Position to scope lookup.

use rustc_hash::FxHashMap;

use super::ids::ScopeId;
use crate::base::{FileId, LineCol, Span};

/// Per-file list of scopes in discovery order, searched by span.
#[derive(Clone, Debug, Default)]
pub struct ScopeIndex {
    files: FxHashMap<FileId, Vec<(Span, ScopeId)>>,
}

impl ScopeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, file: FileId, span: Span, scope: ScopeId) {
        self.files.entry(file).or_default().push((span, scope));
    }

    /// The most specific scope whose span contains `position`.
    ///
    /// Linear in the number of scopes of the file. A later candidate replaces
    /// the current one only when it lies inside it.
    pub fn lookup(&self, file: FileId, position: LineCol) -> Option<ScopeId> {
        let entries = self.files.get(&file)?;
        let mut best: Option<&(Span, ScopeId)> = None;
        for entry in entries.iter().filter(|(span, _)| span.contains(position)) {
            best = match best {
                Some(current) if !current.0.contains_span(&entry.0) => Some(current),
                _ => Some(entry),
            };
        }
        best.map(|(_, scope)| *scope)
    }

    pub fn scopes_in(&self, file: FileId) -> impl Iterator<Item = ScopeId> + '_ {
        self.files
            .get(&file)
            .into_iter()
            .flatten()
            .map(|(_, scope)| *scope)
    }

    pub fn len(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(Vec::is_empty)
    }
}
