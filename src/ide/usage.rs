//! Usage analyses over a built table.
//!
//! - [`ReferenceCounter`] totals name tokens by resolution outcome
//! - [`ReferenceThreshold`] finds declarations that are referenced too rarely

use tracing::debug;

use crate::hir::{DefId, DefKind, SymbolTable};
use crate::syntax::SyntaxKind;

/// Totals of meaningful name tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    pub resolved: usize,
    pub unresolved: usize,
}

impl ReferenceCounts {
    pub fn total(&self) -> usize {
        self.resolved + self.unresolved
    }
}

/// Counts meaningful identifier tokens, split by whether they resolved to
/// something other than `Unknown`.
///
/// Declaration names are included unless the table's configuration turns
/// `count_declarations` off.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceCounter;

impl ReferenceCounter {
    pub fn new() -> Self {
        Self
    }

    pub fn count(&self, table: &SymbolTable) -> ReferenceCounts {
        let count_declarations = table.config().count_declarations;
        let mut counts = ReferenceCounts::default();

        for file in table.files() {
            let Some(nodes) = table.node_table(file) else {
                continue;
            };
            let tree = nodes.tree();
            for id in tree.node_ids() {
                if tree.kind(id) != SyntaxKind::Ident {
                    continue;
                }
                let info = nodes.info(id);
                if !info.meaningful || (info.declares && !count_declarations) {
                    continue;
                }
                match &info.symbol {
                    Some(symbol) if !symbol.is_unknown() => counts.resolved += 1,
                    _ => counts.unresolved += 1,
                }
            }
        }

        debug!(
            resolved = counts.resolved,
            unresolved = counts.unresolved,
            "references counted"
        );
        counts
    }
}

/// Finds declared classes, methods and variables referenced at most
/// `threshold` times.
///
/// Definitions whose qualified name matches one of the configured ignore
/// markers are skipped, as are synthesized constructors and anonymous
/// classes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceThreshold {
    threshold: usize,
}

impl ReferenceThreshold {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Matching definitions in discovery order.
    pub fn find(&self, table: &SymbolTable) -> Vec<DefId> {
        let config = table.config();
        let found: Vec<DefId> = table
            .definitions()
            .filter(|(_, def)| {
                matches!(
                    def.kind(),
                    DefKind::Class(_) | DefKind::Method(_) | DefKind::Variable(_)
                )
            })
            .filter(|(_, def)| !def.is_synthetic() && def.node().is_some())
            .filter(|(_, def)| def.reference_count() <= self.threshold)
            .filter(|(id, _)| !config.is_ignored(&table.qualified_name(*id)))
            .map(|(id, _)| id)
            .collect();

        debug!(
            threshold = self.threshold,
            found = found.len(),
            "under-referenced definitions"
        );
        found
    }
}
