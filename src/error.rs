//! Error type for jsymtab.
//!
//! Name resolution never fails: anything that cannot be resolved becomes an
//! `Unknown` type. The variants here cover structural defects in the input
//! trees and misses from the class loader (which resolution recovers from).

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::LineCol;
use crate::syntax::SyntaxKind;

// ============================================================================
// Error Type
// ============================================================================

/// Errors raised while building trees or the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A span whose end precedes its start.
    #[error("malformed span: end {end} precedes start {start}")]
    MalformedSpan { start: LineCol, end: LineCol },

    /// Tree builder closed a node that was never opened, or finished with
    /// nodes still open.
    #[error("unbalanced syntax tree: {reason}")]
    UnbalancedTree { reason: &'static str },

    /// Tree builder finished without producing a root node.
    #[error("syntax tree has no root node")]
    EmptyTree,

    /// A registered tree whose root is not a compilation unit.
    #[error("{path}: expected a CompilationUnit root, found {kind}")]
    UnexpectedRoot { path: SmolStr, kind: SyntaxKind },

    /// The class loader has no class with this qualified name.
    #[error("class not found: {0}")]
    ClassNotFound(SmolStr),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
