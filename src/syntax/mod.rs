//! Consumed syntax-tree interface.
//!
//! The parser is an external collaborator: it hands over one [`SyntaxTree`]
//! per file, built through [`TreeBuilder`]. The semantic layers wrap these
//! trees and never mutate them.

mod kind;
mod tree;

pub use kind::SyntaxKind;
pub use tree::{Children, NodeId, SyntaxTree, TreeBuilder};
