//! # jsymtab
//!
//! Symbol table and name resolution for Java syntax trees.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → ForestManager, QueryEngine, usage analyses
//!   ↓
//! hir     → definitions, scopes, types, table maker, resolver
//!   ↓
//! syntax  → consumed syntax trees (SyntaxKind, SyntaxTree, TreeBuilder)
//!   ↓
//! base    → primitives (FileId, LineCol, Occurrence, Span)
//! ```
//!
//! `project` supplies the bootstrap class library for the external type
//! world; `config` and `error` are shared by every layer.

/// Foundation types: FileId, positions, spans
pub mod base;

/// Analysis configuration
pub mod config;

/// Crate error type
pub mod error;

/// Semantic model: symbol table and resolution
pub mod hir;

/// Forest management, queries and usage analyses
pub mod ide;

/// Bootstrap compiled-library classes
pub mod project;

/// Consumed syntax-tree interface
pub mod syntax;

pub use base::{FileId, LineCol, Occurrence, Span};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use hir::{ClassType, DefId, MethodRef, Nameable, Origin, Signature, Symbol, SymbolTable, VariableRef};
pub use ide::{ForestManager, QueryEngine, ReferenceCounter, ReferenceThreshold};
pub use syntax::{NodeId, SyntaxKind, SyntaxTree, TreeBuilder};
