//! High-level IR: the symbol table and name resolution.
//!
//! ## Architecture
//!
//! ```text
//! FileSet (syntax trees)
//!     ↓
//! SymbolTable::build
//!     ├─ NodeTable     spans, meaningfulness       (node.rs)
//!     ├─ TableMaker    definitions, scopes         (maker.rs)
//!     ├─ finish pass   imports, hierarchy, types   (finish.rs)
//!     └─ Resolver      references                  (resolve.rs)
//!     ↓
//! SymbolTable (read-only, shared behind Arc)
//! ```
//!
//! Lookups over scopes and types live in `lookup.rs`; classes outside the
//! analysed source come through the [`ClassLoader`] behind a [`ClassCache`].

mod definition;
mod external;
mod finish;
mod ids;
mod lookup;
mod maker;
mod node;
mod primitive;
mod resolve;
mod scope;
mod scope_index;
mod signature;
mod source;
mod table;
mod types;

pub use definition::{ClassData, DefKind, Definition, Imports, MethodData, Reference, VariableData};
pub use external::{
    CLASS, ClassCache, ClassLoader, OBJECT, ReflectedClass, ReflectedClassBuilder, ReflectedField,
    ReflectedMethod, STRING, StaticClassLoader,
};
pub use ids::{DefId, NodeRef, ScopeId};
pub use node::{AnnotatedNode, NodeInfo, NodeTable};
pub use primitive::Primitive;
pub use scope::{Scope, ScopeKind};
pub use scope_index::ScopeIndex;
pub use signature::Signature;
pub use source::FileSet;
pub use table::SymbolTable;
pub use types::{ClassType, MethodRef, MethodSlot, Nameable, Origin, Symbol, VariableRef};
