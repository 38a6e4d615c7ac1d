//! Analysis-facing APIs over the semantic model.
//!
//! ## Usage
//!
//! ```ignore
//! use jsymtab::ide::{ForestManager, ReferenceThreshold};
//!
//! let mut forest = ForestManager::default();
//! forest.add_tree(tree);
//!
//! let query = forest.query()?;
//! let symbol = query.definition_at(occurrence);
//! let unused = ReferenceThreshold::new(0).find(query.table());
//! ```

mod forest;
mod query;
mod usage;

pub use forest::{CheckId, ForestManager};
pub use query::QueryEngine;
pub use usage::{ReferenceCounter, ReferenceCounts, ReferenceThreshold};
