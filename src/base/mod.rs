//! Foundation types for jsymtab.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Registered file identifiers
//! - [`LineCol`] - 0-indexed line/column positions
//! - [`Occurrence`] - A position inside one file
//! - [`Span`] - Half-open position intervals with containment and union
//!
//! This module has NO dependencies on other jsymtab modules except the
//! crate error type.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, Occurrence, Span};
