//! Project-level inputs that are not part of the analysed source.

pub mod stdlib_loader;

pub use stdlib_loader::{bootstrap_library, load_into};
