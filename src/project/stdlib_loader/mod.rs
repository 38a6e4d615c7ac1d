//! Bootstrap class library for the external type world.

mod loader;

pub use loader::{bootstrap_library, load_into};
