//! Catalog storage: the single source of truth for products.
//!
//! Only an in-memory implementation ships; persistent backends plug in behind
//! [`CatalogStore`].

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCatalogStore;
pub use r#trait::{CatalogStore, Decide};
