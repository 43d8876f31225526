//! Infrastructure layer: catalog storage and the transaction pipeline.

pub mod catalog_service;
pub mod catalog_store;
pub mod transaction_engine;


pub use catalog_service::CatalogService;
pub use catalog_store::{CatalogStore, InMemoryCatalogStore};
pub use transaction_engine::TransactionEngine;
