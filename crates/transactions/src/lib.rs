//! Transactions domain module (sales and exchanges).
//!
//! This crate contains the business rules for selling and exchanging catalog
//! items, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage). Decisions are expressed as [`CatalogChange`]s that a store
//! applies atomically.

pub mod decision;
pub mod policy;
pub mod receipt;

pub use decision::{CatalogChange, Transaction};
pub use policy::{ExchangePolicy, SameKindPolicy};
pub use receipt::{ExchangeReceipt, SaleReceipt, EXCHANGE_MESSAGE, SALE_MESSAGE};
