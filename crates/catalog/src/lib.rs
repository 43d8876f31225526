//! Catalog domain module.
//!
//! This crate contains the product model of the storefront (kinds, condition,
//! kind-specific details, validation and search matching), implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;
pub mod seed;

pub use product::{
    BookDetails, CdDetails, Condition, EbookDetails, HandoutDetails, Product, ProductDetails,
    ProductKind,
};
pub use seed::demo_catalog;
