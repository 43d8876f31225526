//! Catalog reads and registrations, shared by both protocol façades.

use std::sync::Arc;

use sebo_catalog::{Product, ProductKind};
use sebo_core::{DomainError, DomainResult, Entity, ProductId};

use crate::catalog_store::CatalogStore;

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All products in catalog order, optionally restricted to one kind.
    pub fn list(&self, kind: Option<ProductKind>) -> DomainResult<Vec<Product>> {
        Ok(filter_kind(self.store.list()?, kind))
    }

    pub fn search(&self, term: &str, kind: Option<ProductKind>) -> DomainResult<Vec<Product>> {
        Ok(filter_kind(self.store.search(term)?, kind))
    }

    pub fn get(&self, id: &ProductId) -> DomainResult<Product> {
        self.store.get(id)
    }

    /// Register a new product. New entries always start available.
    pub fn create(&self, mut product: Product) -> DomainResult<Product> {
        product.validate()?;
        product.set_available(true);
        let created = self.store.create(product)?;
        tracing::info!(product_id = %created.id(), kind = %created.kind(), "product registered");
        Ok(created)
    }

    /// Replace the product stored under `id`; the body must carry the same id.
    pub fn replace(&self, id: &ProductId, product: Product) -> DomainResult<Product> {
        if product.id() != id {
            return Err(DomainError::bad_request(
                "O ID da URL difere do ID do corpo da requisição.",
            ));
        }
        product.validate()?;
        let replaced = self.store.replace(product)?;
        tracing::info!(product_id = %id, "product replaced");
        Ok(replaced)
    }

    pub fn delete(&self, id: &ProductId) -> DomainResult<()> {
        self.store.delete(id)?;
        tracing::info!(product_id = %id, "product removed");
        Ok(())
    }
}

fn filter_kind(products: Vec<Product>, kind: Option<ProductKind>) -> Vec<Product> {
    match kind {
        Some(kind) => products.into_iter().filter(|p| p.kind() == kind).collect(),
        None => products,
    }
}
