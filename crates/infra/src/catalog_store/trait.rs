use std::sync::Arc;

use sebo_catalog::Product;
use sebo_core::{DomainError, DomainResult, ProductId};
use sebo_transactions::CatalogChange;

/// Decision callback run by [`CatalogStore::commit`] while the affected
/// products are locked.
pub type Decide<'a> = &'a dyn Fn(&[Product]) -> DomainResult<Vec<CatalogChange>>;

pub(crate) fn not_found(id: &ProductId) -> DomainError {
    DomainError::not_found(format!("Produto {id} não encontrado."))
}

/// Product storage.
///
/// Every mutation is applied under exclusive access and is visible to the next
/// read. Reads never observe a partially applied `commit`.
pub trait CatalogStore: Send + Sync {
    /// All products, in slot order.
    fn list(&self) -> DomainResult<Vec<Product>>;

    fn get(&self, id: &ProductId) -> DomainResult<Product>;

    /// Append a product. `Conflict` if the id is taken.
    fn create(&self, product: Product) -> DomainResult<Product>;

    /// Overwrite an existing product in its slot. The stored availability
    /// wins over the incoming one.
    fn replace(&self, product: Product) -> DomainResult<Product>;

    fn delete(&self, id: &ProductId) -> DomainResult<()>;

    fn set_availability(&self, id: &ProductId, available: bool) -> DomainResult<Product>;

    /// Check-then-act in one critical section.
    ///
    /// Loads `ids` (`NotFound` on the first absent one), hands them to
    /// `decide` in the same order and applies the returned changes. Nothing
    /// is applied when `decide` fails. Returns the products after the changes.
    fn commit(&self, ids: &[ProductId], decide: Decide<'_>) -> DomainResult<Vec<Product>>;

    /// Case-insensitive title search in slot order; blank terms match all.
    fn search(&self, term: &str) -> DomainResult<Vec<Product>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|p| p.matches_term(term))
            .collect())
    }
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn list(&self) -> DomainResult<Vec<Product>> {
        (**self).list()
    }

    fn get(&self, id: &ProductId) -> DomainResult<Product> {
        (**self).get(id)
    }

    fn create(&self, product: Product) -> DomainResult<Product> {
        (**self).create(product)
    }

    fn replace(&self, product: Product) -> DomainResult<Product> {
        (**self).replace(product)
    }

    fn delete(&self, id: &ProductId) -> DomainResult<()> {
        (**self).delete(id)
    }

    fn set_availability(&self, id: &ProductId, available: bool) -> DomainResult<Product> {
        (**self).set_availability(id, available)
    }

    fn commit(&self, ids: &[ProductId], decide: Decide<'_>) -> DomainResult<Vec<Product>> {
        (**self).commit(ids, decide)
    }

    fn search(&self, term: &str) -> DomainResult<Vec<Product>> {
        (**self).search(term)
    }
}
