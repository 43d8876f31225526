use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use sebo_catalog::Product;
use sebo_core::{DomainError, DomainResult, Entity, ProductId};
use sebo_transactions::CatalogChange;

use super::r#trait::{not_found, CatalogStore, Decide};

type Slots = IndexMap<ProductId, Product>;

/// In-memory catalog.
///
/// One store-wide `RwLock`: reads share it, every mutation (including the
/// whole validate-and-apply step of `commit`) holds it exclusively. Slot order
/// is the `IndexMap` order.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    slots: RwLock<Slots>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `products` in the given order.
    pub fn seeded(products: impl IntoIterator<Item = Product>) -> DomainResult<Self> {
        let store = Self::new();
        for product in products {
            store.create(product)?;
        }
        Ok(store)
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Slots>> {
        self.slots
            .read()
            .map_err(|_| DomainError::internal("catalog lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Slots>> {
        self.slots
            .write()
            .map_err(|_| DomainError::internal("catalog lock poisoned"))
    }

    fn references_known_ids(slots: &Slots, change: &CatalogChange) -> bool {
        match change {
            CatalogChange::SetAvailability { product_id, .. } => slots.contains_key(product_id),
            CatalogChange::SwapSlots { a, b } => slots.contains_key(a) && slots.contains_key(b),
        }
    }

    fn apply(slots: &mut Slots, change: &CatalogChange) {
        match change {
            CatalogChange::SetAvailability {
                product_id,
                available,
            } => {
                if let Some(product) = slots.get_mut(product_id) {
                    product.set_available(*available);
                }
            }
            CatalogChange::SwapSlots { a, b } => {
                if let (Some(ia), Some(ib)) = (slots.get_index_of(a), slots.get_index_of(b)) {
                    slots.swap_indices(ia, ib);
                }
            }
        }
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn list(&self) -> DomainResult<Vec<Product>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn get(&self, id: &ProductId) -> DomainResult<Product> {
        self.read()?.get(id).cloned().ok_or_else(|| not_found(id))
    }

    fn create(&self, product: Product) -> DomainResult<Product> {
        let mut slots = self.write()?;
        if slots.contains_key(product.id()) {
            return Err(DomainError::conflict(format!(
                "Produto {} já cadastrado.",
                product.id()
            )));
        }
        slots.insert(product.id().clone(), product.clone());
        Ok(product)
    }

    fn replace(&self, mut product: Product) -> DomainResult<Product> {
        let mut slots = self.write()?;
        let current = slots.get_mut(product.id()).ok_or_else(|| not_found(product.id()))?;
        product.set_available(current.is_available());
        *current = product.clone();
        Ok(product)
    }

    fn delete(&self, id: &ProductId) -> DomainResult<()> {
        // shift_remove keeps the remaining slots in order.
        self.write()?
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    fn set_availability(&self, id: &ProductId, available: bool) -> DomainResult<Product> {
        let mut slots = self.write()?;
        let product = slots.get_mut(id).ok_or_else(|| not_found(id))?;
        product.set_available(available);
        Ok(product.clone())
    }

    fn commit(&self, ids: &[ProductId], decide: Decide<'_>) -> DomainResult<Vec<Product>> {
        let mut slots = self.write()?;

        let current = ids
            .iter()
            .map(|id| slots.get(id).cloned().ok_or_else(|| not_found(id)))
            .collect::<DomainResult<Vec<_>>>()?;

        let changes = decide(&current)?;

        if let Some(bad) = changes
            .iter()
            .find(|c| !Self::references_known_ids(&slots, c))
        {
            return Err(DomainError::internal(format!(
                "change references unknown product: {bad:?}"
            )));
        }

        for change in &changes {
            Self::apply(&mut slots, change);
        }

        ids.iter()
            .map(|id| slots.get(id).cloned().ok_or_else(|| not_found(id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sebo_catalog::demo_catalog;
    use sebo_transactions::{SameKindPolicy, Transaction};

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    fn store() -> InMemoryCatalogStore {
        InMemoryCatalogStore::seeded(demo_catalog().unwrap()).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = store();
        assert_eq!(
            ids(&store.list().unwrap()),
            vec!["L1", "L2", "E1", "E2", "A1", "A2", "C1"]
        );
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let store = store();
        let dup = store.get(&pid("L1")).unwrap();
        assert!(matches!(store.create(dup), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn delete_twice_is_ok_then_not_found() {
        let store = store();
        store.delete(&pid("E2")).unwrap();
        assert!(matches!(store.delete(&pid("E2")), Err(DomainError::NotFound(_))));
        assert!(matches!(store.get(&pid("E2")), Err(DomainError::NotFound(_))));
        assert_eq!(ids(&store.list().unwrap()), vec!["L1", "L2", "E1", "A1", "A2", "C1"]);
    }

    #[test]
    fn set_availability_is_visible_immediately() {
        let store = store();
        let updated = store.set_availability(&pid("C1"), false).unwrap();
        assert!(!updated.is_available());
        assert!(!store.get(&pid("C1")).unwrap().is_available());
        assert!(matches!(
            store.set_availability(&pid("nope"), false),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn replace_keeps_slot_and_availability() {
        let store = store();
        store.set_availability(&pid("L2"), false).unwrap();

        let mut incoming = store.get(&pid("L2")).unwrap();
        incoming.set_available(true);
        let stored = store.replace(incoming).unwrap();

        assert!(!stored.is_available());
        assert_eq!(ids(&store.list().unwrap())[1], "L2");
    }

    #[test]
    fn commit_applies_swap_atomically() {
        let store = store();
        let tx = Transaction::exchange(pid("E1"), pid("E2"));
        let after = store
            .commit(&tx.affected(), &|products| tx.decide(products, &SameKindPolicy))
            .unwrap();

        assert!(after.iter().all(Product::is_available));
        assert_eq!(ids(&store.list().unwrap()), vec!["L1", "L2", "E2", "E1", "A1", "A2", "C1"]);
    }

    #[test]
    fn failed_commit_leaves_catalog_untouched() {
        let store = store();
        let before = store.list().unwrap();

        let tx = Transaction::exchange(pid("E1"), pid("L1"));
        let err = store
            .commit(&tx.affected(), &|products| tx.decide(products, &SameKindPolicy))
            .unwrap_err();

        assert!(matches!(err, DomainError::IncompatibleCategory(_)));
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn commit_reports_missing_ids_before_deciding() {
        let store = store();
        let err = store
            .commit(&[pid("E1"), pid("X9")], &|_: &[Product]| -> DomainResult<Vec<CatalogChange>> {
                panic!("must not decide")
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(msg) if msg.contains("X9")));
    }

    #[test]
    fn commit_rejects_changes_for_unknown_ids() {
        let store = store();
        let before = store.list().unwrap();
        let err = store
            .commit(&[pid("L1")], &|_: &[Product]| {
                Ok(vec![
                    CatalogChange::SetAvailability {
                        product_id: pid("L1"),
                        available: false,
                    },
                    CatalogChange::SwapSlots {
                        a: pid("L1"),
                        b: pid("ghost"),
                    },
                ])
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
        assert_eq!(store.list().unwrap(), before);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: search returns exactly the matching products, as a subsequence of list().
            #[test]
            fn search_is_an_ordered_filter_of_list(term in "[a-zA-Z ]{0,6}") {
                let store = store();
                let all = store.list().unwrap();
                let found = store.search(&term).unwrap();

                let expected: Vec<Product> = all
                    .iter()
                    .filter(|p| {
                        term.trim().is_empty()
                            || p.title().to_lowercase().contains(&term.to_lowercase())
                    })
                    .cloned()
                    .collect();
                prop_assert_eq!(found, expected);
            }
        }
    }
}
