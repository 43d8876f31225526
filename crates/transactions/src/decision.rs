use serde::{Deserialize, Serialize};

use sebo_catalog::Product;
use sebo_core::{DomainError, DomainResult, Entity, ProductId};

use crate::policy::ExchangePolicy;

/// A requested state transition over the catalog. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    Sale {
        product_id: ProductId,
    },
    Exchange {
        product_a_id: ProductId,
        product_b_id: ProductId,
    },
}

/// Mutation a store applies once a transaction has been accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogChange {
    SetAvailability {
        product_id: ProductId,
        available: bool,
    },
    /// Swap the catalog slots held by two products.
    SwapSlots { a: ProductId, b: ProductId },
}

impl Transaction {
    pub fn sale(product_id: ProductId) -> Self {
        Transaction::Sale { product_id }
    }

    pub fn exchange(product_a_id: ProductId, product_b_id: ProductId) -> Self {
        Transaction::Exchange {
            product_a_id,
            product_b_id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transaction::Sale { .. } => "sale",
            Transaction::Exchange { .. } => "exchange",
        }
    }

    /// Ids the transaction reads and mutates, in the order `decide` expects
    /// the products.
    pub fn affected(&self) -> Vec<ProductId> {
        match self {
            Transaction::Sale { product_id } => vec![product_id.clone()],
            Transaction::Exchange {
                product_a_id,
                product_b_id,
            } => vec![product_a_id.clone(), product_b_id.clone()],
        }
    }

    /// Validate the transaction against the current products and return the
    /// changes to apply.
    ///
    /// Pure: must not mutate anything. Existence of the products has already
    /// been established by the caller.
    pub fn decide(
        &self,
        products: &[Product],
        policy: &dyn ExchangePolicy,
    ) -> DomainResult<Vec<CatalogChange>> {
        match (self, products) {
            (Transaction::Sale { .. }, [product]) => decide_sale(product),
            (Transaction::Exchange { .. }, [a, b]) => decide_exchange(a, b, policy),
            _ => Err(DomainError::internal(format!(
                "{} received {} products",
                self.label(),
                products.len()
            ))),
        }
    }
}

fn ensure_available(product: &Product) -> DomainResult<()> {
    if !product.is_available() {
        return Err(DomainError::unavailable(format!(
            "Produto {} indisponível.",
            product.id()
        )));
    }
    Ok(())
}

fn decide_sale(product: &Product) -> DomainResult<Vec<CatalogChange>> {
    ensure_available(product)?;

    Ok(vec![CatalogChange::SetAvailability {
        product_id: product.id().clone(),
        available: false,
    }])
}

fn decide_exchange(
    a: &Product,
    b: &Product,
    policy: &dyn ExchangePolicy,
) -> DomainResult<Vec<CatalogChange>> {
    ensure_available(a)?;
    ensure_available(b)?;

    if a.id() == b.id() {
        return Err(DomainError::bad_request(format!(
            "Produto {} não pode ser trocado por ele mesmo.",
            a.id()
        )));
    }

    if !policy.can_exchange(a, b) {
        return Err(DomainError::incompatible(format!(
            "Troca não permitida: {}({}) não pode ser trocado por {}({}).",
            a.kind(),
            a.id(),
            b.kind(),
            b.id()
        )));
    }

    Ok(vec![CatalogChange::SwapSlots {
        a: a.id().clone(),
        b: b.id().clone(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SameKindPolicy;
    use rust_decimal::Decimal;
    use sebo_catalog::{Condition, HandoutDetails, Product, ProductDetails, demo_catalog};

    fn product(id: &str) -> Product {
        demo_catalog()
            .unwrap()
            .into_iter()
            .find(|p| p.id().as_str() == id)
            .unwrap()
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn sale_marks_product_unavailable() {
        let tx = Transaction::sale(pid("L2"));
        let changes = tx.decide(&[product("L2")], &SameKindPolicy).unwrap();
        assert_eq!(
            changes,
            vec![CatalogChange::SetAvailability {
                product_id: pid("L2"),
                available: false
            }]
        );
    }

    #[test]
    fn sale_of_sold_product_is_unavailable() {
        let mut sold = product("L2");
        sold.set_available(false);
        let err = Transaction::sale(pid("L2"))
            .decide(&[sold], &SameKindPolicy)
            .unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }

    #[test]
    fn same_kind_exchange_swaps_slots() {
        let tx = Transaction::exchange(pid("E1"), pid("E2"));
        let changes = tx
            .decide(&[product("E1"), product("E2")], &SameKindPolicy)
            .unwrap();
        assert_eq!(
            changes,
            vec![CatalogChange::SwapSlots {
                a: pid("E1"),
                b: pid("E2")
            }]
        );
    }

    #[test]
    fn cross_kind_exchange_is_incompatible() {
        let tx = Transaction::exchange(pid("E1"), pid("L1"));
        let err = tx
            .decide(&[product("E1"), product("L1")], &SameKindPolicy)
            .unwrap_err();
        assert!(matches!(err, DomainError::IncompatibleCategory(_)));
    }

    #[test]
    fn availability_is_checked_before_compatibility() {
        let mut sold = product("L1");
        sold.set_available(false);
        let tx = Transaction::exchange(pid("E1"), pid("L1"));
        let err = tx.decide(&[product("E1"), sold], &SameKindPolicy).unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }

    #[test]
    fn self_exchange_is_bad_request_once_available() {
        let tx = Transaction::exchange(pid("E1"), pid("E1"));
        let err = tx
            .decide(&[product("E1"), product("E1")], &SameKindPolicy)
            .unwrap_err();
        assert!(matches!(err, DomainError::BadRequest(_)));
    }

    #[test]
    fn sold_self_exchange_is_unavailable() {
        let mut sold = product("L2");
        sold.set_available(false);
        let tx = Transaction::exchange(pid("L2"), pid("L2"));
        let err = tx.decide(&[sold.clone(), sold], &SameKindPolicy).unwrap_err();
        assert!(matches!(err, DomainError::Unavailable(_)));
    }

    #[test]
    fn policy_is_swappable() {
        #[derive(Debug)]
        struct AnythingGoes;
        impl ExchangePolicy for AnythingGoes {
            fn can_exchange(&self, _a: &Product, _b: &Product) -> bool {
                true
            }
        }

        let tx = Transaction::exchange(pid("E1"), pid("L1"));
        assert!(tx.decide(&[product("E1"), product("L1")], &AnythingGoes).is_ok());
    }

    #[test]
    fn mismatched_product_count_is_internal() {
        let err = Transaction::sale(pid("L1"))
            .decide(&[], &SameKindPolicy)
            .unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn handout(id: &str, available: bool) -> Product {
            let mut p = Product::new(
                pid(id),
                "Apostila",
                Decimal::new(10, 0),
                Condition::Used,
                ProductDetails::Handout(HandoutDetails {
                    subject: "Física".to_string(),
                    institution: "UF".to_string(),
                }),
            )
            .unwrap();
            p.set_available(available);
            p
        }

        proptest! {
            /// Property: decide is deterministic and only accepts when both sides are available.
            #[test]
            fn exchange_accepts_iff_both_available(a_avail: bool, b_avail: bool) {
                let a = handout("A1", a_avail);
                let b = handout("A2", b_avail);
                let tx = Transaction::exchange(pid("A1"), pid("A2"));

                let first = tx.decide(&[a.clone(), b.clone()], &SameKindPolicy);
                let second = tx.decide(&[a, b], &SameKindPolicy);

                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.is_ok(), a_avail && b_avail);
            }
        }
    }
}
