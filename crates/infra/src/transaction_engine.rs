//! Transaction execution pipeline (sales and exchanges).
//!
//! ```text
//! Transaction
//!   ↓
//! 1. Lock the catalog and load the affected products (NotFound if absent)
//!   ↓
//! 2. Decide (pure validation, produces CatalogChanges)
//!   ↓
//! 3. Apply the changes in the same critical section
//!   ↓
//! 4. Build the receipt
//! ```
//!
//! Steps 1-3 run inside [`CatalogStore::commit`], so two concurrent sales of
//! the same product cannot both pass validation, and a failed decision never
//! leaves a partial change behind. The engine is the same whichever façade
//! invoked it.

use std::sync::Arc;

use chrono::Utc;

use sebo_catalog::Product;
use sebo_core::{DomainError, DomainResult, Entity, ProductId};
use sebo_transactions::{
    ExchangePolicy, ExchangeReceipt, SaleReceipt, SameKindPolicy, Transaction,
};

use crate::catalog_store::CatalogStore;

#[derive(Clone)]
pub struct TransactionEngine {
    store: Arc<dyn CatalogStore>,
    policy: Arc<dyn ExchangePolicy>,
}

impl TransactionEngine {
    /// Engine with the default exchange rule (same category only).
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self::with_policy(store, Arc::new(SameKindPolicy))
    }

    pub fn with_policy(store: Arc<dyn CatalogStore>, policy: Arc<dyn ExchangePolicy>) -> Self {
        Self { store, policy }
    }

    /// Mark an available product as sold.
    pub fn sell(&self, product_id: ProductId) -> DomainResult<SaleReceipt> {
        let mut products = self.execute(&Transaction::sale(product_id))?;
        let product = products
            .pop()
            .ok_or_else(|| DomainError::internal("sale committed without a product"))?;
        let receipt = SaleReceipt::new(product, Utc::now());

        tracing::info!(
            transaction_id = %receipt.transaction_id,
            product_id = %receipt.product.id(),
            "sale committed"
        );
        Ok(receipt)
    }

    /// Swap two available, mutually exchangeable products.
    pub fn exchange(
        &self,
        product_a_id: ProductId,
        product_b_id: ProductId,
    ) -> DomainResult<ExchangeReceipt> {
        let tx = Transaction::exchange(product_a_id.clone(), product_b_id.clone());
        self.execute(&tx)?;
        let receipt = ExchangeReceipt::new(product_a_id, product_b_id, Utc::now());

        tracing::info!(
            transaction_id = %receipt.transaction_id,
            product_a_id = %receipt.product_a_id,
            product_b_id = %receipt.product_b_id,
            "exchange committed"
        );
        Ok(receipt)
    }

    fn execute(&self, tx: &Transaction) -> DomainResult<Vec<Product>> {
        let policy = self.policy.as_ref();
        let result = self
            .store
            .commit(&tx.affected(), &|products| tx.decide(products, policy));

        if let Err(err) = &result {
            match err {
                DomainError::Internal(cause) => {
                    tracing::error!(transaction = tx.label(), %cause, "transaction failed");
                }
                other => {
                    tracing::debug!(
                        transaction = tx.label(),
                        kind = other.kind(),
                        reason = other.message(),
                        "transaction rejected"
                    );
                }
            }
        }
        result
    }
}
