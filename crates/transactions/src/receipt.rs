//! Confirmation records returned by committed transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sebo_catalog::Product;
use sebo_core::{ProductId, TransactionId};

pub const SALE_MESSAGE: &str = "Venda realizada com sucesso";
pub const EXCHANGE_MESSAGE: &str = "Troca realizada com sucesso";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReceipt {
    #[serde(rename = "transacao_id")]
    pub transaction_id: TransactionId,
    #[serde(rename = "mensagem")]
    pub message: String,
    /// The product as it stands after the sale.
    #[serde(rename = "produto")]
    pub product: Product,
    #[serde(rename = "ocorrido_em")]
    pub occurred_at: DateTime<Utc>,
}

impl SaleReceipt {
    pub fn new(product: Product, occurred_at: DateTime<Utc>) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            message: SALE_MESSAGE.to_string(),
            product,
            occurred_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeReceipt {
    #[serde(rename = "transacao_id")]
    pub transaction_id: TransactionId,
    #[serde(rename = "mensagem")]
    pub message: String,
    #[serde(rename = "produto_a_id")]
    pub product_a_id: ProductId,
    #[serde(rename = "produto_b_id")]
    pub product_b_id: ProductId,
    #[serde(rename = "ocorrido_em")]
    pub occurred_at: DateTime<Utc>,
}

impl ExchangeReceipt {
    pub fn new(
        product_a_id: ProductId,
        product_b_id: ProductId,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            message: EXCHANGE_MESSAGE.to_string(),
            product_a_id,
            product_b_id,
            occurred_at,
        }
    }
}
