use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use sebo_catalog::{Condition, Product, ProductDetails, ProductKind};
use sebo_core::{DomainResult, ProductId};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /produtos` and `PUT /produtos/{id}`.
#[derive(Debug, Deserialize)]
pub struct RegisterProductRequest {
    pub id: String,
    pub tipo_produto: String,
    pub titulo: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub preco: Decimal,
    pub estado: Condition,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

impl RegisterProductRequest {
    pub fn into_product(self) -> DomainResult<Product> {
        let kind = ProductKind::parse(&self.tipo_produto)?;
        let details = ProductDetails::from_extras(kind, self.extras)?;
        Product::new(
            ProductId::new(self.id)?,
            self.titulo,
            self.preco,
            self.estado,
            details,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    pub produto_a_id: ProductId,
    pub produto_b_id: ProductId,
}

/// Query string of `GET /produtos`.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub termo: Option<String>,
    pub tipo: Option<String>,
}

impl ListQuery {
    pub fn kind(&self) -> DomainResult<Option<ProductKind>> {
        self.tipo.as_deref().map(ProductKind::parse).transpose()
    }
}
