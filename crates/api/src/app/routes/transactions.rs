use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::post,
    Json, Router,
};

use sebo_core::ProductId;
use sebo_transactions::{ExchangeReceipt, SaleReceipt};

use crate::app::dto;
use crate::app::errors::{ApiError, ApiJson};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/troca", post(exchange_products))
}

/// `POST /produtos/{id}/venda`
pub async fn sell_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<SaleReceipt>, ApiError> {
    let id = ProductId::new(id)?;
    Ok(Json(services.engine.sell(id)?))
}

/// `POST /transacoes/troca`
pub async fn exchange_products(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::ExchangeRequest>,
) -> Result<Json<ExchangeReceipt>, ApiError> {
    let receipt = services
        .engine
        .exchange(body.produto_a_id, body.produto_b_id)?;
    Ok(Json(receipt))
}
