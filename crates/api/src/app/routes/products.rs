use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use sebo_catalog::Product;
use sebo_core::ProductId;

use crate::app::dto;
use crate::app::errors::{ApiError, ApiJson};
use crate::app::routes::transactions;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(replace_product).delete(delete_product),
        )
        .route("/:id/venda", post(transactions::sell_product))
}

/// `GET /produtos[?termo=..][&tipo=..]`
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let kind = query.kind()?;
    let products = match query.termo.as_deref() {
        Some(term) => services.catalog.search(term, kind)?,
        None => services.catalog.list(kind)?,
    };
    Ok(Json(products))
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = ProductId::new(id)?;
    Ok(Json(services.catalog.get(&id)?))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<dto::RegisterProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = services.catalog.create(body.into_product()?)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn replace_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<dto::RegisterProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let id = ProductId::new(id)?;
    let product = services.catalog.replace(&id, body.into_product()?)?;
    Ok(Json(product))
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = ProductId::new(id)?;
    services.catalog.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
