use axum::{routing::post, Router};

pub mod invoke;
pub mod products;
pub mod system;
pub mod transactions;

/// Router for both protocol façades.
pub fn router() -> Router {
    Router::new()
        .route("/invoke", post(invoke::invoke))
        .nest("/produtos", products::router())
        .nest("/transacoes", transactions::router())
}
