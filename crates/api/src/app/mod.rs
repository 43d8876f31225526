//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: catalog store and transaction engine wiring
//! - `routes/`: HTTP routes + handlers (REST resources and `/invoke`)
//! - `rpc/`: Object-RPC envelope, method table and argument binding
//! - `dto.rs`: request DTOs and mapping to domain types
//! - `errors.rs`: consistent `{"detail": ...}` error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod rpc;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Fails if the RPC method table is inconsistent.
pub fn build_app(services: AppServices) -> anyhow::Result<Router> {
    let table = Arc::new(rpc::MethodTable::standard()?);
    let services = Arc::new(services);

    let app = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services))
                .layer(Extension(table)),
        );

    Ok(app)
}
