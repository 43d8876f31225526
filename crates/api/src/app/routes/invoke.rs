use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app::errors::json_error;
use crate::app::rpc::{self, InvokeRequest, MethodTable};
use crate::app::services::AppServices;

/// `POST /invoke`
///
/// A body that is not a valid envelope is a transport failure (400 with
/// `detail.error`); everything past that point answers 200 with an
/// `isException` reply.
pub async fn invoke(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(table): Extension<Arc<MethodTable>>,
    body: Bytes,
) -> Response {
    let request: InvokeRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            return json_error(
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Envelope inválido: {e}") }),
            );
        }
    };

    Json(rpc::dispatch(&services, &table, request)).into_response()
}
