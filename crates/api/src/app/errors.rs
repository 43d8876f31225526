use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use sebo_core::DomainError;

/// REST-side rendering of a [`DomainError`].
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) | DomainError::MethodNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_)
        | DomainError::Unavailable(_)
        | DomainError::IncompatibleCategory(_) => StatusCode::CONFLICT,
        DomainError::BadRequest(_) => StatusCode::BAD_REQUEST,
        DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let DomainError::Internal(cause) = &self.0 {
            tracing::error!(%cause, "request failed");
        }
        json_error(status_for(&self.0), self.0.message())
    }
}

/// Error body shared by every failing response: `{"detail": ...}`.
pub fn json_error(status: StatusCode, detail: impl Serialize) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// `Json` extractor whose rejections use the `{"detail": ...}` shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(DomainError::bad_request(rejection.body_text()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (DomainError::unavailable("x"), StatusCode::CONFLICT),
            (DomainError::incompatible("x"), StatusCode::CONFLICT),
            (DomainError::method_not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::bad_request("x"), StatusCode::BAD_REQUEST),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{err}");
        }
    }

    #[test]
    fn internal_errors_render_opaque_status() {
        let response = ApiError(DomainError::internal("lock poisoned")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
