//! Numeric id path parameter extractor with automatic validation.

use crate::errors::{error_response, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Extractor for `i64` id path parameters.
///
/// Automatically parses and validates the id from path parameters,
/// returning a proper 400 error response if it is not a valid integer.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product id: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match raw.parse::<i64>() {
            Ok(id) => Ok(IdPath(id)),
            Err(_) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidId.code(),
                    "Invalid id path parameter: {}",
                    raw
                );
                Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid id: {}", raw),
                    ErrorCode::InvalidId,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    async fn echo(IdPath(id): IdPath) -> String {
        id.to_string()
    }

    #[tokio::test]
    async fn test_valid_id_is_extracted() {
        let app = Router::new().route("/products/{id}", get(echo));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let app = Router::new().route("/products/{id}", get(echo));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_id_body_carries_invalid_id_code() {
        use http_body_util::BodyExt;

        let app = Router::new().route("/products/{id}", get(echo));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "INVALID_ID");
        assert_eq!(body["code"], 1002);
        assert_eq!(body["message"], "Invalid id: abc");
    }
}
