use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::ServiceError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    /// Always `["validation errors"]`
    pub errors: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("validation errors")]
    Validation,
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Write-time failures all surface as the same validation error; the
    /// cause only reaches the log.
    pub fn from_write(err: ServiceError) -> Self {
        tracing::warn!(error = %err, "rejected restaurant pizza");
        ApiError::Validation
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::RestaurantNotFound(_) => ApiError::RestaurantNotFound,
            ServiceError::InvalidPrice(_) => ApiError::Validation,
            ServiceError::Persistence(e) => ApiError::InternalError(e.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for ApiError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        ApiError::InternalError(format!("Database unavailable: {err}"))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::InternalError(format!("Database task failed: {err}"))
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            ApiError::RestaurantNotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            ApiError::Validation => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    errors: vec![self.to_string()],
                }),
            )
                .into_response(),
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, response::IntoResponse};
    use serde_json::{json, Value};

    use super::*;
    use crate::models::InvalidPrice;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = render(ApiError::RestaurantNotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Restaurant not found" }));
    }

    #[tokio::test]
    async fn test_write_failures_collapse_to_validation() {
        let price = ApiError::from_write(ServiceError::InvalidPrice(InvalidPrice(0)));
        let fk = ApiError::from_write(ServiceError::Persistence(diesel::result::Error::NotFound));

        for err in [price, fk] {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "errors": ["validation errors"] }));
        }
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let (status, body) =
            render(ServiceError::Persistence(diesel::result::Error::BrokenTransactionManager).into())
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }
}
