use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::schemas::Violations;
use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    /// Any store-level failure. Logged, never exposed to the client.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Schema rejection with one entry per failing field
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] Violations),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, violations) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno al acceder a los datos".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::InvalidInput(violations) => (
                StatusCode::BAD_REQUEST,
                "Los datos proporcionados no son válidos".to_string(),
                Some(violations),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), violations));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::FieldViolation;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Error interno al acceder a los datos");
        let text = body.to_string().to_lowercase();
        assert!(!text.contains("pool"));
        assert!(!text.contains("sqlx"));
        assert!(!text.contains("timed out"));
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let violations = Violations(vec![FieldViolation::new(
            "puntos",
            "range",
            "Los puntos no pueden ser negativos",
        )]);
        let response = AppError::from(violations).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("Insumo 'x' no encontrado".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
