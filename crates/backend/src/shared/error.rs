//! Unified error surface for the integration endpoints.
//!
//! Every failure a handler can produce maps onto one of these kinds; the
//! response body always carries a human-readable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller holds no token, or the token is not valid
    #[error("Authentication required")]
    Unauthorized,

    /// Caller is authenticated but lacks the admin capability
    #[error("Not permitted")]
    PermissionDenied,

    /// Request body is not a JSON object
    #[error("Invalid JSON body")]
    InvalidBody,

    /// Required identifying field(s) absent from the payload
    #[error("Missing required field(s): {0}")]
    MissingField(String),

    /// A referenced record (the owning store) could not be resolved
    #[error("Online Store not found for {0}")]
    StoreNotFound(String),

    /// Requested record does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Persistence-layer failure, surfaced as-is and never retried
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::PermissionDenied => StatusCode::FORBIDDEN,
            ApiError::InvalidBody | ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreNotFound(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(e) => {
                tracing::error!("storage failure: {e:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_fields() {
        let one = ApiError::MissingField("integration_key".into());
        assert_eq!(one.to_string(), "Missing required field(s): integration_key");

        let many = ApiError::MissingField("item_id, shop_id, region".into());
        assert_eq!(
            many.to_string(),
            "Missing required field(s): item_id, shop_id, region"
        );
    }
}
