use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::auth::AuthError;
use crate::domain::admin::AdminError;
use crate::domain::order::OrderError;
use crate::domain::product::ProductError;
use crate::domain::user::UserError;

// ============================================================================
// API Error - HTTP mapping for domain failures
// ============================================================================
//
// Business-rule failures carry their human-readable message to the caller;
// store-level failures are logged and surfaced as a generic 500 so callers
// cannot infer partial effects from internals.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "statusCode": self.status_code().as_u16(),
            "message": self.to_string(),
        }))
    }
}

impl From<OrderError> for ApiError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::EmptyItems
            | OrderError::InvalidQuantity { .. }
            | OrderError::ProductNotFound(_)
            | OrderError::InsufficientStock { .. } => ApiError::BadRequest(e.to_string()),
            OrderError::OrderNotFound(_) => ApiError::NotFound(e.to_string()),
            OrderError::NotOwner(_) => ApiError::Forbidden("You cannot access this order".into()),
            OrderError::Transaction(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(_) => ApiError::NotFound(e.to_string()),
            ProductError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AdminError> for ApiError {
    fn from(e: AdminError) -> Self {
        match e {
            AdminError::InvalidImages => ApiError::BadRequest(e.to_string()),
            AdminError::ProductNotFound(_) | AdminError::OrderNotFound(_) => {
                ApiError::NotFound(e.to_string())
            }
            AdminError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::ProfileNotFound => ApiError::NotFound(e.to_string()),
            UserError::Store(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Unauthorized(e.to_string())
    }
}
