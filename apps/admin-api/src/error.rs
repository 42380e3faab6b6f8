//! Error types for the admin API.
//!
//! Every handler returns [`ApiResult`]. Lower layers convert through `From`,
//! so handlers propagate with `?`:
//!
//! ```text
//! ValidationError ──┐
//! CoreError ────────┼──► ApiError { code, detail }  ──► (StatusCode, JSON)
//! DbError ──────────┤
//! Query/Json reject ┘
//! ```
//!
//! Internal failures are logged here and answered with a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use emporium_core::{CoreError, ValidationError};
use emporium_db::DbError;

/// Machine-readable error category sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed query string, path or date
    BadRequest,
    /// Well-formed input that breaks a business rule
    ValidationFailed,
    NotFound,
    /// Duplicate unique value or dangling reference
    Conflict,
    InternalError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body: `{"code": "NOT_FOUND", "detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{detail}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub detail: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, detail: impl Into<String>) -> Self {
        ApiError {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, detail)
    }

    fn internal() -> Self {
        Self::new(ErrorCode::InternalError, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::InvalidFormat { .. } => ErrorCode::BadRequest,
            _ => ErrorCode::ValidationFailed,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(inner) => inner.into(),
            other => ApiError::not_found(other.to_string()),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Validation(inner) => inner.into(),
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::new(ErrorCode::Conflict, err.to_string())
            }
            other => {
                tracing::error!(error = %other, "Database error");
                ApiError::internal()
            }
        }
    }
}

fn from_rejection(status: StatusCode, body: String) -> ApiError {
    let code = if status == StatusCode::UNPROCESSABLE_ENTITY {
        ErrorCode::ValidationFailed
    } else if status.is_client_error() {
        ErrorCode::BadRequest
    } else {
        tracing::error!(%status, detail = %body, "Request extraction failed");
        return ApiError::internal();
    };
    ApiError::new(code, body)
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_errors_map_to_status() {
        let not_found: ApiError = DbError::not_found("Product", "p-1").into();
        assert_eq!(not_found.code.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.detail, "Product not found: p-1");

        let duplicate: ApiError = DbError::duplicate("sku", "BOOK-1").into();
        assert_eq!(duplicate.code, ErrorCode::Conflict);

        let rejected: ApiError = DbError::from(ValidationError::OutOfRange {
            field: "total".to_string(),
            min: 1,
            max: i64::MAX,
        })
        .into();
        assert_eq!(rejected.code.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal: ApiError = DbError::PoolExhausted.into();
        assert_eq!(internal.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.detail, "Internal server error");
    }

    #[test]
    fn test_validation_errors_map_to_status() {
        let shape: ApiError = ValidationError::InvalidFormat {
            field: "period".to_string(),
            reason: "unknown".to_string(),
        }
        .into();
        assert_eq!(shape.code.status(), StatusCode::BAD_REQUEST);

        let rule: ApiError = CoreError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        })
        .into();
        assert_eq!(rule.code.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing: ApiError = CoreError::SaleNotFound("s-1".to_string()).into();
        assert_eq!(missing.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_body_shape() {
        let json = serde_json::to_value(ApiError::not_found("gone")).unwrap();
        assert_eq!(json, serde_json::json!({"code": "NOT_FOUND", "detail": "gone"}));
    }
}
