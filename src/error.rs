// src/error.rs
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

use crate::billing::BillingError;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    NotFound(String),
    ValidationError(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn db(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(%msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        let msg = err.to_string();
        match err {
            BillingError::DuplicateBillNumber(_) => AppError::Conflict(msg),
            BillingError::ProductNotFound(_) => AppError::NotFound(msg),
            BillingError::InsufficientStock { .. } => AppError::ValidationError(msg),
            BillingError::Validation(_) => AppError::ValidationError(msg),
            BillingError::Store(e) => AppError::DatabaseError(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_errors_map_to_client_statuses() {
        let dup: AppError = BillingError::DuplicateBillNumber("INV-1".into()).into();
        assert!(matches!(dup, AppError::Conflict(_)));

        let missing: AppError = BillingError::ProductNotFound(7).into();
        assert!(matches!(missing, AppError::NotFound(_)));

        let short: AppError = BillingError::InsufficientStock { product_name: "Fan".into() }.into();
        match short {
            AppError::ValidationError(msg) => assert_eq!(msg, "Insufficient stock for Fan"),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
