use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use thiserror::Error;

use warehouse_core::{DomainError, ErrorKind};
use warehouse_infra::StoreError;

/// Any failure raised inside a use-case operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Domain(e) => e.kind(),
            ServiceError::Store(_) => ErrorKind::Store,
        }
    }

    /// Client-visible context attached to the error.
    pub fn context(&self) -> Value {
        match self {
            ServiceError::Domain(e) => e.context(),
            ServiceError::Store(e) => json!({ "message": e.to_string() }),
        }
    }
}

/// Fixed HTTP status of each error kind.
pub fn status_code(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Generic 500 body: `{error: <kind name>, context: {message}}`.
pub fn unhandled_response(err: &ServiceError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({
            "error": err.kind().name(),
            "context": { "message": err.to_string() },
        })),
    )
        .into_response()
}

/// Outer fallback for errors no dispatcher handler claimed.
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        tracing::error!(kind = %self.kind(), error = %self, "unhandled service error");
        unhandled_response(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_wrapped_error() {
        let validation: ServiceError = DomainError::violation("bad").into();
        let not_found: ServiceError = DomainError::not_found("gone").into();
        let store: ServiceError = StoreError::Decode("broken".to_string()).into();

        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(store.kind(), ErrorKind::Store);
    }

    #[test]
    fn fixed_status_codes() {
        assert_eq!(status_code(ErrorKind::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_code(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_code(ErrorKind::Store), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn fallback_reports_kind_name_and_message() {
        let err: ServiceError = DomainError::not_found("gone").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "error": "NotFoundError", "context": { "message": "Not found error" } })
        );
    }
}
