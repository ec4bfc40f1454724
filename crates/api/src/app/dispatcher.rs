//! Error dispatcher: maps error kinds to response-producing handlers.
//!
//! A use case wraps its work in [`ErrorDispatcher::run`]. If the work fails,
//! the handler registered for the error's exact [`ErrorKind`] writes the client
//! response. Errors with no registered handler are returned unchanged and end
//! up in the outer fallback (`impl IntoResponse for ServiceError`, HTTP 500).

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use serde_json::json;

use warehouse_core::ErrorKind;

use crate::app::errors::{self, ServiceError};
use crate::context::RequestContext;

/// Produces the client response for a failed unit of work.
pub type ErrorHandler = Arc<dyn Fn(&RequestContext, &ServiceError) -> Response + Send + Sync>;

#[derive(Clone, Default)]
pub struct ErrorDispatcher {
    handlers: HashMap<ErrorKind, ErrorHandler>,
}

impl ErrorDispatcher {
    /// An empty registry: every error propagates to the outer fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bindings every use case installs: store failures to the generic
    /// 500 body, validation and not-found errors to their context handlers.
    pub fn for_use_case() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(ErrorKind::Store, |_ctx: &RequestContext, err: &ServiceError| {
            errors::unhandled_response(err)
        });
        dispatcher.register(ErrorKind::Validation, context_handler);
        dispatcher.register(ErrorKind::NotFound, context_handler);
        dispatcher
    }

    /// Bind `handler` to `kind`, replacing any earlier binding.
    pub fn register<F>(&mut self, kind: ErrorKind, handler: F)
    where
        F: Fn(&RequestContext, &ServiceError) -> Response + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Arc::new(handler));
    }

    #[cfg(test)]
    fn handles(&self, kind: ErrorKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Run `work`; a failure with a registered kind becomes that handler's response.
    pub async fn run<F>(&self, ctx: &RequestContext, work: F) -> Result<Response, ServiceError>
    where
        F: Future<Output = Result<Response, ServiceError>>,
    {
        let err = match work.await {
            Ok(response) => return Ok(response),
            Err(err) => err,
        };

        let Some(handler) = self.handlers.get(&err.kind()) else {
            return Err(err);
        };

        if err.kind() == ErrorKind::Store {
            tracing::error!(request_id = %ctx.request_id(), kind = %err.kind(), error = %err, "use case failed");
        } else {
            tracing::warn!(request_id = %ctx.request_id(), kind = %err.kind(), context = %err.context(), "use case rejected request");
        }

        Ok(handler(ctx, &err))
    }
}

/// Default handler: the kind's fixed status with `{context: <error context>}`.
pub fn context_handler(_ctx: &RequestContext, err: &ServiceError) -> Response {
    (
        errors::status_code(err.kind()),
        axum::Json(json!({ "context": err.context() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};
    use serde_json::Value;
    use uuid::Uuid;
    use warehouse_core::DomainError;

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::now_v7(), Method::GET, "/test")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn fail_with(err: DomainError) -> Result<Response, ServiceError> {
        Err(err.into())
    }

    async fn created() -> Result<Response, ServiceError> {
        Ok(StatusCode::CREATED.into_response())
    }

    #[tokio::test]
    async fn success_passes_through() {
        let dispatcher = ErrorDispatcher::for_use_case();
        let response = dispatcher
            .run(&ctx(), created())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn validation_error_maps_to_422_with_context() {
        let dispatcher = ErrorDispatcher::for_use_case();
        let response = dispatcher
            .run(&ctx(), fail_with(DomainError::violation("field `name` is required")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({ "context": { "violations": ["field `name` is required"] } })
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_404_with_detail() {
        let dispatcher = ErrorDispatcher::for_use_case();
        let response = dispatcher
            .run(&ctx(), fail_with(DomainError::not_found("Category with id=x is not found.")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "context": { "detail": "Category with id=x is not found." } })
        );
    }

    #[tokio::test]
    async fn unregistered_kind_propagates_to_fallback() {
        let mut dispatcher = ErrorDispatcher::new();
        dispatcher.register(ErrorKind::Validation, context_handler);
        dispatcher.register(ErrorKind::Store, |_ctx: &RequestContext, err: &ServiceError| {
            errors::unhandled_response(err)
        });

        let err = dispatcher
            .run(&ctx(), fail_with(DomainError::not_found("gone")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "NotFoundError", "context": { "message": "Not found error" } })
        );
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier() {
        let mut dispatcher = ErrorDispatcher::for_use_case();
        dispatcher.register(ErrorKind::Validation, |_ctx: &RequestContext, _err: &ServiceError| {
            StatusCode::BAD_REQUEST.into_response()
        });

        let response = dispatcher
            .run(&ctx(), fail_with(DomainError::violation("bad")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn use_case_dispatcher_handles_all_kinds() {
        let dispatcher = ErrorDispatcher::for_use_case();
        assert!(dispatcher.handles(ErrorKind::Validation));
        assert!(dispatcher.handles(ErrorKind::NotFound));
        assert!(dispatcher.handles(ErrorKind::Store));
        assert!(!ErrorDispatcher::new().handles(ErrorKind::Store));
    }
}
