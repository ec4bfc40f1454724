use axum::http::Method;
use uuid::Uuid;

/// Per-request context handed to use cases and error handlers.
///
/// This is immutable and inserted by the request-context middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
    method: Method,
    path: String,
}

impl RequestContext {
    pub fn new(request_id: Uuid, method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id,
            method,
            path: path.into(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
