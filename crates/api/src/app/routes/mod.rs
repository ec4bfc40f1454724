use axum::{Router, routing::MethodRouter};

pub mod categories;
pub mod products;
pub mod system;

/// Router for all resource endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(categories::router())
        .merge(products::router())
}

/// Register `path` together with its trailing-slash form.
pub(crate) fn route_with_slash(router: Router, path: &str, method_router: MethodRouter) -> Router {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}
