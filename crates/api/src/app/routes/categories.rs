use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path},
    response::Response,
    routing::get,
};

use warehouse_core::DocumentId;

use crate::app::errors::ServiceError;
use crate::app::extract::JsonBody;
use crate::app::routes::route_with_slash;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    let router = route_with_slash(
        Router::new(),
        "/categories",
        get(list_categories).post(add_category),
    );
    route_with_slash(
        router,
        "/categories/:id",
        get(get_category).put(update_category).delete(delete_category),
    )
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
) -> Result<Response, ServiceError> {
    services.categories.list(&ctx).await
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    services.categories.get(&ctx, DocumentId::from(id)).await
}

pub async fn add_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(body): JsonBody,
) -> Result<Response, ServiceError> {
    services.categories.add(&ctx, body).await
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response, ServiceError> {
    services.categories.update(&ctx, DocumentId::from(id), body).await
}

pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    services.categories.delete(&ctx, DocumentId::from(id)).await
}
