use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path, Query},
    response::Response,
    routing::get,
};

use warehouse_core::DocumentId;

use crate::app::dto::ListProductsQuery;
use crate::app::errors::ServiceError;
use crate::app::extract::JsonBody;
use crate::app::routes::route_with_slash;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    let router = route_with_slash(
        Router::new(),
        "/products",
        get(list_products).post(add_product),
    );
    route_with_slash(
        router,
        "/products/:id",
        get(get_product).put(update_product).delete(delete_product),
    )
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ServiceError> {
    let query = ListProductsQuery::from_pairs(pairs);
    services.products.list(&ctx, query.find_options()).await
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    services.products.get(&ctx, DocumentId::from(id)).await
}

pub async fn add_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(body): JsonBody,
) -> Result<Response, ServiceError> {
    services.products.add(&ctx, body).await
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Response, ServiceError> {
    services.products.update(&ctx, DocumentId::from(id), body).await
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Response, ServiceError> {
    services.products.delete(&ctx, DocumentId::from(id)).await
}
