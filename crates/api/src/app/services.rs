//! Use-case services: one per resource, each with its own error dispatcher.

use std::sync::Arc;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use warehouse_catalog::{
    validate_category, validate_category_name, validate_product, validate_update_product,
};
use warehouse_core::{DocumentId, DomainError};
use warehouse_infra::{
    CatalogRepository, DocumentStore, FindOptions, InMemoryDocumentStore, PostgresDocumentStore,
    StoreError,
};

use crate::app::dispatcher::ErrorDispatcher;
use crate::app::errors::ServiceError;
use crate::config::ApiConfig;
use crate::context::RequestContext;

/// Everything the routes need, constructed once at startup.
pub struct AppServices {
    pub categories: CategoryService,
    pub products: ProductService,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let repository = CatalogRepository::new(store);
        Self {
            categories: CategoryService::new(repository.clone()),
            products: ProductService::new(repository),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDocumentStore::new()))
    }
}

/// Pick the document store from configuration: Postgres when a database URL
/// is configured, otherwise the in-memory store.
pub async fn build_services(config: &ApiConfig) -> Result<AppServices, StoreError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory document store");
        return Ok(AppServices::in_memory());
    };

    let store =
        PostgresDocumentStore::connect(database_url, config.database_max_connections).await?;
    store.ensure_schema().await?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "connected to postgres document store"
    );

    Ok(AppServices::new(Arc::new(store)))
}

fn ok_json(body: Value) -> Response {
    Json(body).into_response()
}

pub struct CategoryService {
    repository: CatalogRepository,
    errors: ErrorDispatcher,
}

impl CategoryService {
    pub fn new(repository: CatalogRepository) -> Self {
        Self {
            repository,
            errors: ErrorDispatcher::for_use_case(),
        }
    }

    pub async fn list(&self, ctx: &RequestContext) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.list_inner()).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: DocumentId) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.get_inner(id)).await
    }

    pub async fn add(&self, ctx: &RequestContext, body: Value) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.add_inner(body)).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        body: Value,
    ) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.update_inner(id, body)).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: DocumentId) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.delete_inner(id)).await
    }

    async fn list_inner(&self) -> Result<Response, ServiceError> {
        let categories = self.repository.list_categories().await?;
        Ok(ok_json(json!({ "categories": categories })))
    }

    async fn get_inner(&self, id: DocumentId) -> Result<Response, ServiceError> {
        let category = self.repository.get_category(&id).await?.ok_or_else(|| {
            DomainError::not_found(format!("Category with id={id} is not found."))
        })?;
        Ok(ok_json(json!({ "category": category })))
    }

    async fn add_inner(&self, body: Value) -> Result<Response, ServiceError> {
        let category = validate_category(&body)?;
        let id = self.repository.insert_category(&category).await?;
        tracing::info!(%id, "category created");
        Ok(ok_json(json!({ "id": id })))
    }

    async fn update_inner(&self, id: DocumentId, body: Value) -> Result<Response, ServiceError> {
        let name = validate_category_name(&body)?;
        let updated = self.repository.rename_category(&id, &name).await?;
        if !updated {
            return Err(DomainError::not_found(format!(
                "Category with id={id} is not found and therefore was not updated."
            ))
            .into());
        }
        Ok(ok_json(json!({ "updated": updated })))
    }

    async fn delete_inner(&self, id: DocumentId) -> Result<Response, ServiceError> {
        let deleted = self.repository.delete_category(&id).await?;
        if !deleted {
            return Err(DomainError::not_found(format!(
                "Category with id={id} is not found and therefore was not deleted."
            ))
            .into());
        }
        tracing::info!(%id, "category deleted");
        Ok(ok_json(json!({ "deleted": deleted })))
    }
}

pub struct ProductService {
    repository: CatalogRepository,
    errors: ErrorDispatcher,
}

impl ProductService {
    pub fn new(repository: CatalogRepository) -> Self {
        Self {
            repository,
            errors: ErrorDispatcher::for_use_case(),
        }
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        options: FindOptions,
    ) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.list_inner(options)).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: DocumentId) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.get_inner(id)).await
    }

    pub async fn add(&self, ctx: &RequestContext, body: Value) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.add_inner(body)).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        body: Value,
    ) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.update_inner(id, body)).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: DocumentId) -> Result<Response, ServiceError> {
        self.errors.run(ctx, self.delete_inner(id)).await
    }

    async fn list_inner(&self, options: FindOptions) -> Result<Response, ServiceError> {
        let products = self.repository.list_products(options).await?;
        Ok(ok_json(json!({ "products": products })))
    }

    async fn get_inner(&self, id: DocumentId) -> Result<Response, ServiceError> {
        let product = self
            .repository
            .get_product(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Product with id={id} was not found.")))?;
        Ok(ok_json(json!({ "product": product })))
    }

    async fn add_inner(&self, body: Value) -> Result<Response, ServiceError> {
        let product = validate_product(&body)?;
        let id = self.repository.insert_product(&product).await?;
        tracing::info!(%id, "product created");
        Ok(ok_json(json!({ "id": id })))
    }

    async fn update_inner(&self, id: DocumentId, body: Value) -> Result<Response, ServiceError> {
        let update = validate_update_product(id, &body);
        if !update.ignored.is_empty() {
            // Mistyped fields are dropped without telling the client.
            tracing::debug!(id = %update.id, ignored = ?update.ignored, "dropped mistyped product fields");
        }

        let updated = self.repository.update_product(&update).await?;
        if !updated {
            return Err(DomainError::not_found(format!(
                "Product with id={} is not found and therefore was not updated.",
                update.id
            ))
            .into());
        }
        Ok(ok_json(json!({ "updated": updated })))
    }

    async fn delete_inner(&self, id: DocumentId) -> Result<Response, ServiceError> {
        let deleted = self.repository.delete_product(&id).await?;
        if !deleted {
            return Err(DomainError::not_found(format!(
                "Product with id={id} is not found and therefore was not deleted."
            ))
            .into());
        }
        tracing::info!(%id, "product deleted");
        Ok(ok_json(json!({ "deleted": deleted })))
    }
}
