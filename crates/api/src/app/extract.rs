//! Request extractors shared by the resource routes.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde_json::{Map, Value};

/// JSON request body handed to the use cases.
///
/// A request without a JSON content type carries no payload and is read as an
/// empty object, so the validators (not the framework) decide the response.
/// Malformed JSON sent as `application/json` is still rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Self(Value::Object(Map::new()))),
            Err(rejection) => Err(rejection),
        }
    }
}
