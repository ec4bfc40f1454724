use serde::{Deserialize, Serialize};
use serde_json::Value;

use warehouse_core::{DomainError, DomainResult};

use crate::record::{self, Field};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Validate an untyped record into a [`Category`].
///
/// Stops at the first violation: `description` is only inspected once `name`
/// is present and a string, so at most one violation is ever reported.
pub fn validate_category(input: &Value) -> DomainResult<Category> {
    let name = match record::typed_field::<String>(input, "name") {
        Field::Missing => return Err(DomainError::violation("field `name` is required")),
        Field::Mistyped => return Err(DomainError::violation("field `name` should be string")),
        Field::Present(name) => name,
    };

    let description = match record::typed_field::<String>(input, "description") {
        Field::Missing => None,
        Field::Mistyped => {
            return Err(DomainError::violation("field `description` should be string"));
        }
        Field::Present(description) => Some(description),
    };

    Ok(Category { name, description })
}

/// Validate the payload of a category rename: a string `name` is mandatory.
pub fn validate_category_name(input: &Value) -> DomainResult<String> {
    record::typed_field::<String>(input, "name")
        .present()
        .ok_or_else(|| {
            DomainError::violation("No string value for field `name` is present in payload")
        })
}
