use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use warehouse_core::{DocumentId, DomainError, DomainResult};

use crate::record::{self, Field, FieldValue};

/// A stocked product.
///
/// `quantity` and `price` keep the exact JSON number the client sent, so an
/// integer quantity is stored and returned as an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Reference to a category id; not checked against the categories collection.
    #[serde(default)]
    pub category_id: String,
    pub quantity: Number,
    pub price: Number,
}

/// Partial product update (`$set` semantics): only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category_id.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }
}

/// Result of [`validate_update_product`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub id: DocumentId,
    pub changes: UpdateProduct,
    /// Fields that were present but had the wrong type and were dropped.
    pub ignored: Vec<&'static str>,
}

/// Validate an untyped record into a [`Product`].
///
/// Unlike categories, every required field is checked and all violations are
/// reported together.
pub fn validate_product(input: &Value) -> DomainResult<Product> {
    let mut violations = Vec::new();

    let name = required::<String>(input, "name", &mut violations);
    let quantity = required::<Number>(input, "quantity", &mut violations);
    let price = required::<Number>(input, "price", &mut violations);

    let (Some(name), Some(quantity), Some(price)) = (name, quantity, price) else {
        return Err(DomainError::validation(violations));
    };

    Ok(Product {
        name,
        description: optional_string(input, "description"),
        category_id: optional_string(input, "categoryId"),
        quantity,
        price,
    })
}

/// Build a partial update from an untyped record.
///
/// Never fails: a field is kept only when present with its declared type, and
/// mistyped fields are dropped without being reported to the client.
pub fn validate_update_product(id: DocumentId, body: &Value) -> ProductUpdate {
    let mut ignored = Vec::new();

    // Fields are inspected in declaration order, which is the order of `ignored`.
    let changes = UpdateProduct {
        name: well_typed(body, "name", &mut ignored),
        description: well_typed(body, "description", &mut ignored),
        category_id: well_typed(body, "categoryId", &mut ignored),
        quantity: well_typed(body, "quantity", &mut ignored),
        price: well_typed(body, "price", &mut ignored),
    };

    ProductUpdate {
        id,
        changes,
        ignored,
    }
}

fn required<T: FieldValue>(input: &Value, name: &str, violations: &mut Vec<String>) -> Option<T> {
    match record::typed_field(input, name) {
        Field::Missing => {
            violations.push(format!("field `{name}` is required"));
            None
        }
        Field::Mistyped => {
            violations.push(format!("field `{name}` should be {}", T::TYPE_NAME));
            None
        }
        Field::Present(value) => Some(value),
    }
}

fn well_typed<T: FieldValue>(
    body: &Value,
    name: &'static str,
    ignored: &mut Vec<&'static str>,
) -> Option<T> {
    match record::typed_field(body, name) {
        Field::Missing => None,
        Field::Mistyped => {
            ignored.push(name);
            None
        }
        Field::Present(value) => Some(value),
    }
}

fn optional_string(input: &Value, name: &str) -> String {
    record::typed_field::<String>(input, name)
        .present()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn violations(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation { violations } => violations,
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    fn test_id() -> DocumentId {
        DocumentId::from("65a1f0c2e4b0a1b2c3d4e5f6")
    }

    #[test]
    fn valid_product_defaults_optional_fields() {
        let product =
            validate_product(&json!({ "name": "Widget", "quantity": 5, "price": 9.99 })).unwrap();

        assert_eq!(product.name, "Widget");
        assert_eq!(product.description, "");
        assert_eq!(product.category_id, "");
        assert_eq!(json!(product.quantity), json!(5));
        assert_eq!(json!(product.price), json!(9.99));
    }

    #[test]
    fn valid_product_keeps_optional_fields() {
        let product = validate_product(&json!({
            "name": "Widget",
            "description": "Blue",
            "categoryId": "65a1f0c2e4b0a1b2c3d4e5f6",
            "quantity": 1,
            "price": 2
        }))
        .unwrap();

        assert_eq!(product.description, "Blue");
        assert_eq!(product.category_id, "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let product =
            validate_product(&json!({ "name": "Widget", "quantity": 5, "price": 9.99 })).unwrap();
        assert_eq!(
            serde_json::to_value(&product).unwrap(),
            json!({
                "name": "Widget",
                "description": "",
                "categoryId": "",
                "quantity": 5,
                "price": 9.99
            })
        );
    }

    #[test]
    fn empty_record_reports_every_required_field() {
        let err = validate_product(&json!({})).unwrap_err();
        assert_eq!(
            violations(err),
            vec![
                "field `name` is required",
                "field `quantity` is required",
                "field `price` is required",
            ]
        );
    }

    #[test]
    fn reports_type_and_presence_violations_together() {
        let err = validate_product(&json!({ "name": 7, "price": "cheap" })).unwrap_err();
        assert_eq!(
            violations(err),
            vec![
                "field `name` should be a string",
                "field `quantity` is required",
                "field `price` should be a number",
            ]
        );
    }

    #[test]
    fn update_keeps_only_well_typed_fields() {
        let update = validate_update_product(
            test_id(),
            &json!({ "name": "Gadget", "quantity": "five", "price": 3, "unknown": true }),
        );

        assert_eq!(update.id, test_id());
        assert_eq!(update.changes.name.as_deref(), Some("Gadget"));
        assert_eq!(update.changes.quantity, None);
        assert_eq!(update.changes.price, Some(Number::from(3)));
        assert_eq!(update.ignored, vec!["quantity"]);
        assert_eq!(
            serde_json::to_value(&update.changes).unwrap(),
            json!({ "name": "Gadget", "price": 3 })
        );
    }

    #[test]
    fn update_with_wrong_quantity_type_is_empty() {
        let update = validate_update_product(test_id(), &json!({ "quantity": "five" }));
        assert!(update.changes.is_empty());
    }

    #[test]
    fn update_maps_category_id() {
        let update = validate_update_product(test_id(), &json!({ "categoryId": "abc" }));
        assert_eq!(
            serde_json::to_value(&update.changes).unwrap(),
            json!({ "categoryId": "abc" })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn non_number() -> impl Strategy<Value = Value> {
            prop_oneof![
                "[a-z]{0,10}".prop_map(Value::from),
                any::<bool>().prop_map(Value::from),
                Just(Value::Null),
                Just(json!([])),
                Just(json!({})),
            ]
        }

        proptest! {
            /// Property: non-numeric quantity and price are both reported (accumulation).
            #[test]
            fn reports_every_non_numeric_field(
                name in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                quantity in non_number(),
                price in non_number()
            ) {
                let input = json!({ "name": name, "quantity": quantity, "price": price });
                let found = violations(validate_product(&input).unwrap_err());

                prop_assert_eq!(found, vec![
                    "field `quantity` should be a number".to_string(),
                    "field `price` should be a number".to_string(),
                ]);
            }

            /// Property: mistyped update fields never produce changes or errors.
            #[test]
            fn mistyped_update_fields_are_dropped(
                quantity in non_number(),
                price in non_number(),
                name in any::<i64>()
            ) {
                let body = json!({ "name": name, "quantity": quantity, "price": price });
                let update = validate_update_product(test_id(), &body);

                prop_assert!(update.changes.is_empty());
                prop_assert_eq!(update.ignored, vec!["name", "quantity", "price"]);
            }

            /// Property: well-typed numbers are carried through unchanged.
            #[test]
            fn numbers_round_trip_exactly(quantity in any::<i64>(), price in 0.0f64..1.0e6) {
                let input = json!({ "name": "Widget", "quantity": quantity, "price": price });
                let product = validate_product(&input).unwrap();

                prop_assert_eq!(json!(product.quantity), json!(quantity));
                prop_assert_eq!(json!(product.price), json!(price));
            }
        }
    }
}
