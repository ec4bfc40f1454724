//! Field access on untyped JSON records.

use serde_json::{Number, Value};

/// A payload field type that can be read out of a JSON value.
pub trait FieldValue: Sized {
    /// Type name used in violation messages ("should be a string").
    const TYPE_NAME: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FieldValue for String {
    const TYPE_NAME: &'static str = "a string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl FieldValue for Number {
    const TYPE_NAME: &'static str = "a number";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(n.clone()),
            _ => None,
        }
    }
}

/// Outcome of reading a typed field.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    /// Present, but with another JSON type (`null` included).
    Mistyped,
    Present(T),
}

impl<T> Field<T> {
    pub fn present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Missing | Field::Mistyped => None,
        }
    }
}

/// Look up a field; a non-object record has no fields.
pub fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.as_object().and_then(|obj| obj.get(name))
}

/// Look up a field and read it as `T`.
pub fn typed_field<T: FieldValue>(record: &Value, name: &str) -> Field<T> {
    match field(record, name) {
        None => Field::Missing,
        Some(value) => T::from_value(value).map_or(Field::Mistyped, Field::Present),
    }
}
