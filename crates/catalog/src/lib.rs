//! Catalog domain module: categories and products.
//!
//! This crate contains the catalog entities and the validators that turn
//! untyped request payloads into them, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod product;
pub mod record;

pub use category::{Category, validate_category, validate_category_name};
pub use product::{
    Product, ProductUpdate, UpdateProduct, validate_product, validate_update_product,
};
pub use record::{Field, FieldValue};
