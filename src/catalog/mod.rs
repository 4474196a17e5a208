//! Catalog storage and boundary validation.
//!
//! The [`CatalogStore`] owns books and members and assigns identifiers.
//! Validation functions turn raw input into the typed values it accepts.

mod store;
mod validation;

pub use store::CatalogStore;
pub use validation::{validate_new_book, validate_new_member};
