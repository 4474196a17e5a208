//! Request types for the library API.
//!
//! Bodies are deserialized loosely and then validated explicitly, so that a
//! negative copy count or a blank title yields a typed validation error
//! rather than a generic JSON rejection.

use serde::{Deserialize, Serialize};

use crate::catalog::{validate_new_book, validate_new_member};
use crate::error::LibraryResult;
use crate::models::{NewBook, NewMember};

/// Request body for `POST /books`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    /// The book's title.
    pub title: String,
    /// The book's author.
    pub author: String,
    /// Number of copies the library owns.
    pub total_copies: i64,
}

impl CreateBookRequest {
    /// Validates the request into a [`NewBook`].
    pub fn validate(&self) -> LibraryResult<NewBook> {
        validate_new_book(&self.title, &self.author, self.total_copies)
    }
}

/// Request body for `POST /members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    /// The member's name.
    pub name: String,
    /// The member's email address.
    pub email: String,
}

impl CreateMemberRequest {
    /// Validates the request into a [`NewMember`].
    pub fn validate(&self) -> LibraryResult<NewMember> {
        validate_new_member(&self.name, &self.email)
    }
}
