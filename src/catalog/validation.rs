//! Input validation at the catalog boundary.
//!
//! Raw client input is checked here and turned into [`NewBook`] or
//! [`NewMember`]; the store only ever sees validated values.

use crate::error::{LibraryError, LibraryResult};
use crate::models::{NewBook, NewMember};

/// Validates the fields of a book creation request.
///
/// Text fields are trimmed and must be non-empty. `total_copies` must be at
/// least one and fit in a `u32`.
///
/// # Examples
///
/// ```
/// use library_catalog::catalog::validate_new_book;
///
/// let book = validate_new_book("  Dune ", "Frank Herbert", 2).unwrap();
/// assert_eq!(book.title, "Dune");
/// assert!(validate_new_book("Dune", "Frank Herbert", 0).is_err());
/// ```
pub fn validate_new_book(title: &str, author: &str, total_copies: i64) -> LibraryResult<NewBook> {
    let title = required_text("title", title)?;
    let author = required_text("author", author)?;

    if total_copies < 1 {
        return Err(LibraryError::invalid_input(
            "total_copies",
            format!("must be at least 1, got {}", total_copies),
        ));
    }
    let total_copies = u32::try_from(total_copies).map_err(|_| {
        LibraryError::invalid_input(
            "total_copies",
            format!("must not exceed {}, got {}", u32::MAX, total_copies),
        )
    })?;

    Ok(NewBook {
        title,
        author,
        total_copies,
    })
}

/// Validates the fields of a member registration request.
///
/// The name must be non-empty. The email must have exactly one `@` with
/// text on both sides; uniqueness is not checked.
pub fn validate_new_member(name: &str, email: &str) -> LibraryResult<NewMember> {
    let name = required_text("name", name)?;
    let email = required_text("email", email)?;

    let mut parts = email.split('@');
    let well_formed = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => !local.is_empty() && !domain.is_empty(),
        _ => false,
    };
    if !well_formed || email.chars().any(char::is_whitespace) {
        return Err(LibraryError::invalid_input(
            "email",
            format!("'{}' is not a valid email address", email),
        ));
    }

    Ok(NewMember { name, email })
}

fn required_text(field: &str, value: &str) -> LibraryResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LibraryError::invalid_input(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
