//! Error types for the library catalog.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition a catalog or lending operation can reject.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BookId, MemberId};

/// The kind of entity an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A book title in the catalog.
    Book,
    /// A registered library member.
    Member,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => f.write_str("Book"),
            EntityKind::Member => f.write_str("Member"),
        }
    }
}

/// The main error type for the library catalog.
///
/// Every lending rejection is an expected, recoverable condition caused by
/// client input; none of them is fatal to the process.
///
/// # Example
///
/// ```
/// use library_catalog::error::LibraryError;
/// use library_catalog::models::BookId;
///
/// let error = LibraryError::NoCopyAvailable { book_id: BookId(7) };
/// assert_eq!(error.to_string(), "No copy of book 7 is available");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// The referenced book or member does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Which collection was searched.
        entity: EntityKind,
        /// The identifier that was not found.
        id: u64,
    },

    /// A borrow was attempted while every copy is checked out.
    #[error("No copy of book {book_id} is available")]
    NoCopyAvailable {
        /// The requested book.
        book_id: BookId,
    },

    /// The member already holds the maximum number of books.
    #[error("Member {member_id} already holds the maximum of {limit} books")]
    BorrowLimitExceeded {
        /// The member at the limit.
        member_id: MemberId,
        /// The configured borrow limit.
        limit: usize,
    },

    /// The member already holds a copy of this book.
    #[error("Member {member_id} already holds book {book_id}")]
    DuplicateBorrow {
        /// The requested book.
        book_id: BookId,
        /// The member holding it.
        member_id: MemberId,
    },

    /// A return was attempted for a book the member does not hold.
    #[error("Book {book_id} is not borrowed by member {member_id}")]
    NotBorrowedByMember {
        /// The book being returned.
        book_id: BookId,
        /// The member returning it.
        member_id: MemberId,
    },

    /// Input rejected at the catalog boundary.
    #[error("Invalid field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date or money calculation fell outside the representable range.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl LibraryError {
    /// Shorthand for a missing book.
    pub fn book_not_found(book_id: BookId) -> Self {
        LibraryError::NotFound {
            entity: EntityKind::Book,
            id: book_id.0,
        }
    }

    /// Shorthand for a missing member.
    pub fn member_not_found(member_id: MemberId) -> Self {
        LibraryError::NotFound {
            entity: EntityKind::Member,
            id: member_id.0,
        }
    }

    /// Shorthand for a boundary validation failure.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        LibraryError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return LibraryError.
pub type LibraryResult<T> = Result<T, LibraryError>;
