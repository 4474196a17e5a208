//! Response types for the library API.
//!
//! This module defines the JSON bodies returned by each endpoint, the error
//! response structure, and the mapping from [`LibraryError`] to HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::lending::{BorrowReceipt, ReturnReceipt};
use crate::models::{Book, BookId, Member, MemberId, Transaction, TransactionKind};

/// A book as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookResponse {
    /// The book's identifier.
    pub book_id: BookId,
    /// The title.
    pub title: String,
    /// The author.
    pub author: String,
    /// Copies owned.
    pub total_copies: u32,
    /// Copies on the shelf.
    pub available_copies: u32,
    /// Members holding a copy.
    pub borrowed_by: Vec<MemberId>,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            book_id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            total_copies: book.total_copies,
            available_copies: book.available_copies,
            borrowed_by: book.borrowed_by.clone(),
        }
    }
}

/// A member as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberResponse {
    /// The member's identifier.
    pub id: MemberId,
    /// The member's name.
    pub name: String,
    /// The member's email address.
    pub email: String,
    /// Books currently held.
    pub borrowed_books: Vec<BookId>,
    /// Accumulated fines.
    pub fine_amount: Decimal,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            email: member.email.clone(),
            borrowed_books: member.borrowed_books.clone(),
            fine_amount: member.fine_amount,
        }
    }
}

/// Body of a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowResponse {
    /// Confirmation text.
    pub message: String,
    /// Sequence number of the borrow transaction.
    pub transaction_id: u64,
    /// When the copy must be back.
    pub due_date: DateTime<Utc>,
}

impl From<BorrowReceipt> for BorrowResponse {
    fn from(receipt: BorrowReceipt) -> Self {
        Self {
            message: "Book borrowed successfully".to_string(),
            transaction_id: receipt.transaction.sequence,
            due_date: receipt.due_date,
        }
    }
}

/// Body of a successful return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnResponse {
    /// Confirmation text.
    pub message: String,
    /// Sequence number of the return transaction.
    pub transaction_id: u64,
    /// Fine charged for this return.
    pub fine_amount: Decimal,
    /// Whole days the copy was overdue.
    pub days_overdue: i64,
}

impl From<ReturnReceipt> for ReturnResponse {
    fn from(receipt: ReturnReceipt) -> Self {
        Self {
            message: "Book returned successfully".to_string(),
            transaction_id: receipt.transaction.sequence,
            fine_amount: receipt.fine.amount,
            days_overdue: receipt.fine.days_overdue,
        }
    }
}

/// A transaction as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Position in the log.
    pub transaction_id: u64,
    /// The book involved.
    pub book_id: BookId,
    /// The member involved.
    pub member_id: MemberId,
    /// Borrow or return.
    pub kind: TransactionKind,
    /// When it happened.
    pub created_at: DateTime<Utc>,
    /// Due date, for borrows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Whether this borrow is past due at the time of the request.
    pub overdue: bool,
}

impl TransactionResponse {
    /// Builds the response, deriving the overdue flag at `now`.
    pub fn new(transaction: &Transaction, now: DateTime<Utc>) -> Self {
        Self {
            transaction_id: transaction.sequence,
            book_id: transaction.book_id,
            member_id: transaction.member_id,
            kind: transaction.kind,
            created_at: transaction.created_at,
            due_date: transaction.due_date,
            overdue: transaction.is_overdue(now),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid path parameter error response.
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new("INVALID_PATH", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LibraryError> for ApiErrorResponse {
    fn from(error: LibraryError) -> Self {
        let message = error.to_string();
        match error {
            LibraryError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            LibraryError::NoCopyAvailable { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "NO_COPY_AVAILABLE",
                    message,
                    "Every copy of this book is currently checked out",
                ),
            },
            LibraryError::BorrowLimitExceeded { limit, .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "BORROW_LIMIT_EXCEEDED",
                    message,
                    format!("Members may hold at most {} books at a time", limit),
                ),
            },
            LibraryError::DuplicateBorrow { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("DUPLICATE_BORROW", message),
            },
            LibraryError::NotBorrowedByMember { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("NOT_BORROWED_BY_MEMBER", message),
            },
            LibraryError::InvalidInput { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            LibraryError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CALCULATION_ERROR", message),
            },
            LibraryError::ConfigNotFound { .. } | LibraryError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
        }
    }
}
