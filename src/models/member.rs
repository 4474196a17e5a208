//! Member model and related types.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, LibraryResult};

use super::BookId;

/// Identifier of a member, assigned sequentially by the catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request to register a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    /// The member's name, trimmed and non-empty.
    pub name: String,
    /// The member's email address.
    pub email: String,
}

/// Represents a registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for the member.
    pub id: MemberId,
    /// The member's name.
    pub name: String,
    /// The member's email address. Not required to be unique.
    pub email: String,
    /// Books currently held, in borrow order, without duplicates.
    pub borrowed_books: Vec<BookId>,
    /// Accumulated fines. Only ever increases.
    pub fine_amount: Decimal,
}

impl Member {
    /// Creates a member holding no books and owing nothing.
    pub fn new(id: MemberId, new_member: NewMember) -> Self {
        Self {
            id,
            name: new_member.name,
            email: new_member.email,
            borrowed_books: Vec::new(),
            fine_amount: Decimal::ZERO,
        }
    }

    /// Returns true if the member currently holds `book_id`.
    pub fn holds(&self, book_id: BookId) -> bool {
        self.borrowed_books.contains(&book_id)
    }

    /// Number of books currently held.
    pub fn borrowed_count(&self) -> usize {
        self.borrowed_books.len()
    }

    pub(crate) fn take(&mut self, book_id: BookId) {
        debug_assert!(!self.holds(book_id));
        self.borrowed_books.push(book_id);
    }

    pub(crate) fn release(&mut self, book_id: BookId) {
        self.borrowed_books.retain(|b| *b != book_id);
    }

    /// Adds a fine to the balance. Negative amounts are ignored.
    ///
    /// Fails without touching the balance if the sum is not representable.
    pub(crate) fn charge(&mut self, amount: Decimal) -> LibraryResult<()> {
        if amount <= Decimal::ZERO {
            return Ok(());
        }
        self.fine_amount = self.fine_amount.checked_add(amount).ok_or_else(|| {
            LibraryError::CalculationError {
                message: format!("fine balance of member {} overflowed", self.id),
            }
        })?;
        Ok(())
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.email)
    }
}
