//! Book model and related types.
//!
//! A book is one catalog title with a counted pool of identical copies.
//! Copies are tracked by number only, never individually.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::MemberId;

/// Identifier of a book, assigned sequentially by the catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request to add a title to the catalog.
///
/// Built by [`crate::catalog::validate_new_book`]; the store trusts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    /// The title, trimmed and non-empty.
    pub title: String,
    /// The author, trimmed and non-empty.
    pub author: String,
    /// Number of copies owned, at least one.
    pub total_copies: u32,
}

/// Represents a title in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book.
    pub id: BookId,
    /// The book's title.
    pub title: String,
    /// The book's author.
    pub author: String,
    /// Number of copies the library owns.
    pub total_copies: u32,
    /// Number of copies currently on the shelf.
    pub available_copies: u32,
    /// Members currently holding a copy, in checkout order.
    pub borrowed_by: Vec<MemberId>,
}

impl Book {
    /// Creates a book with every copy available.
    pub fn new(id: BookId, new_book: NewBook) -> Self {
        Self {
            id,
            title: new_book.title,
            author: new_book.author,
            total_copies: new_book.total_copies,
            available_copies: new_book.total_copies,
            borrowed_by: Vec::new(),
        }
    }

    /// Returns true if at least one copy is on the shelf.
    ///
    /// # Examples
    ///
    /// ```
    /// use library_catalog::models::{Book, BookId, NewBook};
    ///
    /// let book = Book::new(
    ///     BookId(1),
    ///     NewBook {
    ///         title: "Dune".to_string(),
    ///         author: "Frank Herbert".to_string(),
    ///         total_copies: 2,
    ///     },
    /// );
    /// assert!(book.is_available());
    /// ```
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Number of copies currently checked out.
    pub fn checked_out(&self) -> u32 {
        self.total_copies - self.available_copies
    }

    /// Moves one copy from the shelf to `member_id`.
    ///
    /// Callers must have checked [`Book::is_available`].
    pub(crate) fn check_out(&mut self, member_id: MemberId) {
        debug_assert!(self.is_available());
        self.available_copies = self.available_copies.saturating_sub(1);
        self.borrowed_by.push(member_id);
    }

    /// Moves one copy from `member_id` back to the shelf.
    ///
    /// The available count is clamped to the total.
    pub(crate) fn check_in(&mut self, member_id: MemberId) {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
        }
        if let Some(pos) = self.borrowed_by.iter().position(|m| *m == member_id) {
            self.borrowed_by.remove(pos);
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}/{} available)",
            self.title, self.author, self.available_copies, self.total_copies
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_book(total_copies: u32) -> Book {
        Book::new(
            BookId(1),
            NewBook {
                title: "The Great Gatsby".to_string(),
                author: "F. Scott Fitzgerald".to_string(),
                total_copies,
            },
        )
    }

    #[test]
    fn test_new_book_has_all_copies_available() {
        let book = create_test_book(5);
        assert_eq!(book.available_copies, 5);
        assert_eq!(book.checked_out(), 0);
        assert!(book.borrowed_by.is_empty());
    }

    #[test]
    fn test_check_out_and_check_in() {
        let mut book = create_test_book(2);
        book.check_out(MemberId(1));
        book.check_out(MemberId(2));
        assert_eq!(book.available_copies, 0);
        assert!(!book.is_available());
        assert_eq!(book.borrowed_by, vec![MemberId(1), MemberId(2)]);

        book.check_in(MemberId(1));
        assert_eq!(book.available_copies, 1);
        assert_eq!(book.borrowed_by, vec![MemberId(2)]);
    }

    #[test]
    fn test_check_in_is_clamped_to_total() {
        let mut book = create_test_book(1);
        book.check_in(MemberId(9));
        assert_eq!(book.available_copies, 1);
        assert!(book.borrowed_by.is_empty());
    }

    #[test]
    fn test_display() {
        let book = create_test_book(5);
        assert_eq!(
            book.to_string(),
            "The Great Gatsby by F. Scott Fitzgerald (5/5 available)"
        );
    }

    #[test]
    fn test_serialize_book_id_as_number() {
        assert_eq!(serde_json::to_string(&BookId(12)).unwrap(), "12");
    }
}
