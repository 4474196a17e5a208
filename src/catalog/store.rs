//! In-memory catalog store.
//!
//! The store owns every book and member and hands out identifiers from
//! its own counters, so identifiers never depend on collection size.

use std::collections::BTreeMap;

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Book, BookId, Member, MemberId, NewBook, NewMember};

/// Owns the book and member collections.
///
/// Entities are never deleted. Iteration is in identifier order.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    books: BTreeMap<BookId, Book>,
    members: BTreeMap<MemberId, Member>,
    next_book_id: u64,
    next_member_id: u64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    /// Creates an empty store. The first identifiers handed out are 1.
    pub fn new() -> Self {
        Self {
            books: BTreeMap::new(),
            members: BTreeMap::new(),
            next_book_id: 1,
            next_member_id: 1,
        }
    }

    /// Adds a book with a fresh identifier and returns it.
    pub fn add_book(&mut self, new_book: NewBook) -> &Book {
        let id = BookId(self.next_book_id);
        self.next_book_id += 1;
        self.books.entry(id).or_insert_with(|| Book::new(id, new_book))
    }

    /// Registers a member with a fresh identifier and returns it.
    pub fn add_member(&mut self, new_member: NewMember) -> &Member {
        let id = MemberId(self.next_member_id);
        self.next_member_id += 1;
        self.members
            .entry(id)
            .or_insert_with(|| Member::new(id, new_member))
    }

    /// Looks up a book.
    pub fn book(&self, id: BookId) -> LibraryResult<&Book> {
        self.books
            .get(&id)
            .ok_or_else(|| LibraryError::book_not_found(id))
    }

    /// Looks up a member.
    pub fn member(&self, id: MemberId) -> LibraryResult<&Member> {
        self.members
            .get(&id)
            .ok_or_else(|| LibraryError::member_not_found(id))
    }

    /// Borrows a book and a member mutably at the same time.
    ///
    /// The book is resolved first, so a request naming two unknown
    /// identifiers reports the book.
    pub fn book_and_member_mut(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> LibraryResult<(&mut Book, &mut Member)> {
        let book = self
            .books
            .get_mut(&book_id)
            .ok_or_else(|| LibraryError::book_not_found(book_id))?;
        let member = self
            .members
            .get_mut(&member_id)
            .ok_or_else(|| LibraryError::member_not_found(member_id))?;
        Ok((book, member))
    }

    /// All books in identifier order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// All members in identifier order.
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    /// Number of books in the catalog.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Number of registered members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
