//! The library service instance.
//!
//! [`Library`] owns the catalog store, the transaction log and the lending
//! engine, and exposes the operation set the transport layer calls. It is
//! constructed explicitly by the service entry point; there is no global
//! instance.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::{validate_new_book, validate_new_member, CatalogStore};
use crate::config::{LendingPolicy, SeedConfig};
use crate::error::LibraryResult;
use crate::lending::{
    calculate_fine, BorrowReceipt, Clock, FineAssessment, LendingEngine, ReturnReceipt,
    SystemClock, TransactionLog,
};
use crate::models::{Book, BookId, Member, MemberId, NewBook, NewMember, Transaction};

/// A single library: books, members and their lending history.
///
/// # Example
///
/// ```
/// use library_catalog::catalog::{validate_new_book, validate_new_member};
/// use library_catalog::config::LendingPolicy;
/// use library_catalog::library::Library;
///
/// let mut library = Library::new(LendingPolicy::default());
/// let book = library.create_book(validate_new_book("Dune", "Frank Herbert", 1)?).id;
/// let member = library.create_member(validate_new_member("Ann", "ann@example.com")?).id;
///
/// library.borrow(book, member)?;
/// assert_eq!(library.book(book)?.available_copies, 0);
///
/// let receipt = library.return_book(book, member)?;
/// assert!(receipt.fine.amount.is_zero());
/// # Ok::<(), library_catalog::error::LibraryError>(())
/// ```
pub struct Library {
    store: CatalogStore,
    log: TransactionLog,
    engine: LendingEngine,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("books", &self.store.book_count())
            .field("members", &self.store.member_count())
            .field("transactions", &self.log.len())
            .field("policy", self.engine.policy())
            .finish()
    }
}

impl Library {
    /// Creates an empty library reading wall-clock time.
    pub fn new(policy: LendingPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates an empty library reading time from `clock`.
    pub fn with_clock(policy: LendingPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: CatalogStore::new(),
            log: TransactionLog::new(),
            engine: LendingEngine::new(policy),
            clock,
        }
    }

    /// Returns the policy in force.
    pub fn policy(&self) -> &LendingPolicy {
        self.engine.policy()
    }

    /// The current time according to this library's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Loads the startup fixture.
    ///
    /// Seed entries go through the same validation as client input.
    pub fn seed(&mut self, seed: &SeedConfig) -> LibraryResult<()> {
        for book in &seed.books {
            let new_book = validate_new_book(&book.title, &book.author, book.total_copies)?;
            self.store.add_book(new_book);
        }
        for member in &seed.members {
            let new_member = validate_new_member(&member.name, &member.email)?;
            self.store.add_member(new_member);
        }
        info!(
            books = seed.books.len(),
            members = seed.members.len(),
            "Seeded catalog"
        );
        Ok(())
    }

    /// Adds a title to the catalog.
    pub fn create_book(&mut self, new_book: NewBook) -> &Book {
        let book = self.store.add_book(new_book);
        info!(
            book_id = %book.id,
            title = %book.title,
            total_copies = book.total_copies,
            "Book created"
        );
        book
    }

    /// All books in identifier order.
    pub fn list_books(&self) -> impl Iterator<Item = &Book> {
        self.store.books()
    }

    /// Looks up one book.
    pub fn book(&self, id: BookId) -> LibraryResult<&Book> {
        self.store.book(id)
    }

    /// Registers a member.
    pub fn create_member(&mut self, new_member: NewMember) -> &Member {
        let member = self.store.add_member(new_member);
        info!(member_id = %member.id, name = %member.name, "Member created");
        member
    }

    /// All members in identifier order.
    pub fn list_members(&self) -> impl Iterator<Item = &Member> {
        self.store.members()
    }

    /// Looks up one member.
    pub fn member(&self, id: MemberId) -> LibraryResult<&Member> {
        self.store.member(id)
    }

    /// Checks a copy of `book_id` out to `member_id` now.
    pub fn borrow(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> LibraryResult<BorrowReceipt> {
        let now = self.clock.now();
        self.engine
            .borrow(&mut self.store, &mut self.log, book_id, member_id, now)
    }

    /// Checks `book_id` back in from `member_id` now, charging any fine.
    pub fn return_book(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
    ) -> LibraryResult<ReturnReceipt> {
        let now = self.clock.now();
        self.engine
            .return_book(&mut self.store, &mut self.log, book_id, member_id, now)
    }

    /// The fine a return would carry right now, without returning.
    pub fn assess_fine(
        &self,
        book_id: BookId,
        member_id: MemberId,
    ) -> LibraryResult<FineAssessment> {
        self.store.book(book_id)?;
        self.store.member(member_id)?;
        calculate_fine(
            &self.log,
            book_id,
            member_id,
            self.clock.now(),
            self.policy().fine_rate,
        )
    }

    /// The full lending history in recording order.
    pub fn transactions(&self) -> &[Transaction] {
        self.log.entries()
    }

    /// Open borrows that are past due right now.
    pub fn overdue_loans(&self) -> Vec<&Transaction> {
        self.log.overdue(self.clock.now())
    }
}
