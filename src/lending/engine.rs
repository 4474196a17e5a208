//! The lending engine: borrow and return state transitions.
//!
//! For a single (copy, member) relationship the only transitions are
//! `AVAILABLE -> BORROWED` (borrow, gated by policy) and
//! `BORROWED -> AVAILABLE` (return, fine assessed at the transition).
//! Every precondition is checked before anything is written, so a rejected
//! operation leaves the store and the log untouched.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::CatalogStore;
use crate::config::LendingPolicy;
use crate::error::{LibraryError, LibraryResult};
use crate::models::{BookId, MemberId, Transaction};

use super::{calculate_fine, FineAssessment, TransactionLog};

/// The result of a successful borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowReceipt {
    /// The borrow transaction appended to the log.
    pub transaction: Transaction,
    /// When the copy must be returned.
    pub due_date: DateTime<Utc>,
}

/// The result of a successful return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnReceipt {
    /// The return transaction appended to the log.
    pub transaction: Transaction,
    /// The fine charged to the member for this return.
    pub fine: FineAssessment,
}

/// Applies a [`LendingPolicy`] to a catalog store and transaction log.
#[derive(Debug, Clone, Default)]
pub struct LendingEngine {
    policy: LendingPolicy,
}

impl LendingEngine {
    /// Creates an engine enforcing `policy`.
    pub fn new(policy: LendingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in force.
    pub fn policy(&self) -> &LendingPolicy {
        &self.policy
    }

    fn due_date(&self, now: DateTime<Utc>) -> LibraryResult<DateTime<Utc>> {
        let loan_period = Duration::days(i64::from(self.policy.loan_period_days));
        now.checked_add_signed(loan_period)
            .ok_or_else(|| LibraryError::CalculationError {
                message: format!(
                    "due date {} days after {} is out of range",
                    self.policy.loan_period_days, now
                ),
            })
    }

    /// Checks a copy of `book_id` out to `member_id`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - `NotFound` if the book, then the member, does not exist
    /// - `DuplicateBorrow` if the member already holds this book
    /// - `BorrowLimitExceeded` if the member is at the borrow limit
    /// - `NoCopyAvailable` if every copy is checked out
    ///
    /// `CalculationError` if the due date is out of range; nothing is written.
    pub fn borrow(
        &self,
        store: &mut CatalogStore,
        log: &mut TransactionLog,
        book_id: BookId,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> LibraryResult<BorrowReceipt> {
        let (book, member) = store
            .book_and_member_mut(book_id, member_id)
            .inspect_err(|e| warn!(%book_id, %member_id, error = %e, "Borrow rejected"))?;

        let rejection = if member.holds(book_id) {
            Some(LibraryError::DuplicateBorrow { book_id, member_id })
        } else if member.borrowed_count() >= self.policy.borrow_limit {
            Some(LibraryError::BorrowLimitExceeded {
                member_id,
                limit: self.policy.borrow_limit,
            })
        } else if !book.is_available() {
            Some(LibraryError::NoCopyAvailable { book_id })
        } else {
            None
        };
        if let Some(error) = rejection {
            warn!(%book_id, %member_id, error = %error, "Borrow rejected");
            return Err(error);
        }

        let due_date = self
            .due_date(now)
            .inspect_err(|e| warn!(%book_id, %member_id, error = %e, "Borrow rejected"))?;

        book.check_out(member_id);
        member.take(book_id);
        let transaction = log
            .record_borrow(book_id, member_id, now, due_date)
            .clone();

        info!(
            %book_id,
            %member_id,
            available_copies = book.available_copies,
            due_date = %due_date,
            "Book borrowed"
        );

        Ok(BorrowReceipt {
            transaction,
            due_date,
        })
    }

    /// Checks the copy of `book_id` held by `member_id` back in.
    ///
    /// The fine is assessed once, from the open borrow, before the return is
    /// recorded. The book gains exactly one available copy (never beyond its
    /// total), each tracking list loses exactly one entry, and exactly one
    /// return transaction is appended.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the book, then the member, does not exist
    /// - `NotBorrowedByMember` if the member does not hold this book
    /// - `CalculationError` if the fine or the new balance overflows; nothing
    ///   is written
    pub fn return_book(
        &self,
        store: &mut CatalogStore,
        log: &mut TransactionLog,
        book_id: BookId,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> LibraryResult<ReturnReceipt> {
        let (book, member) = store
            .book_and_member_mut(book_id, member_id)
            .inspect_err(|e| warn!(%book_id, %member_id, error = %e, "Return rejected"))?;

        if !member.holds(book_id) {
            let error = LibraryError::NotBorrowedByMember { book_id, member_id };
            warn!(%book_id, %member_id, error = %error, "Return rejected");
            return Err(error);
        }

        let fine = calculate_fine(log, book_id, member_id, now, self.policy.fine_rate)
            .inspect_err(|e| warn!(%book_id, %member_id, error = %e, "Return rejected"))?;
        member
            .charge(fine.amount)
            .inspect_err(|e| warn!(%book_id, %member_id, error = %e, "Return rejected"))?;

        book.check_in(member_id);
        member.release(book_id);
        let transaction = log.record_return(book_id, member_id, now).clone();

        info!(
            %book_id,
            %member_id,
            available_copies = book.available_copies,
            fine = %fine.amount,
            days_overdue = fine.days_overdue,
            "Book returned"
        );

        Ok(ReturnReceipt { transaction, fine })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBook, NewMember, TransactionKind};
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 6, 10, 0, 0).unwrap()
    }

    struct Fixture {
        engine: LendingEngine,
        store: CatalogStore,
        log: TransactionLog,
    }

    impl Fixture {
        fn new(copies: &[u32], members: usize) -> Self {
            let mut store = CatalogStore::new();
            for (i, total_copies) in copies.iter().enumerate() {
                store.add_book(NewBook {
                    title: format!("Book {}", i + 1),
                    author: "Author".to_string(),
                    total_copies: *total_copies,
                });
            }
            for i in 0..members {
                store.add_member(NewMember {
                    name: format!("Member {}", i + 1),
                    email: format!("member{}@example.com", i + 1),
                });
            }
            Self {
                engine: LendingEngine::default(),
                store,
                log: TransactionLog::new(),
            }
        }

        fn borrow(
            &mut self,
            book: u64,
            member: u64,
            now: DateTime<Utc>,
        ) -> LibraryResult<BorrowReceipt> {
            let (book, member) = (BookId(book), MemberId(member));
            self.engine
                .borrow(&mut self.store, &mut self.log, book, member, now)
        }

        fn return_book(
            &mut self,
            book: u64,
            member: u64,
            now: DateTime<Utc>,
        ) -> LibraryResult<ReturnReceipt> {
            let (book, member) = (BookId(book), MemberId(member));
            self.engine
                .return_book(&mut self.store, &mut self.log, book, member, now)
        }

        fn book(&self, id: u64) -> &crate::models::Book {
            self.store.book(BookId(id)).unwrap()
        }

        fn member(&self, id: u64) -> &crate::models::Member {
            self.store.member(MemberId(id)).unwrap()
        }
    }

    #[test]
    fn test_borrow_moves_copy_to_member() {
        let mut fx = Fixture::new(&[2], 1);
        let receipt = fx.borrow(1, 1, start()).unwrap();

        assert_eq!(receipt.due_date, start() + Duration::days(14));
        assert_eq!(receipt.transaction.kind, TransactionKind::Borrow);
        assert_eq!(receipt.transaction.due_date, Some(receipt.due_date));
        assert_eq!(fx.book(1).available_copies, 1);
        assert_eq!(fx.book(1).borrowed_by, vec![MemberId(1)]);
        assert_eq!(fx.member(1).borrowed_books, vec![BookId(1)]);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_borrow_unknown_book_or_member() {
        let mut fx = Fixture::new(&[1], 1);
        assert_eq!(
            fx.borrow(9, 1, start()).unwrap_err(),
            LibraryError::book_not_found(BookId(9))
        );
        assert_eq!(
            fx.borrow(1, 9, start()).unwrap_err(),
            LibraryError::member_not_found(MemberId(9))
        );
        assert!(fx.log.is_empty());
    }

    #[test]
    fn test_borrow_with_no_copy_available_leaves_state_unchanged() {
        let mut fx = Fixture::new(&[1], 2);
        fx.borrow(1, 1, start()).unwrap();
        let book_before = fx.book(1).clone();
        let member_before = fx.member(2).clone();

        assert_eq!(
            fx.borrow(1, 2, start()).unwrap_err(),
            LibraryError::NoCopyAvailable { book_id: BookId(1) }
        );
        assert_eq!(fx.book(1), &book_before);
        assert_eq!(fx.member(2), &member_before);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_borrow_limit_blocks_fourth_book() {
        let mut fx = Fixture::new(&[1, 1, 1, 1], 1);
        for book in 1..=3 {
            fx.borrow(book, 1, start()).unwrap();
        }
        assert_eq!(
            fx.borrow(4, 1, start()).unwrap_err(),
            LibraryError::BorrowLimitExceeded {
                member_id: MemberId(1),
                limit: 3
            }
        );
        assert_eq!(fx.book(4).available_copies, 1);
        assert_eq!(fx.member(1).borrowed_count(), 3);
        assert_eq!(fx.log.len(), 3);
    }

    #[test]
    fn test_duplicate_borrow_is_rejected() {
        let mut fx = Fixture::new(&[3], 1);
        fx.borrow(1, 1, start()).unwrap();
        assert_eq!(
            fx.borrow(1, 1, start()).unwrap_err(),
            LibraryError::DuplicateBorrow {
                book_id: BookId(1),
                member_id: MemberId(1)
            }
        );
        assert_eq!(fx.book(1).available_copies, 2);
    }

    #[test]
    fn test_duplicate_is_reported_before_missing_copy() {
        let mut fx = Fixture::new(&[1], 1);
        fx.borrow(1, 1, start()).unwrap();
        assert!(matches!(
            fx.borrow(1, 1, start()),
            Err(LibraryError::DuplicateBorrow { .. })
        ));
    }

    #[test]
    fn test_on_time_return_round_trips() {
        let mut fx = Fixture::new(&[2], 1);
        fx.borrow(1, 1, start()).unwrap();
        let receipt = fx.return_book(1, 1, start() + Duration::days(7)).unwrap();

        assert_eq!(receipt.fine.amount, Decimal::ZERO);
        assert_eq!(receipt.transaction.kind, TransactionKind::Return);
        assert_eq!(receipt.transaction.due_date, None);
        assert_eq!(fx.book(1).available_copies, 2);
        assert!(fx.book(1).borrowed_by.is_empty());
        assert!(fx.member(1).borrowed_books.is_empty());
        assert_eq!(fx.member(1).fine_amount, Decimal::ZERO);
        assert_eq!(fx.log.len(), 2);
    }

    #[test]
    fn test_late_return_charges_fine_once() {
        let mut fx = Fixture::new(&[1], 1);
        fx.borrow(1, 1, start()).unwrap();
        let receipt = fx.return_book(1, 1, start() + Duration::days(17)).unwrap();

        assert_eq!(receipt.fine.days_overdue, 3);
        assert_eq!(receipt.fine.amount, dec("3"));
        assert_eq!(fx.member(1).fine_amount, dec("3"));
        assert_eq!(fx.book(1).available_copies, 1);
    }

    #[test]
    fn test_fines_accumulate_across_returns() {
        let mut fx = Fixture::new(&[1, 1], 1);
        fx.borrow(1, 1, start()).unwrap();
        fx.borrow(2, 1, start()).unwrap();
        fx.return_book(1, 1, start() + Duration::days(16)).unwrap();
        fx.return_book(2, 1, start() + Duration::days(20)).unwrap();
        assert_eq!(fx.member(1).fine_amount, dec("8"));
    }

    #[test]
    fn test_return_of_unheld_book_is_rejected() {
        let mut fx = Fixture::new(&[1], 2);
        fx.borrow(1, 1, start()).unwrap();
        assert_eq!(
            fx.return_book(1, 2, start()).unwrap_err(),
            LibraryError::NotBorrowedByMember {
                book_id: BookId(1),
                member_id: MemberId(2)
            }
        );
        assert_eq!(fx.book(1).available_copies, 0);
        assert_eq!(fx.book(1).borrowed_by, vec![MemberId(1)]);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_return_unknown_entities() {
        let mut fx = Fixture::new(&[1], 1);
        assert!(matches!(
            fx.return_book(5, 1, start()),
            Err(LibraryError::NotFound { .. })
        ));
        assert!(matches!(
            fx.return_book(1, 5, start()),
            Err(LibraryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_reborrow_is_fined_on_its_own_loan() {
        let mut fx = Fixture::new(&[1], 1);
        fx.borrow(1, 1, start()).unwrap();
        fx.return_book(1, 1, start() + Duration::days(1)).unwrap();

        let second = start() + Duration::days(60);
        fx.borrow(1, 1, second).unwrap();
        let receipt = fx.return_book(1, 1, second + Duration::days(15)).unwrap();
        assert_eq!(receipt.fine.amount, dec("1"));
        assert_eq!(fx.member(1).fine_amount, dec("1"));
    }

    #[test]
    fn test_out_of_range_due_date_leaves_state_unchanged() {
        let mut fx = Fixture::new(&[1], 1);
        fx.engine = LendingEngine::new(LendingPolicy {
            loan_period_days: u32::MAX,
            ..LendingPolicy::default()
        });
        let near_max = DateTime::<Utc>::MAX_UTC - Duration::days(1);

        assert!(matches!(
            fx.borrow(1, 1, near_max),
            Err(LibraryError::CalculationError { .. })
        ));
        assert_eq!(fx.book(1).available_copies, 1);
        assert!(fx.book(1).borrowed_by.is_empty());
        assert!(fx.member(1).borrowed_books.is_empty());
        assert!(fx.log.is_empty());
    }

    #[test]
    fn test_fine_overflow_leaves_loan_open() {
        let mut fx = Fixture::new(&[1], 1);
        fx.engine = LendingEngine::new(LendingPolicy {
            fine_rate: Decimal::MAX,
            ..LendingPolicy::default()
        });
        fx.borrow(1, 1, start()).unwrap();

        assert!(matches!(
            fx.return_book(1, 1, start() + Duration::days(16)),
            Err(LibraryError::CalculationError { .. })
        ));
        assert_eq!(fx.book(1).available_copies, 0);
        assert_eq!(fx.member(1).borrowed_books, vec![BookId(1)]);
        assert_eq!(fx.member(1).fine_amount, Decimal::ZERO);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_balance_overflow_leaves_loan_open() {
        let mut fx = Fixture::new(&[1], 1);
        fx.store
            .book_and_member_mut(BookId(1), MemberId(1))
            .unwrap()
            .1
            .charge(Decimal::MAX)
            .unwrap();
        fx.borrow(1, 1, start()).unwrap();

        assert!(matches!(
            fx.return_book(1, 1, start() + Duration::days(16)),
            Err(LibraryError::CalculationError { .. })
        ));
        assert_eq!(fx.book(1).available_copies, 0);
        assert_eq!(fx.member(1).fine_amount, Decimal::MAX);
        assert_eq!(fx.log.len(), 1);
    }

    #[test]
    fn test_custom_policy() {
        let mut fx = Fixture::new(&[1, 1], 1);
        fx.engine = LendingEngine::new(LendingPolicy {
            loan_period_days: 7,
            borrow_limit: 1,
            fine_rate: dec("0.50"),
        });
        let receipt = fx.borrow(1, 1, start()).unwrap();
        assert_eq!(receipt.due_date, start() + Duration::days(7));
        assert!(matches!(
            fx.borrow(2, 1, start()),
            Err(LibraryError::BorrowLimitExceeded { limit: 1, .. })
        ));
        let receipt = fx.return_book(1, 1, start() + Duration::days(11)).unwrap();
        assert_eq!(receipt.fine.amount, dec("2.00"));
    }
}
