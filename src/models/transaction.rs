//! Lending transaction records.
//!
//! Transactions are immutable once appended to the log. The overdue flag is
//! derived from the due date and the current time and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, MemberId};

/// The kind of lending event a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A copy left the shelf.
    Borrow,
    /// A copy came back.
    Return,
}

/// An immutable record of one lending event.
///
/// # Example
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use library_catalog::models::{BookId, MemberId, Transaction, TransactionKind};
///
/// let created_at = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
/// let tx = Transaction {
///     sequence: 1,
///     book_id: BookId(1),
///     member_id: MemberId(1),
///     kind: TransactionKind::Borrow,
///     created_at,
///     due_date: Some(created_at + Duration::days(14)),
/// };
/// assert!(!tx.is_overdue(created_at + Duration::days(14)));
/// assert!(tx.is_overdue(created_at + Duration::days(15)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    /// The book involved.
    pub book_id: BookId,
    /// The member involved.
    pub member_id: MemberId,
    /// Borrow or return.
    pub kind: TransactionKind,
    /// When the event happened.
    pub created_at: DateTime<Utc>,
    /// When the copy must be back. Set only for borrows.
    pub due_date: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Returns true if this is a borrow whose due date has passed at `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.kind == TransactionKind::Borrow && self.due_date.is_some_and(|due| now > due)
    }

    /// Returns true if this transaction concerns the given pair.
    pub fn concerns(&self, book_id: BookId, member_id: MemberId) -> bool {
        self.book_id == book_id && self.member_id == member_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
    }

    fn create_transaction(kind: TransactionKind) -> Transaction {
        Transaction {
            sequence: 1,
            book_id: BookId(1),
            member_id: MemberId(2),
            kind,
            created_at: start(),
            due_date: match kind {
                TransactionKind::Borrow => Some(start() + Duration::days(14)),
                TransactionKind::Return => None,
            },
        }
    }

    #[test]
    fn test_borrow_is_not_overdue_on_due_date() {
        let tx = create_transaction(TransactionKind::Borrow);
        assert!(!tx.is_overdue(start()));
        assert!(!tx.is_overdue(start() + Duration::days(14)));
    }

    #[test]
    fn test_borrow_is_overdue_after_due_date() {
        let tx = create_transaction(TransactionKind::Borrow);
        assert!(tx.is_overdue(start() + Duration::days(14) + Duration::seconds(1)));
    }

    #[test]
    fn test_return_is_never_overdue() {
        let tx = create_transaction(TransactionKind::Return);
        assert!(!tx.is_overdue(start() + Duration::days(365)));
    }

    #[test]
    fn test_concerns_matches_pair() {
        let tx = create_transaction(TransactionKind::Borrow);
        assert!(tx.concerns(BookId(1), MemberId(2)));
        assert!(!tx.concerns(BookId(2), MemberId(1)));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Borrow).unwrap(),
            "\"borrow\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Return).unwrap(),
            "\"return\""
        );
    }
}
