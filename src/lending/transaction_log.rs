//! Append-only log of lending transactions.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{BookId, MemberId, Transaction, TransactionKind};

/// An ordered, append-only sequence of [`Transaction`]s.
///
/// Entries are never mutated or removed. Overdue and fine state is derived
/// by scanning it.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a borrow made at `now` and due back at `due_date`.
    pub fn record_borrow(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
        now: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> &Transaction {
        self.append(book_id, member_id, TransactionKind::Borrow, now, Some(due_date))
    }

    /// Appends a return.
    pub fn record_return(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
        now: DateTime<Utc>,
    ) -> &Transaction {
        self.append(book_id, member_id, TransactionKind::Return, now, None)
    }

    fn append(
        &mut self,
        book_id: BookId,
        member_id: MemberId,
        kind: TransactionKind,
        created_at: DateTime<Utc>,
        due_date: Option<DateTime<Utc>>,
    ) -> &Transaction {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(Transaction {
            sequence,
            book_id,
            member_id,
            kind,
            created_at,
            due_date,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Finds the borrow currently open for a (book, member) pair.
    ///
    /// Scans backwards: the most recent event for the pair decides. If it is
    /// a borrow, that borrow is open; if it is a return, nothing is open.
    pub fn open_borrow(&self, book_id: BookId, member_id: MemberId) -> Option<&Transaction> {
        self.entries
            .iter()
            .rev()
            .find(|tx| tx.concerns(book_id, member_id))
            .filter(|tx| tx.kind == TransactionKind::Borrow)
    }

    /// Every open borrow that is past due at `now`, oldest first.
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<&Transaction> {
        let mut seen = HashSet::new();
        let mut overdue: Vec<&Transaction> = self
            .entries
            .iter()
            .rev()
            .filter(|tx| seen.insert((tx.book_id, tx.member_id)))
            .filter(|tx| tx.is_overdue(now))
            .collect();
        overdue.reverse();
        overdue
    }

    /// All transactions in the order they were recorded.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Number of recorded transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
