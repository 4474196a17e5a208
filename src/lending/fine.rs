//! Overdue fine calculation.
//!
//! A fine is charged for every whole day between the due date of the open
//! borrow and the moment of return. Partial days are not charged.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LibraryError, LibraryResult};
use crate::models::{BookId, MemberId};

use super::TransactionLog;

/// The outcome of assessing the fine for one (book, member) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FineAssessment {
    /// Amount owed, never negative.
    pub amount: Decimal,
    /// Whole days past the due date, zero if not overdue.
    pub days_overdue: i64,
    /// Due date of the open borrow, if one was found.
    pub due_date: Option<DateTime<Utc>>,
}

impl FineAssessment {
    /// An assessment that charges nothing.
    pub fn none() -> Self {
        Self {
            amount: Decimal::ZERO,
            days_overdue: 0,
            due_date: None,
        }
    }
}

/// Whole days elapsed since `due_date` at `now`, or zero if not yet due.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use library_catalog::lending::days_overdue;
///
/// let due = Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap();
/// assert_eq!(days_overdue(due, due + Duration::hours(23)), 0);
/// assert_eq!(days_overdue(due, due + Duration::days(3)), 3);
/// assert_eq!(days_overdue(due, due - Duration::days(3)), 0);
/// ```
pub fn days_overdue(due_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    if now <= due_date {
        return 0;
    }
    (now - due_date).num_days()
}

/// Assesses the fine a return of `book_id` by `member_id` would carry at `now`.
///
/// Only the most recent borrow for the pair that has not been closed by a
/// later return is considered, so earlier loans of the same book never
/// affect the amount. The fine is `days_overdue * fine_rate`, floored at zero.
///
/// # Errors
///
/// `CalculationError` if the product is not representable as a `Decimal`.
pub fn calculate_fine(
    log: &TransactionLog,
    book_id: BookId,
    member_id: MemberId,
    now: DateTime<Utc>,
    fine_rate: Decimal,
) -> LibraryResult<FineAssessment> {
    let Some(borrow) = log.open_borrow(book_id, member_id) else {
        return Ok(FineAssessment::none());
    };
    let Some(due_date) = borrow.due_date else {
        return Ok(FineAssessment::none());
    };

    if !borrow.is_overdue(now) {
        return Ok(FineAssessment {
            due_date: Some(due_date),
            ..FineAssessment::none()
        });
    }

    let days = days_overdue(due_date, now);
    let amount = Decimal::from(days)
        .checked_mul(fine_rate)
        .ok_or_else(|| LibraryError::CalculationError {
            message: format!("fine of {} days at {} per day overflowed", days, fine_rate),
        })?
        .max(Decimal::ZERO);

    debug!(
        book_id = %book_id,
        member_id = %member_id,
        days_overdue = days,
        amount = %amount,
        "Assessed overdue fine"
    );

    Ok(FineAssessment {
        amount,
        days_overdue: days,
        due_date: Some(due_date),
    })
}
