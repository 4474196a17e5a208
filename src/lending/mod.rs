//! Lending logic for the library catalog.
//!
//! This module contains the append-only transaction log, overdue fine
//! calculation, the lending engine that enforces borrow and return rules,
//! and the clock abstraction all time-dependent logic reads from.

mod clock;
mod engine;
mod fine;
mod transaction_log;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{BorrowReceipt, LendingEngine, ReturnReceipt};
pub use fine::{calculate_fine, days_overdue, FineAssessment};
pub use transaction_log::TransactionLog;
