//! Core data models for the library catalog.
//!
//! This module contains the entities the catalog stores and the lending
//! engine mutates.

mod book;
mod member;
mod transaction;

pub use book::{Book, BookId, NewBook};
pub use member::{Member, MemberId, NewMember};
pub use transaction::{Transaction, TransactionKind};
