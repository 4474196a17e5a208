//! Library catalog and lending-policy service.
//!
//! This crate tracks books, members and borrow/return transactions, and
//! enforces the lending policy: copy availability, per-member borrow
//! limits and overdue fines.

#![warn(missing_docs)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod lending;
pub mod library;
pub mod models;
