//! Configuration types for the library service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section is
//! optional and falls back to the defaults below.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Default number of days a copy may be kept.
pub const DEFAULT_LOAN_PERIOD_DAYS: u32 = 14;

/// Longest loan period a policy may configure (about a century).
pub const MAX_LOAN_PERIOD_DAYS: u32 = 36_500;

/// Default maximum number of books a member may hold at once.
pub const DEFAULT_BORROW_LIMIT: usize = 3;

/// Default fine charged per whole day overdue (1.00).
pub fn default_fine_rate() -> Decimal {
    Decimal::new(100, 2)
}

/// Highest per-day fine a policy may configure (10000.00).
pub fn max_fine_rate() -> Decimal {
    Decimal::new(10_000, 0)
}

/// Default address the HTTP server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";

/// The lending rules enforced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    /// Days between a borrow and its due date.
    pub loan_period_days: u32,
    /// Maximum number of books a member may hold concurrently.
    pub borrow_limit: usize,
    /// Amount charged per whole day overdue.
    pub fine_rate: Decimal,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: DEFAULT_LOAN_PERIOD_DAYS,
            borrow_limit: DEFAULT_BORROW_LIMIT,
            fine_rate: default_fine_rate(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// A book added at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedBook {
    /// The title.
    pub title: String,
    /// The author.
    pub author: String,
    /// Copies owned.
    pub total_copies: i64,
}

/// A member registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedMember {
    /// The member's name.
    pub name: String,
    /// The member's email address.
    pub email: String,
}

/// Fixture data loaded into a fresh catalog when the service starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Books to add, in order.
    pub books: Vec<SeedBook>,
    /// Members to register, in order.
    pub members: Vec<SeedMember>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            books: vec![
                SeedBook {
                    title: "The Great Gatsby".to_string(),
                    author: "F. Scott Fitzgerald".to_string(),
                    total_copies: 5,
                },
                SeedBook {
                    title: "To Kill a Mockingbird".to_string(),
                    author: "Harper Lee".to_string(),
                    total_copies: 3,
                },
            ],
            members: vec![
                SeedMember {
                    name: "John Doe".to_string(),
                    email: "john@example.com".to_string(),
                },
                SeedMember {
                    name: "Jane Smith".to_string(),
                    email: "jane@example.com".to_string(),
                },
            ],
        }
    }
}

impl SeedConfig {
    /// A seed that adds nothing.
    pub fn empty() -> Self {
        Self {
            books: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// The complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Lending rules.
    pub policy: LendingPolicy,
    /// Startup fixture.
    pub seed: SeedConfig,
}
