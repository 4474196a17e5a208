//! Configuration loading and management for the library service.
//!
//! This module loads the lending policy, server settings, and the startup
//! fixture from a single YAML file.
//!
//! # Example
//!
//! ```no_run
//! use library_catalog::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/library.yaml").unwrap();
//! println!("Fine rate: {}", config.policy().fine_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    default_fine_rate, max_fine_rate, LendingPolicy, LibraryConfig, SeedBook, SeedConfig,
    SeedMember, ServerConfig, DEFAULT_BIND_ADDRESS, DEFAULT_BORROW_LIMIT,
    DEFAULT_LOAN_PERIOD_DAYS, MAX_LOAN_PERIOD_DAYS,
};
