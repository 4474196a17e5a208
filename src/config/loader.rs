//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{LibraryError, LibraryResult};

use super::types::{
    max_fine_rate, LendingPolicy, LibraryConfig, SeedConfig, ServerConfig, MAX_LOAN_PERIOD_DAYS,
};

/// Loads and provides access to the service configuration.
///
/// # File Structure
///
/// ```text
/// server:
///   bind_address: "0.0.0.0:8000"
/// policy:
///   loan_period_days: 14
///   borrow_limit: 3
///   fine_rate: "1.00"
/// seed:
///   books: [...]
///   members: [...]
/// ```
///
/// # Example
///
/// ```no_run
/// use library_catalog::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/library.yaml")?;
/// println!("Borrow limit: {}", loader.policy().borrow_limit);
/// # Ok::<(), library_catalog::error::LibraryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LibraryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or an unusable policy (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> LibraryResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LibraryError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> LibraryResult<Self> {
        Self::parse(content, origin)
    }

    fn parse(content: &str, origin: &str) -> LibraryResult<Self> {
        // An empty document means "all defaults"
        let config = if content.trim().is_empty() {
            LibraryConfig::default()
        } else {
            serde_yaml::from_str::<LibraryConfig>(content).map_err(|e| {
                LibraryError::ConfigParseError {
                    path: origin.to_string(),
                    message: e.to_string(),
                }
            })?
        };

        Self::validate_policy(&config.policy).map_err(|message| {
            LibraryError::ConfigParseError {
                path: origin.to_string(),
                message,
            }
        })?;

        Ok(Self { config })
    }

    fn validate_policy(policy: &LendingPolicy) -> Result<(), String> {
        if policy.loan_period_days == 0 {
            return Err("policy.loan_period_days must be at least 1".to_string());
        }
        if policy.loan_period_days > MAX_LOAN_PERIOD_DAYS {
            return Err(format!(
                "policy.loan_period_days must be at most {}",
                MAX_LOAN_PERIOD_DAYS
            ));
        }
        if policy.borrow_limit == 0 {
            return Err("policy.borrow_limit must be at least 1".to_string());
        }
        if policy.fine_rate < Decimal::ZERO {
            return Err("policy.fine_rate must not be negative".to_string());
        }
        if policy.fine_rate > max_fine_rate() {
            return Err(format!("policy.fine_rate must be at most {}", max_fine_rate()));
        }
        Ok(())
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Returns the lending policy.
    pub fn policy(&self) -> &LendingPolicy {
        &self.config.policy
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the startup fixture.
    pub fn seed(&self) -> &SeedConfig {
        &self.config.seed
    }
}
