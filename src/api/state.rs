//! Application state for the library API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::library::Library;

/// Shared application state.
///
/// Mutating handlers hold the write lock for their whole read-modify-write,
/// so borrows, returns and creations are serialized. Listing handlers share
/// the read lock and see a consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    library: Arc<RwLock<Library>>,
}

impl AppState {
    /// Creates a new application state owning `library`.
    pub fn new(library: Library) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
        }
    }

    /// Acquires shared read access.
    pub fn read(&self) -> RwLockReadGuard<'_, Library> {
        // Every mutation validates and computes due dates and fines before
        // writing, so a poisoned lock still guards consistent state.
        self.library.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, Library> {
        self.library.write().unwrap_or_else(PoisonError::into_inner)
    }
}
