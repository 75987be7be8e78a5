// src/db/store.rs
use crate::domain::{NewProperty, Property, PropertyPatch};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store lock poisoned")]
    Poisoned,

    #[error("corrupt row for property {id}: {reason}")]
    Corrupt { id: String, reason: String },

    #[error("failed to open database: {0}")]
    Open(String),
}

/// Data access for listings.
///
/// Handlers only ever see this trait, so the in-memory collection can be
/// swapped for SQLite (or a test double) without touching them.
pub trait PropertyStore: Send + Sync {
    /// Every property, in creation order.
    fn list(&self) -> Result<Vec<Property>, StoreError>;

    fn get(&self, id: &str) -> Result<Option<Property>, StoreError>;

    /// Assigns a fresh identifier and timestamps.
    fn create(&self, new: NewProperty) -> Result<Property, StoreError>;

    /// `Ok(None)` when no property has this id.
    fn update(&self, id: &str, patch: PropertyPatch) -> Result<Option<Property>, StoreError>;

    /// Removes and returns the property, `Ok(None)` when it did not exist.
    fn delete(&self, id: &str) -> Result<Option<Property>, StoreError>;

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.list()?.len())
    }
}
