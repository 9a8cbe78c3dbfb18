//! Port for resident record storage.
//!
//! The engine reaches storage only through this injected collaborator; durable
//! persistence is out of scope, so the shipped adapter keeps records in
//! memory. Implementations must preserve insertion order in
//! [`ResidentRepository::list`].

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::resident::{ResidentKey, ResidentRecord};

/// Errors raised by resident repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResidentRepositoryError {
    /// Storage backend could not be reached.
    #[error("resident repository connection failed: {message}")]
    Connection { message: String },
    /// Read or write failed during execution.
    #[error("resident repository query failed: {message}")]
    Query { message: String },
    /// The targeted record is not stored.
    #[error("resident {key} is not stored")]
    Missing { key: String },
}

impl ResidentRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for missing-record failures.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }
}

/// Storage port for resident records.
///
/// The store is the only shared resource in the engine and access to it is
/// serialized by the workflow controller, so adapters need no locking beyond
/// what `Send + Sync` demands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResidentRepository: Send + Sync {
    /// All records in stable insertion order.
    async fn list(&self) -> Result<Vec<ResidentRecord>, ResidentRepositoryError>;

    /// Append a new record.
    async fn insert(&self, record: &ResidentRecord) -> Result<(), ResidentRepositoryError>;

    /// Replace the stored record with the same key, keeping its position.
    async fn replace(&self, record: &ResidentRecord) -> Result<(), ResidentRepositoryError>;

    /// Remove the record with the given key.
    async fn remove(&self, key: &ResidentKey) -> Result<(), ResidentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise storage.
///
/// Lookups always return an empty store and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureResidentRepository;

#[async_trait]
impl ResidentRepository for FixtureResidentRepository {
    async fn list(&self) -> Result<Vec<ResidentRecord>, ResidentRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert(&self, _record: &ResidentRecord) -> Result<(), ResidentRepositoryError> {
        Ok(())
    }

    async fn replace(&self, _record: &ResidentRecord) -> Result<(), ResidentRepositoryError> {
        Ok(())
    }

    async fn remove(&self, _key: &ResidentKey) -> Result<(), ResidentRepositoryError> {
        Ok(())
    }
}
