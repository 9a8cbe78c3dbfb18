//! In-memory resident repository.
//!
//! The reference storage adapter: an insertion-ordered `Vec` behind a
//! `Mutex`. The lock exists only because the async port demands
//! `Send + Sync`; access is serialized by the engine's single control
//! thread.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{ResidentRepository, ResidentRepositoryError};
use crate::domain::resident::{Gender, ResidentKey, ResidentRecord};

/// Insertion-ordered in-memory record storage.
#[derive(Debug, Default)]
pub struct MemoryResidentRepository {
    records: Mutex<Vec<ResidentRecord>>,
}

impl MemoryResidentRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with the given records.
    pub fn with_records(records: Vec<ResidentRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    /// Create a store holding the two residents the original console ships
    /// with, for demos and tests.
    pub fn seeded() -> Self {
        Self::with_records(vec![
            ResidentRecord::from_strings(
                "BN00001",
                "Đào Quốc Sơn",
                "31/10/1960",
                Gender::Male,
                "A02",
                "22/09/2025",
                "090234151234",
                "0784555666",
            ),
            ResidentRecord::from_strings(
                "BN00002",
                "Nguyễn Thị Mai",
                "15/05/1965",
                Gender::Female,
                "A01",
                "10/09/2025",
                "079234567890",
                "0912345678",
            ),
        ])
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ResidentRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ResidentRepository for MemoryResidentRepository {
    async fn list(&self) -> Result<Vec<ResidentRecord>, ResidentRepositoryError> {
        Ok(self.lock().clone())
    }

    async fn insert(&self, record: &ResidentRecord) -> Result<(), ResidentRepositoryError> {
        self.lock().push(record.clone());
        Ok(())
    }

    async fn replace(&self, record: &ResidentRecord) -> Result<(), ResidentRepositoryError> {
        let mut records = self.lock();
        let Some(slot) = records.iter_mut().find(|stored| stored.key() == record.key())
        else {
            return Err(ResidentRepositoryError::missing(record.key().to_string()));
        };
        *slot = record.clone();
        Ok(())
    }

    async fn remove(&self, key: &ResidentKey) -> Result<(), ResidentRepositoryError> {
        let mut records = self.lock();
        let before = records.len();
        records.retain(|stored| stored.key() != key);
        if records.len() == before {
            return Err(ResidentRepositoryError::missing(key.to_string()));
        }
        Ok(())
    }
}
