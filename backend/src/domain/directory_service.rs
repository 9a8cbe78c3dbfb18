//! Resident directory domain service.
//!
//! Implements the record store contract: create, update, delete, and the
//! read-only list/search views, orchestrating draft validation, uniqueness
//! checking, code generation, the storage port, and change notifications.
//! Each mutation is atomic; a failure leaves the store untouched.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;

use super::catalogue::{GenderCatalogue, RoomCatalogue, RoomId};
use super::code::next_code;
use super::conflicts::{ConflictField, find_conflict};
use super::error::Error;
use super::events::ResidentEvent;
use super::ports::{ResidentEventSink, ResidentRepository, ResidentRepositoryError};
use super::query::filter_residents;
use super::resident::{ResidentKey, ResidentRecord};
use super::validation::{DraftValidator, FieldViolation, ResidentDraft};

fn map_repository_error(error: ResidentRepositoryError) -> Error {
    match error {
        ResidentRepositoryError::Connection { message } => {
            Error::internal(format!("resident repository unavailable: {message}"))
        }
        ResidentRepositoryError::Query { message } => {
            Error::internal(format!("resident repository error: {message}"))
        }
        ResidentRepositoryError::Missing { key } => not_found_error(&key),
    }
}

fn not_found_error(key: &str) -> Error {
    Error::not_found(format!("resident {key} does not exist"))
        .with_details(json!({ "key": key }))
}

fn validation_error(violations: &[FieldViolation]) -> Error {
    Error::invalid_request("resident fields failed validation")
        .with_details(json!({ "violations": violations }))
}

fn conflict_error(field: ConflictField) -> Error {
    let message = match field {
        ConflictField::NationalId => "national id already belongs to another resident",
        ConflictField::Phone => "phone number already belongs to another resident",
    };
    Error::conflict(message).with_details(json!({ "field": field }))
}

/// Record store service over an injected repository.
#[derive(Clone)]
pub struct ResidentDirectoryService<R> {
    repo: Arc<R>,
    events: Arc<dyn ResidentEventSink>,
    clock: Arc<dyn Clock>,
    validator: DraftValidator,
}

impl<R> ResidentDirectoryService<R> {
    /// Create a service over the repository, subscriber, clock, and startup
    /// catalogues.
    pub fn new(
        repo: Arc<R>,
        events: Arc<dyn ResidentEventSink>,
        clock: Arc<dyn Clock>,
        rooms: RoomCatalogue,
        genders: GenderCatalogue,
    ) -> Self {
        Self {
            repo,
            events,
            clock,
            validator: DraftValidator::new(rooms, genders),
        }
    }

    /// The draft validator with its startup catalogues.
    pub fn validator(&self) -> &DraftValidator {
        &self.validator
    }
}

impl<R> ResidentDirectoryService<R>
where
    R: ResidentRepository,
{
    /// All records in stable insertion order.
    ///
    /// Read-only views never fail; a storage error is logged and an empty
    /// view returned.
    pub async fn list(&self) -> Vec<ResidentRecord> {
        match self.repo.list().await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, "listing residents failed, returning empty view");
                Vec::new()
            }
        }
    }

    /// The filtered query view over the current store state.
    pub async fn search(
        &self,
        search_text: &str,
        room_filter: Option<&RoomId>,
    ) -> Vec<ResidentRecord> {
        filter_residents(&self.list().await, search_text, room_filter)
    }

    /// Fetch one record by key.
    pub async fn get(&self, key: &ResidentKey) -> Result<ResidentRecord, Error> {
        let records = self.repo.list().await.map_err(map_repository_error)?;
        records
            .into_iter()
            .find(|record| record.key() == key)
            .ok_or_else(|| not_found_error(&key.to_string()))
    }

    /// Validate a draft and append a new record with a fresh key and the
    /// next sequential code.
    pub async fn create(&self, draft: &ResidentDraft) -> Result<ResidentRecord, Error> {
        let fields = self.validate(draft)?;
        let records = self.repo.list().await.map_err(map_repository_error)?;

        if let Some(field) = find_conflict(&records, &fields.national_id, &fields.phone, None) {
            tracing::info!(conflict = %field, "resident creation rejected");
            return Err(conflict_error(field));
        }

        // The code is derived from the live store contents on every call so
        // batched creations each see the latest maximum.
        let code = next_code(records.iter().map(|record| record.code().as_str()));
        let record = ResidentRecord::new(ResidentKey::random(), code, fields);

        self.repo
            .insert(&record)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(key = %record.key(), code = %record.code(), "resident created");
        self.events.publish(&ResidentEvent::Created {
            record: record.clone(),
        });
        Ok(record)
    }

    /// Validate a draft and replace every mutable field of an existing
    /// record, preserving its key and code.
    pub async fn update(
        &self,
        key: &ResidentKey,
        draft: &ResidentDraft,
    ) -> Result<ResidentRecord, Error> {
        let fields = self.validate(draft)?;
        let records = self.repo.list().await.map_err(map_repository_error)?;

        let existing = records
            .iter()
            .find(|record| record.key() == key)
            .ok_or_else(|| not_found_error(&key.to_string()))?;

        if let Some(field) =
            find_conflict(&records, &fields.national_id, &fields.phone, Some(key))
        {
            tracing::info!(%key, conflict = %field, "resident update rejected");
            return Err(conflict_error(field));
        }

        let record = existing.with_fields(fields);
        self.repo
            .replace(&record)
            .await
            .map_err(map_repository_error)?;
        tracing::info!(key = %record.key(), code = %record.code(), "resident updated");
        self.events.publish(&ResidentEvent::Updated {
            record: record.clone(),
        });
        Ok(record)
    }

    /// Remove a record irreversibly.
    pub async fn delete(&self, key: &ResidentKey) -> Result<(), Error> {
        let records = self.repo.list().await.map_err(map_repository_error)?;
        if !records.iter().any(|record| record.key() == key) {
            return Err(not_found_error(&key.to_string()));
        }

        self.repo.remove(key).await.map_err(map_repository_error)?;
        tracing::info!(%key, "resident deleted");
        self.events.publish(&ResidentEvent::Deleted { key: *key });
        Ok(())
    }

    fn validate(&self, draft: &ResidentDraft) -> Result<super::resident::ResidentFields, Error> {
        let today = self.clock.utc().date_naive();
        self.validator
            .validate(draft, today)
            .map_err(|violations| validation_error(&violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::{
        MockResidentRepository, NoOpResidentEventSink, RecordingResidentEventSink,
    };
    use crate::domain::resident::Gender;
    use crate::test_support::{fixture_clock, valid_draft};

    fn make_service(repo: MockResidentRepository) -> ResidentDirectoryService<MockResidentRepository> {
        ResidentDirectoryService::new(
            Arc::new(repo),
            Arc::new(NoOpResidentEventSink),
            fixture_clock(),
            RoomCatalogue::standard(),
            GenderCatalogue::vietnamese(),
        )
    }

    fn stored_record() -> ResidentRecord {
        ResidentRecord::from_strings(
            "BN00001",
            "Nguyễn Thị Mai",
            "15/05/1965",
            Gender::Female,
            "A02",
            "10/09/2025",
            "079234567890",
            "0988888888",
        )
    }

    #[tokio::test]
    async fn create_assigns_first_code_on_empty_store() {
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let service = make_service(repo);
        let record = service.create(&valid_draft()).await.expect("create succeeds");
        assert_eq!(record.code().as_str(), "BN00001");
        assert_eq!(record.full_name().as_ref(), "Nguyen Van A");
    }

    #[tokio::test]
    async fn create_rejects_invalid_draft_without_touching_storage() {
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(0);
        repo.expect_insert().times(0);

        let service = make_service(repo);
        let mut draft = valid_draft();
        draft.phone = "123".to_owned();

        let error = service.create(&draft).await.expect_err("invalid draft");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("violations attached");
        assert_eq!(details["violations"][0]["field"], "phone");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_phone_and_names_the_field() {
        let existing = stored_record();
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(move || Ok(vec![existing]));
        repo.expect_insert().times(0);

        let service = make_service(repo);
        let mut draft = valid_draft();
        draft.phone = "0988888888".to_owned();

        let error = service.create(&draft).await.expect_err("conflict");
        assert_eq!(error.code(), ErrorCode::Conflict);
        let details = error.details().expect("field attached");
        assert_eq!(details["field"], "phone");
    }

    #[tokio::test]
    async fn create_reports_national_id_when_both_fields_collide() {
        let existing = stored_record();
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(move || Ok(vec![existing]));

        let service = make_service(repo);
        let mut draft = valid_draft();
        draft.national_id = "079234567890".to_owned();
        draft.phone = "0988888888".to_owned();

        let error = service.create(&draft).await.expect_err("conflict");
        let details = error.details().expect("field attached");
        assert_eq!(details["field"], "nationalId");
    }

    #[tokio::test]
    async fn update_accepts_its_own_unchanged_national_id() {
        let existing = stored_record();
        let key = *existing.key();
        let listed = existing.clone();
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(move || Ok(vec![listed]));
        repo.expect_replace().times(1).return_once(|_| Ok(()));

        let service = make_service(repo);
        let mut draft = valid_draft();
        draft.national_id = "079234567890".to_owned();
        draft.phone = "0988888888".to_owned();

        let record = service.update(&key, &draft).await.expect("no self conflict");
        assert_eq!(record.key(), &key);
        assert_eq!(record.code(), existing.code());
        assert_eq!(record.full_name().as_ref(), "Nguyen Van A");
    }

    #[tokio::test]
    async fn update_of_absent_key_is_not_found() {
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
        repo.expect_replace().times(0);

        let service = make_service(repo);
        let error = service
            .update(&ResidentKey::random(), &valid_draft())
            .await
            .expect_err("absent key");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_of_absent_key_is_not_found() {
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
        repo.expect_remove().times(0);

        let service = make_service(repo);
        let error = service
            .delete(&ResidentKey::random())
            .await
            .expect_err("absent key");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_swallows_storage_failures() {
        let mut repo = MockResidentRepository::new();
        repo.expect_list()
            .times(1)
            .return_once(|| Err(ResidentRepositoryError::connection("down")));

        let service = make_service(repo);
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn successful_mutations_publish_events() {
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(|| Ok(Vec::new()));
        repo.expect_insert().times(1).return_once(|_| Ok(()));

        let sink = Arc::new(RecordingResidentEventSink::new());
        let service = ResidentDirectoryService::new(
            Arc::new(repo),
            sink.clone(),
            fixture_clock(),
            RoomCatalogue::standard(),
            GenderCatalogue::vietnamese(),
        );

        let record = service.create(&valid_draft()).await.expect("create succeeds");
        let events = sink.take();
        assert_eq!(events.len(), 1);
        assert_eq!(events.first().map(ResidentEvent::key), Some(record.key()));
    }

    #[tokio::test]
    async fn failed_creation_publishes_nothing() {
        let existing = stored_record();
        let mut repo = MockResidentRepository::new();
        repo.expect_list().times(1).return_once(move || Ok(vec![existing]));

        let sink = Arc::new(RecordingResidentEventSink::new());
        let service = ResidentDirectoryService::new(
            Arc::new(repo),
            sink.clone(),
            fixture_clock(),
            RoomCatalogue::standard(),
            GenderCatalogue::vietnamese(),
        );

        let mut draft = valid_draft();
        draft.phone = "0988888888".to_owned();
        let _ = service.create(&draft).await.expect_err("conflict");
        assert!(sink.events().is_empty());
    }
}
