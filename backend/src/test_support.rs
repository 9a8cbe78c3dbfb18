//! Shared fixtures for unit and integration tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::catalogue::{GenderCatalogue, RoomCatalogue};
use crate::domain::directory_service::ResidentDirectoryService;
use crate::domain::ports::{NoOpResidentEventSink, ResidentEventSink};
use crate::domain::validation::ResidentDraft;
use crate::outbound::memory::MemoryResidentRepository;

/// Clock pinned to a fixed instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// A clock pinned to midday on 22 September 2025, the original console's
/// reference day.
pub fn fixture_clock() -> Arc<dyn Clock> {
    let utc_now = Utc
        .with_ymd_and_hms(2025, 9, 22, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("fixture timestamp must be unambiguous"));
    Arc::new(FixtureClock { utc_now })
}

/// A draft that passes every validation rule against [`fixture_clock`].
pub fn valid_draft() -> ResidentDraft {
    ResidentDraft {
        full_name: "Nguyen Van A".to_owned(),
        date_of_birth: "01/01/1970".to_owned(),
        gender: "Nam".to_owned(),
        room: "A01".to_owned(),
        admission_date: "01/01/2025".to_owned(),
        national_id: "123456789012".to_owned(),
        phone: "0912345678".to_owned(),
    }
}

/// Wire a directory service over the given in-memory store with the
/// standard catalogues and the fixture clock.
pub fn service_over(
    repo: Arc<MemoryResidentRepository>,
    events: Arc<dyn ResidentEventSink>,
) -> ResidentDirectoryService<MemoryResidentRepository> {
    ResidentDirectoryService::new(
        repo,
        events,
        fixture_clock(),
        RoomCatalogue::standard(),
        GenderCatalogue::vietnamese(),
    )
}

/// Wire a directory service over an empty in-memory store.
pub fn empty_service() -> ResidentDirectoryService<MemoryResidentRepository> {
    service_over(
        Arc::new(MemoryResidentRepository::new()),
        Arc::new(NoOpResidentEventSink),
    )
}

/// Wire a directory service over the seeded in-memory store.
pub fn seeded_service() -> ResidentDirectoryService<MemoryResidentRepository> {
    service_over(
        Arc::new(MemoryResidentRepository::seeded()),
        Arc::new(NoOpResidentEventSink),
    )
}
