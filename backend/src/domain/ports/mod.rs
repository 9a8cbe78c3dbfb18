//! Driven ports at the edge of the engine.
//!
//! Ports describe how the domain expects to interact with its collaborators
//! (the storage adapter and event subscribers). Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

mod resident_event_sink;
mod resident_repository;

#[cfg(test)]
pub use resident_event_sink::MockResidentEventSink;
pub use resident_event_sink::{NoOpResidentEventSink, RecordingResidentEventSink, ResidentEventSink};
#[cfg(test)]
pub use resident_repository::MockResidentRepository;
pub use resident_repository::{
    FixtureResidentRepository, ResidentRepository, ResidentRepositoryError,
};
