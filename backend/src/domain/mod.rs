//! Domain core of the resident directory.
//!
//! Purpose: define the validated resident aggregate, the record store
//! contract and its invariants, the pure query view, and the modal workflow
//! state machine. Types are immutable once constructed; invariants are
//! documented on each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payloads.
//! - `ResidentRecord` and its value newtypes — the aggregate.
//! - `ResidentDirectoryService` — the record store over an injected
//!   repository port.
//! - `WorkflowController` / `WorkflowState` — the modal state machine.

pub mod catalogue;
pub mod code;
pub mod conflicts;
pub mod dates;
pub mod directory_service;
pub mod error;
pub mod events;
pub mod ports;
pub mod query;
pub mod resident;
pub mod validation;
pub mod workflow;

pub use self::catalogue::{GenderCatalogue, RoomCatalogue, RoomId, RoomIdError};
pub use self::code::{CodeParseError, ResidentCode, next_code};
pub use self::conflicts::{ConflictField, find_conflict};
pub use self::directory_service::ResidentDirectoryService;
pub use self::error::{Error, ErrorCode};
pub use self::events::ResidentEvent;
pub use self::query::filter_residents;
pub use self::resident::{
    FullName, Gender, NationalId, PhoneNumber, ResidentFields, ResidentKey, ResidentRecord,
    ResidentValidationError,
};
pub use self::validation::{DraftValidator, Field, FieldViolation, ResidentDraft};
pub use self::workflow::{WorkflowController, WorkflowError, WorkflowState};

/// Convenient engine result alias.
pub type EngineResult<T> = Result<T, Error>;
