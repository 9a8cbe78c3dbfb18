//! Change notifications emitted by the record store.
//!
//! Each successful mutation publishes one event so the query view and any
//! display layer can recompute from the new store state instead of polling.

use serde::Serialize;

use super::resident::{ResidentKey, ResidentRecord};

/// A store mutation that subscribers may react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResidentEvent {
    /// A record was created with a freshly assigned key and code.
    Created { record: ResidentRecord },
    /// A record's mutable fields were replaced.
    Updated { record: ResidentRecord },
    /// A record was removed irreversibly.
    Deleted { key: ResidentKey },
}

impl ResidentEvent {
    /// The key of the record the event concerns.
    pub fn key(&self) -> &ResidentKey {
        match self {
            Self::Created { record } | Self::Updated { record } => record.key(),
            Self::Deleted { key } => key,
        }
    }
}
