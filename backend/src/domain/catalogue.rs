//! Startup catalogues supplied by the hosting console.
//!
//! The room list and the gender labels are fixed, ordered inputs provided at
//! startup and read-only from the engine's perspective. Writes naming a room
//! or gender outside the catalogues are rejected during validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::resident::Gender;

/// Error returned when constructing a room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("room identifier must not be empty")]
pub struct RoomIdError;

/// Identifier of a room in the facility, e.g. `A01`.
///
/// Construction only enforces the trivial shape; membership of the configured
/// [`RoomCatalogue`] is checked when a draft is validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomId(String);

impl RoomId {
    /// Validate and construct a room identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, RoomIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(RoomIdError);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<RoomId> for String {
    fn from(value: RoomId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = RoomIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Fixed ordered list of valid room identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalogue {
    rooms: Vec<RoomId>,
}

impl RoomCatalogue {
    /// Build a catalogue from an ordered list of rooms.
    pub fn new(rooms: impl IntoIterator<Item = RoomId>) -> Self {
        Self {
            rooms: rooms.into_iter().collect(),
        }
    }

    /// The facility's standard three-wing layout (`A01`..`C03`).
    pub fn standard() -> Self {
        let rooms = ["A01", "A02", "A03", "B01", "B02", "B03", "C01", "C02", "C03"]
            .into_iter()
            .filter_map(|raw| RoomId::new(raw).ok())
            .collect();
        Self { rooms }
    }

    /// Whether the catalogue contains the given room.
    pub fn contains(&self, room: &RoomId) -> bool {
        self.rooms.contains(room)
    }

    /// The rooms in catalogue order.
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }
}

impl Default for RoomCatalogue {
    fn default() -> Self {
        Self::standard()
    }
}

/// Fixed two-valued mapping between display labels and [`Gender`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderCatalogue {
    entries: Vec<(String, Gender)>,
}

impl GenderCatalogue {
    /// Build a catalogue from ordered label/value pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, Gender)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The Vietnamese labels used by the original console.
    pub fn vietnamese() -> Self {
        Self::new([
            ("Nam".to_owned(), Gender::Male),
            ("Nữ".to_owned(), Gender::Female),
        ])
    }

    /// Resolve a display label to its gender value.
    pub fn parse(&self, label: &str) -> Option<Gender> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == label)
            .map(|(_, gender)| *gender)
    }

    /// Resolve a gender value back to its display label.
    pub fn label_for(&self, gender: Gender) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == gender)
            .map(|(label, _)| label.as_str())
    }

    /// The labels in catalogue order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

impl Default for GenderCatalogue {
    fn default() -> Self {
        Self::vietnamese()
    }
}
