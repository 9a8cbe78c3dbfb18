//! Resident aggregate and its validated value types.
//!
//! A resident record pairs an opaque internal key and a generated code with
//! the mutable fields captured on the Residents screen. The key and code are
//! assigned at creation and never change; every other field is replaced as a
//! whole by the edit workflow.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalogue::RoomId;
use super::code::ResidentCode;
use super::dates::parse_boundary_date;

/// Minimum allowed length for a full name.
pub const FULL_NAME_MIN: usize = 2;
/// Maximum allowed length for a full name.
pub const FULL_NAME_MAX: usize = 50;
/// Exact digit count of a national id.
pub const NATIONAL_ID_DIGITS: usize = 12;
/// Minimum digit count of a phone number.
pub const PHONE_DIGITS_MIN: usize = 10;
/// Maximum digit count of a phone number.
pub const PHONE_DIGITS_MAX: usize = 11;

/// Validation errors raised by the resident value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResidentValidationError {
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    NameInvalidCharacters,
    InvalidNationalId,
    InvalidPhone,
    InvalidKey,
    InvalidCode { input: String },
    InvalidDate { input: String },
    EmptyRoom,
}

impl fmt::Display for ResidentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "full name must not be empty"),
            Self::NameTooShort { min } => {
                write!(f, "full name must be at least {min} characters")
            }
            Self::NameTooLong { max } => {
                write!(f, "full name must be at most {max} characters")
            }
            Self::NameInvalidCharacters => {
                write!(f, "full name may only contain letters and spaces")
            }
            Self::InvalidNationalId => {
                write!(f, "national id must be exactly {NATIONAL_ID_DIGITS} digits")
            }
            Self::InvalidPhone => write!(
                f,
                "phone number must be {PHONE_DIGITS_MIN}-{PHONE_DIGITS_MAX} digits",
            ),
            Self::InvalidKey => write!(f, "resident key must be a valid UUID"),
            Self::InvalidCode { input } => {
                write!(f, "'{input}' is not a valid resident code")
            }
            Self::InvalidDate { input } => {
                write!(f, "'{input}' is not a valid dd/mm/yyyy date")
            }
            Self::EmptyRoom => write!(f, "room must not be empty"),
        }
    }
}

impl std::error::Error for ResidentValidationError {}

/// Opaque internal record key, assigned at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidentKey(Uuid);

impl ResidentKey {
    /// Generate a fresh random key.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a key from its textual UUID form.
    pub fn parse(raw: &str) -> Result<Self, ResidentValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| ResidentValidationError::InvalidKey)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ResidentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static FULL_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn full_name_regex() -> &'static Regex {
    FULL_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this constrains allowed characters.
        // \p{L} keeps Vietnamese diacritics valid.
        let pattern = r"^[\p{L} ]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("full name regex failed to compile: {error}"))
    })
}

/// A resident's full name: trimmed, 2-50 characters, letters and spaces only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a full name, trimming surrounding whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, ResidentValidationError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ResidentValidationError::EmptyName);
        }
        let length = trimmed.chars().count();
        if length < FULL_NAME_MIN {
            return Err(ResidentValidationError::NameTooShort { min: FULL_NAME_MIN });
        }
        if length > FULL_NAME_MAX {
            return Err(ResidentValidationError::NameTooLong { max: FULL_NAME_MAX });
        }
        if !full_name_regex().is_match(&trimmed) {
            return Err(ResidentValidationError::NameInvalidCharacters);
        }
        Ok(Self(trimmed))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = ResidentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// National identity number: exactly twelve ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Validate and construct a national id, trimming surrounding whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, ResidentValidationError> {
        let trimmed = raw.into().trim().to_owned();
        if trimmed.chars().count() == NATIONAL_ID_DIGITS
            && trimmed.chars().all(|c| c.is_ascii_digit())
        {
            Ok(Self(trimmed))
        } else {
            Err(ResidentValidationError::InvalidNationalId)
        }
    }
}

impl AsRef<str> for NationalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NationalId> for String {
    fn from(value: NationalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = ResidentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Contact phone number: ten or eleven ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a phone number, trimming surrounding whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, ResidentValidationError> {
        let trimmed = raw.into().trim().to_owned();
        let digits = trimmed.chars().count();
        if (PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&digits)
            && trimmed.chars().all(|c| c.is_ascii_digit())
        {
            Ok(Self(trimmed))
        } else {
            Err(ResidentValidationError::InvalidPhone)
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ResidentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Resident gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Stable string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutable fields of a resident record, already validated.
///
/// Everything except the internal key and the generated code; the edit
/// workflow replaces these as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentFields {
    /// Full name, trimmed.
    pub full_name: FullName,
    /// Date of birth; strictly in the past and within 120 years.
    pub date_of_birth: NaiveDate,
    /// Gender from the startup catalogue.
    pub gender: Gender,
    /// Assigned room from the startup catalogue.
    pub room: RoomId,
    /// Admission date; never in the future.
    pub admission_date: NaiveDate,
    /// National identity number, unique across the store.
    pub national_id: NationalId,
    /// Phone number, unique across the store.
    pub phone: PhoneNumber,
}

/// A persisted resident record.
///
/// ## Invariants
/// - `key` is unique and immutable for the record's lifetime.
/// - `code` is unique and assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentRecord {
    key: ResidentKey,
    code: ResidentCode,
    #[serde(flatten)]
    fields: ResidentFields,
}

impl ResidentRecord {
    /// Assemble a record from a key, a code, and validated fields.
    pub fn new(key: ResidentKey, code: ResidentCode, fields: ResidentFields) -> Self {
        Self { key, code, fields }
    }

    /// Build a record from textual inputs, panicking if validation fails.
    ///
    /// Prefer [`ResidentRecord::try_from_strings`] outside fixtures.
    #[allow(clippy::too_many_arguments, reason = "fixture convenience mirrors the form")]
    pub fn from_strings(
        code: &str,
        full_name: &str,
        date_of_birth: &str,
        gender: Gender,
        room: &str,
        admission_date: &str,
        national_id: &str,
        phone: &str,
    ) -> Self {
        match Self::try_from_strings(
            code,
            full_name,
            date_of_birth,
            gender,
            room,
            admission_date,
            national_id,
            phone,
        ) {
            Ok(value) => value,
            Err(err) => panic!("resident string values must satisfy validation: {err}"),
        }
    }

    /// Fallible textual constructor used by fixtures and seeds.
    #[allow(clippy::too_many_arguments, reason = "fixture convenience mirrors the form")]
    pub fn try_from_strings(
        code: &str,
        full_name: &str,
        date_of_birth: &str,
        gender: Gender,
        room: &str,
        admission_date: &str,
        national_id: &str,
        phone: &str,
    ) -> Result<Self, ResidentValidationError> {
        let code =
            ResidentCode::new(code).map_err(|err| ResidentValidationError::InvalidCode {
                input: err.input,
            })?;
        let fields = ResidentFields {
            full_name: FullName::new(full_name)?,
            date_of_birth: parse_boundary_date(date_of_birth).map_err(|err| {
                ResidentValidationError::InvalidDate { input: err.input }
            })?,
            gender,
            room: RoomId::new(room).map_err(|_| ResidentValidationError::EmptyRoom)?,
            admission_date: parse_boundary_date(admission_date).map_err(|err| {
                ResidentValidationError::InvalidDate { input: err.input }
            })?,
            national_id: NationalId::new(national_id)?,
            phone: PhoneNumber::new(phone)?,
        };
        Ok(Self::new(ResidentKey::random(), code, fields))
    }

    /// Internal stable key.
    pub fn key(&self) -> &ResidentKey {
        &self.key
    }

    /// Human-facing sequential code.
    pub fn code(&self) -> &ResidentCode {
        &self.code
    }

    /// Full name.
    pub fn full_name(&self) -> &FullName {
        &self.fields.full_name
    }

    /// Date of birth.
    pub fn date_of_birth(&self) -> NaiveDate {
        self.fields.date_of_birth
    }

    /// Gender.
    pub fn gender(&self) -> Gender {
        self.fields.gender
    }

    /// Assigned room.
    pub fn room(&self) -> &RoomId {
        &self.fields.room
    }

    /// Admission date.
    pub fn admission_date(&self) -> NaiveDate {
        self.fields.admission_date
    }

    /// National identity number.
    pub fn national_id(&self) -> &NationalId {
        &self.fields.national_id
    }

    /// Phone number.
    pub fn phone(&self) -> &PhoneNumber {
        &self.fields.phone
    }

    /// The mutable field block.
    pub fn fields(&self) -> &ResidentFields {
        &self.fields
    }

    /// Replace every mutable field, preserving key and code.
    #[must_use]
    pub fn with_fields(&self, fields: ResidentFields) -> Self {
        Self {
            key: self.key,
            code: self.code.clone(),
            fields,
        }
    }
}
