//! Form draft validation.
//!
//! The create/edit form crosses the boundary as a textual draft. Each field
//! has a pure validator returning the constraints it violates; the composed
//! validator runs all of them so the display layer can mark every failing
//! field in one pass instead of stopping at the first.

use chrono::NaiveDate;
use serde::Serialize;

use super::catalogue::{GenderCatalogue, RoomCatalogue, RoomId};
use super::dates::{earliest_birth_date, parse_boundary_date};
use super::resident::{FullName, Gender, NationalId, PhoneNumber, ResidentFields};

/// Form field identifiers used when reporting violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    DateOfBirth,
    Gender,
    Room,
    AdmissionDate,
    NationalId,
    Phone,
}

impl Field {
    /// Stable camelCase name matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::DateOfBirth => "dateOfBirth",
            Self::Gender => "gender",
            Self::Room => "room",
            Self::AdmissionDate => "admissionDate",
            Self::NationalId => "nationalId",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated constraint on one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// The failing field.
    pub field: Field,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl FieldViolation {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Textual form state for the create/edit modal.
///
/// Dates are carried in their `dd/mm/yyyy` boundary form; every field starts
/// blank for the add workflow and is pre-populated from the record under
/// edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentDraft {
    pub full_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub room: String,
    pub admission_date: String,
    pub national_id: String,
    pub phone: String,
}

impl ResidentDraft {
    /// A draft with every field blank.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Pre-populate a draft from an existing record.
    pub fn from_record(
        record: &super::resident::ResidentRecord,
        genders: &GenderCatalogue,
    ) -> Self {
        Self {
            full_name: record.full_name().as_ref().to_owned(),
            date_of_birth: super::dates::format_boundary_date(record.date_of_birth()),
            gender: genders
                .label_for(record.gender())
                .unwrap_or(record.gender().as_str())
                .to_owned(),
            room: record.room().as_str().to_owned(),
            admission_date: super::dates::format_boundary_date(record.admission_date()),
            national_id: record.national_id().as_ref().to_owned(),
            phone: record.phone().as_ref().to_owned(),
        }
    }
}

/// Composed validator turning a textual draft into validated fields.
#[derive(Debug, Clone)]
pub struct DraftValidator {
    rooms: RoomCatalogue,
    genders: GenderCatalogue,
}

impl DraftValidator {
    /// Build a validator over the startup catalogues.
    pub fn new(rooms: RoomCatalogue, genders: GenderCatalogue) -> Self {
        Self { rooms, genders }
    }

    /// The configured room catalogue.
    pub fn rooms(&self) -> &RoomCatalogue {
        &self.rooms
    }

    /// The configured gender catalogue.
    pub fn genders(&self) -> &GenderCatalogue {
        &self.genders
    }

    /// Validate every field of the draft against `today`.
    ///
    /// Returns the validated field block, or the full list of violations
    /// across all fields.
    pub fn validate(
        &self,
        draft: &ResidentDraft,
        today: NaiveDate,
    ) -> Result<ResidentFields, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        let full_name = check_full_name(&draft.full_name, &mut violations);
        let date_of_birth = check_date_of_birth(&draft.date_of_birth, today, &mut violations);
        let gender = self.check_gender(&draft.gender, &mut violations);
        let room = self.check_room(&draft.room, &mut violations);
        let admission_date =
            check_admission_date(&draft.admission_date, today, &mut violations);
        let national_id = check_national_id(&draft.national_id, &mut violations);
        let phone = check_phone(&draft.phone, &mut violations);

        match (
            full_name,
            date_of_birth,
            gender,
            room,
            admission_date,
            national_id,
            phone,
        ) {
            (
                Some(full_name),
                Some(date_of_birth),
                Some(gender),
                Some(room),
                Some(admission_date),
                Some(national_id),
                Some(phone),
            ) if violations.is_empty() => Ok(ResidentFields {
                full_name,
                date_of_birth,
                gender,
                room,
                admission_date,
                national_id,
                phone,
            }),
            _ => Err(violations),
        }
    }

    fn check_gender(&self, raw: &str, violations: &mut Vec<FieldViolation>) -> Option<Gender> {
        match self.genders.parse(raw.trim()) {
            Some(gender) => Some(gender),
            None => {
                violations.push(FieldViolation::new(
                    Field::Gender,
                    "gender must be one of the configured labels",
                ));
                None
            }
        }
    }

    fn check_room(&self, raw: &str, violations: &mut Vec<FieldViolation>) -> Option<RoomId> {
        let room = match RoomId::new(raw.trim()) {
            Ok(room) => room,
            Err(_) => {
                violations.push(FieldViolation::new(Field::Room, "room must be selected"));
                return None;
            }
        };
        if self.rooms.contains(&room) {
            Some(room)
        } else {
            violations.push(FieldViolation::new(
                Field::Room,
                format!("room '{room}' is not in the room catalogue"),
            ));
            None
        }
    }
}

fn check_full_name(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<FullName> {
    match FullName::new(raw) {
        Ok(name) => Some(name),
        Err(err) => {
            violations.push(FieldViolation::new(Field::FullName, err.to_string()));
            None
        }
    }
}

fn check_date_of_birth(
    raw: &str,
    today: NaiveDate,
    violations: &mut Vec<FieldViolation>,
) -> Option<NaiveDate> {
    let date = match parse_boundary_date(raw) {
        Ok(date) => date,
        Err(err) => {
            violations.push(FieldViolation::new(Field::DateOfBirth, err.to_string()));
            return None;
        }
    };
    if date >= today {
        violations.push(FieldViolation::new(
            Field::DateOfBirth,
            "date of birth must be in the past",
        ));
        return None;
    }
    if date < earliest_birth_date(today) {
        violations.push(FieldViolation::new(
            Field::DateOfBirth,
            "date of birth must be within 120 years",
        ));
        return None;
    }
    Some(date)
}

fn check_admission_date(
    raw: &str,
    today: NaiveDate,
    violations: &mut Vec<FieldViolation>,
) -> Option<NaiveDate> {
    let date = match parse_boundary_date(raw) {
        Ok(date) => date,
        Err(err) => {
            violations.push(FieldViolation::new(Field::AdmissionDate, err.to_string()));
            return None;
        }
    };
    if date > today {
        violations.push(FieldViolation::new(
            Field::AdmissionDate,
            "admission date must not be in the future",
        ));
        return None;
    }
    Some(date)
}

fn check_national_id(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<NationalId> {
    match NationalId::new(raw) {
        Ok(id) => Some(id),
        Err(err) => {
            violations.push(FieldViolation::new(Field::NationalId, err.to_string()));
            None
        }
    }
}

fn check_phone(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<PhoneNumber> {
    match PhoneNumber::new(raw) {
        Ok(phone) => Some(phone),
        Err(err) => {
            violations.push(FieldViolation::new(Field::Phone, err.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn validator() -> DraftValidator {
        DraftValidator::new(RoomCatalogue::standard(), GenderCatalogue::vietnamese())
    }

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 22).expect("valid ymd")
    }

    fn valid_draft() -> ResidentDraft {
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

    #[rstest]
    fn valid_draft_produces_fields(validator: DraftValidator, today: NaiveDate) {
        let fields = validator
            .validate(&valid_draft(), today)
            .expect("draft is valid");
        assert_eq!(fields.full_name.as_ref(), "Nguyen Van A");
        assert_eq!(fields.gender, Gender::Male);
        assert_eq!(fields.room.as_str(), "A01");
    }

    #[rstest]
    fn blank_draft_reports_every_field(validator: DraftValidator, today: NaiveDate) {
        let violations = validator
            .validate(&ResidentDraft::blank(), today)
            .expect_err("blank draft is invalid");
        let fields: Vec<Field> = violations.iter().map(|v| v.field).collect();
        assert_eq!(
            fields,
            vec![
                Field::FullName,
                Field::DateOfBirth,
                Field::Gender,
                Field::Room,
                Field::AdmissionDate,
                Field::NationalId,
                Field::Phone,
            ],
        );
    }

    #[rstest]
    fn future_birth_date_is_rejected(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.date_of_birth = "23/09/2025".to_owned();
        let violations = validator.validate(&draft, today).expect_err("invalid dob");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.first().map(|v| v.field), Some(Field::DateOfBirth));
    }

    #[rstest]
    fn birth_date_today_is_not_in_the_past(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.date_of_birth = "22/09/2025".to_owned();
        assert!(validator.validate(&draft, today).is_err());
    }

    #[rstest]
    fn birth_date_older_than_limit_is_rejected(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.date_of_birth = "21/09/1905".to_owned();
        let violations = validator.validate(&draft, today).expect_err("too old");
        assert_eq!(violations.first().map(|v| v.field), Some(Field::DateOfBirth));
    }

    #[rstest]
    fn admission_today_is_allowed(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.admission_date = "22/09/2025".to_owned();
        assert!(validator.validate(&draft, today).is_ok());
    }

    #[rstest]
    fn future_admission_is_rejected(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.admission_date = "23/09/2025".to_owned();
        let violations = validator.validate(&draft, today).expect_err("future admission");
        assert_eq!(
            violations.first().map(|v| v.field),
            Some(Field::AdmissionDate),
        );
    }

    #[rstest]
    fn room_outside_catalogue_is_rejected(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.room = "Z99".to_owned();
        let violations = validator.validate(&draft, today).expect_err("unknown room");
        assert_eq!(violations.first().map(|v| v.field), Some(Field::Room));
    }

    #[rstest]
    fn unknown_gender_label_is_rejected(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.gender = "Autre".to_owned();
        let violations = validator.validate(&draft, today).expect_err("unknown gender");
        assert_eq!(violations.first().map(|v| v.field), Some(Field::Gender));
    }

    #[rstest]
    fn multiple_bad_fields_are_all_reported(validator: DraftValidator, today: NaiveDate) {
        let mut draft = valid_draft();
        draft.national_id = "123".to_owned();
        draft.phone = "12".to_owned();
        let violations = validator.validate(&draft, today).expect_err("two bad fields");
        let fields: Vec<Field> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec![Field::NationalId, Field::Phone]);
    }

    #[rstest]
    fn draft_round_trips_through_a_record(validator: DraftValidator, today: NaiveDate) {
        let fields = validator
            .validate(&valid_draft(), today)
            .expect("draft is valid");
        let record = super::super::resident::ResidentRecord::new(
            super::super::resident::ResidentKey::random(),
            super::super::code::ResidentCode::from_number(1),
            fields,
        );
        let draft = ResidentDraft::from_record(&record, validator.genders());
        assert_eq!(draft, valid_draft());
    }
}
