//! Uniqueness constraint checking.
//!
//! National id and phone number must each be unique across all records. The
//! checker scans the store excluding the record under edit so an unchanged
//! value never conflicts with itself.

use serde::Serialize;

use super::resident::{NationalId, PhoneNumber, ResidentKey, ResidentRecord};

/// The field on which a uniqueness conflict was detected.
///
/// When both fields collide the national id wins; the workflow surfaces a
/// single field per failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictField {
    NationalId,
    Phone,
}

impl ConflictField {
    /// Stable camelCase name matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "nationalId",
            Self::Phone => "phone",
        }
    }
}

impl std::fmt::Display for ConflictField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find a uniqueness conflict among `records`, skipping `exclude`.
///
/// National id is checked before phone, so a record colliding on both
/// reports the national id.
pub fn find_conflict(
    records: &[ResidentRecord],
    national_id: &NationalId,
    phone: &PhoneNumber,
    exclude: Option<&ResidentKey>,
) -> Option<ConflictField> {
    let others = records
        .iter()
        .filter(|record| exclude.is_none_or(|key| record.key() != key));
    for record in others {
        if record.national_id() == national_id {
            return Some(ConflictField::NationalId);
        }
        if record.phone() == phone {
            return Some(ConflictField::Phone);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resident::Gender;

    fn record(code: &str, national_id: &str, phone: &str) -> ResidentRecord {
        ResidentRecord::from_strings(
            code,
            "Nguyễn Thị Mai",
            "15/05/1965",
            Gender::Female,
            "A01",
            "10/09/2025",
            national_id,
            phone,
        )
    }

    #[test]
    fn no_conflict_in_empty_store() {
        let national_id = NationalId::new("123456789012").expect("valid id");
        let phone = PhoneNumber::new("0912345678").expect("valid phone");
        assert_eq!(find_conflict(&[], &national_id, &phone, None), None);
    }

    #[test]
    fn duplicate_national_id_is_reported() {
        let existing = record("BN00001", "123456789012", "0912345678");
        let national_id = NationalId::new("123456789012").expect("valid id");
        let phone = PhoneNumber::new("0988888888").expect("valid phone");
        assert_eq!(
            find_conflict(&[existing], &national_id, &phone, None),
            Some(ConflictField::NationalId),
        );
    }

    #[test]
    fn duplicate_phone_is_reported() {
        let existing = record("BN00001", "123456789012", "0912345678");
        let national_id = NationalId::new("999999999999").expect("valid id");
        let phone = PhoneNumber::new("0912345678").expect("valid phone");
        assert_eq!(
            find_conflict(&[existing], &national_id, &phone, None),
            Some(ConflictField::Phone),
        );
    }

    #[test]
    fn national_id_wins_when_both_fields_collide() {
        let existing = record("BN00001", "123456789012", "0912345678");
        let national_id = NationalId::new("123456789012").expect("valid id");
        let phone = PhoneNumber::new("0912345678").expect("valid phone");
        assert_eq!(
            find_conflict(&[existing], &national_id, &phone, None),
            Some(ConflictField::NationalId),
        );
    }

    #[test]
    fn excluded_record_does_not_conflict_with_itself() {
        let existing = record("BN00001", "123456789012", "0912345678");
        let key = *existing.key();
        let national_id = NationalId::new("123456789012").expect("valid id");
        let phone = PhoneNumber::new("0912345678").expect("valid phone");
        assert_eq!(
            find_conflict(&[existing], &national_id, &phone, Some(&key)),
            None,
        );
    }

    #[test]
    fn exclusion_still_detects_conflicts_with_other_records() {
        let first = record("BN00001", "123456789012", "0912345678");
        let second = record("BN00002", "222222222222", "0922222222");
        let key = *second.key();
        let national_id = NationalId::new("123456789012").expect("valid id");
        let phone = PhoneNumber::new("0933333333").expect("valid phone");
        assert_eq!(
            find_conflict(&[first, second], &national_id, &phone, Some(&key)),
            Some(ConflictField::NationalId),
        );
    }
}
