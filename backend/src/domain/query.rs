//! Filtered query view over the record store.
//!
//! A pure projection recomputed from the current records and filter inputs.
//! It holds no state of its own and never mutates the store; the table
//! ordering helpers used by the display layer live here as well.

use std::cmp::Ordering;

use super::catalogue::RoomId;
use super::resident::ResidentRecord;

/// Filter records by search text and room.
///
/// The trimmed search text matches case-insensitively against the name and
/// the code, and as a raw substring against the national id and the phone
/// number. An empty search matches everything. The room filter, when set,
/// requires exact equality. Both predicates are ANDed and the input order is
/// preserved.
///
/// # Examples
/// ```
/// use backend::domain::query::filter_residents;
///
/// assert!(filter_residents(&[], "mai", None).is_empty());
/// ```
pub fn filter_residents(
    records: &[ResidentRecord],
    search_text: &str,
    room_filter: Option<&RoomId>,
) -> Vec<ResidentRecord> {
    let needle = search_text.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            let matches_search = needle.is_empty()
                || record.full_name().as_ref().to_lowercase().contains(&needle)
                || record.code().as_str().to_lowercase().contains(&needle)
                || record.national_id().as_ref().contains(search_text)
                || record.phone().as_ref().contains(search_text);
            let matches_room = room_filter.is_none_or(|room| record.room() == room);
            matches_search && matches_room
        })
        .cloned()
        .collect()
}

/// Order records by the numeric suffix of their code.
pub fn compare_by_code(a: &ResidentRecord, b: &ResidentRecord) -> Ordering {
    a.code()
        .number()
        .cmp(&b.code().number())
        .then_with(|| a.code().as_str().cmp(b.code().as_str()))
}

/// Order records alphabetically by full name.
pub fn compare_by_name(a: &ResidentRecord, b: &ResidentRecord) -> Ordering {
    a.full_name().as_ref().cmp(b.full_name().as_ref())
}

/// Order records by room identifier.
pub fn compare_by_room(a: &ResidentRecord, b: &ResidentRecord) -> Ordering {
    a.room().as_str().cmp(b.room().as_str())
}

/// Order records by admission date, oldest first.
pub fn compare_by_admission_date(a: &ResidentRecord, b: &ResidentRecord) -> Ordering {
    a.admission_date().cmp(&b.admission_date())
}
