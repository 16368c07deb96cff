use crate::record::PresentationRecord;

pub(in crate::gallery) fn category_matches(record: &PresentationRecord, category: &str) -> bool {
    record.category == category
}

/// `needle` must already be lowercased.
pub(in crate::gallery) fn title_contains(record: &PresentationRecord, needle: &str) -> bool {
    needle.is_empty() || record.title.to_lowercase().contains(needle)
}

pub(in crate::gallery) fn normalize_query(query: &str) -> String {
    query.to_lowercase()
}
