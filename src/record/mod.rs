use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Category shown for records whose tag is absent or empty.
pub const FALLBACK_CATEGORY: &str = "other";

/// Stable identifier assigned to a saved record when it is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One presentation entry.
///
/// Every field decodes with a default so that blobs written by older layouts,
/// or edited by hand, still load. Presence checks belong to the admin form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
}

impl PresentationRecord {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            category: category.into(),
            date: None,
            id: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// The category used when rendering; empty tags fall back to `"other"`.
    pub fn display_category(&self) -> &str {
        let category = self.category.trim();
        if category.is_empty() {
            FALLBACK_CATEGORY
        } else {
            category
        }
    }
}

/// Built-in records appended after the saved ones in the merged view.
pub fn default_records() -> Vec<PresentationRecord> {
    vec![
        PresentationRecord::new(
            "1.1. Лексико-фонетический и орфографический материал",
            "https://docs.google.com/presentation/d/194KCziub_EiRfhPuxY5kH8_BhD1q1LIkQANjfwuDjO0/edit?usp=sharing",
            "training",
        ),
        PresentationRecord::new(
            "1.2. Лексико-грамматический материал",
            "https://docs.google.com/presentation/d/1A5EwSxFAGKSsgo7dYWSoHe-ZbU-6SkZOT0ZFruVmpVs/edit?usp=sharing",
            "training",
        ),
        PresentationRecord::new(
            "2.1. Компетенции специалиста. Моя профессия",
            "https://docs.google.com/presentation/d/1OQU2RxVl4OspxkfvKaxeLBr0m6VCcLBsebIoxuEqMOE/edit?usp=sharing",
            "product",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_displays_as_other() {
        let record = PresentationRecord::new("Deck", "https://example.com", "  ");
        assert_eq!(record.display_category(), "other");
        let record = PresentationRecord::new("Deck", "https://example.com", "training");
        assert_eq!(record.display_category(), "training");
    }

    #[test]
    fn record_without_optional_fields_omits_them() {
        let record = PresentationRecord::new("Deck", "https://example.com", "product");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Deck",
                "link": "https://example.com",
                "category": "product"
            })
        );
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let records: Vec<PresentationRecord> = serde_json::from_str(
            r#"[
                {"title":"kept","link":"https://a","category":"training"},
                {"title":"no tag","link":"https://b","category":null,"date":null}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].category, "");
        assert_eq!(records[1].display_category(), "other");
        assert_eq!(records[1].date, None);
    }

    #[test]
    fn record_id_parses_its_display_form() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<RecordId>().is_err());
    }

    #[test]
    fn defaults_are_fixed() {
        let defaults = default_records();
        assert_eq!(defaults.len(), 3);
        assert!(defaults.iter().all(|r| r.id.is_none() && r.date.is_none()));
        assert_eq!(defaults[2].category, "product");
    }
}
