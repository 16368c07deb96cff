//! Read-side projections for the public gallery. Everything here works on the
//! merged view already fetched from the store and never touches storage.

mod filters;

use crate::record::PresentationRecord;
use crate::store::{PresentationStore, StorageBackend};

/// Filter value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Only the exact value `"all"` disables filtering; anything else is a
    /// tag matched as written.
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, record: &PresentationRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => filters::category_matches(record, category),
        }
    }
}

pub fn filter_by_category(
    records: &[PresentationRecord],
    filter: &CategoryFilter,
) -> Vec<PresentationRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Case-insensitive substring search over titles.
pub fn search_titles(records: &[PresentationRecord], query: &str) -> Vec<PresentationRecord> {
    let needle = filters::normalize_query(query);
    records
        .iter()
        .filter(|r| filters::title_contains(r, &needle))
        .cloned()
        .collect()
}

/// Distinct non-empty tags in first-seen order. Every value listed here
/// selects at least one record through [`CategoryFilter::Only`].
pub fn categories(records: &[PresentationRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        let category = record.category.as_str();
        if category.is_empty() {
            continue;
        }
        if !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// What the gallery page is currently showing.
///
/// A search query resets the category filter to "all", the way the gallery
/// page behaves when typing into the search box. `combine` applies both.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryQuery {
    pub category: CategoryFilter,
    pub search: Option<String>,
    pub combine: bool,
}

impl GalleryQuery {
    pub fn category(category: &str) -> Self {
        Self {
            category: CategoryFilter::parse(category),
            ..Default::default()
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search: Some(query.into()),
            ..Default::default()
        }
    }

    /// The category filter that actually applies to this query.
    pub fn effective_category(&self) -> CategoryFilter {
        match self.search.as_deref() {
            Some(q) if !q.is_empty() && !self.combine => CategoryFilter::All,
            _ => self.category.clone(),
        }
    }

    pub fn apply(&self, records: &[PresentationRecord]) -> Vec<PresentationRecord> {
        let filtered = filter_by_category(records, &self.effective_category());
        match self.search.as_deref() {
            Some(query) => search_titles(&filtered, query),
            None => filtered,
        }
    }
}

/// Fetches the merged view and projects it through `query`.
pub fn view<B: StorageBackend>(
    store: &PresentationStore<B>,
    query: &GalleryQuery,
) -> Vec<PresentationRecord> {
    query.apply(&store.get_all())
}
