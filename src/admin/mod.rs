//! Admin-side command handlers: the form that adds, edits and deletes saved
//! presentations. Validation lives here; the store accepts whatever it is given.

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;
use tracing::info;

use crate::record::{PresentationRecord, RecordId, FALLBACK_CATEGORY};
use crate::store::{PresentationStore, StorageBackend, StoreError};

/// Day-first date stamped on new records.
pub const DEFAULT_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("link must not be empty")]
    EmptyLink,
}

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw field values as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub title: String,
    pub link: String,
    pub category: String,
}

impl RecordForm {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            category: category.into(),
        }
    }

    /// Trims every field and rejects an empty title or link. An empty
    /// category becomes `"other"`.
    pub fn validate(&self) -> Result<PresentationRecord, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        let link = self.link.trim();
        if link.is_empty() {
            return Err(FormError::EmptyLink);
        }
        let category = match self.category.trim() {
            "" => FALLBACK_CATEGORY,
            c => c,
        };
        Ok(PresentationRecord::new(title, link, category))
    }
}

impl From<PresentationRecord> for RecordForm {
    fn from(record: PresentationRecord) -> Self {
        Self {
            title: record.title,
            link: record.link,
            category: record.category,
        }
    }
}

/// Returns false when `format` contains an unknown strftime specifier.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

pub struct AdminController<'a, B> {
    store: &'a PresentationStore<B>,
    date_format: String,
}

impl<'a, B: StorageBackend> AdminController<'a, B> {
    pub fn new(store: &'a PresentationStore<B>) -> Self {
        Self::with_date_format(store, DEFAULT_DATE_FORMAT)
    }

    /// `date_format` is a strftime pattern; check it with
    /// [`is_valid_date_format`] first, an invalid one falls back to the default.
    pub fn with_date_format(store: &'a PresentationStore<B>, date_format: &str) -> Self {
        let date_format = if is_valid_date_format(date_format) {
            date_format.to_string()
        } else {
            DEFAULT_DATE_FORMAT.to_string()
        };
        Self { store, date_format }
    }

    pub fn today(&self) -> String {
        chrono::Local::now().format(&self.date_format).to_string()
    }

    pub fn saved(&self) -> Vec<PresentationRecord> {
        self.store.get_saved()
    }

    pub fn on_add(&self, form: &RecordForm) -> Result<RecordId, AdminError> {
        let record = form.validate()?.with_date(self.today());
        let id = self.store.add(record)?;
        info!(%id, title = form.title.trim(), "added presentation");
        Ok(id)
    }

    pub fn on_delete(&self, index: usize) -> Result<PresentationRecord, AdminError> {
        let removed = self.store.delete(index)?;
        info!(index, title = %removed.title, "deleted presentation");
        Ok(removed)
    }

    pub fn on_delete_id(&self, id: RecordId) -> Result<PresentationRecord, AdminError> {
        let removed = self.store.delete_by_id(id)?;
        info!(%id, title = %removed.title, "deleted presentation");
        Ok(removed)
    }

    /// Takes the record at `index` out of the collection and hands its fields
    /// back pre-filled. Resubmitting the form adds it again at the end.
    pub fn on_edit(&self, index: usize) -> Result<RecordForm, AdminError> {
        let removed = self.store.delete(index)?;
        info!(index, title = %removed.title, "editing presentation");
        Ok(RecordForm::from(removed))
    }

    /// Resubmits a form opened with [`Self::on_edit`] without taking the
    /// record out first: the record at `index` is removed and the new one
    /// appended in a single write, stamped with today's date.
    pub fn on_resubmit(&self, index: usize, form: &RecordForm) -> Result<RecordId, AdminError> {
        let record = form.validate()?.with_date(self.today());
        let id = self.store.move_to_end(index, record)?;
        info!(index, %id, title = form.title.trim(), "resubmitted presentation");
        Ok(id)
    }

    /// In-place replacement that keeps the original creation date and id.
    pub fn on_update(&self, index: usize, form: &RecordForm) -> Result<(), AdminError> {
        let existing = self.store.get(index)?;
        let mut record = form.validate()?;
        record.date = existing.date;
        record.id = existing.id;
        self.store.update(index, record)?;
        info!(index, title = form.title.trim(), "updated presentation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn form_trims_and_defaults_category() {
        let record = RecordForm::new("  Deck ", " https://a ", "").validate().unwrap();
        assert_eq!(record.title, "Deck");
        assert_eq!(record.link, "https://a");
        assert_eq!(record.category, "other");
    }

    #[test]
    fn form_rejects_missing_fields() {
        assert_eq!(
            RecordForm::new(" ", "https://a", "x").validate(),
            Err(FormError::EmptyTitle)
        );
        assert_eq!(
            RecordForm::new("Deck", "", "x").validate(),
            Err(FormError::EmptyLink)
        );
    }

    #[test]
    fn rejected_form_does_not_touch_store() {
        let store = PresentationStore::new(MemoryStorage::new());
        let admin = AdminController::new(&store);
        assert!(matches!(
            admin.on_add(&RecordForm::new("", "https://a", "")),
            Err(AdminError::Form(FormError::EmptyTitle))
        ));
        assert!(admin.saved().is_empty());
    }

    #[test]
    fn add_stamps_date() {
        let store = PresentationStore::new(MemoryStorage::new());
        let admin = AdminController::with_date_format(&store, "%Y");
        admin
            .on_add(&RecordForm::new("Deck", "https://a", "training"))
            .unwrap();
        let saved = admin.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].date.as_deref(), Some(admin.today().as_str()));
    }

    #[test]
    fn edit_removes_and_prefills() {
        let store = PresentationStore::new(MemoryStorage::new());
        let admin = AdminController::new(&store);
        admin.on_add(&RecordForm::new("A", "https://a", "training")).unwrap();
        admin.on_add(&RecordForm::new("B", "https://b", "product")).unwrap();

        let form = admin.on_edit(0).unwrap();
        assert_eq!(form, RecordForm::new("A", "https://a", "training"));
        assert_eq!(admin.saved().len(), 1);

        admin.on_add(&form).unwrap();
        let titles: Vec<_> = admin.saved().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn resubmit_moves_record_to_end() {
        let store = PresentationStore::new(MemoryStorage::new());
        let admin = AdminController::new(&store);
        admin.on_add(&RecordForm::new("A", "https://a", "training")).unwrap();
        admin.on_add(&RecordForm::new("B", "https://b", "product")).unwrap();

        assert!(matches!(
            admin.on_resubmit(0, &RecordForm::new("", "https://a", "")),
            Err(AdminError::Form(FormError::EmptyTitle))
        ));
        assert_eq!(admin.saved().len(), 2);

        admin
            .on_resubmit(0, &RecordForm::new("A2", "https://a2", "training"))
            .unwrap();
        let titles: Vec<_> = admin.saved().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["B", "A2"]);
    }

    #[test]
    fn update_keeps_date_and_id() {
        let store = PresentationStore::new(MemoryStorage::new());
        let admin = AdminController::new(&store);
        let id = admin.on_add(&RecordForm::new("A", "https://a", "training")).unwrap();
        let date = admin.saved()[0].date.clone();

        admin
            .on_update(0, &RecordForm::new("A2", "https://a2", "product"))
            .unwrap();
        let saved = admin.saved();
        assert_eq!(saved[0].title, "A2");
        assert_eq!(saved[0].date, date);
        assert_eq!(saved[0].id, Some(id));

        assert!(matches!(
            admin.on_update(3, &RecordForm::new("x", "y", "")),
            Err(AdminError::Store(StoreError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn date_format_validation() {
        assert!(is_valid_date_format("%d.%m.%Y"));
        assert!(!is_valid_date_format("%Y-%"));
        let store = PresentationStore::new(MemoryStorage::new());
        let admin = AdminController::with_date_format(&store, "%Y-%");
        assert!(!admin.today().is_empty());
    }
}
