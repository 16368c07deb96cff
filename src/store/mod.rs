//! The presentation store: CRUD over the saved collection and the merged read
//! view (saved records followed by the built-in defaults).
//!
//! Nothing is cached. Every operation reads the blob back from the backend, so
//! a write made by another process is visible on the next call.

pub mod backend;
pub mod codec;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::record::{default_records, PresentationRecord, RecordId};

pub use backend::{FileStorage, MemoryStorage, StorageBackend, StorageError};
pub use codec::CodecError;

/// Storage key the collection lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "presentationData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("index {index} is out of range for {len} saved presentations")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no saved presentation with id {id}")]
    UnknownId { id: RecordId },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to encode presentations: {0}")]
    Codec(#[from] CodecError),

    #[error("stored presentations under '{key}' could not be read, refusing to overwrite them: {source}")]
    Unreadable {
        key: String,
        #[source]
        source: CodecError,
    },
}

#[derive(Debug)]
pub struct PresentationStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> PresentationStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Builds a store and rewrites a readable blob that is in an older layout
    /// or holds records without ids, so ids stay stable from the first read.
    ///
    /// A failed rewrite is logged and the store is returned anyway; reads keep
    /// working and ids are assigned by the next successful write.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let store = Self::with_key(backend, key);
        if let Some(decoded) = store.read_blob() {
            if decoded.needs_upgrade() {
                let mut records = decoded.records;
                for record in records.iter_mut() {
                    record.id.get_or_insert_with(RecordId::new);
                }
                match store.persist(&records) {
                    Ok(()) => info!(
                        key = %store.key,
                        records = records.len(),
                        "upgraded stored presentations to layout v{}",
                        codec::STORAGE_VERSION
                    ),
                    Err(e) => warn!(
                        key = %store.key,
                        error = %e,
                        "could not upgrade stored presentations, leaving them as they are"
                    ),
                }
            }
        }
        store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read_blob(&self) -> Option<codec::Decoded> {
        let blob = match self.backend.get_item(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "storage unavailable, treating as empty");
                return None;
            }
        };
        match codec::decode(&blob) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored presentations are corrupt, treating as empty");
                None
            }
        }
    }

    /// Read used before a write: a blob that is present but does not decode
    /// is an error, so it is never replaced by a collection built from nothing.
    fn load_for_write(&self) -> Result<Vec<PresentationRecord>, StoreError> {
        let Some(blob) = self.backend.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        codec::decode(&blob)
            .map(|decoded| decoded.records)
            .map_err(|source| StoreError::Unreadable {
                key: self.key.clone(),
                source,
            })
    }

    /// Saved records in persisted order. Missing or unreadable storage yields
    /// an empty collection.
    pub fn load(&self) -> Vec<PresentationRecord> {
        let records = self
            .read_blob()
            .map(|decoded| decoded.records)
            .unwrap_or_default();
        debug!(key = %self.key, records = records.len(), "loaded presentations");
        records
    }

    /// Writes the whole collection as one blob.
    pub fn persist(&self, records: &[PresentationRecord]) -> Result<(), StoreError> {
        let blob = codec::encode(records)?;
        self.backend.set_item(&self.key, &blob)?;
        debug!(key = %self.key, records = records.len(), "persisted presentations");
        Ok(())
    }

    pub fn get_saved(&self) -> Vec<PresentationRecord> {
        self.load()
    }

    /// The merged view: saved records first, then the defaults.
    pub fn get_all(&self) -> Vec<PresentationRecord> {
        let mut records = self.load();
        records.extend(default_records());
        records
    }

    pub fn get(&self, index: usize) -> Result<PresentationRecord, StoreError> {
        let mut records = self.load();
        let len = records.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        Ok(records.swap_remove(index))
    }

    pub fn find(&self, id: RecordId) -> Option<(usize, PresentationRecord)> {
        self.load()
            .into_iter()
            .enumerate()
            .find(|(_, record)| record.id == Some(id))
    }

    /// Appends a record, assigning it an id when it has none.
    pub fn add(&self, mut record: PresentationRecord) -> Result<RecordId, StoreError> {
        let id = *record.id.get_or_insert_with(RecordId::new);
        let mut records = self.load_for_write()?;
        records.push(record);
        self.persist(&records)?;
        Ok(id)
    }

    /// Replaces the record at `index`. The replaced record's id carries over
    /// when the new one has none.
    pub fn update(&self, index: usize, mut record: PresentationRecord) -> Result<(), StoreError> {
        let mut records = self.load_for_write()?;
        let len = records.len();
        let slot = records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        if record.id.is_none() {
            record.id = slot.id;
        }
        *slot = record;
        self.persist(&records)
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn delete(&self, index: usize) -> Result<PresentationRecord, StoreError> {
        let mut records = self.load_for_write()?;
        let len = records.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        let removed = records.remove(index);
        self.persist(&records)?;
        Ok(removed)
    }

    /// Removes the record at `index` and appends `record` in one write, so a
    /// failed write leaves the stored collection as it was.
    pub fn move_to_end(
        &self,
        index: usize,
        mut record: PresentationRecord,
    ) -> Result<RecordId, StoreError> {
        let mut records = self.load_for_write()?;
        let len = records.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        records.remove(index);
        let id = *record.id.get_or_insert_with(RecordId::new);
        records.push(record);
        self.persist(&records)?;
        Ok(id)
    }

    pub fn update_by_id(
        &self,
        id: RecordId,
        mut record: PresentationRecord,
    ) -> Result<(), StoreError> {
        let mut records = self.load_for_write()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == Some(id))
            .ok_or(StoreError::UnknownId { id })?;
        record.id = Some(id);
        *slot = record;
        self.persist(&records)
    }

    pub fn delete_by_id(&self, id: RecordId) -> Result<PresentationRecord, StoreError> {
        let mut records = self.load_for_write()?;
        let index = records
            .iter()
            .position(|r| r.id == Some(id))
            .ok_or(StoreError::UnknownId { id })?;
        let removed = records.remove(index);
        self.persist(&records)?;
        Ok(removed)
    }

    /// Drops the whole saved collection by removing its storage key.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.backend.remove_item(&self.key)?;
        info!(key = %self.key, "cleared saved presentations");
        Ok(())
    }
}
