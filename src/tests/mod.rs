use crate::admin::{AdminController, RecordForm};
use crate::gallery::{self, CategoryFilter, GalleryQuery};
use crate::record::{default_records, PresentationRecord};
use crate::store::{
    codec, FileStorage, MemoryStorage, PresentationStore, StorageBackend, DEFAULT_STORAGE_KEY,
};

fn sample_records() -> Vec<PresentationRecord> {
    vec![
        PresentationRecord::new("Вводная лекция", "https://a", "training").with_date("01.09.2024"),
        PresentationRecord::new("Product roadmap", "https://b", "product"),
        PresentationRecord::new("", "", ""),
        PresentationRecord::new("Quotes \"and\" <tags>", "https://c?x=1&y=2", "other"),
    ]
}

#[test]
fn persist_then_load_round_trips() {
    let store = PresentationStore::new(MemoryStorage::new());
    let records = sample_records();
    store.persist(&records).unwrap();
    assert_eq!(store.load(), records);
}

#[test]
fn codec_round_trips_ids() {
    let store = PresentationStore::new(MemoryStorage::new());
    for record in sample_records() {
        store.add(record).unwrap();
    }
    let saved = store.get_saved();
    let blob = codec::encode(&saved).unwrap();
    assert_eq!(codec::decode(&blob).unwrap().records, saved);
}

#[test]
fn empty_storage_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("storage.json"));
    let store = PresentationStore::open(storage, DEFAULT_STORAGE_KEY);
    assert!(store.get_saved().is_empty());
    assert_eq!(store.get_all(), default_records());
}

#[test]
fn merged_view_always_ends_with_defaults() {
    let store = PresentationStore::new(MemoryStorage::new());
    for n in 0..4 {
        let all = store.get_all();
        assert_eq!(all.len(), n + 3);
        assert_eq!(all[n..].to_vec(), default_records());
        store
            .add(PresentationRecord::new(format!("deck {n}"), "https://x", "training"))
            .unwrap();
    }
}

#[test]
fn defaults_cannot_be_deleted_through_the_store() {
    let store = PresentationStore::new(MemoryStorage::new());
    assert!(store.delete(0).is_err());
    assert!(store.update(0, PresentationRecord::default()).is_err());
    assert_eq!(store.get_all().len(), 3);
}

#[test]
fn file_backed_admin_and_gallery_share_one_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let store = PresentationStore::open(FileStorage::new(&path), DEFAULT_STORAGE_KEY);
    let admin = AdminController::new(&store);

    admin
        .on_add(&RecordForm::new("Лексика: повторение", "https://a", "training"))
        .unwrap();
    admin
        .on_add(&RecordForm::new("Release notes", "https://b", "product"))
        .unwrap();

    let training = gallery::view(&store, &GalleryQuery::category("training"));
    assert_eq!(training.len(), 3);
    assert!(training.iter().all(|r| r.category == "training"));

    let found = gallery::view(&store, &GalleryQuery::search("ЛЕКС"));
    assert_eq!(found.len(), 3);

    let everything = gallery::view(&store, &GalleryQuery::category("all"));
    assert_eq!(everything, store.get_all());

    // a second handle on the same file sees the writes
    let reopened = PresentationStore::open(FileStorage::new(&path), DEFAULT_STORAGE_KEY);
    assert_eq!(reopened.get_saved(), store.get_saved());
}

#[test]
fn external_write_is_seen_on_next_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let first = PresentationStore::new(FileStorage::new(&path));
    let second = PresentationStore::new(FileStorage::new(&path));

    assert!(first.get_saved().is_empty());
    second
        .add(PresentationRecord::new("from elsewhere", "https://x", "product"))
        .unwrap();
    assert_eq!(first.get_saved().len(), 1);
}

#[test]
fn search_over_defaults() {
    let found = gallery::search_titles(&default_records(), "лекс");
    assert_eq!(found.len(), 2);
    assert_eq!(found, default_records()[..2].to_vec());
}

#[test]
fn category_filter_over_defaults() {
    let records = default_records();
    let training = gallery::filter_by_category(&records, &CategoryFilter::parse("training"));
    assert_eq!(training, records[..2].to_vec());
    let all = gallery::filter_by_category(&records, &CategoryFilter::parse("all"));
    assert_eq!(all, records);
}

#[test]
fn corrupt_file_area_does_not_break_reads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json at all").unwrap();
    let storage = FileStorage::new(&path);
    assert!(storage.get_item(DEFAULT_STORAGE_KEY).is_err());

    let store = PresentationStore::open(storage, DEFAULT_STORAGE_KEY);
    assert!(store.get_saved().is_empty());
    assert_eq!(store.get_all().len(), 3);
    assert!(store.add(PresentationRecord::new("x", "y", "")).is_err());
}
