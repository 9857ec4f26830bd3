use gcg_core::error::GcgError;
use gcg_core::policy::UploadPolicy;
use gcg_core::uploads::UploadStore;

fn store_with_limit(dir: &std::path::Path, max: Option<u64>) -> UploadStore {
    UploadStore::new(dir, UploadPolicy { max_file_bytes: max })
}

#[test]
fn save_then_open_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(dir.path(), Some(1024));

    let stored = store
        .save("laporan tahunan.pdf", "application/pdf", b"isi dokumen")
        .unwrap();
    assert_eq!(stored.original_name, "laporan tahunan.pdf");
    assert_eq!(stored.size, 11);
    assert_eq!(stored.mimetype, "application/pdf");
    assert!(stored.filename.starts_with("file-"));
    assert!(stored.filename.ends_with(".pdf"));
    assert!(!stored.upload_date.is_empty());

    assert_eq!(store.open(&stored.filename).unwrap(), b"isi dokumen");
}

#[test]
fn generated_names_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(dir.path(), None);
    let a = store.save("x.pdf", "application/pdf", b"a").unwrap();
    let b = store.save("x.pdf", "application/pdf", b"b").unwrap();
    assert_ne!(a.filename, b.filename);
}

#[test]
fn oversize_and_empty_payloads_fail_validation() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(dir.path(), Some(4));

    let err = store.save("big.bin", "application/octet-stream", b"12345");
    assert!(matches!(err, Err(GcgError::Validation(_))));

    let err = store.save("empty.bin", "application/octet-stream", b"");
    assert!(matches!(err, Err(GcgError::Validation(_))));
}

#[test]
fn traversal_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(dir.path(), None);
    for name in ["../db.json", "a/b.pdf", "..", "a\\b"] {
        assert!(matches!(store.open(name), Err(GcgError::Validation(_))));
    }
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(dir.path(), None);
    assert!(matches!(
        store.open("file-0-0.pdf"),
        Err(GcgError::NotFound(_))
    ));
}

#[test]
fn scan_lists_stored_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(dir.path(), None);
    store.save("a.pdf", "application/pdf", b"aa").unwrap();
    store.save("b.pdf", "application/pdf", b"bbb").unwrap();

    let mut sizes: Vec<u64> = store.scan().unwrap().iter().map(|f| f.size).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, [2, 3]);
}

#[test]
fn scan_of_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_with_limit(&dir.path().join("never-created"), None);
    assert!(store.scan().unwrap().is_empty());
}
