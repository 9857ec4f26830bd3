use gcg_core::repo::{DocumentRepo, OpenParams};
use gcg_core::repo_factory::{Backend, open_repo};
use gcg_core::repo_json::JsonDocumentRepo;
use gcg_core::repo_sqlite::SqliteDocumentRepo;
use serde_json::json;

fn filters(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn exercise_crud(repo: &dyn DocumentRepo) {
    // insert assigns sequential integer ids when the body has none
    let a = repo
        .insert("checklists", json!({"aspek": "A", "deskripsi": "x", "tahun": 2024}))
        .unwrap();
    assert_eq!(a["id"], json!(1));
    let b = repo
        .insert("checklists", json!({"aspek": "B", "deskripsi": "y", "tahun": 2023}))
        .unwrap();
    assert_eq!(b["id"], json!(2));

    // string ids pass through untouched
    let doc = repo
        .insert("userDocuments", json!({"id": "u1", "checklistId": 1, "fileSize": 10}))
        .unwrap();
    assert_eq!(doc["id"], json!("u1"));

    // filters are exact field matches, numbers included
    let year = repo
        .list("checklists", &filters(&[("tahun", "2024")]))
        .unwrap();
    assert_eq!(year.len(), 1);
    assert_eq!(year[0]["aspek"], json!("A"));

    let got = repo.get("checklists", "2").unwrap();
    assert_eq!(got["aspek"], json!("B"));

    // update keeps the addressed id even when the body lies
    let updated = repo
        .update("checklists", "2", json!({"id": 99, "aspek": "B2", "deskripsi": "y", "tahun": 2023}))
        .unwrap();
    assert_eq!(updated["id"], json!(2));
    assert_eq!(repo.get("checklists", "2").unwrap()["aspek"], json!("B2"));

    repo.delete("checklists", "1").unwrap();
    assert!(repo.get("checklists", "1").is_err());
    assert_eq!(repo.list("checklists", &[]).unwrap().len(), 1);

    // unknown collections are rejected, not silently created
    assert!(repo.list("passwords", &[]).is_err());
    assert!(repo.insert("passwords", json!({})).is_err());
}

#[test]
fn json_backend_crud() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    let repo = JsonDocumentRepo::open(&path).unwrap();
    exercise_crud(&repo);

    // mutations survive a reopen through the flat file
    let reopened = JsonDocumentRepo::open(&path).unwrap();
    assert_eq!(reopened.list("checklists", &[]).unwrap().len(), 1);
    assert_eq!(reopened.get("userDocuments", "u1").unwrap()["fileSize"], json!(10));
}

#[test]
fn sqlite_backend_crud() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gcg.sqlite");
    let repo = SqliteDocumentRepo::open(&path).unwrap();
    exercise_crud(&repo);

    let reopened = SqliteDocumentRepo::open(&path).unwrap();
    assert_eq!(reopened.list("checklists", &[]).unwrap().len(), 1);
}

#[test]
fn factory_opens_both_backends() {
    let dir = tempfile::tempdir().unwrap();
    for (backend, file) in [(Backend::Json, "db.json"), (Backend::Sqlite, "db.sqlite")] {
        let repo = open_repo(
            backend,
            OpenParams {
                db_path: dir.path().join(file),
            },
        )
        .unwrap();
        repo.insert("users", json!({"name": "admin"})).unwrap();
        assert_eq!(repo.list("users", &[]).unwrap().len(), 1);
    }
}

#[test]
fn sqlite_seeds_from_legacy_flat_file() {
    let dir = tempfile::tempdir().unwrap();
    let legacy = dir.path().join("db.json");
    std::fs::write(
        &legacy,
        serde_json::to_vec(&json!({
            "checklists": [
                {"id": 7, "aspek": "A", "deskripsi": "d", "tahun": 2024}
            ],
            "userDocuments": [
                {"id": "u1", "checklistId": 7, "fileSize": 5}
            ],
            "ignoredExtra": [{"id": 1}]
        }))
        .unwrap(),
    )
    .unwrap();

    let repo = SqliteDocumentRepo::open(&dir.path().join("gcg.sqlite")).unwrap();
    let n = repo.seed_from_json(&legacy).unwrap();
    assert_eq!(n, 2);
    assert_eq!(repo.get("checklists", "7").unwrap()["aspek"], json!("A"));
    // seeded ids keep counting from the imported maximum
    let next = repo.insert("checklists", json!({"deskripsi": "new"})).unwrap();
    assert_eq!(next["id"], json!(8));
}

#[test]
fn missing_json_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonDocumentRepo::open(&dir.path().join("absent.json")).unwrap();
    assert!(repo.list("checklists", &[]).unwrap().is_empty());
}
