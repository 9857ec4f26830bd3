use gcg_core::domain::{ChecklistItem, ChecklistStatus, UploadedFile};
use gcg_core::stats::{
    AggregationError, SENTINEL_ASPEK, aspect_stats, decode_collection, decode_rows, overall_stats,
};
use serde_json::json;

fn item(id: i64, aspek: Option<&str>, tahun: i32) -> ChecklistItem {
    ChecklistItem {
        id,
        aspek: aspek.map(str::to_string),
        deskripsi: format!("dokumen {id}"),
        tahun: Some(tahun),
        status: ChecklistStatus::Pending,
        pic: None,
    }
}

fn upload(id: &str, checklist_id: i64, size: u64) -> UploadedFile {
    UploadedFile {
        id: id.to_string(),
        file_name: format!("{id}.pdf"),
        file_size: size,
        upload_date: None,
        tahun: Some(2024),
        checklist_id: Some(checklist_id),
        checklist_description: None,
        aspect: None,
        subdirektorat: None,
        catatan: None,
    }
}

#[test]
fn no_year_selected_yields_zeroed_results() {
    let items = vec![item(1, Some("A"), 2024)];
    let files = vec![upload("u1", 1, 100)];
    let overall = overall_stats(None, &items, &files);
    assert_eq!(overall.total_checklist, 0);
    assert_eq!(overall.uploaded_count, 0);
    assert_eq!(overall.progress, 0);
    assert_eq!(overall.total_size, 0);
    assert!(aspect_stats(None, &items, &files).is_empty());
}

#[test]
fn year_with_no_items_yields_zeroed_results() {
    let items = vec![item(1, Some("A"), 2023)];
    let overall = overall_stats(Some(2024), &items, &[]);
    assert_eq!(overall.total_checklist, 0);
    assert_eq!(overall.progress, 0);
    assert!(aspect_stats(Some(2024), &items, &[]).is_empty());
}

#[test]
fn worked_scenario_from_dashboard() {
    // year=2024, two "A" items, one "B" item, one upload against item 1.
    let items = vec![
        item(1, Some("A"), 2024),
        item(2, Some("A"), 2024),
        item(3, Some("B"), 2024),
    ];
    let files = vec![upload("u1", 1, 512)];

    let overall = overall_stats(Some(2024), &items, &files);
    assert_eq!(overall.total_checklist, 3);
    assert_eq!(overall.uploaded_count, 1);
    assert_eq!(overall.pending_count, 2);
    assert_eq!(overall.progress, 33);
    assert_eq!(overall.total_size, 512);

    let aspects = aspect_stats(Some(2024), &items, &files);
    assert_eq!(aspects.len(), 2);
    assert_eq!(aspects[0].aspek, "A");
    assert_eq!(aspects[0].total_items, 2);
    assert_eq!(aspects[0].uploaded_count, 1);
    assert_eq!(aspects[0].progress, 50);
    assert_eq!(aspects[1].aspek, "B");
    assert_eq!(aspects[1].total_items, 1);
    assert_eq!(aspects[1].uploaded_count, 0);
    assert_eq!(aspects[1].progress, 0);
}

#[test]
fn reupload_is_idempotent_for_counts_and_size() {
    let items = vec![item(1, Some("A"), 2024), item(2, Some("A"), 2024)];
    let single = vec![upload("u1", 1, 512)];
    let double = vec![upload("u1", 1, 512), upload("u2", 1, 9000)];

    let once = overall_stats(Some(2024), &items, &single);
    let twice = overall_stats(Some(2024), &items, &double);
    assert_eq!(once.uploaded_count, twice.uploaded_count);
    assert_eq!(once.total_size, twice.total_size);

    let aspects = aspect_stats(Some(2024), &items, &double);
    assert_eq!(aspects[0].uploaded_count, 1);
}

#[test]
fn first_upload_record_wins_dedup() {
    let items = vec![item(1, Some("A"), 2024)];
    let files = vec![upload("u1", 1, 100), upload("u2", 1, 200)];
    assert_eq!(overall_stats(Some(2024), &items, &files).total_size, 100);
}

#[test]
fn blank_aspects_collapse_into_one_sentinel_group() {
    let items = vec![
        item(1, None, 2024),
        item(2, Some(""), 2024),
        item(3, Some("   "), 2024),
        item(4, Some("A"), 2024),
    ];
    let aspects = aspect_stats(Some(2024), &items, &[]);
    let sentinel: Vec<_> = aspects.iter().filter(|a| a.aspek == SENTINEL_ASPEK).collect();
    assert_eq!(sentinel.len(), 1);
    assert_eq!(sentinel[0].total_items, 3);
    assert_eq!(sentinel[0].original_aspek, None);
}

#[test]
fn membership_uses_checklist_id_not_aspect_string() {
    // The upload record carries a drifted aspect string; it must not matter.
    let items = vec![item(1, Some("A"), 2024), item(2, Some("B"), 2024)];
    let mut file = upload("u1", 1, 64);
    file.aspect = Some("B".to_string());
    let aspects = aspect_stats(Some(2024), &items, &[file]);
    let a = aspects.iter().find(|s| s.aspek == "A").unwrap();
    let b = aspects.iter().find(|s| s.aspek == "B").unwrap();
    assert_eq!(a.uploaded_count, 1);
    assert_eq!(b.uploaded_count, 0);
}

#[test]
fn uploads_from_other_years_do_not_count() {
    // Item 9 belongs to 2023; its upload must not leak into 2024 stats even
    // though the record claims tahun 2024.
    let items = vec![item(1, Some("A"), 2024), item(9, Some("A"), 2023)];
    let files = vec![upload("u1", 9, 64)];
    let overall = overall_stats(Some(2024), &items, &files);
    assert_eq!(overall.uploaded_count, 0);
    assert_eq!(overall.total_size, 0);
}

#[test]
fn progress_is_100_iff_everything_uploaded() {
    let items = vec![item(1, Some("A"), 2024), item(2, Some("A"), 2024)];
    let all = vec![upload("u1", 1, 10), upload("u2", 2, 10)];
    let some = vec![upload("u1", 1, 10)];

    assert_eq!(overall_stats(Some(2024), &items, &all).progress, 100);
    let partial = overall_stats(Some(2024), &items, &some);
    assert!(partial.progress < 100);
    assert_eq!(overall_stats(Some(2024), &[], &all).progress, 0);
}

#[test]
fn equal_progress_keeps_discovery_order() {
    // C, A, B all at 0%; output order must match first encounter.
    let items = vec![
        item(1, Some("C"), 2024),
        item(2, Some("A"), 2024),
        item(3, Some("B"), 2024),
    ];
    let aspects = aspect_stats(Some(2024), &items, &[]);
    let labels: Vec<&str> = aspects.iter().map(|a| a.aspek.as_str()).collect();
    assert_eq!(labels, ["C", "A", "B"]);
}

#[test]
fn sort_is_descending_by_progress() {
    let items = vec![
        item(1, Some("A"), 2024),
        item(2, Some("B"), 2024),
        item(3, Some("B"), 2024),
    ];
    // B at 50%, A at 100%.
    let files = vec![upload("u1", 1, 10), upload("u2", 2, 10)];
    let aspects = aspect_stats(Some(2024), &items, &files);
    assert_eq!(aspects[0].aspek, "A");
    assert_eq!(aspects[0].progress, 100);
    assert_eq!(aspects[1].aspek, "B");
    assert_eq!(aspects[1].progress, 50);
}

#[test]
fn malformed_rows_are_skipped_not_fatal() {
    let rows = vec![
        json!({"id": 1, "aspek": "A", "deskripsi": "ok", "tahun": 2024}),
        json!({"id": "not-a-number"}),
        json!(42),
    ];
    let items: Vec<ChecklistItem> = decode_rows("checklists", &rows);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, 1);
}

#[test]
fn non_array_collection_is_an_explicit_error() {
    let err = decode_collection::<ChecklistItem>("checklists", &json!({"oops": true}))
        .unwrap_err();
    assert!(matches!(err, AggregationError::NotAnArray(_)));

    let ok = decode_collection::<ChecklistItem>("checklists", &json!([])).unwrap();
    assert!(ok.is_empty());
}
