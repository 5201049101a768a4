//! Integration tests for Sheetset.

use std::fs;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use sheetset::source::{CsvDirSource, MemorySource};
use sheetset::store::{JsonDirStore, MemoryDatasetStore, MemoryMetadataStore};
use sheetset::{
    ApprovalModel, Cell, ColumnType, DatasetService, HeaderSelection, InferenceConfig,
    SheetsetConfig, SourceType,
};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn memory_service(source: MemorySource) -> DatasetService {
    DatasetService::new(
        Arc::new(MemoryDatasetStore::new()),
        Arc::new(MemoryMetadataStore::new()),
        Arc::new(source),
    )
}

/// Service over a JSON store and CSV files, both in `dir`.
fn disk_service(dir: &TempDir) -> DatasetService {
    let store = Arc::new(JsonDirStore::new(dir.path().join("store")));
    DatasetService::new(
        store.clone(),
        store,
        Arc::new(CsvDirSource::new().with_root(dir.path().join("data"))),
    )
}

fn write_data(dir: &TempDir, name: &str, content: &str) {
    let data = dir.path().join("data");
    fs::create_dir_all(&data).expect("Failed to create data dir");
    fs::write(data.join(name), content).expect("Failed to write data file");
}

// =============================================================================
// Ingestion
// =============================================================================

#[test]
fn test_ingest_scenario_grid() {
    let source = MemorySource::new(SourceType::GoogleWorksheet).with_sheet(
        "doc",
        "People",
        vec![
            row(&["Name", "Age"]),
            row(&["Alice", "30"]),
            row(&["Bob", "[1,2,3]"]),
        ],
    );
    let service = memory_service(source);
    let created = service.ingest("doc").expect("Ingest failed");

    let metadata = &created[0];
    assert_eq!(metadata.header[0].title, "Name");
    assert_eq!(metadata.header[1].title, "Age");
    assert_eq!(metadata.header[1].col_type, ColumnType::StringArray);
    assert_eq!(metadata.examples[0][1], Cell::strings(vec!["30".to_string()]));
    assert_eq!(
        metadata.examples[1][1],
        Cell::strings(vec!["[1,2,3]".to_string()])
    );
}

#[test]
fn test_ingest_csv_directory_to_json_store() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, "a_vectors.csv", "vec,label\n\"[1, 2]\",x\n\"[3,4,5]\",y\n");
    write_data(&dir, "b_scores.tsv", "score\tname\n1.5\tann\n-2\tbo\n");
    write_data(&dir, "notes.md", "# not a sheet\n");

    let service = disk_service(&dir);
    let created = service.ingest(".").expect("Ingest failed");
    assert_eq!(created.len(), 2);

    let vectors = &created[0];
    assert_eq!(vectors.name, "a_vectors");
    assert_eq!(vectors.source_type, SourceType::UploadedFile);
    assert_eq!(vectors.header[0].col_type, ColumnType::NumberArray);
    assert_eq!(vectors.examples[0][0], Cell::numbers(vec![1.0, 2.0]));
    assert_eq!(vectors.examples[1][0], Cell::numbers(vec![3.0, 4.0, 5.0]));

    let scores = &created[1];
    assert_eq!(scores.header[0].col_type, ColumnType::NumberArray);
    assert_eq!(scores.header[1].col_type, ColumnType::StringArray);

    let stored = dir.path().join("store").join("metadata");
    assert_eq!(fs::read_dir(stored).unwrap().count(), 2);
}

#[test]
fn test_ingest_header_rejected_keeps_first_row() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, "raw.csv", "1,2\n3,4\n");

    let service = disk_service(&dir);
    let created = service.ingest("raw.csv").expect("Ingest failed");

    // "1" and "2" match the title pattern, so the row is still a header
    assert_eq!(created[0].header[0].title, "1");
    assert_eq!(created[0].size, 1);

    write_data(&dir, "odd.csv", "a-b,c\n3,4\n");
    let created = service.ingest("odd.csv").expect("Ingest failed");
    assert_eq!(created[0].header[0].title, "column-1");
    assert_eq!(created[0].header[1].title, "column-2");
    assert_eq!(created[0].size, 2);
    assert_eq!(created[0].header[0].col_type, ColumnType::StringArray);
}

#[test]
fn test_ingest_strict_numbers() {
    let source = MemorySource::new(SourceType::UploadedFile).with_sheet(
        "doc",
        "S",
        vec![row(&["v"]), row(&["1,5"]), row(&["2"])],
    );

    let lenient = memory_service(source.clone());
    let created = lenient.ingest("doc").unwrap();
    assert_eq!(created[0].header[0].col_type, ColumnType::NumberArray);
    assert_eq!(created[0].examples[0][0], Cell::numbers(vec![0.0]));

    let strict = memory_service(source).with_config(
        SheetsetConfig::new().with_inference(InferenceConfig::new().with_strict_numbers(true)),
    );
    let created = strict.ingest("doc").unwrap();
    assert_eq!(created[0].header[0].col_type, ColumnType::StringArray);
}

// =============================================================================
// Approve, Read, List
// =============================================================================

#[test]
fn test_full_lifecycle_on_disk() {
    let dir = TempDir::new().unwrap();
    write_data(
        &dir,
        "houses.csv",
        "rooms,city,price\n3,Oslo,100\n4,Bergen,150\n2,Oslo,90\n5,Tromso,200\n1,Bergen,60\n",
    );

    let service = disk_service(&dir);
    let created = service.ingest("houses.csv").unwrap().remove(0);
    assert!(service.list(None, 10).unwrap().is_empty());

    let model = ApprovalModel::new(
        "houses",
        vec![
            HeaderSelection::new(2, 1, "price").with_output(true),
            HeaderSelection::new(0, 0, "rooms"),
        ],
    );
    let approved = service.approve(&created.id, &model).unwrap();
    assert_eq!(approved.id, created.id);
    assert!(!approved.is_temporary);
    assert_eq!(approved.header.len(), 2);
    assert_eq!(approved.header[0].title, "rooms");
    assert_eq!(approved.header[1].title, "price");
    assert_eq!(approved.header[1].origin_index, 2);

    let listed = service.list(None, 10).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "houses");

    let page = service.read(&created.id, 1, 4).unwrap();
    assert_eq!(page.row_count(), 3);
    assert_eq!(page.body[0][0], Cell::numbers(vec![4.0]));
    assert_eq!(page.body[0][1], Cell::numbers(vec![150.0]));

    assert_eq!(service.read(&created.id, 2, 1).unwrap().row_count(), 0);
}

#[test]
fn test_approve_idempotent_through_store() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, "t.csv", "a,b,c\n1,x,[1]\n2,y,[2]\n");
    let service = disk_service(&dir);
    let created = service.ingest("t.csv").unwrap().remove(0);

    let first = ApprovalModel::new(
        "t",
        vec![HeaderSelection::new(2, 0, "c"), HeaderSelection::new(1, 1, "b")],
    );
    service.approve(&created.id, &first).unwrap();
    let before = service.read(&created.id, 0, 100).unwrap();

    let second = ApprovalModel::new(
        "t",
        vec![HeaderSelection::new(0, 0, "c"), HeaderSelection::new(1, 1, "b")],
    );
    service.approve(&created.id, &second).unwrap();
    let after = service.read(&created.id, 0, 100).unwrap();

    assert_eq!(before.header, after.header);
    assert_eq!(before.body, after.body);
}

#[test]
fn test_approve_drops_unknown_origin() {
    let source = MemorySource::new(SourceType::UploadedFile)
        .with_sheet("d", "S", vec![row(&["a", "b"]), row(&["1", "2"])]);
    let service = memory_service(source);
    let created = service.ingest("d").unwrap().remove(0);

    let model = ApprovalModel::new(
        "s",
        vec![HeaderSelection::new(9, 0, "ghost"), HeaderSelection::new(1, 1, "b")],
    );
    let approved = service.approve(&created.id, &model).unwrap();
    assert_eq!(approved.header.len(), 1);
    assert_eq!(approved.header[0].title, "b");
}

#[test]
fn test_list_pages_with_cursor() {
    let mut source = MemorySource::new(SourceType::UploadedFile);
    for i in 0..5 {
        source = source.with_sheet("d", format!("S{i}"), vec![row(&["a"]), row(&["1"])]);
    }
    let service = memory_service(source);

    for metadata in service.ingest("d").unwrap() {
        let model = ApprovalModel::new(
            metadata.name.clone(),
            vec![HeaderSelection::new(0, 0, "a")],
        );
        service.approve(&metadata.id, &model).unwrap();
    }

    let first = service.list(None, 2).unwrap();
    assert_eq!(first.len(), 2);
    let second = service.list(Some(&first[1].id), 2).unwrap();
    assert_eq!(second.len(), 2);
    let third = service.list(Some(&second[1].id), 2).unwrap();
    assert_eq!(third.len(), 1);

    let mut ids: Vec<String> = first
        .iter()
        .chain(&second)
        .chain(&third)
        .map(|m| m.id.clone())
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

// =============================================================================
// Archive and Sweep
// =============================================================================

#[test]
fn test_archive_and_sweep_on_disk() {
    let dir = TempDir::new().unwrap();
    write_data(&dir, "keep.csv", "a\n1\n");
    write_data(&dir, "drop.csv", "a\n2\n");

    let service = disk_service(&dir);
    let keep = service.ingest("keep.csv").unwrap().remove(0);
    let drop = service.ingest("drop.csv").unwrap().remove(0);

    let model = ApprovalModel::new("keep", vec![HeaderSelection::new(0, 0, "a")]);
    service.approve(&keep.id, &model).unwrap();
    service.archive(&keep.id).unwrap();
    assert!(service.list(None, 10).unwrap().is_empty());

    let report = service.sweep_expired_at(Utc::now() + Duration::hours(1));
    assert_eq!(report.removed, vec![drop.id.clone()]);
    assert_eq!(service.metadata(&drop.id).unwrap_err().reason(), "not-found");

    let report = service.sweep_expired_at(Utc::now() + Duration::days(45));
    assert_eq!(report.removed, vec![keep.id.clone()]);
    assert!(report.is_clean());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_error_reasons() {
    let dir = TempDir::new().unwrap();
    let service = disk_service(&dir);

    assert_eq!(
        service.ingest("missing.csv").unwrap_err().reason(),
        "source-unavailable"
    );
    assert_eq!(service.read("nope", 0, 10).unwrap_err().reason(), "not-found");
    assert_eq!(service.list(None, 0).unwrap_err().reason(), "bad-model");
    assert_eq!(service.archive("nope").unwrap_err().reason(), "not-found");

    write_data(&dir, "header_only.csv", "a,b\n");
    assert_eq!(
        service.ingest("header_only.csv").unwrap_err().reason(),
        "no-values"
    );
}
