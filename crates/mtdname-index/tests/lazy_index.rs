//! Lazy build and caching behaviour of `MtdIndex` against real table files

use mtdname_index::{parse_target_string, MtdIndex, MtdIndexConfig, MtdIndexError};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

const SCENARIO_A: &str = "dev:    size   erasesize  name
mtd0: 00080000 00010000 \"bios\"
mtd1: 00040000 00010000 \"u-boot-env\"
";

fn table_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("mtd")
}

fn index_at(path: &Path) -> MtdIndex {
    MtdIndex::new(&MtdIndexConfig::with_source(path))
}

#[test]
fn test_resolve_scenario_a() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, SCENARIO_A).unwrap();

    let index = index_at(&path);
    assert!(!index.is_built());
    assert_eq!(index.resolve("bios").unwrap(), 0);
    assert_eq!(index.resolve("u-boot-env").unwrap(), 1);
    assert!(index.is_built());

    let err = index.resolve("missing").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, MtdIndexError::NotFound(ref name) if name == "missing"));
}

#[test]
fn test_cached_after_source_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, SCENARIO_A).unwrap();

    let index = index_at(&path);
    assert_eq!(index.resolve("bios").unwrap(), 0);

    fs::remove_file(&path).unwrap();
    assert_eq!(index.resolve("bios").unwrap(), 0);
    assert_eq!(index.resolve("u-boot-env").unwrap(), 1);
    assert!(index.resolve("missing").unwrap_err().is_not_found());
}

#[test]
fn test_table_changes_not_observed() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, SCENARIO_A).unwrap();

    let index = index_at(&path);
    assert_eq!(index.resolve("bios").unwrap(), 0);

    fs::write(&path, "mtd7: 00080000 00010000 \"bios\"\n").unwrap();
    assert_eq!(index.resolve("bios").unwrap(), 0);
}

#[test]
fn test_open_failure_is_retried() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);

    let index = index_at(&path);
    let err = index.resolve("bios").unwrap_err();
    assert!(err.is_io());
    assert!(!index.is_built());

    fs::write(&path, SCENARIO_A).unwrap();
    assert_eq!(index.resolve("bios").unwrap(), 0);
    assert!(index.is_built());
}

#[test]
fn test_parse_failure_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(
        &path,
        "dev:    size   erasesize  name\n\
         mtd0: 00080000 00010000 \"bios\"\n\
         mtdX: 00080000 00010000 \"bad\"\n",
    )
    .unwrap();

    let index = index_at(&path);

    // Entries before the bad line are not served either
    let err = index.resolve("bios").unwrap_err();
    assert!(err.is_parse());
    assert!(!err.is_not_found());
    let err = index.resolve("bad").unwrap_err();
    assert!(err.is_parse());
    assert!(!index.is_built());

    fs::write(&path, SCENARIO_A).unwrap();
    assert_eq!(index.resolve("bios").unwrap(), 0);
}

#[test]
fn test_directory_source_is_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let index = index_at(dir.path());
    let err = index.resolve("bios").unwrap_err();
    assert!(err.is_io());
    assert!(!index.is_built());
}

#[test]
fn test_invalidate_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, SCENARIO_A).unwrap();

    let index = index_at(&path);
    let before = index.snapshot().unwrap();
    assert_eq!(before.get("bios"), Some(0));

    fs::write(&path, "mtd3: 00080000 00010000 \"bios\"\n").unwrap();
    index.invalidate();
    assert!(!index.is_built());
    assert_eq!(index.resolve("bios").unwrap(), 3);

    // Old handles keep their snapshot
    assert_eq!(before.get("bios"), Some(0));

    fs::write(&path, "mtd5: 00080000 00010000 \"bios\"\n").unwrap();
    let reloaded = index.reload().unwrap();
    assert_eq!(reloaded.get("bios"), Some(5));
    assert_eq!(index.resolve("bios").unwrap(), 5);

    fs::remove_file(&path).unwrap();
    assert!(index.reload().unwrap_err().is_io());
    assert!(!index.is_built());
}

#[test]
fn test_concurrent_first_use_builds_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, SCENARIO_A).unwrap();

    let index = Arc::new(index_at(&path));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.snapshot().unwrap())
        })
        .collect();

    let snapshots: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for snapshot in &snapshots[1..] {
        assert!(Arc::ptr_eq(&snapshots[0], snapshot));
    }
    assert_eq!(snapshots[0].get("u-boot-env"), Some(1));
}

#[test]
fn test_target_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, SCENARIO_A).unwrap();

    let index = index_at(&path);
    assert_eq!(
        parse_target_string("name=u-boot-env")
            .unwrap()
            .resolve(&index)
            .unwrap(),
        1
    );
    assert_eq!(
        parse_target_string("dev=0").unwrap().resolve(&index).unwrap(),
        0
    );
    assert!(parse_target_string("dev=9")
        .unwrap()
        .resolve(&index)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_dev_target_with_reused_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    fs::write(&path, "mtd0: 1000 1000 \"fw\"\nmtd1: 1000 1000 \"fw\"\n").unwrap();

    let index = index_at(&path);
    assert_eq!(index.resolve("fw").unwrap(), 1);
    assert_eq!(
        parse_target_string("dev=0").unwrap().resolve(&index).unwrap(),
        0
    );
    assert_eq!(
        parse_target_string("dev=1").unwrap().resolve(&index).unwrap(),
        1
    );
}

#[test]
fn test_non_utf8_name_keeps_other_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let path = table_path(&dir);
    let mut table = SCENARIO_A.as_bytes().to_vec();
    table.extend_from_slice(b"mtd2: 00010000 00010000 \"caf\xe9\"\n");
    fs::write(&path, table).unwrap();

    let index = index_at(&path);
    assert_eq!(index.resolve("bios").unwrap(), 0);
    assert_eq!(index.resolve("caf\u{fffd}").unwrap(), 2);
}
