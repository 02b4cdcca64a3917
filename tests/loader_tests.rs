//! Integration tests for the membership-record loader.
//!
//! Run with: `cargo test --features std`

#![cfg(feature = "std")]

use std::fs;
use std::path::PathBuf;

use temporal_communities::loader::{load_files, LoadError};
use temporal_communities::report::Summary;
use temporal_communities::{temporal_communities, MatchConfig, Node};

// ─── helpers ─────────────────────────────────────────────────────────────────

/// Write one file per day into a fresh temporary directory.
fn write_days(days: &[&str]) -> (tempfile::TempDir, Vec<PathBuf>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let paths = days
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let path = dir.path().join(format!("community_tags{}_2015_list.txt", i + 1));
            fs::write(&path, body).expect("write day file");
            path
        })
        .collect();
    (dir, paths)
}

// ─── tests ───────────────────────────────────────────────────────────────────

#[test]
fn tags_are_shared_across_days() {
    let (_dir, paths) = write_days(&[
        "1, 0, #rust\n1, 0, #cargo\n1, 1, #python\n",
        "2, 5, #python\n2, 3, #cargo\n2, 3, #rust\n",
    ]);
    let (series, tags) = load_files(&paths).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(tags.len(), 3);
    let rust_day1 = series[0].get(&"0".to_string()).unwrap();
    let rust_day2 = series[1].get(&"3".to_string()).unwrap();
    assert_eq!(rust_day1, rust_day2);
}

#[test]
fn loaded_days_match_end_to_end() {
    let (_dir, paths) = write_days(&[
        "1, 0, a\n1, 0, b\n1, 0, c\n1, 1, x\n1, 1, y\n",
        "2, 7, a\n2, 7, b\n2, 8, x\n2, 8, y\n2, 8, z\n",
        "3, 2, a\n3, 2, b\n3, 2, c\n3, 4, y\n3, 4, z\n",
    ]);
    let (series, _) = load_files(&paths).unwrap();
    let found = temporal_communities(&series, &MatchConfig::default()).unwrap();
    assert_eq!(found.len(), 2);
    let abc = found
        .iter()
        .find(|c| c.contains(&Node::new(0, "0".to_string())))
        .unwrap();
    assert!(abc.contains(&Node::new(1, "7".to_string())));
    assert!(abc.contains(&Node::new(2, "2".to_string())));

    let summary = Summary::from_communities(&found, 20);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.longest, 3);
}

#[test]
fn daily_summary_counts_linked_communities_only() {
    let (_dir, paths) = write_days(&[
        "1, 0, a\n1, 0, b\n1, 0, c\n1, 1, x\n1, 1, y\n",
        "2, 7, a\n2, 7, b\n2, 9, q\n",
        "3, 2, a\n3, 2, b\n3, 2, c\n3, 5, r\n",
    ]);
    let (series, _) = load_files(&paths).unwrap();

    let linked = MatchConfig::with_memory(2).with_singletons(false);
    let found = temporal_communities(&series, &linked).unwrap();
    let summary = Summary::from_communities(&found, 20);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.longest, 3);
    assert_eq!(summary.histogram.total(), 1);

    // the three unlinked groups only show up when singletons are kept
    let all = temporal_communities(&series, &MatchConfig::with_memory(2)).unwrap();
    assert_eq!(Summary::from_communities(&all, 20).count, 4);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_files([dir.path().join("absent.txt")]).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }), "{err}");
}

#[test]
fn malformed_line_reports_position() {
    let (_dir, paths) = write_days(&["1, 0, a\n1; 0; b\n"]);
    let err = load_files(&paths).unwrap_err();
    let msg = err.to_string();
    assert!(msg.ends_with("expected 3 comma-separated fields, found 1"), "{msg}");
    assert!(msg.contains(":2:"), "{msg}");
}
