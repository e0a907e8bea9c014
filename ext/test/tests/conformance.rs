//! Conformance tests that run YAML fixtures against sucre
//!
//! Run with: cargo test -p sucre-test --test conformance

#![cfg(feature = "fixtures")]

use std::fs;
use std::path::{Path, PathBuf};
use sucre_test::fixture::Fixture;

/// Get the fixtures directory at the workspace root
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let ext_test = Path::new(manifest_dir);

    // Go up: ext/test -> ext -> workspace root
    let root = ext_test
        .parent()
        .and_then(Path::parent)
        .expect("Could not find workspace root");

    root.join("fixtures")
}

/// Load and run all fixtures in a directory
fn run_fixtures_in_dir(dir: &Path) {
    assert!(dir.exists(), "Fixtures directory does not exist: {}", dir.display());

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|e| e == "yaml" || e == "yml"))
        .collect();
    paths.sort();
    assert!(!paths.is_empty(), "No fixtures in {}", dir.display());

    for path in paths {
        println!("Running fixture: {}", path.display());

        let yaml = fs::read_to_string(&path).expect("read yaml");

        // Parse potentially multiple fixtures (separated by ---)
        let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {}", path.display(), e);
        });

        for fixture in fixtures {
            println!("  Running: {}", fixture.name);
            fixture.run_and_assert();
        }
    }
}

#[test]
fn test_indexing() {
    run_fixtures_in_dir(&fixtures_dir().join("01_indexing"));
}

#[test]
fn test_format() {
    run_fixtures_in_dir(&fixtures_dir().join("02_format"));
}

#[test]
fn test_case() {
    run_fixtures_in_dir(&fixtures_dir().join("03_case"));
}

#[test]
fn test_query() {
    run_fixtures_in_dir(&fixtures_dir().join("04_query"));
}

#[test]
fn test_codec() {
    run_fixtures_in_dir(&fixtures_dir().join("05_codec"));
}
