use std::path::Path;

use super::*;
use tempfile::TempDir;

struct AcceptAllFilter;

impl FileFilter for AcceptAllFilter {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

struct TifOnlyFilter;

impl FileFilter for TifOnlyFilter {
    fn should_include(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "tif")
    }
}

fn names(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

// =============================================================================
// Basic DirectoryScanner Tests
// =============================================================================

#[test]
fn scanner_finds_files_in_directory() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("a.tif"), "").unwrap();
    std::fs::write(temp_dir.path().join("b.csv"), "").unwrap();

    let scanner = DirectoryScanner::new(temp_dir.path(), AcceptAllFilter);
    let files: Vec<_> = scanner.scan().collect();

    assert_eq!(names(&files), vec!["a.tif", "b.csv"]);
}

#[test]
fn scanner_non_recursive_skips_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    let sub_dir = temp_dir.path().join("day1");
    std::fs::create_dir(&sub_dir).unwrap();
    std::fs::write(sub_dir.join("nested.tif"), "").unwrap();
    std::fs::write(temp_dir.path().join("top.tif"), "").unwrap();

    let scanner = DirectoryScanner::new(temp_dir.path(), AcceptAllFilter);
    let files: Vec<_> = scanner.scan().collect();

    assert_eq!(names(&files), vec!["top.tif"]);
}

#[test]
fn scanner_recursive_finds_nested_files() {
    let temp_dir = TempDir::new().unwrap();
    let sub_dir = temp_dir.path().join("day1").join("run2");
    std::fs::create_dir_all(&sub_dir).unwrap();
    std::fs::write(sub_dir.join("nested.tif"), "").unwrap();
    std::fs::write(temp_dir.path().join("top.tif"), "").unwrap();

    let scanner = DirectoryScanner::new(temp_dir.path(), AcceptAllFilter).recursive(true);
    let files: Vec<_> = scanner.scan().collect();

    assert_eq!(files.len(), 2);
    assert!(files.iter().any(|f| f.ends_with("day1/run2/nested.tif")));
    assert!(files.iter().any(|f| f.ends_with("top.tif")));
}

#[test]
fn scanner_yields_only_regular_files() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("folder.tif")).unwrap();
    std::fs::write(temp_dir.path().join("frame.tif"), "").unwrap();

    let scanner = DirectoryScanner::new(temp_dir.path(), AcceptAllFilter).recursive(true);
    let files: Vec<_> = scanner.scan().collect();

    assert_eq!(names(&files), vec!["frame.tif"]);
}

#[test]
fn scanner_respects_filter() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("test.tif"), "").unwrap();
    std::fs::write(temp_dir.path().join("test.txt"), "").unwrap();

    let scanner = DirectoryScanner::new(temp_dir.path(), TifOnlyFilter);
    let files: Vec<_> = scanner.scan().collect();

    assert_eq!(names(&files), vec!["test.tif"]);
}

#[test]
fn scanner_with_path_matcher_excludes_by_basename() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["x.tif", "y.tif", "z.txt"] {
        std::fs::write(temp_dir.path().join(name), "").unwrap();
    }

    let matcher = PathMatcher::new(None, Some("z.*"), PatternSyntax::Regex).unwrap();
    let scanner = DirectoryScanner::new(temp_dir.path(), matcher);
    let files: Vec<_> = scanner.scan().collect();

    assert_eq!(names(&files), vec!["x.tif", "y.tif"]);
}

#[test]
fn scanner_rescans_on_every_call() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("first.tif"), "").unwrap();

    let scanner = DirectoryScanner::new(temp_dir.path(), AcceptAllFilter);
    assert_eq!(scanner.scan().count(), 1);

    std::fs::write(temp_dir.path().join("second.tif"), "").unwrap();
    assert_eq!(scanner.scan().count(), 2);
}

#[test]
fn scanner_missing_root_yields_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("not-there");

    let scanner = DirectoryScanner::new(&missing, AcceptAllFilter);

    assert_eq!(scanner.scan().count(), 0);
    assert_eq!(scanner.root(), missing.as_path());
}
