use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::cli::HandlerSpec;

#[test]
fn load_config_skipped_with_no_config() {
    let config = load_config(Some(Path::new("/does/not/exist.toml")), true).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_config_reads_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("watch.toml");
    std::fs::write(&path, "[watch]\nmax_files = 4\n").unwrap();

    let config = load_config(Some(&path), false).unwrap();
    assert_eq!(config.watch.max_files, Some(4));
}

#[test]
fn load_config_missing_explicit_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.toml");
    assert!(matches!(
        load_config(Some(&path), false),
        Err(AutoError::FileRead { .. })
    ));
}

#[test]
fn empty_overrides_leave_config_untouched() {
    let mut config = Config::default();
    config.watch.include = Some("sample-".to_string());
    let before = config.clone();

    apply_overrides(&mut config, &WatchOverrides::default());
    assert_eq!(config, before);
}

#[test]
fn overrides_replace_file_values() {
    let mut config = Config::default();
    config.watch.include = Some("sample-".to_string());
    config
        .handlers
        .insert("csv".to_string(), vec!["cat".to_string()]);

    let overrides = WatchOverrides {
        root: Some(PathBuf::from("incoming")),
        recursive: true,
        include: Some("*.csv".to_string()),
        exclude: Some("tmp*".to_string()),
        glob: true,
        interval: Some(0.5),
        max_time: Some(30.0),
        max_files: Some(9),
        handlers: vec![
            HandlerSpec {
                extension: "csv".to_string(),
                argv: vec!["wc".to_string(), "-l".to_string()],
            },
            HandlerSpec {
                extension: "tif".to_string(),
                argv: vec!["identify".to_string()],
            },
        ],
    };
    apply_overrides(&mut config, &overrides);

    let watch = &config.watch;
    assert_eq!(watch.root, PathBuf::from("incoming"));
    assert!(watch.recursive);
    assert_eq!(watch.include.as_deref(), Some("*.csv"));
    assert_eq!(watch.exclude.as_deref(), Some("tmp*"));
    assert_eq!(watch.syntax, PatternSyntax::Glob);
    assert!((watch.poll_interval_secs - 0.5).abs() < f64::EPSILON);
    assert!((watch.max_elapsed_secs - 30.0).abs() < f64::EPSILON);
    assert_eq!(watch.max_files, Some(9));
    assert_eq!(config.handlers["csv"], vec!["wc", "-l"]);
    assert_eq!(config.handlers["tif"], vec!["identify"]);
}

#[test]
fn resolve_config_validates_after_overrides() {
    let overrides = WatchOverrides {
        max_time: Some(-1.0),
        ..WatchOverrides::default()
    };
    assert!(matches!(
        resolve_config(None, true, &overrides),
        Err(AutoError::Config(_))
    ));
}
