//! Loading `sources.yaml` from disk.

use std::fs;
use std::time::Duration;

use acquisition::{AcquisitionConfig, ConfigError};
use radar_common::GeoBounds;
use tempfile::tempdir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();

    let config = AcquisitionConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(config, AcquisitionConfig::default());
}

#[test]
fn test_load_from_dir_reads_sources_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("sources.yaml"),
        r#"
product: RALA
candidates:
  - "https://mirror.example/rala.grib2.gz"
  - "https://backup.example/"
probe_timeout_secs: 3
overall_deadline_secs: 8
bounds:
  north: 42.0
  south: 36.0
  west: -110.0
  east: -100.0
"#,
    )
    .unwrap();

    let config = AcquisitionConfig::load_from_dir(dir.path()).unwrap();
    assert_eq!(
        config.candidates,
        vec!["https://mirror.example/rala.grib2.gz", "https://backup.example/"]
    );
    assert_eq!(config.probe_timeout(), Duration::from_secs(3));
    assert_eq!(config.overall_deadline(), Some(Duration::from_secs(8)));
    assert_eq!(config.update_interval(), Duration::from_secs(120));
    assert_ne!(config.geo_bounds().unwrap(), GeoBounds::conus());
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sources.yaml");
    fs::write(&path, "candidates: [unterminated\n").unwrap();

    let err = AcquisitionConfig::load_from_dir(dir.path()).unwrap_err();
    match err {
        ConfigError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_zero_timeout_rejected_on_load() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("sources.yaml"), "probe_timeout_secs: 0\n").unwrap();

    assert!(matches!(
        AcquisitionConfig::load_from_dir(dir.path()),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_inverted_bounds_rejected_on_load() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("sources.yaml"),
        "bounds:\n  north: 25.0\n  south: 49.0\n  west: -125.0\n  east: -67.0\n",
    )
    .unwrap();

    assert!(matches!(
        AcquisitionConfig::load_from_dir(dir.path()),
        Err(ConfigError::Bounds(_))
    ));
}

#[test]
fn test_load_missing_path_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert!(matches!(
        AcquisitionConfig::load(&path),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_shipped_config_is_valid() {
    let dir = std::path::Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../config"));

    let config = AcquisitionConfig::load_from_dir(dir).unwrap();
    assert_eq!(config.candidates.len(), 3);
    assert_eq!(config.geo_bounds().unwrap(), GeoBounds::conus());
}
