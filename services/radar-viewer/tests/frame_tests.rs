//! FrameWriter output files.

use std::sync::Arc;
use std::time::Duration;

use acquisition::RecordSource;
use async_trait::async_trait;
use chrono::Utc;
use radar_common::{GeoBounds, RadarRecord};
use radar_viewer::{FrameWriter, RefreshController};

struct StaticSource;

#[async_trait]
impl RecordSource for StaticSource {
    async fn latest(&self) -> RadarRecord {
        RadarRecord::sample("RALA", GeoBounds::conus(), Utc::now(), "offline")
    }
}

fn controller(writer: FrameWriter) -> RefreshController {
    RefreshController::new(Arc::new(StaticSource), 200, 140, Duration::from_secs(120))
        .with_observer(Arc::new(writer))
}

#[tokio::test]
async fn test_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FrameWriter::new(dir.path(), false);
    let report = controller(writer.clone()).trigger_now().await;

    let paths = writer.write(&report).await.unwrap();
    assert_eq!(paths, vec![dir.path().join("radar.png")]);

    let bytes = std::fs::read(dir.path().join("radar.png")).unwrap();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    assert!(!dir.path().join("radar.svg").exists());
}

#[tokio::test]
async fn test_writes_svg_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let writer = FrameWriter::new(dir.path(), true);
    controller(writer).trigger_now().await;

    let svg = std::fs::read_to_string(dir.path().join("radar.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(dir.path().join("radar.png").exists());
}

#[tokio::test]
async fn test_creates_missing_directory_and_leaves_no_temp_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("frames/latest");
    controller(FrameWriter::new(&out, true)).trigger_now().await;

    let mut names: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["radar.png", "radar.svg"]);
}
