//! Cycle results and the observers that consume them.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use radar_common::{RadarRecord, RadarStatus};
use renderer::{raster, svg, DrawOp};
use tracing::{error, info, warn};

use crate::error::FrameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTrigger {
    /// Fired by the polling schedule, including the immediate one on start.
    Scheduled,
    /// Requested through `trigger_now`.
    Manual,
}

impl fmt::Display for CycleTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleTrigger::Scheduled => write!(f, "scheduled"),
            CycleTrigger::Manual => write!(f, "manual"),
        }
    }
}

/// The outcome of one acquire-and-render cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    /// Sequence number, assigned when the cycle starts.
    pub cycle: u64,
    pub trigger: CycleTrigger,
    pub record: RadarRecord,
    pub width: u32,
    pub height: u32,
    pub operations: Vec<DrawOp>,
    pub completed_at: DateTime<Utc>,
}

impl CycleReport {
    /// User-facing status text, e.g. "Live Data".
    pub fn status_line(&self) -> String {
        self.record.status_line()
    }
}

/// Receives every completed cycle. Must not fail; problems are logged.
#[async_trait]
pub trait CycleObserver: Send + Sync {
    async fn on_cycle(&self, report: &CycleReport);
}

/// Logs a status line per cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

#[async_trait]
impl CycleObserver for LogObserver {
    async fn on_cycle(&self, report: &CycleReport) {
        let record = &report.record;
        match record.status() {
            RadarStatus::Live => info!(
                cycle = report.cycle,
                trigger = %report.trigger,
                url = record.source_url().unwrap_or_default(),
                timestamp = %record.timestamp(),
                "{}",
                report.status_line()
            ),
            RadarStatus::Sample => warn!(
                cycle = report.cycle,
                trigger = %report.trigger,
                "{}",
                report.status_line()
            ),
            RadarStatus::Error => error!(
                cycle = report.cycle,
                trigger = %report.trigger,
                "{}",
                report.status_line()
            ),
        }
    }
}

/// Writes each frame to `radar.png` (and optionally `radar.svg`) in a
/// directory, replacing the previous frame atomically.
#[derive(Debug, Clone)]
pub struct FrameWriter {
    dir: PathBuf,
    svg: bool,
}

impl FrameWriter {
    pub const PNG_NAME: &'static str = "radar.png";
    pub const SVG_NAME: &'static str = "radar.svg";

    pub fn new(dir: impl Into<PathBuf>, svg: bool) -> Self {
        Self {
            dir: dir.into(),
            svg,
        }
    }

    pub fn png_path(&self) -> PathBuf {
        self.dir.join(Self::PNG_NAME)
    }

    pub fn svg_path(&self) -> PathBuf {
        self.dir.join(Self::SVG_NAME)
    }

    /// Write the frame, returning the paths written.
    pub async fn write(&self, report: &CycleReport) -> Result<Vec<PathBuf>, FrameError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| FrameError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let (width, height) = (report.width, report.height);
        let operations = report.operations.clone();
        let with_svg = self.svg;
        let (png, svg_doc) = tokio::task::spawn_blocking(move || {
            let png = raster::render_png(width, height, &operations)?;
            let svg_doc = with_svg.then(|| svg::to_svg(width, height, &operations));
            Ok::<_, FrameError>((png, svg_doc))
        })
        .await
        .map_err(|e| FrameError::Task(e.to_string()))??;

        let mut written = Vec::with_capacity(2);
        let png_path = self.png_path();
        write_atomic(&png_path, &png).await?;
        written.push(png_path);

        if let Some(doc) = svg_doc {
            let svg_path = self.svg_path();
            write_atomic(&svg_path, doc.as_bytes()).await?;
            written.push(svg_path);
        }

        Ok(written)
    }
}

#[async_trait]
impl CycleObserver for FrameWriter {
    async fn on_cycle(&self, report: &CycleReport) {
        match self.write(report).await {
            Ok(paths) => info!(cycle = report.cycle, files = paths.len(), "Frame written"),
            Err(e) => error!(cycle = report.cycle, error = %e, "Failed to write frame"),
        }
    }
}

/// Write to a hidden sibling temp file, then rename over the target.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), FrameError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.tmp", name));

    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|source| FrameError::Io {
            path: tmp.clone(),
            source,
        })?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|source| FrameError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}
