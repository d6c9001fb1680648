//! Radar viewer.
//!
//! A [`RefreshController`] pulls the latest record from a
//! [`RecordSource`](acquisition::RecordSource), renders it and hands the
//! result to its [`CycleObserver`]s, immediately on start and then on a
//! fixed interval.

pub mod client;
pub mod error;
pub mod observer;
pub mod refresh;

pub use client::ApiClient;
pub use error::{ClientError, FrameError};
pub use observer::{CycleObserver, CycleReport, CycleTrigger, FrameWriter, LogObserver};
pub use refresh::{RefreshController, RefreshState, DEFAULT_INTERVAL};
