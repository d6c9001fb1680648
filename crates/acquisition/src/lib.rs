//! Radar data acquisition.
//!
//! Finds a live MRMS feed by probing an ordered list of candidate URLs
//! and falls back to a synthetic sample record when none answers.
//!
//! # Architecture
//!
//! - [`SourceProbe`]: one liveness check against one URL ([`HttpProbe`] in production)
//! - [`Resolver`]: ordered, short-circuiting scan over the candidates
//! - [`SampleSynthesizer`]: builds sample records without any I/O
//! - [`RadarService`]: resolver with sample fallback; never fails

pub mod config;
pub mod error;
pub mod probe;
pub mod resolver;
pub mod sample;
pub mod service;

pub use config::{AcquisitionConfig, BoundsExtent};
pub use error::{ConfigError, ResolveError};
pub use probe::{HttpProbe, ProbeOutcome, SourceProbe, Unreachable};
pub use resolver::{ProbeAttempt, ProbeSummary, Resolution, Resolver};
pub use sample::SampleSynthesizer;
pub use service::{ProbePlan, RadarService, RecordSource, NO_REACHABLE_SOURCE};
