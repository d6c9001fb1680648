//! The never-failing radar service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use radar_common::RadarRecord;
use tracing::{error, info, instrument, warn};

use crate::config::AcquisitionConfig;
use crate::error::{ConfigError, ResolveError};
use crate::probe::SourceProbe;
use crate::resolver::{ProbeSummary, Resolution, Resolver};
use crate::sample::SampleSynthesizer;

/// Prefix of the message on records synthesized because nothing answered.
pub const NO_REACHABLE_SOURCE: &str = "no reachable source";

/// Anything that can hand out the latest radar record.
///
/// Implementations never fail; trouble is reported through the record's
/// status and message.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn latest(&self) -> RadarRecord;
}

/// The fixed inputs of every scan.
#[derive(Debug, Clone)]
pub struct ProbePlan {
    pub candidates: Vec<String>,
    pub probe_timeout: Duration,
    pub overall_deadline: Option<Duration>,
}

impl ProbePlan {
    pub fn from_config(config: &AcquisitionConfig) -> Self {
        Self {
            candidates: config.candidates.clone(),
            probe_timeout: config.probe_timeout(),
            overall_deadline: config.overall_deadline(),
        }
    }
}

/// Resolver plus sample fallback.
pub struct RadarService {
    resolver: Arc<Resolver>,
    synthesizer: SampleSynthesizer,
    plan: ProbePlan,
}

impl RadarService {
    pub fn new(resolver: Resolver, synthesizer: SampleSynthesizer, plan: ProbePlan) -> Self {
        Self {
            resolver: Arc::new(resolver),
            synthesizer,
            plan,
        }
    }

    /// Wire a service from configuration and a probe implementation.
    pub fn from_config(
        config: &AcquisitionConfig,
        probe: Arc<dyn SourceProbe>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let bounds = config.geo_bounds()?;
        let resolver = Resolver::new(
            probe,
            config.product.clone(),
            bounds,
            config.update_interval(),
        );
        let synthesizer = SampleSynthesizer::new(config.product.clone(), bounds);
        Ok(Self::new(resolver, synthesizer, ProbePlan::from_config(config)))
    }

    pub fn plan(&self) -> &ProbePlan {
        &self.plan
    }

    /// The most current record obtainable. Never fails.
    ///
    /// Live when a candidate answers, otherwise a sample record whose
    /// message says why.
    #[instrument(skip(self))]
    pub async fn get_latest(&self) -> RadarRecord {
        let resolution = self.run_resolution().await;
        counter!("radar_resolution_total", "result" => resolution.label()).increment(1);

        match resolution {
            Resolution::Live { record, summary } => {
                info!(
                    url = record.source_url().unwrap_or_default(),
                    probed = summary.probed(),
                    "Serving live record"
                );
                record
            }
            Resolution::NoLiveSource(summary) => {
                let reason = no_source_reason(&summary, self.plan.overall_deadline);
                warn!(reason = %reason, "Falling back to sample data");
                self.synthesizer.synthesize(&reason)
            }
            Resolution::StructuralError(e) => {
                error!(error = %e, "Source resolution failed");
                self.synthesizer.synthesize(&e.to_string())
            }
        }
    }

    /// Run the scan on its own task so that a panicking probe surfaces
    /// as a structural error instead of unwinding through the caller.
    async fn run_resolution(&self) -> Resolution {
        let resolver = Arc::clone(&self.resolver);
        let plan = self.plan.clone();
        let task = tokio::spawn(async move {
            resolver
                .resolve(&plan.candidates, plan.probe_timeout, plan.overall_deadline)
                .await
        });

        match task.await {
            Ok(resolution) => resolution,
            Err(e) => Resolution::StructuralError(ResolveError::ProbeTask(e.to_string())),
        }
    }
}

#[async_trait]
impl RecordSource for RadarService {
    async fn latest(&self) -> RadarRecord {
        self.get_latest().await
    }
}

fn no_source_reason(summary: &ProbeSummary, deadline: Option<Duration>) -> String {
    match (summary.deadline_exceeded, deadline) {
        (true, Some(d)) => format!(
            "{}; deadline of {}s reached after {} of {} candidate(s)",
            NO_REACHABLE_SOURCE,
            d.as_secs(),
            summary.probed(),
            summary.candidates
        ),
        _ => format!(
            "{}; tried {} candidate(s)",
            NO_REACHABLE_SOURCE,
            summary.probed()
        ),
    }
}
