//! Ordered, short-circuiting source resolution.
//!
//! Candidates are probed one at a time in list order. The first reachable
//! candidate wins and nothing after it is probed. Each probe is bounded
//! by the per-candidate timeout, and the whole scan may additionally be
//! bounded by an overall deadline.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use metrics::{counter, histogram};
use radar_common::{GeoBounds, RadarRecord};
use reqwest::Url;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::error::ResolveError;
use crate::probe::{ProbeOutcome, SourceProbe, Unreachable};

/// One probe that was actually issued.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeAttempt {
    pub url: String,
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

/// What happened during a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeSummary {
    pub attempts: Vec<ProbeAttempt>,
    /// Number of candidates in the list, probed or not.
    pub candidates: usize,
    /// The overall deadline ran out before the list was exhausted.
    pub deadline_exceeded: bool,
}

impl ProbeSummary {
    fn new(candidates: usize) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    pub fn probed(&self) -> usize {
        self.attempts.len()
    }
}

#[derive(Debug, Clone)]
pub enum Resolution {
    /// A candidate answered; the record points at it.
    Live {
        record: RadarRecord,
        summary: ProbeSummary,
    },
    /// Every candidate was unreachable, the list was empty, or the
    /// deadline ran out.
    NoLiveSource(ProbeSummary),
    /// The scan could not run at all.
    StructuralError(ResolveError),
}

impl Resolution {
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::Live { .. } => "live",
            Resolution::NoLiveSource(_) => "no_live_source",
            Resolution::StructuralError(_) => "structural_error",
        }
    }
}

/// Scans candidate lists and builds live records.
///
/// Holds no per-call state, so one resolver can serve concurrent calls.
pub struct Resolver {
    probe: Arc<dyn SourceProbe>,
    product: String,
    bounds: GeoBounds,
    update_interval: Duration,
}

impl Resolver {
    pub fn new(
        probe: Arc<dyn SourceProbe>,
        product: impl Into<String>,
        bounds: GeoBounds,
        update_interval: Duration,
    ) -> Self {
        Self {
            probe,
            product: product.into(),
            bounds,
            update_interval,
        }
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub async fn resolve(
        &self,
        candidates: &[String],
        probe_timeout: Duration,
        overall_deadline: Option<Duration>,
    ) -> Resolution {
        if probe_timeout.is_zero() {
            return Resolution::StructuralError(ResolveError::ZeroTimeout);
        }

        let parsed = match parse_candidates(candidates) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "Rejecting candidate list");
                return Resolution::StructuralError(e);
            }
        };

        let started = Instant::now();
        let mut summary = ProbeSummary::new(parsed.len());

        for Candidate { configured, url } in parsed {
            let budget = match overall_deadline {
                Some(deadline) => {
                    let spent = started.elapsed();
                    if spent >= deadline {
                        warn!(
                            probed = summary.probed(),
                            remaining = summary.candidates - summary.probed(),
                            "Overall deadline exceeded"
                        );
                        summary.deadline_exceeded = true;
                        break;
                    }
                    probe_timeout.min(deadline - spent)
                }
                None => probe_timeout,
            };

            let probe_start = Instant::now();
            let outcome = match tokio::time::timeout(budget, self.probe.probe(&url, budget)).await
            {
                Ok(outcome) => outcome,
                Err(_) => ProbeOutcome::Unreachable(Unreachable::Timeout),
            };
            let elapsed = probe_start.elapsed();

            counter!("radar_probe_total", "outcome" => outcome.label()).increment(1);
            histogram!("radar_probe_duration_seconds").record(elapsed.as_secs_f64());

            summary.attempts.push(ProbeAttempt {
                url: configured.to_string(),
                outcome: outcome.clone(),
                elapsed,
            });

            match outcome {
                ProbeOutcome::Reachable => {
                    info!(
                        url = configured,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Live source found"
                    );
                    let record = self.live_record(configured);
                    return Resolution::Live { record, summary };
                }
                ProbeOutcome::Unreachable(reason) => {
                    debug!(url = configured, reason = %reason, "Candidate unreachable");
                }
            }
        }

        Resolution::NoLiveSource(summary)
    }

    fn live_record(&self, url: &str) -> RadarRecord {
        let now = Utc::now();
        let next_update = chrono::Duration::from_std(self.update_interval)
            .ok()
            .map(|interval| now + interval);
        RadarRecord::live(url, self.product.clone(), self.bounds, now, next_update)
    }
}

/// A candidate as configured (trimmed) alongside its parsed form. The
/// record reports the configured text; requests use the parsed URL.
#[derive(Debug)]
struct Candidate<'a> {
    configured: &'a str,
    url: Url,
}

/// Validate the whole list before any probe is issued.
fn parse_candidates(candidates: &[String]) -> Result<Vec<Candidate<'_>>, ResolveError> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let configured = value.trim();
            let url = Url::parse(configured).map_err(|e| ResolveError::InvalidCandidate {
                index,
                value: value.clone(),
                reason: e.to_string(),
            })?;

            match url.scheme() {
                "http" | "https" => Ok(Candidate { configured, url }),
                scheme => Err(ResolveError::UnsupportedScheme {
                    index,
                    scheme: scheme.to_string(),
                }),
            }
        })
        .collect()
}
