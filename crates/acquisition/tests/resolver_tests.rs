//! Ordering, short-circuit and timeout behaviour of the resolver.

mod common;

use std::sync::Arc;
use std::time::Duration;

use acquisition::{ProbeOutcome, Resolution, ResolveError, Resolver, Unreachable};
use common::{list, Script, ScriptedProbe};
use radar_common::{GeoBounds, RadarStatus};

const A: &str = "https://a.example/rala.grib2.gz";
const B: &str = "https://b.example/rala.grib2.gz";
const C: &str = "https://c.example/rala.grib2.gz";

const TIMEOUT: Duration = Duration::from_secs(5);

fn resolver(probe: Arc<ScriptedProbe>) -> Resolver {
    Resolver::new(probe, "RALA", GeoBounds::conus(), Duration::from_secs(120))
}

// ============================================================================
// Ordering and short-circuit
// ============================================================================

#[tokio::test]
async fn test_first_reachable_wins() {
    let probe = ScriptedProbe::new().reachable(A).reachable(B).into_arc();
    let resolution = resolver(probe.clone())
        .resolve(&list(&[A, B]), TIMEOUT, None)
        .await;

    match resolution {
        Resolution::Live { record, summary } => {
            assert_eq!(record.source_url(), Some(A));
            assert_eq!(record.status(), RadarStatus::Live);
            assert_eq!(summary.probed(), 1);
        }
        other => panic!("expected live, got {:?}", other),
    }
    assert_eq!(probe.calls(), vec![A]);
}

#[tokio::test]
async fn test_later_candidates_not_probed_after_success() {
    let probe = ScriptedProbe::new()
        .status(A, 404)
        .reachable(B)
        .reachable(C)
        .into_arc();
    let resolution = resolver(probe.clone())
        .resolve(&list(&[A, B, C]), TIMEOUT, None)
        .await;

    match resolution {
        Resolution::Live { record, summary } => {
            assert_eq!(record.source_url(), Some(B));
            assert_eq!(summary.attempts.len(), 2);
            assert_eq!(
                summary.attempts[0].outcome,
                ProbeOutcome::Unreachable(Unreachable::Status(404))
            );
        }
        other => panic!("expected live, got {:?}", other),
    }
    assert_eq!(probe.calls(), vec![A, B]);
}

#[tokio::test]
async fn test_probes_in_list_order() {
    let probe = ScriptedProbe::new()
        .status(A, 500)
        .status(B, 403)
        .status(C, 404)
        .into_arc();
    let resolution = resolver(probe.clone())
        .resolve(&list(&[C, A, B]), TIMEOUT, None)
        .await;

    assert!(matches!(resolution, Resolution::NoLiveSource(_)));
    assert_eq!(probe.calls(), vec![C, A, B]);
}

#[tokio::test]
async fn test_all_unreachable_reports_every_attempt() {
    let probe = ScriptedProbe::new().status(A, 500).status(B, 503).into_arc();
    match resolver(probe).resolve(&list(&[A, B]), TIMEOUT, None).await {
        Resolution::NoLiveSource(summary) => {
            assert_eq!(summary.candidates, 2);
            assert_eq!(summary.probed(), 2);
            assert!(!summary.deadline_exceeded);
        }
        other => panic!("expected no live source, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_list_is_no_live_source() {
    let probe = ScriptedProbe::new().into_arc();
    match resolver(probe.clone()).resolve(&[], TIMEOUT, None).await {
        Resolution::NoLiveSource(summary) => {
            assert_eq!(summary.candidates, 0);
            assert!(summary.attempts.is_empty());
        }
        other => panic!("expected no live source, got {:?}", other),
    }
    assert!(probe.calls().is_empty());
}

// ============================================================================
// Timeouts
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_hanging_candidate_times_out_then_next_wins() {
    let probe = ScriptedProbe::new()
        .with(A, Script::Hang)
        .reachable(B)
        .into_arc();
    let start = tokio::time::Instant::now();
    let resolution = resolver(probe.clone())
        .resolve(&list(&[A, B]), TIMEOUT, None)
        .await;

    match resolution {
        Resolution::Live { record, summary } => {
            assert_eq!(record.source_url(), Some(B));
            let first = &summary.attempts[0];
            assert_eq!(first.outcome, ProbeOutcome::Unreachable(Unreachable::Timeout));
            assert!(first.elapsed >= TIMEOUT);
            assert!(first.elapsed < TIMEOUT + Duration::from_millis(100));
        }
        other => panic!("expected live, got {:?}", other),
    }
    assert!(start.elapsed() < TIMEOUT + Duration::from_millis(100));
    assert_eq!(probe.calls(), vec![A, B]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_answer_past_timeout_is_unreachable() {
    let probe = ScriptedProbe::new()
        .with(
            A,
            Script::Answer(Duration::from_secs(30), ProbeOutcome::Reachable),
        )
        .into_arc();
    match resolver(probe).resolve(&list(&[A]), TIMEOUT, None).await {
        Resolution::NoLiveSource(summary) => {
            assert_eq!(
                summary.attempts[0].outcome,
                ProbeOutcome::Unreachable(Unreachable::Timeout)
            );
        }
        other => panic!("expected no live source, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_overall_deadline_stops_scan() {
    let slow_failure = Script::Answer(
        Duration::from_secs(4),
        ProbeOutcome::Unreachable(Unreachable::Status(500)),
    );
    let probe = ScriptedProbe::new()
        .with(A, slow_failure.clone())
        .with(B, slow_failure.clone())
        .with(C, Script::Answer(Duration::ZERO, ProbeOutcome::Reachable))
        .into_arc();

    let start = tokio::time::Instant::now();
    let resolution = resolver(probe.clone())
        .resolve(&list(&[A, B, C]), TIMEOUT, Some(Duration::from_secs(6)))
        .await;

    match resolution {
        Resolution::NoLiveSource(summary) => {
            assert!(summary.deadline_exceeded);
            assert_eq!(summary.probed(), 2);
            assert_eq!(summary.candidates, 3);
            // second probe was clamped to the 2s left on the deadline
            assert_eq!(
                summary.attempts[1].outcome,
                ProbeOutcome::Unreachable(Unreachable::Timeout)
            );
        }
        other => panic!("expected no live source, got {:?}", other),
    }
    assert_eq!(probe.calls(), vec![A, B]);
    assert!(start.elapsed() < Duration::from_secs(7));
}

// ============================================================================
// Structural errors
// ============================================================================

#[tokio::test]
async fn test_malformed_candidate_is_structural() {
    let probe = ScriptedProbe::new().reachable(A).into_arc();
    let resolution = resolver(probe.clone())
        .resolve(&list(&[A, "::not a url::"]), TIMEOUT, None)
        .await;

    match resolution {
        Resolution::StructuralError(ResolveError::InvalidCandidate { index, .. }) => {
            assert_eq!(index, 1)
        }
        other => panic!("expected structural error, got {:?}", other),
    }
    assert!(probe.calls().is_empty());
}

#[tokio::test]
async fn test_zero_timeout_is_structural() {
    let probe = ScriptedProbe::new().reachable(A).into_arc();
    let resolution = resolver(probe).resolve(&list(&[A]), Duration::ZERO, None).await;
    assert!(matches!(
        resolution,
        Resolution::StructuralError(ResolveError::ZeroTimeout)
    ));
}

#[tokio::test]
async fn test_live_record_carries_next_update() {
    let probe = ScriptedProbe::new().reachable(A).into_arc();
    match resolver(probe).resolve(&list(&[A]), TIMEOUT, None).await {
        Resolution::Live { record, .. } => {
            let next = record.next_update().unwrap();
            assert_eq!(next - record.timestamp(), chrono::Duration::seconds(120));
            assert_eq!(record.bounds(), &GeoBounds::conus());
            assert_eq!(record.product(), "RALA");
        }
        other => panic!("expected live, got {:?}", other),
    }
}

#[tokio::test]
async fn test_live_record_names_candidate_as_configured() {
    // requests go to the normalized URL
    let probe = ScriptedProbe::new().reachable("https://b.example/").into_arc();
    let candidates = vec![" https://B.example ".to_string()];

    match resolver(probe.clone()).resolve(&candidates, TIMEOUT, None).await {
        Resolution::Live { record, summary } => {
            assert_eq!(record.source_url(), Some("https://B.example"));
            assert_eq!(summary.attempts[0].url, "https://B.example");
        }
        other => panic!("expected live, got {:?}", other),
    }
    assert_eq!(probe.calls(), vec!["https://b.example/"]);
}
