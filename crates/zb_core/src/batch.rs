//! Batch orchestration: one league day, many independent fixtures.
//!
//! Each match owns its own state, players and RNG stream, so the batch is
//! embarrassingly parallel; the only aggregation point is collecting each
//! fixture's report. One fixture failing never aborts its siblings.

use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::prelude::*;

use crate::config::SimConfig;
use crate::engine::simulate_match;
use crate::models::match_result::FixtureReport;
use crate::models::team::Fixture;

/// Simulate every fixture of a day in parallel. Reports come back in the
/// input order regardless of which match finishes first.
pub fn simulate_batch(fixtures: &[Fixture], config: &SimConfig) -> Vec<FixtureReport> {
    fixtures
        .par_iter()
        .map(|fixture| simulate_isolated(fixture, config))
        .collect()
}

fn simulate_isolated(fixture: &Fixture, config: &SimConfig) -> FixtureReport {
    let match_id = fixture.match_id.clone();
    let outcome = catch_unwind(AssertUnwindSafe(|| simulate_match(fixture, config)));
    match outcome {
        Ok(Ok(result)) => FixtureReport::ok(match_id, result),
        Ok(Err(err)) => {
            log::warn!("fixture {match_id} failed: {err}");
            FixtureReport::failed(match_id, err.to_string())
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "simulation panicked".to_string());
            log::error!("fixture {match_id} panicked: {message}");
            FixtureReport::failed(match_id, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::{fixture, sheet};

    fn day(n: u64) -> Vec<Fixture> {
        (0..n)
            .map(|i| {
                let mut f = fixture(i);
                f.match_id = format!("day-match-{i}");
                f
            })
            .collect()
    }

    #[test]
    fn test_batch_reports_every_fixture_in_order() {
        let fixtures = day(8);
        let reports = simulate_batch(&fixtures, &SimConfig::default());
        assert_eq!(reports.len(), 8);
        for (fixture, report) in fixtures.iter().zip(&reports) {
            assert_eq!(fixture.match_id, report.match_id);
            assert!(report.success, "fixture {} failed", report.match_id);
            assert!(report.result.is_some());
        }
    }

    #[test]
    fn test_batch_matches_sequential_results() {
        // Parallel execution must not change any individual result.
        let fixtures = day(4);
        let config = SimConfig::default();
        let parallel = simulate_batch(&fixtures, &config);
        for (fixture, report) in fixtures.iter().zip(&parallel) {
            let sequential = simulate_match(fixture, &config).unwrap();
            let from_batch = report.result.as_ref().unwrap();
            assert_eq!(sequential.score_home, from_batch.score_home);
            assert_eq!(sequential.score_away, from_batch.score_away);
            assert_eq!(sequential.events, from_batch.events);
        }
    }

    #[test]
    fn test_failed_fixture_does_not_abort_siblings() {
        let mut fixtures = day(3);
        fixtures[1].home.players.clear(); // invalid: empty roster
        let reports = simulate_batch(&fixtures, &SimConfig::default());
        assert!(reports[0].success);
        assert!(!reports[1].success);
        assert!(reports[1].error.is_some());
        assert!(reports[2].success);
    }

    #[test]
    fn test_duplicate_ids_across_fixture_reported_not_thrown() {
        let mut fixtures = day(2);
        fixtures[0].away = sheet("wolves", 0, 60); // ids collide with home
        let reports = simulate_batch(&fixtures, &SimConfig::default());
        assert!(!reports[0].success);
        assert!(reports[1].success);
    }
}
