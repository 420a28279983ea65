//! Monte Carlo refresh simulator.
//!
//! Plays refreshes slot by slot under the same model the DP engines solve
//! exactly: every slot is the target item with probability
//! `odds * item_remaining / tier_remaining`, fixed for the whole refresh, and a
//! refresh never yields more copies than the pool holds. Used to cross-check
//! the exact engines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Summary of a batch of simulated trials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Number of trials run.
    pub trials: u64,
    /// Trials that hit the target.
    pub successes: u64,
    /// Mean refreshes spent by successful trials, `None` when none succeeded.
    pub mean_refreshes: Option<f64>,
    /// Fraction of trials that hit the target.
    pub success_rate: f64,
}

impl SimulationStats {
    fn from_counts(trials: u64, successes: u64, refreshes_spent: u64) -> Self {
        let mean_refreshes =
            (successes > 0).then(|| refreshes_spent as f64 / successes as f64);
        let success_rate = if trials > 0 {
            successes as f64 / trials as f64
        } else {
            0.0
        };
        Self {
            trials,
            successes,
            mean_refreshes,
            success_rate,
        }
    }
}

/// Seeded simulator of shop refreshes.
pub struct RefreshSimulator {
    rng: StdRng,
    slots: u32,
}

impl RefreshSimulator {
    /// Create a simulator with `slots` draws per refresh.
    ///
    /// With a seed the run is reproducible; without one it draws from entropy.
    pub fn new(slots: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, slots }
    }

    /// Play one refresh and return how many target copies it yielded.
    pub fn draw_refresh(&mut self, remaining: i64, total_remaining: i64, odds: f64) -> i64 {
        if remaining <= 0 || total_remaining <= 0 {
            return 0;
        }
        let p = (odds * (remaining as f64 / total_remaining as f64)).clamp(0.0, 1.0);
        let hits = (0..self.slots).filter(|_| self.rng.gen_bool(p)).count() as i64;
        hits.min(remaining)
    }

    /// Estimate the expected refreshes to collect `k` copies.
    ///
    /// Trials that have not finished after `max_refreshes` are counted as
    /// failures and left out of the mean.
    pub fn estimate_expected_refreshes(
        &mut self,
        k: i64,
        r: i64,
        t: i64,
        odds: f64,
        trials: u64,
        max_refreshes: u64,
    ) -> SimulationStats {
        let mut successes = 0u64;
        let mut spent = 0u64;

        for _ in 0..trials {
            let (mut need, mut remaining, mut total) = (k, r, t);
            let mut refreshes = 0u64;
            while need > 0 && refreshes < max_refreshes {
                let got = self.draw_refresh(remaining, total, odds);
                refreshes += 1;
                need -= got;
                remaining -= got;
                total -= got;
            }
            if need <= 0 {
                successes += 1;
                spent += refreshes;
            }
        }

        SimulationStats::from_counts(trials, successes, spent)
    }

    /// Estimate the chance of owning `target` copies after `n_refreshes`.
    pub fn estimate_reach_probability(
        &mut self,
        target: i64,
        n_refreshes: u64,
        owned: i64,
        remaining: i64,
        total_remaining: i64,
        odds: f64,
        trials: u64,
    ) -> SimulationStats {
        let mut successes = 0u64;
        let mut spent = 0u64;

        for _ in 0..trials {
            let (mut have, mut left, mut total) = (owned, remaining, total_remaining);
            let mut refreshes = 0u64;
            while have < target && refreshes < n_refreshes {
                let got = self.draw_refresh(left, total, odds);
                refreshes += 1;
                have += got;
                left -= got;
                total -= got;
            }
            if have >= target {
                successes += 1;
                spent += refreshes;
            }
        }

        SimulationStats::from_counts(trials, successes, spent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odds::{expected_refreshes, prob_reach_within_refreshes};

    #[test]
    fn test_draw_never_exceeds_pool() {
        let mut sim = RefreshSimulator::new(5, Some(7));
        for _ in 0..1000 {
            let got = sim.draw_refresh(2, 10, 1.0);
            assert!((0..=2).contains(&got));
        }
        assert_eq!(sim.draw_refresh(0, 10, 1.0), 0);
        assert_eq!(sim.draw_refresh(5, 0, 1.0), 0);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = RefreshSimulator::new(5, Some(42));
        let mut b = RefreshSimulator::new(5, Some(42));
        let sa = a.estimate_expected_refreshes(3, 10, 120, 0.3, 500, 10_000);
        let sb = b.estimate_expected_refreshes(3, 10, 120, 0.3, 500, 10_000);
        assert_eq!(sa.mean_refreshes, sb.mean_refreshes);
        assert_eq!(sa.successes, sb.successes);
    }

    #[test]
    fn test_expected_refreshes_agrees_with_dp() {
        let exact = expected_refreshes(3, 10, 60, 0.5);
        let mut sim = RefreshSimulator::new(5, Some(42));
        let stats = sim.estimate_expected_refreshes(3, 10, 60, 0.5, 20_000, 100_000);

        assert_eq!(stats.successes, stats.trials);
        let mean = stats.mean_refreshes.unwrap();
        let rel = (mean - exact).abs() / exact;
        assert!(rel < 0.05, "simulated {} vs exact {}", mean, exact);
    }

    #[test]
    fn test_reach_probability_agrees_with_dp() {
        let exact = prob_reach_within_refreshes(3, 15, 0, 20, 80, 0.25);
        let mut sim = RefreshSimulator::new(5, Some(42));
        let stats = sim.estimate_reach_probability(3, 15, 0, 20, 80, 0.25, 20_000);

        assert!(
            (stats.success_rate - exact).abs() < 0.03,
            "simulated {} vs exact {}",
            stats.success_rate,
            exact
        );
    }

    #[test]
    fn test_empty_trials() {
        let mut sim = RefreshSimulator::new(5, Some(1));
        let stats = sim.estimate_reach_probability(3, 10, 0, 10, 50, 0.2, 0);
        assert_eq!(stats.success_rate, 0.0);
        assert_eq!(stats.mean_refreshes, None);
    }

    #[test]
    fn test_stats_json_roundtrip_without_successes() {
        let mut sim = RefreshSimulator::new(5, Some(3));
        // Zero odds: no trial can succeed
        let stats = sim.estimate_expected_refreshes(2, 10, 50, 0.0, 50, 20);
        assert_eq!(stats.successes, 0);

        let json = serde_json::to_string(&stats).unwrap();
        let parsed: SimulationStats = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mean_refreshes, None);
        assert_eq!(parsed.trials, 50);
    }
}
