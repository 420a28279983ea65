//! Probability of reaching a copy target within a fixed number of refreshes.
//!
//! Exact finite-horizon forward pass: a probability vector indexed by copies
//! owned is pushed through `n` refreshes.

use log::trace;

use crate::odds::combinatorics::saturating_binomial;
use crate::odds::config::OddsConfig;

/// Probability of owning at least `target` copies after `n_refreshes` refreshes.
///
/// Only copy counts up to `min(max_copies, owned + remaining)` (9 by default) are
/// tracked, so a target above that ceiling (and not already owned) yields 0.
///
/// # Arguments
/// * `target` - Copies wanted in total
/// * `n_refreshes` - Refreshes available
/// * `owned` - Copies already owned
/// * `remaining` - Copies of the item left in the pool
/// * `total_remaining` - Undrawn items of the whole cost tier
/// * `odds` - Chance that one slot is drawn from this cost tier
///
/// # Example
/// ```
/// use shop_odds::odds::prob_reach_within_refreshes;
///
/// assert_eq!(prob_reach_within_refreshes(3, 10, 3, 10, 50, 0.25), 1.0);
/// assert_eq!(prob_reach_within_refreshes(3, 0, 0, 10, 50, 0.25), 0.0);
///
/// let p = prob_reach_within_refreshes(3, 25, 0, 10, 120, 0.30);
/// assert!(p > 0.0 && p <= 1.0);
/// ```
pub fn prob_reach_within_refreshes(
    target: i64,
    n_refreshes: i64,
    owned: i64,
    remaining: i64,
    total_remaining: i64,
    odds: f64,
) -> f64 {
    prob_reach_within_refreshes_with(
        &OddsConfig::default(),
        target,
        n_refreshes,
        owned,
        remaining,
        total_remaining,
        odds,
    )
}

/// Same as [`prob_reach_within_refreshes`], under `config`.
pub fn prob_reach_within_refreshes_with(
    config: &OddsConfig,
    target: i64,
    n_refreshes: i64,
    owned: i64,
    remaining: i64,
    total_remaining: i64,
    odds: f64,
) -> f64 {
    if owned >= target {
        return 1.0;
    }
    if n_refreshes <= 0 || remaining <= 0 || total_remaining <= 0 {
        return 0.0;
    }
    // No tracked state lies above the ceiling
    if target > copy_ceiling(config, owned, remaining) {
        return 0.0;
    }

    let dist = forward_pass(config, n_refreshes, owned, remaining, total_remaining, odds);
    let start = target.max(0) as usize;
    dist.iter().skip(start).sum::<f64>().clamp(0.0, 1.0)
}

/// Distribution of copies owned after `n_refreshes` refreshes.
///
/// Entry `i` is the probability of owning exactly `i` copies; the last entry
/// also holds every outcome at or above the tracked ceiling
/// (`min(config.max_copies, owned + remaining)`). Negative `owned` or
/// `remaining` is treated as zero.
pub fn copies_distribution(
    config: &OddsConfig,
    n_refreshes: i64,
    owned: i64,
    remaining: i64,
    total_remaining: i64,
    odds: f64,
) -> Vec<f64> {
    forward_pass(config, n_refreshes, owned, remaining, total_remaining, odds)
}

/// Highest copy count the forward pass tracks.
fn copy_ceiling(config: &OddsConfig, owned: i64, remaining: i64) -> i64 {
    (config.max_copies as i64).min(owned.max(0).saturating_add(remaining.max(0)))
}

fn forward_pass(
    config: &OddsConfig,
    n_refreshes: i64,
    owned: i64,
    remaining: i64,
    total_remaining: i64,
    odds: f64,
) -> Vec<f64> {
    let owned = owned.max(0);
    let remaining = remaining.max(0);
    let pool = owned.saturating_add(remaining);
    let max_have = copy_ceiling(config, owned, remaining) as usize;

    let mut dp = vec![0.0f64; max_have + 1];
    if owned as usize >= max_have {
        dp[max_have] = 1.0;
        return dp;
    }
    dp[owned as usize] = 1.0;

    for step in 0..n_refreshes.max(0) {
        let mut next = vec![0.0f64; max_have + 1];

        for (have, &mass) in dp.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            let drawn = have as i64 - owned;
            let r = pool - have as i64;
            let t = total_remaining - drawn;
            if r <= 0 || t <= 0 || have == max_have {
                next[have] += mass;
                continue;
            }

            let p = odds * (r as f64 / t as f64);
            let outcomes = saturating_binomial(config.slots_per_refresh, p, r);
            for (actual, &pa) in outcomes.iter().enumerate() {
                let new_have = (have + actual).min(max_have);
                next[new_have] += mass * pa;
            }
        }

        dp = next;
        trace!("reach: step {} -> {:?}", step + 1, dp);
    }

    dp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_at_target() {
        assert_eq!(prob_reach_within_refreshes(3, 10, 3, 10, 50, 0.25), 1.0);
        assert_eq!(prob_reach_within_refreshes(3, 10, 5, 10, 50, 0.25), 1.0);
        assert_eq!(prob_reach_within_refreshes(9, 10, 9, 5, 50, 0.25), 1.0);
        assert_eq!(prob_reach_within_refreshes(3, 0, 3, 10, 50, 0.25), 1.0);
    }

    #[test]
    fn test_no_refreshes() {
        assert_eq!(prob_reach_within_refreshes(3, 0, 0, 10, 50, 0.25), 0.0);
        assert_eq!(prob_reach_within_refreshes(3, -1, 0, 10, 50, 0.25), 0.0);
    }

    #[test]
    fn test_empty_pool() {
        assert_eq!(prob_reach_within_refreshes(3, 10, 10, 0, 50, 0.25), 1.0);
        assert_eq!(prob_reach_within_refreshes(3, 10, 0, 0, 50, 0.25), 0.0);
        assert_eq!(prob_reach_within_refreshes(3, 10, 0, 10, 0, 0.25), 0.0);
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let p = prob_reach_within_refreshes(3, 5, 0, 20, 80, 0.25);
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_monotone_in_horizon() {
        let p5 = prob_reach_within_refreshes(3, 5, 0, 20, 80, 0.25);
        let p10 = prob_reach_within_refreshes(3, 10, 0, 20, 80, 0.25);
        let p20 = prob_reach_within_refreshes(3, 20, 0, 20, 80, 0.25);
        assert!(p5 <= p10);
        assert!(p10 <= p20);
    }

    #[test]
    fn test_monotone_in_owned() {
        let p0 = prob_reach_within_refreshes(3, 10, 0, 20, 80, 0.25);
        let p1 = prob_reach_within_refreshes(3, 10, 1, 19, 79, 0.25);
        let p2 = prob_reach_within_refreshes(3, 10, 2, 18, 78, 0.25);
        assert!(p0 <= p1);
        assert!(p1 <= p2);
    }

    #[test]
    fn test_two_star_scenario() {
        // Level 8, cost 4: odds 0.30, 10 copies per item, 12 items in the tier
        let p = prob_reach_within_refreshes(3, 25, 0, 10, 120, 0.30);
        assert!(p.is_finite());
        assert!(p > 0.0);
        assert!(p <= 1.0);
    }

    #[test]
    fn test_single_refresh_matches_binomial_tail() {
        // One refresh, one copy wanted: P(at least one hit)
        let p: f64 = 0.25 * 20.0 / 80.0;
        let expected = 1.0 - (1.0 - p).powi(5);
        let got = prob_reach_within_refreshes(1, 1, 0, 20, 80, 0.25);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let config = OddsConfig::default();
        let dist = copies_distribution(&config, 15, 1, 9, 110, 0.3);

        assert_eq!(dist.len(), 10);
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(dist[0], 0.0);
    }

    #[test]
    fn test_distribution_with_tiny_pool() {
        // Only two copies left: the tracked range stops at owned + 2
        let config = OddsConfig::default();
        let dist = copies_distribution(&config, 50, 1, 2, 30, 1.0);

        assert_eq!(dist.len(), 4);
        assert!(dist[3] > 0.99);
    }

    #[test]
    fn test_distribution_capped_at_copy_ceiling() {
        // Thirty copies left, but only 9 owned copies are tracked
        let config = OddsConfig::default();
        let dist = copies_distribution(&config, 60, 0, 30, 100, 1.0);

        assert_eq!(dist.len(), 10);
        assert!(dist[9] > 0.99);
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);

        let small = copies_distribution(&config.clone().with_max_copies(3), 5, 0, 30, 100, 0.5);
        assert_eq!(small.len(), 4);
    }

    #[test]
    fn test_owned_above_ceiling_sits_in_last_slot() {
        let config = OddsConfig::default();
        let dist = copies_distribution(&config, 5, 1_000_000, 20, 100, 0.5);
        assert_eq!(dist.len(), 10);
        assert_eq!(dist[9], 1.0);
    }

    #[test]
    fn test_target_above_copy_ceiling_is_zero() {
        assert_eq!(prob_reach_within_refreshes(10, 60, 0, 30, 100, 1.0), 0.0);
        assert!(prob_reach_within_refreshes(9, 60, 0, 30, 100, 1.0) > 0.99);
    }

    #[test]
    fn test_huge_target_returns_without_allocating() {
        let p = prob_reach_within_refreshes(20_000_000, 3, 0, 20_000_000, 40_000_000, 0.3);
        assert_eq!(p, 0.0);
        let p = prob_reach_within_refreshes(i64::MAX, 3, 0, i64::MAX / 2, i64::MAX / 2, 0.3);
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_unreachable_target_is_zero() {
        // Pool holds 2 more copies, target needs 3
        assert_eq!(prob_reach_within_refreshes(4, 30, 1, 2, 40, 0.5), 0.0);
    }
}
