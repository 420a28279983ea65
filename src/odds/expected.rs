//! Expected number of refreshes to collect a copy deficit.
//!
//! The pool shrinks every time the target item is drawn, so the per-slot
//! probability changes from one refresh to the next. The estimator walks a
//! truncated `(need, item_remaining, tier_remaining)` state space bottom-up:
//! every refresh that yields at least one copy moves to a state with strictly
//! smaller `need`, so processing `need` in increasing order resolves every
//! transition target before it is read.
//!
//! A refresh that yields nothing leaves the state unchanged. That self-loop is
//! solved algebraically:
//!
//! ```text
//! E[s] = (1 + sum_{a >= 1} P(a) * E[s - a]) / (1 - P(0))
//! ```

use log::{debug, trace};

use crate::odds::combinatorics::saturating_binomial;
use crate::odds::config::OddsConfig;

/// Dense memo table for the expected-draws DP.
///
/// Addressed by `(need, item_remaining, tier_remaining)`; one table per call.
#[derive(Debug)]
pub struct ExpectationTable {
    values: Vec<f64>,
    items: usize,
    tiers: usize,
}

impl ExpectationTable {
    /// Create a table covering `need 0..=max_need`, `item 0..=max_item`,
    /// `tier 0..=max_tier`, filled with `fill`.
    pub fn new(max_need: usize, max_item: usize, max_tier: usize, fill: f64) -> Self {
        let items = max_item + 1;
        let tiers = max_tier + 1;
        Self {
            values: vec![fill; (max_need + 1) * items * tiers],
            items,
            tiers,
        }
    }

    #[inline]
    fn index(&self, need: usize, item: usize, tier: usize) -> usize {
        (need * self.items + item) * self.tiers + tier
    }

    /// Look up a resolved state.
    #[inline]
    pub fn get(&self, need: usize, item: usize, tier: usize) -> f64 {
        self.values[self.index(need, item, tier)]
    }

    /// Store a resolved state.
    #[inline]
    pub fn set(&mut self, need: usize, item: usize, tier: usize, value: f64) {
        let idx = self.index(need, item, tier);
        self.values[idx] = value;
    }

    /// Number of states in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds no states.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Expected refreshes until `k` more copies are drawn, with default ceilings.
///
/// # Arguments
/// * `k` - Copies still needed
/// * `r` - Copies of the item left in the pool
/// * `t` - Undrawn items of the whole cost tier (including the target's copies)
/// * `odds` - Chance that one slot is drawn from this cost tier
///
/// # Returns
/// `0.0` when nothing is needed, `f64::INFINITY` when the deficit can never be
/// met, otherwise the expectation.
///
/// # Example
/// ```
/// use shop_odds::odds::expected_refreshes;
///
/// let one = expected_refreshes(1, 30, 100, 0.25);
/// let three = expected_refreshes(3, 30, 100, 0.25);
/// assert!(one > 0.0 && one < three);
/// assert!(expected_refreshes(1, 0, 100, 0.25).is_infinite());
/// ```
pub fn expected_refreshes(k: i64, r: i64, t: i64, odds: f64) -> f64 {
    expected_refreshes_with(&OddsConfig::default(), k, r, t, odds)
}

/// Expected refreshes until `k` more copies are drawn, under `config`.
///
/// `r` and `t` above `config.max_pool_remaining` / `config.max_tier_remaining`
/// are clamped to those ceilings.
pub fn expected_refreshes_with(config: &OddsConfig, k: i64, r: i64, t: i64, odds: f64) -> f64 {
    if k <= 0 {
        return 0.0;
    }
    if r <= 0 || t <= 0 {
        return f64::INFINITY;
    }
    if odds * (r as f64 / t as f64) <= 0.0 {
        return f64::INFINITY;
    }

    let max_item = (r as usize).min(config.max_pool_remaining);
    let max_tier = (t as usize).min(config.max_tier_remaining);
    if max_item < r as usize || max_tier < t as usize {
        debug!(
            "expected_refreshes: pool ({}, {}) clamped to ({}, {})",
            r, t, max_item, max_tier
        );
    }

    // More copies than the (clamped) pool holds can never be collected
    if k as usize > max_item {
        return f64::INFINITY;
    }
    let need = k as usize;

    let table = solve_table(config, need, max_item, max_tier, odds);
    let result = table.get(need, max_item, max_tier);

    if result >= config.unreachable {
        f64::INFINITY
    } else {
        result
    }
}

/// Fill the expectation table for every state up to the given bounds.
pub fn solve_table(
    config: &OddsConfig,
    max_need: usize,
    max_item: usize,
    max_tier: usize,
    odds: f64,
) -> ExpectationTable {
    let unreachable = config.unreachable;
    let slots = config.slots_per_refresh;
    let mut table = ExpectationTable::new(max_need, max_item, max_tier, unreachable);
    debug!(
        "expected_refreshes: solving {} states (need {}, item {}, tier {})",
        table.len(),
        max_need,
        max_item,
        max_tier
    );

    for need in 0..=max_need {
        for item in 0..=max_item {
            for tier in 0..=max_tier {
                let value = if need == 0 {
                    0.0
                } else if item == 0 || tier == 0 {
                    unreachable
                } else {
                    step_expectation(&table, config, slots, odds, need, item, tier)
                };
                table.set(need, item, tier, value);
            }
        }
        trace!("expected_refreshes: need layer {} resolved", need);
    }

    table
}

fn step_expectation(
    table: &ExpectationTable,
    config: &OddsConfig,
    slots: u32,
    odds: f64,
    need: usize,
    item: usize,
    tier: usize,
) -> f64 {
    let p = (odds * (item as f64 / tier as f64)).clamp(0.0, 1.0);
    if p <= 0.0 {
        return config.unreachable;
    }

    let dist = saturating_binomial(slots, p, item as i64);
    let progress = 1.0 - dist[0];
    if progress <= config.min_progress_probability {
        return config.unreachable;
    }

    let mut sum = 1.0;
    for (actual, &pa) in dist.iter().enumerate().skip(1) {
        if pa == 0.0 {
            continue;
        }
        let next = table.get(
            need.saturating_sub(actual),
            item.saturating_sub(actual),
            tier.saturating_sub(actual),
        );
        // Any reachable dead end makes the whole expectation infinite
        if next >= config.unreachable {
            return config.unreachable;
        }
        sum += pa * next;
    }

    sum / progress
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_needed() {
        assert_eq!(expected_refreshes(0, 10, 100, 0.25), 0.0);
        assert_eq!(expected_refreshes(-1, 10, 100, 0.25), 0.0);
        assert_eq!(expected_refreshes(0, 0, 0, 0.0), 0.0);
    }

    #[test]
    fn test_empty_pool_is_infinite() {
        assert!(expected_refreshes(1, 0, 100, 0.25).is_infinite());
        assert!(expected_refreshes(1, 10, 0, 0.25).is_infinite());
        assert!(expected_refreshes(3, -2, 100, 0.25).is_infinite());
    }

    #[test]
    fn test_zero_odds_is_infinite() {
        assert!(expected_refreshes(1, 10, 100, 0.0).is_infinite());
    }

    #[test]
    fn test_deficit_larger_than_pool_is_infinite() {
        assert!(expected_refreshes(3, 2, 100, 0.25).is_infinite());
        assert!(expected_refreshes(9, 5, 50, 0.5).is_infinite());
    }

    #[test]
    fn test_finite_positive_value() {
        let e = expected_refreshes(1, 30, 100, 0.25);
        assert!(e > 0.0);
        assert!(e.is_finite());
        assert!(e < 1e9);
    }

    #[test]
    fn test_single_copy_matches_geometric() {
        // One copy needed: plain geometric wait on "at least one hit"
        let p: f64 = 0.25 * 30.0 / 100.0;
        let expected = 1.0 / (1.0 - (1.0 - p).powi(5));
        let e = expected_refreshes(1, 30, 100, 0.25);
        assert!((e - expected).abs() < 1e-9, "{} vs {}", e, expected);
    }

    #[test]
    fn test_increases_with_deficit() {
        let e1 = expected_refreshes(1, 30, 100, 0.25);
        let e3 = expected_refreshes(3, 30, 100, 0.25);
        let e9 = expected_refreshes(9, 30, 100, 0.25);
        assert!(e1 < e3);
        assert!(e3 < e9);
    }

    #[test]
    fn test_non_decreasing_in_k_sweep() {
        let mut prev = 0.0;
        for k in 0..=10 {
            let e = expected_refreshes(k, 20, 120, 0.3);
            assert!(e >= prev, "k={} gave {} after {}", k, e, prev);
            prev = e;
        }
    }

    #[test]
    fn test_decreases_with_bigger_pool() {
        let e_small = expected_refreshes(3, 5, 50, 0.25);
        let e_large = expected_refreshes(3, 25, 100, 0.25);
        assert!(e_small > e_large);

        let mut prev = f64::INFINITY;
        for r in 3..=20 {
            let e = expected_refreshes(3, r, 120, 0.3);
            assert!(e <= prev + 1e-9, "r={} gave {} after {}", r, e, prev);
            prev = e;
        }
    }

    #[test]
    fn test_inputs_above_ceiling_are_clamped() {
        let clamped = expected_refreshes(2, 45, 900, 0.4);
        let at_ceiling = expected_refreshes(2, 30, 500, 0.4);
        assert_eq!(clamped, at_ceiling);
    }

    #[test]
    fn test_custom_ceilings() {
        let config = OddsConfig::exact_small();
        let small = expected_refreshes_with(&config, 3, 10, 120, 0.3);
        let default = expected_refreshes(3, 10, 120, 0.3);
        assert!((small - default).abs() < 1e-12);
    }

    #[test]
    fn test_table_base_cases() {
        let config = OddsConfig::default();
        let table = solve_table(&config, 2, 4, 20, 0.5);

        assert_eq!(table.len(), 3 * 5 * 21);
        assert_eq!(table.get(0, 3, 10), 0.0);
        assert_eq!(table.get(1, 0, 10), config.unreachable);
        assert_eq!(table.get(1, 3, 0), config.unreachable);
        assert!(table.get(2, 4, 20) < config.unreachable);
    }
}
