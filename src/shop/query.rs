//! Turning a shop situation into an odds report.
//!
//! Orchestration only: derive the pool state from the tables, then call the
//! engines in [`crate::odds`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::odds::{expected_refreshes_with, prob_reach_within_refreshes_with, OddsConfig};
use crate::shop::tables::{ShopTables, MAX_LEVEL, NUM_TIERS};

/// Knobs for report composition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Gold spent per refresh
    pub gold_per_refresh: u32,
    /// Length of the approximate "after N refreshes" curve
    pub curve_len: usize,
    /// Copies for a 2-star upgrade
    pub two_star_copies: i64,
    /// Copies for a 3-star upgrade
    pub three_star_copies: i64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            gold_per_refresh: 2,
            curve_len: 10,
            two_star_copies: 3,
            three_star_copies: 9,
        }
    }
}

/// A player's situation in the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsQuery {
    /// Player level (1-11)
    pub level: u32,
    /// Cost tier of the wanted item (1-7)
    pub cost: u32,
    /// Copies already owned
    pub owned: i64,
    /// Copies of this cost tier held by other players
    pub same_cost_taken: i64,
    /// Gold available for refreshing
    pub gold: u32,
}

/// Derived pool state for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolState {
    /// Chance that one slot comes from the item's cost tier
    pub odds: f64,
    /// Copies of the item left in the pool
    pub remaining: i64,
    /// Undrawn items of the whole cost tier
    pub total_remaining: i64,
}

/// Everything the calculator reports for a query.
///
/// `after_n_refreshes` is an approximation that ignores depletion between
/// refreshes. The `expected_*` and `prob_*` fields come from the exact
/// engines and account for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsReport {
    /// Chance that a single slot shows the item
    pub per_slot: f64,
    /// Chance that one refresh shows at least one copy
    pub at_least_one: f64,
    /// Approximate chance of seeing at least one copy within N = 1, 2, ... refreshes
    pub after_n_refreshes: Vec<f64>,
    /// Expected refreshes to reach 2-star, if more copies are needed and it is reachable
    pub expected_refreshes_to_two_star: Option<f64>,
    /// Expected refreshes to reach 3-star, if more copies are needed and it is reachable
    pub expected_refreshes_to_three_star: Option<f64>,
    /// Chance to reach 2-star with the available gold
    pub prob_two_star_with_gold: Option<f64>,
    /// Chance to reach 3-star with the available gold
    pub prob_three_star_with_gold: Option<f64>,
    /// Refreshes the available gold pays for
    pub refreshes: u32,
}

impl OddsReport {
    fn exhausted(settings: &ReportSettings, refreshes: u32) -> Self {
        Self {
            per_slot: 0.0,
            at_least_one: 0.0,
            after_n_refreshes: vec![0.0; settings.curve_len],
            expected_refreshes_to_two_star: None,
            expected_refreshes_to_three_star: None,
            prob_two_star_with_gold: None,
            prob_three_star_with_gold: None,
            refreshes,
        }
    }
}

impl OddsQuery {
    /// Create a query.
    pub fn new(level: u32, cost: u32, owned: i64, same_cost_taken: i64, gold: u32) -> Self {
        Self {
            level,
            cost,
            owned,
            same_cost_taken,
            gold,
        }
    }

    /// Check that the query describes a real shop situation.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.level < 1 || self.level > MAX_LEVEL {
            return Err(QueryError::InvalidLevel(self.level));
        }
        if self.cost < 1 || self.cost > NUM_TIERS as u32 {
            return Err(QueryError::InvalidCost(self.cost));
        }
        if self.owned < 0 {
            return Err(QueryError::NegativeOwned(self.owned));
        }
        if self.same_cost_taken < 0 {
            return Err(QueryError::NegativeTaken(self.same_cost_taken));
        }
        Ok(())
    }

    /// Derive odds and pool remainders from the tables.
    pub fn pool_state(&self, tables: &ShopTables) -> PoolState {
        let pool = tables.pool_per_item(self.cost) as i64;
        let full = tables.tier_pool(self.cost) as i64;
        PoolState {
            odds: tables.odds(self.level, self.cost),
            remaining: (pool - self.owned).max(0),
            total_remaining: (full - self.same_cost_taken).max(0),
        }
    }

    /// Refreshes the query's gold pays for.
    pub fn refreshes(&self, settings: &ReportSettings) -> u32 {
        if settings.gold_per_refresh == 0 {
            return 0;
        }
        self.gold / settings.gold_per_refresh
    }

    /// Build the full report with default engine settings.
    pub fn evaluate(&self, tables: &ShopTables) -> Result<OddsReport, QueryError> {
        self.evaluate_with(tables, &OddsConfig::default(), &ReportSettings::default())
    }

    /// Build the full report.
    pub fn evaluate_with(
        &self,
        tables: &ShopTables,
        config: &OddsConfig,
        settings: &ReportSettings,
    ) -> Result<OddsReport, QueryError> {
        self.validate()?;

        let state = self.pool_state(tables);
        let refreshes = self.refreshes(settings);
        if state.remaining == 0 || state.total_remaining == 0 {
            return Ok(OddsReport::exhausted(settings, refreshes));
        }

        let per_slot = state.odds * (state.remaining as f64 / state.total_remaining as f64);
        let at_least_one = 1.0 - (1.0 - per_slot).powi(config.slots_per_refresh as i32);
        let after_n_refreshes = (1..=settings.curve_len)
            .map(|n| 1.0 - (1.0 - at_least_one).powi(n as i32))
            .collect();

        let expected_for = |copies: i64| {
            let deficit = (copies - self.owned).max(0);
            let e = expected_refreshes_with(
                config,
                deficit,
                state.remaining,
                state.total_remaining,
                state.odds,
            );
            (deficit > 0 && e.is_finite()).then_some(e)
        };

        let reach_for = |copies: i64| {
            if self.owned >= copies {
                return 1.0;
            }
            prob_reach_within_refreshes_with(
                config,
                copies,
                refreshes as i64,
                self.owned,
                state.remaining,
                state.total_remaining,
                state.odds,
            )
        };

        Ok(OddsReport {
            per_slot,
            at_least_one,
            after_n_refreshes,
            expected_refreshes_to_two_star: expected_for(settings.two_star_copies),
            expected_refreshes_to_three_star: expected_for(settings.three_star_copies),
            prob_two_star_with_gold: Some(reach_for(settings.two_star_copies)),
            prob_three_star_with_gold: Some(reach_for(settings.three_star_copies)),
            refreshes,
        })
    }
}

/// Errors for queries that do not describe a shop situation.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Level outside 1..=11.
    InvalidLevel(u32),
    /// Cost tier outside 1..=7.
    InvalidCost(u32),
    /// Owned copies below zero.
    NegativeOwned(i64),
    /// Copies taken by others below zero.
    NegativeTaken(i64),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidLevel(level) => {
                write!(f, "Level {} is out of range [1, {}]", level, MAX_LEVEL)
            }
            QueryError::InvalidCost(cost) => {
                write!(f, "Cost tier {} is out of range [1, {}]", cost, NUM_TIERS)
            }
            QueryError::NegativeOwned(owned) => write!(f, "Owned copies {} is negative", owned),
            QueryError::NegativeTaken(taken) => {
                write!(f, "Copies taken by others {} is negative", taken)
            }
        }
    }
}

impl std::error::Error for QueryError {}
