//! Static shop tables: odds by level, pool sizes and tier populations.
//!
//! The tables are external data. Lookups outside them never fail: a missing
//! level or cost tier reads as zero odds and a fallback pool size.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::odds::ConfigError;

/// Number of cost tiers.
pub const NUM_TIERS: usize = 7;

/// Highest player level.
pub const MAX_LEVEL: u32 = 11;

/// Pool per item assumed for an unknown cost tier.
pub const FALLBACK_POOL_PER_ITEM: u32 = 9;

/// Tier population assumed for an unknown cost tier.
pub const FALLBACK_TIER_POPULATION: u32 = 10;

/// Largest option offered for "copies taken by others".
const MAX_TAKEN_OPTIONS: u64 = 200;

/// Shop odds, pool sizes and tier populations for one game version.
///
/// Cost tiers are 1-based in every public method (1-cost to 7-cost).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopTables {
    /// Name of the data set
    pub name: String,
    /// Level -> chance that a slot comes from each cost tier
    pub shop_odds: FxHashMap<u32, [f64; NUM_TIERS]>,
    /// Copies of each item per cost tier
    pub pool_per_item: [u32; NUM_TIERS],
    /// Distinct items per cost tier
    pub tier_population: [u32; NUM_TIERS],
}

impl Default for ShopTables {
    fn default() -> Self {
        Self::set16()
    }
}

impl ShopTables {
    /// Shop odds and pool data for Set 16.
    pub fn set16() -> Self {
        let rows: [(u32, [f64; NUM_TIERS]); 11] = [
            (1, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (3, [0.75, 0.25, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (4, [0.55, 0.30, 0.15, 0.0, 0.0, 0.0, 0.0]),
            (5, [0.45, 0.33, 0.20, 0.02, 0.0, 0.0, 0.0]),
            (6, [0.30, 0.40, 0.25, 0.05, 0.0, 0.0, 0.0]),
            (7, [0.16, 0.30, 0.43, 0.10, 0.01, 0.0, 0.0]),
            (8, [0.15, 0.20, 0.32, 0.30, 0.03, 0.0, 0.0]),
            (9, [0.10, 0.17, 0.25, 0.33, 0.15, 0.0, 0.0]),
            (10, [0.05, 0.10, 0.20, 0.40, 0.25, 0.0, 0.0]),
            (11, [0.01, 0.02, 0.12, 0.50, 0.35, 0.0, 0.0]),
        ];

        Self {
            name: "Set 16".to_string(),
            shop_odds: rows.into_iter().collect(),
            pool_per_item: [30, 25, 18, 10, 9, 9, 9],
            tier_population: [13, 13, 13, 12, 10, 8, 9],
        }
    }

    /// Load tables from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse tables from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tables: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        tables.validate()?;
        Ok(tables)
    }

    /// Validate the tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shop_odds.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "shop_odds".to_string(),
                message: "At least one level is required".to_string(),
            });
        }

        for (level, row) in &self.shop_odds {
            if row.iter().any(|p| !(0.0..=1.0).contains(p)) {
                return Err(ConfigError::InvalidValue {
                    field: format!("shop_odds[{}]", level),
                    message: "Odds must lie in [0, 1]".to_string(),
                });
            }
            let sum: f64 = row.iter().sum();
            if sum > 1.0 + 1e-9 {
                return Err(ConfigError::InvalidValue {
                    field: format!("shop_odds[{}]", level),
                    message: format!("Odds sum to {:.4}, more than 1", sum),
                });
            }
        }

        if self.pool_per_item.iter().any(|&n| n == 0) {
            return Err(ConfigError::InvalidValue {
                field: "pool_per_item".to_string(),
                message: "Every tier needs at least one copy per item".to_string(),
            });
        }
        if self.tier_population.iter().any(|&n| n == 0) {
            return Err(ConfigError::InvalidValue {
                field: "tier_population".to_string(),
                message: "Every tier needs at least one item".to_string(),
            });
        }
        for (idx, (&pop, &pool)) in self.tier_population.iter().zip(&self.pool_per_item).enumerate() {
            if pop.checked_mul(pool).is_none() {
                return Err(ConfigError::InvalidValue {
                    field: format!("tier_population[{}]", idx),
                    message: format!("{} items of {} copies overflow the tier pool", pop, pool),
                });
            }
        }

        Ok(())
    }

    fn tier_index(cost: u32) -> Option<usize> {
        match cost {
            1..=7 => Some(cost as usize - 1),
            _ => None,
        }
    }

    /// Chance that one slot is drawn from `cost` at `level` (0 when unknown).
    pub fn odds(&self, level: u32, cost: u32) -> f64 {
        Self::tier_index(cost)
            .and_then(|idx| self.shop_odds.get(&level).map(|row| row[idx]))
            .unwrap_or(0.0)
    }

    /// Copies of a single item in `cost`'s pool.
    pub fn pool_per_item(&self, cost: u32) -> u32 {
        Self::tier_index(cost)
            .map(|idx| self.pool_per_item[idx])
            .unwrap_or(FALLBACK_POOL_PER_ITEM)
    }

    /// Distinct items in `cost`'s tier.
    pub fn tier_population(&self, cost: u32) -> u32 {
        Self::tier_index(cost)
            .map(|idx| self.tier_population[idx])
            .unwrap_or(FALLBACK_TIER_POPULATION)
    }

    /// Copies of every item in `cost`'s tier combined.
    pub fn tier_pool(&self, cost: u32) -> u64 {
        self.tier_population(cost) as u64 * self.pool_per_item(cost) as u64
    }

    /// Selectable values for "copies owned" at `cost` (0 through the pool size).
    pub fn owned_options(&self, cost: u32) -> Vec<u32> {
        (0..=self.pool_per_item(cost)).collect()
    }

    /// Selectable values for "copies of this tier taken by others".
    pub fn same_cost_taken_options(&self, cost: u32) -> Vec<u32> {
        let full = self.tier_pool(cost);
        (0..(full + 1).min(MAX_TAKEN_OPTIONS) as u32).collect()
    }
}

/// Selectable player levels.
pub fn level_options() -> Vec<u32> {
    (1..=MAX_LEVEL).collect()
}

/// Selectable cost tiers.
pub fn cost_options() -> Vec<u32> {
    (1..=NUM_TIERS as u32).collect()
}

/// Selectable gold amounts.
pub fn gold_options() -> Vec<u32> {
    (0..=100).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set16_lookups() {
        let tables = ShopTables::set16();

        assert_eq!(tables.odds(8, 4), 0.30);
        assert_eq!(tables.odds(1, 1), 1.0);
        assert_eq!(tables.pool_per_item(4), 10);
        assert_eq!(tables.tier_population(4), 12);
        assert_eq!(tables.tier_pool(4), 120);
        assert!(tables.validate().is_ok());
    }

    #[test]
    fn test_rows_sum_to_one() {
        let tables = ShopTables::set16();
        for level in level_options() {
            let sum: f64 = cost_options().iter().map(|&c| tables.odds(level, c)).sum();
            assert!((sum - 1.0).abs() < 1e-9, "level {} sums to {}", level, sum);
        }
    }

    #[test]
    fn test_out_of_range_fallbacks() {
        let tables = ShopTables::set16();

        assert_eq!(tables.odds(12, 1), 0.0);
        assert_eq!(tables.odds(0, 1), 0.0);
        assert_eq!(tables.odds(5, 0), 0.0);
        assert_eq!(tables.odds(5, 8), 0.0);
        assert_eq!(tables.pool_per_item(8), FALLBACK_POOL_PER_ITEM);
        assert_eq!(tables.tier_population(0), FALLBACK_TIER_POPULATION);
        assert_eq!(tables.tier_pool(9), 90);
    }

    #[test]
    fn test_options() {
        let tables = ShopTables::set16();

        assert_eq!(level_options().len(), 11);
        assert_eq!(cost_options(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(gold_options().len(), 101);
        assert_eq!(tables.owned_options(4).len(), 11);
        assert_eq!(*tables.owned_options(1).last().unwrap(), 30);
        // 13 * 30 = 390 copies, capped at 200 options
        assert_eq!(tables.same_cost_taken_options(1).len(), 200);
        // 8 * 9 = 72 copies -> 73 options
        assert_eq!(tables.same_cost_taken_options(6).len(), 73);
    }

    #[test]
    fn test_json_roundtrip_and_validation() {
        let tables = ShopTables::set16();
        let json = serde_json::to_string(&tables).unwrap();
        let parsed = ShopTables::from_json_str(&json).unwrap();
        assert_eq!(parsed.odds(9, 5), 0.15);

        let bad = json.replace("\"pool_per_item\":[30", "\"pool_per_item\":[0");
        assert!(ShopTables::from_json_str(&bad).is_err());
    }

    #[test]
    fn test_oversized_tier_rejected() {
        let mut tables = ShopTables::set16();
        tables.pool_per_item[2] = u32::MAX;
        tables.tier_population[2] = 3;
        assert!(tables.validate().is_err());

        // Lookups stay exact even on tables that fail validation
        assert_eq!(tables.tier_pool(3), 3 * u32::MAX as u64);
        assert_eq!(tables.same_cost_taken_options(3).len(), 200);
    }

    #[test]
    fn test_overfull_row_rejected() {
        let mut tables = ShopTables::set16();
        tables.shop_odds.insert(3, [0.9, 0.9, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(tables.validate().is_err());
    }
}
