//! Shop layer: static tables and report composition.
//!
//! A query names a player level, a cost tier and how much of the pool is
//! already gone. [`ShopTables`] turns that into the three numbers the engines
//! take (`odds`, item copies left, tier copies left) and [`OddsQuery`] assembles
//! an [`OddsReport`] from them:
//!
//! - `per_slot` and `at_least_one` for a single refresh
//! - an approximate "at least one copy within N refreshes" curve
//! - exact expected refreshes and reach probabilities for 2-star and 3-star
//!
//! # Example
//!
//! ```
//! use shop_odds::shop::{OddsQuery, ShopTables};
//!
//! let tables = ShopTables::set16();
//! let report = OddsQuery::new(8, 4, 0, 0, 50).evaluate(&tables).unwrap();
//! assert!((report.per_slot - 0.025).abs() < 1e-12);
//! assert_eq!(report.refreshes, 25);
//! ```

pub mod output;
pub mod query;
pub mod tables;

pub use output::{SweepEntry, SweepMetadata, SweepOutput};
pub use query::{OddsQuery, OddsReport, PoolState, QueryError, ReportSettings};
pub use tables::{cost_options, gold_options, level_options, ShopTables, MAX_LEVEL, NUM_TIERS};
