//! # Shop Odds
//!
//! Exact refresh odds for shop-based drafting games where every player draws
//! from one shared, depleting pool.
//!
//! ## Features
//!
//! - **Expected refreshes**: average refreshes to collect a copy deficit, with
//!   the pool shrinking as copies are drawn
//! - **Reach probability**: chance to own a target number of copies within a
//!   fixed refresh budget
//! - **Shop tables**: level odds, pool sizes and tier populations, loadable
//!   from JSON
//! - **Monte Carlo cross-check**: seeded simulator of the same model
//!
//! ## Quick Start
//!
//! ```
//! use shop_odds::{OddsQuery, ShopTables};
//!
//! let tables = ShopTables::set16();
//! // Level 8, 4-cost item, nothing owned, nothing taken, 50 gold
//! let report = OddsQuery::new(8, 4, 0, 0, 50).evaluate(&tables).unwrap();
//!
//! println!("per slot: {:.4}", report.per_slot);
//! println!("2-star with gold: {:?}", report.prob_two_star_with_gold);
//! ```
//!
//! ## Modules
//!
//! - [`odds`]: Pure probability engines
//! - [`shop`]: Static tables and report composition
//!
//! ## Architecture
//!
//! ```text
//!   OddsQuery ──► ShopTables ──► (odds, item remaining, tier remaining)
//!                                          │
//!                  ┌───────────────────────┼───────────────────────┐
//!                  ▼                       ▼                       ▼
//!           expected_refreshes   prob_reach_within_refreshes   RefreshSimulator
//!             (backward DP)           (forward DP)              (Monte Carlo)
//!                  └───────────────────────┬───────────────────────┘
//!                                          ▼
//!                                      OddsReport
//! ```

#![warn(missing_docs)]

/// Refresh-odds engines.
///
/// Pure functions over `(copies needed, item remaining, tier remaining, odds)`.
pub mod odds;

/// Shop tables and report composition.
pub mod shop;

// Re-export commonly used types at crate root for convenience
pub use odds::{expected_refreshes, prob_reach_within_refreshes, OddsConfig, RefreshSimulator};
pub use shop::{OddsQuery, OddsReport, QueryError, ReportSettings, ShopTables};
