//! Refresh-odds engines.
//!
//! Pure functions answering two questions about a shared, depleting pool:
//! how many refreshes it takes on average to collect a number of copies, and
//! how likely it is to collect them within a fixed number of refreshes.
//!
//! # Model
//!
//! A refresh exposes `slots` (5) independent draws. Each draw is the target
//! item with probability
//!
//! ```text
//! p = odds * item_remaining / tier_remaining
//! ```
//!
//! where `odds` is the chance that a slot comes from the item's cost tier at
//! the player's level. Every copy drawn leaves both counts one smaller, so
//! `p` is recomputed after every refresh.
//!
//! The copies drawn in one refresh follow a binomial law, except that the pool
//! cannot yield more copies than it holds: the upper tail is merged into the
//! "pool emptied" outcome (see [`saturating_binomial`]).
//!
//! # Engines
//!
//! - [`expected_refreshes`]: bottom-up DP over a truncated
//!   `(need, item_remaining, tier_remaining)` space
//! - [`prob_reach_within_refreshes`]: forward DP over copies owned
//! - [`RefreshSimulator`]: Monte Carlo cross-check of both
//!
//! Every engine call builds and drops its own table; nothing is shared.
//!
//! # Example
//!
//! ```
//! use shop_odds::odds::{binom, expected_refreshes, prob_reach_within_refreshes};
//!
//! assert_eq!(binom(5, 2), 10.0);
//!
//! let e = expected_refreshes(3, 10, 120, 0.30);
//! let p = prob_reach_within_refreshes(3, 25, 0, 10, 120, 0.30);
//! assert!(e.is_finite());
//! assert!(p > 0.0 && p <= 1.0);
//! ```

pub mod combinatorics;
pub mod config;
pub mod expected;
pub mod reach;
pub mod simulate;

// Re-export main types for convenient access
pub use combinatorics::{binom, binomial_pmf, saturating_binomial};
pub use config::{ConfigError, OddsConfig};
pub use expected::{expected_refreshes, expected_refreshes_with, ExpectationTable};
pub use reach::{copies_distribution, prob_reach_within_refreshes, prob_reach_within_refreshes_with};
pub use simulate::{RefreshSimulator, SimulationStats};
