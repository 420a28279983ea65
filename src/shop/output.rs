//! JSON export of odds sweeps.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

use crate::shop::query::{OddsQuery, OddsReport};

/// Sweep metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepMetadata {
    /// Name of the shop tables used
    pub tables_name: String,
    /// Gold assumed for every query
    pub gold: u32,
    /// Wall-clock time of the sweep
    pub total_time_secs: f64,
    /// Unix timestamp of the export
    pub timestamp: String,
}

/// One evaluated query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepEntry {
    /// The query
    pub query: OddsQuery,
    /// Its report
    pub report: OddsReport,
}

/// A full sweep ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutput {
    /// Metadata
    pub metadata: SweepMetadata,
    /// Evaluated queries, in sweep order
    pub entries: Vec<SweepEntry>,
}

impl SweepOutput {
    /// Create an empty sweep.
    pub fn new(tables_name: &str, gold: u32, total_time_secs: f64) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            metadata: SweepMetadata {
                tables_name: tables_name.to_string(),
                gold,
                total_time_secs,
                timestamp: timestamp.to_string(),
            },
            entries: Vec::new(),
        }
    }

    /// Append an evaluated query.
    pub fn add_entry(&mut self, query: OddsQuery, report: OddsReport) {
        self.entries.push(SweepEntry { query, report });
    }

    /// Write the sweep as pretty JSON.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Print a compact table of 2-star and 3-star chances.
    pub fn print_summary(&self) {
        println!("\n========================================");
        println!("  Odds sweep - {}", self.metadata.tables_name);
        println!(
            "  Gold: {} | Entries: {}",
            self.metadata.gold,
            self.entries.len()
        );
        println!("========================================\n");

        println!(
            "{:>5} {:>4} {:>6} {:>8} {:>8} {:>8}",
            "Level", "Cost", "Owned", "Slot%", "2* gold", "3* gold"
        );
        for entry in &self.entries {
            let q = &entry.query;
            let r = &entry.report;
            println!(
                "{:>5} {:>4} {:>6} {:>7.2}% {:>8} {:>8}",
                q.level,
                q.cost,
                q.owned,
                r.per_slot * 100.0,
                format_prob(r.prob_two_star_with_gold),
                format_prob(r.prob_three_star_with_gold)
            );
        }
    }
}

fn format_prob(p: Option<f64>) -> String {
    match p {
        Some(p) => format!("{:.1}%", p * 100.0),
        None => "-".to_string(),
    }
}
