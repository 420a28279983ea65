//! Batch sweep over every (level, cost, owned) combination.
//!
//! Usage:
//!   cargo run --release --bin odds_sweep -- [OPTIONS]
//!
//! Options:
//!   --gold <N>           Gold for every query (default: 50)
//!   --taken <N>          Copies of each tier held by others (default: 0)
//!   --tables <FILE>      Shop tables JSON file (default: Set 16)
//!   --threads <N>        Number of threads (default: auto)
//!   --output <FILE>      Output file (default: odds_sweep.json)

use std::env;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use rayon::prelude::*;

use shop_odds::odds::OddsConfig;
use shop_odds::shop::{
    cost_options, level_options, OddsQuery, ReportSettings, ShopTables, SweepOutput,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut gold: u32 = 50;
    let mut taken: i64 = 0;
    let mut tables_file: Option<String> = None;
    let mut threads: usize = 0;
    let mut output_file = "odds_sweep.json".to_string();
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--gold" | "-g" => {
                i += 1;
                if i < args.len() {
                    gold = args[i].parse().unwrap_or(gold);
                }
            }
            "--taken" => {
                i += 1;
                if i < args.len() {
                    taken = args[i].parse().unwrap_or(taken);
                }
            }
            "--tables" => {
                i += 1;
                if i < args.len() {
                    tables_file = Some(args[i].clone());
                }
            }
            "--threads" | "-t" => {
                i += 1;
                if i < args.len() {
                    threads = args[i].parse().unwrap_or(0);
                }
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = args[i].clone();
                }
            }
            "--quiet" | "-q" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!("=== Shop Odds Sweep ===");

    let tables = match &tables_file {
        Some(path) => match ShopTables::from_json_file(path) {
            Ok(tables) => tables,
            Err(e) => {
                eprintln!("Error loading tables: {}", e);
                return;
            }
        },
        None => ShopTables::set16(),
    };

    if threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!("Could not set thread count: {}", e);
        }
    }

    let config = OddsConfig::default();
    let settings = ReportSettings::default();

    let queries: Vec<OddsQuery> = level_options()
        .into_iter()
        .flat_map(|level| cost_options().into_iter().map(move |cost| (level, cost)))
        .filter(|&(level, cost)| tables.odds(level, cost) > 0.0)
        .flat_map(|(level, cost)| {
            tables
                .owned_options(cost)
                .into_iter()
                .filter(|&owned| (owned as i64) < settings.three_star_copies)
                .map(move |owned| OddsQuery::new(level, cost, owned as i64, taken, gold))
                .collect::<Vec<_>>()
        })
        .collect();

    println!("Tables: {}", tables.name);
    println!("Gold: {}, taken per tier: {}", gold, taken);
    println!("Queries: {}", queries.len());
    println!();

    let pb = ProgressBar::new(queries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    let results: Vec<_> = queries
        .par_iter()
        .filter_map(|query| {
            let result = query.evaluate_with(&tables, &config, &settings);
            pb.inc(1);
            match result {
                Ok(report) => Some((query.clone(), report)),
                Err(e) => {
                    warn!("Skipping level {} cost {}: {}", query.level, query.cost, e);
                    None
                }
            }
        })
        .collect();
    pb.finish_with_message("done");

    let elapsed = start.elapsed().as_secs_f64();
    let mut output = SweepOutput::new(&tables.name, gold, elapsed);
    for (query, report) in results {
        output.add_entry(query, report);
    }

    println!();
    println!("Sweep complete in {:.2}s", elapsed);

    if !quiet {
        output.print_summary();
    }

    println!("\nExporting results to {}...", output_file);
    match output.save_json(&output_file) {
        Ok(_) => println!("Results saved successfully!"),
        Err(e) => eprintln!("Error saving results: {}", e),
    }
}

fn print_help() {
    println!("Shop Odds Sweep");
    println!();
    println!("Usage: odds_sweep [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -g, --gold <N>           Gold for every query (default: 50)");
    println!("  --taken <N>              Copies of each tier held by others (default: 0)");
    println!("  --tables <FILE>          Shop tables JSON file (default: Set 16)");
    println!("  -t, --threads <N>        Number of threads (default: auto)");
    println!("  -o, --output <FILE>      Output file (default: odds_sweep.json)");
    println!("  -q, --quiet              Skip the summary table");
    println!("  -h, --help               Show this help");
}
