//! Single-query shop odds calculator.
//!
//! Usage:
//!   cargo run --release --bin shop_odds -- [OPTIONS]
//!
//! Options:
//!   --level <N>          Player level 1-11 (default: 8)
//!   --cost <N>           Cost tier 1-7 (default: 4)
//!   --owned <N>          Copies already owned (default: 0)
//!   --taken <N>          Copies of the tier held by others (default: 0)
//!   --gold <N>           Gold for refreshing (default: 50)
//!   --tables <FILE>      Shop tables JSON file (default: Set 16)
//!   --config <FILE>      Engine configuration JSON file (optional)
//!   --json               Print the report as JSON
//!   --verify <N>         Cross-check with N Monte Carlo trials
//!   --seed <N>           Random seed for --verify (optional)

use std::env;
use std::time::Instant;

use shop_odds::odds::{OddsConfig, RefreshSimulator};
use shop_odds::shop::{OddsQuery, OddsReport, ReportSettings, ShopTables};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut level: u32 = 8;
    let mut cost: u32 = 4;
    let mut owned: i64 = 0;
    let mut taken: i64 = 0;
    let mut gold: u32 = 50;
    let mut tables_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut json_output = false;
    let mut verify_trials: u64 = 0;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--level" | "-l" => {
                i += 1;
                if i < args.len() {
                    level = args[i].parse().unwrap_or(level);
                }
            }
            "--cost" | "-c" => {
                i += 1;
                if i < args.len() {
                    cost = args[i].parse().unwrap_or(cost);
                }
            }
            "--owned" => {
                i += 1;
                if i < args.len() {
                    owned = args[i].parse().unwrap_or(owned);
                }
            }
            "--taken" => {
                i += 1;
                if i < args.len() {
                    taken = args[i].parse().unwrap_or(taken);
                }
            }
            "--gold" | "-g" => {
                i += 1;
                if i < args.len() {
                    gold = args[i].parse().unwrap_or(gold);
                }
            }
            "--tables" => {
                i += 1;
                if i < args.len() {
                    tables_file = Some(args[i].clone());
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--json" => {
                json_output = true;
            }
            "--verify" => {
                i += 1;
                if i < args.len() {
                    verify_trials = args[i].parse().unwrap_or(0);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
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

    let config = match &config_file {
        Some(path) => match OddsConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                return;
            }
        },
        None => OddsConfig::default(),
    };

    let settings = ReportSettings::default();
    let query = OddsQuery::new(level, cost, owned, taken, gold);

    let start = Instant::now();
    let report = match query.evaluate_with(&tables, &config, &settings) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Invalid query: {}", e);
            return;
        }
    };
    let elapsed = start.elapsed();

    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing report: {}", e),
        }
        return;
    }

    println!("=================================================");
    println!("  Shop Odds - {}", tables.name);
    println!("=================================================");
    println!();
    println!("Level: {}  Cost: {}  Owned: {}  Taken: {}  Gold: {}", level, cost, owned, taken, gold);
    println!();

    print_report(&report);
    println!("Computed in {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    if verify_trials > 0 {
        println!();
        verify(&query, &tables, &config, &settings, &report, verify_trials, seed);
    }
}

fn print_report(report: &OddsReport) {
    println!("=== Single refresh ===");
    println!("  Per slot:          {:>7.3}%", report.per_slot * 100.0);
    println!("  At least one:      {:>7.3}%", report.at_least_one * 100.0);
    println!();

    println!("=== At least one within N refreshes (approximate) ===");
    for (n, p) in report.after_n_refreshes.iter().enumerate() {
        println!("  N = {:>2}: {:>6.2}%", n + 1, p * 100.0);
    }
    println!();

    println!("=== Exact, with pool depletion ===");
    println!("  Expected refreshes to 2-star: {}", format_expectation(report.expected_refreshes_to_two_star));
    println!("  Expected refreshes to 3-star: {}", format_expectation(report.expected_refreshes_to_three_star));
    println!("  Refreshes paid by gold:       {}", report.refreshes);
    println!("  2-star within gold:           {}", format_prob(report.prob_two_star_with_gold));
    println!("  3-star within gold:           {}", format_prob(report.prob_three_star_with_gold));
    println!();
}

fn verify(
    query: &OddsQuery,
    tables: &ShopTables,
    config: &OddsConfig,
    settings: &ReportSettings,
    report: &OddsReport,
    trials: u64,
    seed: Option<u64>,
) {
    println!("=== Monte Carlo check ({} trials) ===", trials);
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }

    let state = query.pool_state(tables);
    let mut sim = RefreshSimulator::new(config.slots_per_refresh, seed);
    let max_refreshes = 10_000;

    for (label, copies, exact_e, exact_p) in [
        (
            "2-star",
            settings.two_star_copies,
            report.expected_refreshes_to_two_star,
            report.prob_two_star_with_gold,
        ),
        (
            "3-star",
            settings.three_star_copies,
            report.expected_refreshes_to_three_star,
            report.prob_three_star_with_gold,
        ),
    ] {
        let deficit = (copies - query.owned).max(0);
        if let Some(exact) = exact_e {
            let stats = sim.estimate_expected_refreshes(
                deficit,
                state.remaining,
                state.total_remaining,
                state.odds,
                trials,
                max_refreshes,
            );
            println!(
                "  {} expected: exact {:.3} | simulated {} ({} / {} finished)",
                label,
                exact,
                format_expectation(stats.mean_refreshes),
                stats.successes,
                stats.trials
            );
        }
        if let Some(exact) = exact_p {
            let stats = sim.estimate_reach_probability(
                copies,
                report.refreshes as u64,
                query.owned,
                state.remaining,
                state.total_remaining,
                state.odds,
                trials,
            );
            println!(
                "  {} within gold: exact {:.2}% | simulated {:.2}%",
                label,
                exact * 100.0,
                stats.success_rate * 100.0
            );
        }
    }
}

fn format_expectation(e: Option<f64>) -> String {
    match e {
        Some(e) => format!("{:.2}", e),
        None => "n/a".to_string(),
    }
}

fn format_prob(p: Option<f64>) -> String {
    match p {
        Some(p) => format!("{:.2}%", p * 100.0),
        None => "n/a".to_string(),
    }
}

fn print_help() {
    println!("Shop Odds Calculator");
    println!();
    println!("Usage: shop_odds [OPTIONS]");
    println!();
    println!("Query:");
    println!("  -l, --level <N>          Player level 1-11 (default: 8)");
    println!("  -c, --cost <N>           Cost tier 1-7 (default: 4)");
    println!("  --owned <N>              Copies already owned (default: 0)");
    println!("  --taken <N>              Copies of the tier held by others (default: 0)");
    println!("  -g, --gold <N>           Gold for refreshing, 2 per refresh (default: 50)");
    println!();
    println!("Options:");
    println!("  --tables <FILE>          Shop tables JSON file (default: Set 16)");
    println!("  --config <FILE>          Engine configuration JSON file");
    println!("  --json                   Print the report as JSON");
    println!("  --verify <N>             Cross-check with N Monte Carlo trials");
    println!("  -s, --seed <N>           Random seed for --verify");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # 4-cost item at level 8 with 50 gold");
    println!("  shop_odds --level 8 --cost 4 --gold 50");
    println!();
    println!("  # Already holding 2 copies, 15 others gone, verify with 100k trials");
    println!("  shop_odds --level 8 --cost 4 --owned 2 --taken 15 --verify 100000 --seed 42");
    println!();
    println!("  # Debug logging from the engines");
    println!("  RUST_LOG=debug shop_odds --level 9 --cost 5");
}
