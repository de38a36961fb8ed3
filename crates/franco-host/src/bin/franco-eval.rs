//! # Franco Cartons Evaluator
//!
//! Evaluates a cart JSON file against the configured thresholds and prints
//! the evaluation plus the resulting shipping rates.
//!
//! ## Usage
//! ```bash
//! # Thresholds from ~/.config/cartons/franco.toml (or defaults)
//! cargo run -p franco-host --bin franco-eval -- cart.json
//!
//! # Explicit thresholds, rules forced on
//! cargo run -p franco-host --bin franco-eval -- cart.json --slot 1.5 --chf 400 --enforce true
//!
//! # Existing rates to pass through the rate filter
//! cargo run -p franco-host --bin franco-eval -- cart.json --rates rates.json
//! ```

use std::env;
use std::path::PathBuf;

use serde_json::{json, Value};
use tracing::info;

use franco_host::telemetry::init_tracing;
use franco_host::{FrancoConfig, Host, HostError, Plugin, RateSet, StaticCart};

const USAGE: &str = "Usage: franco-eval <CART.json> [OPTIONS]";

fn print_help() {
    println!("Franco Cartons Evaluator");
    println!();
    println!("{}", USAGE);
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>    Config file (default: platform config dir/franco.toml)");
    println!("  -s, --slot <N>         Slot threshold override");
    println!("      --chf <AMOUNT>     CHF threshold override");
    println!("  -e, --enforce <BOOL>   Force enforcement on or off (default: from config)");
    println!("  -r, --rates <PATH>     Existing rates JSON object keyed by rate id");
    println!("  -h, --help             Show this help message");
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, HostError> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| HostError::Usage(format!("{} needs a value\n{}", flag, USAGE)))
}

fn parse_number(raw: &str, flag: &str) -> Result<f64, HostError> {
    raw.trim()
        .parse()
        .map_err(|_| HostError::Usage(format!("{} expects a number, got '{}'", flag, raw)))
}

fn read_json(path: &str) -> Result<Value, HostError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut cart_path: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut rates_path: Option<String> = None;
    let mut slot: Option<f64> = None;
    let mut chf: Option<f64> = None;
    let mut enforce: Option<bool> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                config_path = Some(PathBuf::from(value_of(&args, i, "--config")?));
                i += 1;
            }
            "--slot" | "-s" => {
                slot = Some(parse_number(&value_of(&args, i, "--slot")?, "--slot")?);
                i += 1;
            }
            "--chf" => {
                chf = Some(parse_number(&value_of(&args, i, "--chf")?, "--chf")?);
                i += 1;
            }
            "--enforce" | "-e" => {
                let raw = value_of(&args, i, "--enforce")?;
                enforce = match raw.to_lowercase().as_str() {
                    "true" | "yes" | "1" => Some(true),
                    "false" | "no" | "0" => Some(false),
                    _ => {
                        return Err(HostError::Usage(format!(
                            "--enforce expects true or false, got '{}'",
                            raw
                        ))
                        .into())
                    }
                };
                i += 1;
            }
            "--rates" | "-r" => {
                rates_path = Some(value_of(&args, i, "--rates")?);
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other if other.starts_with('-') => {
                return Err(HostError::Usage(format!("Unknown option '{}'\n{}", other, USAGE)).into());
            }
            other => cart_path = Some(other.to_string()),
        }
        i += 1;
    }

    let cart_path = cart_path.ok_or_else(|| HostError::Usage(USAGE.to_string()))?;

    let mut config = FrancoConfig::load(config_path)?;
    if let Some(slot) = slot {
        config.thresholds.slot = slot;
    }
    if let Some(chf) = chf {
        config.thresholds.chf = chf;
    }
    if enforce.is_some() {
        config.enforcement.force = enforce;
    }
    config.validate()?;

    let cart = read_json(&cart_path)?;
    let rates = match rates_path {
        Some(path) => RateSet::from_json(&read_json(&path)?)?,
        None => RateSet::new(),
    };

    info!(cart = %cart_path, slot = config.thresholds.slot, chf = config.thresholds.chf, "Evaluating cart");

    let policy = config.policy();
    let host = Host::default()
        .with_cart(StaticCart(cart))
        .with_settings(config);
    let mut plugin = Plugin::with_policy(host, policy);

    let evaluation = plugin.validate_current_cart();
    let rates = plugin.inject_rate(rates);

    let output = json!({
        "evaluation": evaluation,
        "rates": rates.to_json(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
