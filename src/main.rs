//! Command-line front end: reads an order feed, runs it through the kitchen
//! and writes the resulting action history as JSON.

use clap::Parser;
use kitchen_hold::config::{KitchenConfig, StrategyName};
use kitchen_hold::lifecycle::{setup_tracing, KitchenSystem};
use kitchen_hold::model::{Action, ActionKind, Order};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

#[derive(Parser, Debug)]
#[command(name = "kitchen-hold")]
#[command(about = "Delivery kitchen holding-area simulation")]
struct Args {
    /// JSON array of orders: [{"id", "name", "temp", "freshness"}]
    #[arg(long)]
    orders: PathBuf,

    /// Milliseconds between two placements
    #[arg(long)]
    rate: Option<u64>,

    /// Minimum pickup delay in milliseconds
    #[arg(long)]
    min: Option<u64>,

    /// Maximum pickup delay in milliseconds
    #[arg(long)]
    max: Option<u64>,

    /// Discard strategy: freshness, temperature or composite
    #[arg(long)]
    discard_strategy: Option<StrategyName>,

    /// Freshness discount for mismatched orders (composite only)
    #[arg(long)]
    penalty: Option<f64>,

    #[arg(long)]
    heater_capacity: Option<usize>,

    #[arg(long)]
    cooler_capacity: Option<usize>,

    #[arg(long)]
    shelf_capacity: Option<usize>,

    /// Seed for pickup delays; 0 picks one at random
    #[arg(long)]
    seed: Option<u64>,

    /// Write the history here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the configuration and a per-order summary
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Flags given on the command line, everything else from [`KitchenConfig::default`].
    fn config(&self) -> KitchenConfig {
        let defaults = KitchenConfig::default();
        KitchenConfig {
            heater_capacity: self.heater_capacity.unwrap_or(defaults.heater_capacity),
            cooler_capacity: self.cooler_capacity.unwrap_or(defaults.cooler_capacity),
            shelf_capacity: self.shelf_capacity.unwrap_or(defaults.shelf_capacity),
            rate_ms: self.rate.unwrap_or(defaults.rate_ms),
            min_pickup_ms: self.min.unwrap_or(defaults.min_pickup_ms),
            max_pickup_ms: self.max.unwrap_or(defaults.max_pickup_ms),
            discard_strategy: self.discard_strategy.unwrap_or(defaults.discard_strategy),
            mismatch_penalty: self.penalty.unwrap_or(defaults.mismatch_penalty),
            seed: self.seed.or(defaults.seed),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let args = Args::parse();

    let config = args.config();
    config.validate().map_err(|e| e.to_string())?;
    if args.verbose {
        print_config(&config);
    }

    let raw = fs::read_to_string(&args.orders)
        .map_err(|e| format!("Failed to read {}: {}", args.orders.display(), e))?;
    let orders: Vec<Order> =
        serde_json::from_str(&raw).map_err(|e| format!("Failed to parse orders: {}", e))?;
    info!(count = orders.len(), "Orders loaded");

    let system = KitchenSystem::new(config).map_err(|e| e.to_string())?;

    let history = system
        .run(orders)
        .instrument(info_span!("simulation"))
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    if args.verbose {
        print_summary(&history);
    }

    let json = serde_json::to_string_pretty(&history).map_err(|e| e.to_string())?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?,
        None => println!("{}", json),
    }

    info!(actions = history.len(), "Simulation complete");
    Ok(())
}

fn print_config(config: &KitchenConfig) {
    eprintln!("Kitchen configuration:");
    eprintln!(
        "  capacities: heater={} cooler={} shelf={}",
        config.heater_capacity, config.cooler_capacity, config.shelf_capacity
    );
    eprintln!("  rate: {}ms", config.rate_ms);
    eprintln!("  pickup: {}-{}ms", config.min_pickup_ms, config.max_pickup_ms);
    eprintln!("  strategy: {} (penalty {})", config.discard_policy(), config.mismatch_penalty);
}

fn print_summary(history: &[Action]) {
    let mut per_order: BTreeMap<&str, Vec<ActionKind>> = BTreeMap::new();
    for action in history {
        per_order.entry(&action.order_id).or_default().push(action.kind);
    }

    let count = |kind: ActionKind| history.iter().filter(|a| a.kind == kind).count();
    eprintln!(
        "Summary: {} orders, {} placed, {} moved, {} picked up, {} discarded",
        per_order.len(),
        count(ActionKind::Place),
        count(ActionKind::Move),
        count(ActionKind::Pickup),
        count(ActionKind::Discard)
    );
    for (id, kinds) in per_order {
        let trail: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        eprintln!("  {}: {}", id, trail.join(" -> "));
    }
}
