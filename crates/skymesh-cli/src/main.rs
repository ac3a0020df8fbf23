use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use skymesh_lib::{compute_route, Drone, Position, RoutePlan, RouteRequest, SearchMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "Skymesh relay routing utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a relay route between two node ids in a scenario file.
    Route {
        /// Path to the scenario JSON file (drone roster, control position,
        /// range budgets).
        #[arg(long)]
        scenario: PathBuf,
        /// Source node id.
        #[arg(long = "from")]
        from: String,
        /// Destination node id.
        #[arg(long = "to")]
        to: String,
        /// Minimise summed link distance instead of hop count.
        #[arg(long)]
        weighted: bool,
        /// Emit the plan as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// On-disk scenario: the node roster and range budgets, without endpoints.
#[derive(Debug, Deserialize)]
struct Scenario {
    drones: Vec<Drone>,
    #[serde(default)]
    control_pos: Position,
    control_range: f64,
    drone_range: f64,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            scenario,
            from,
            to,
            weighted,
            json,
        } => handle_route(&scenario, &from, &to, weighted, json),
    }
}

fn handle_route(scenario: &Path, from: &str, to: &str, weighted: bool, json: bool) -> Result<()> {
    let raw = fs::read_to_string(scenario)
        .with_context(|| format!("failed to read scenario file {}", scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&raw)
        .with_context(|| "failed to parse scenario file".to_string())?;

    let request = RouteRequest {
        drones: scenario.drones,
        control_pos: scenario.control_pos,
        control_range: scenario.control_range,
        drone_range: scenario.drone_range,
        src: from.to_string(),
        dst: to.to_string(),
        mode: if weighted {
            SearchMode::DistanceMinimal
        } else {
            SearchMode::HopMinimal
        },
    };

    let plan = compute_route(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    Ok(())
}

fn print_plan(plan: &RoutePlan) {
    println!("Route ({}):", plan.mode);
    for id in &plan.path {
        println!("- {}", id);
    }
    println!("hops: {}", plan.metrics.hops);
    println!("total distance: {:.2}", plan.metrics.total_dist);
    println!("bottleneck distance: {:.2}", plan.metrics.bottleneck_dist);
    println!("bottleneck margin: {:.2}", plan.metrics.bottleneck_margin);
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
