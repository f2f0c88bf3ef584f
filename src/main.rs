// Scenario driver for the library: trains the 2-2-1 network on an arithmetic
// grid, or sweeps a trained network over a wider grid.
//
//   rawnet addition       [weights.json] [epochs]
//   rawnet multiplication [weights.json] [epochs]
//   rawnet use            [weights.json] [addition|multiplication]
//
// Set RUST_LOG=debug to also see network build/import/export events.
use std::process;

use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rawnet::{
    arithmetic_grid, train_for, InitStrategy, Network, NetworkConfig, Operation, Result, Sample,
    TrainConfig,
};

const GRID_MAX: u32 = 10;
const DEFAULT_EPOCHS: usize = 1000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("addition") => train_scenario(Operation::Addition, &args[1..]),
        Some("multiplication") => train_scenario(Operation::Multiplication, &args[1..]),
        Some("use") => use_scenario(&args[1..]),
        _ => {
            eprintln!("usage: rawnet <addition|multiplication|use> [weights.json] [epochs|operation]");
            process::exit(2);
        }
    }
}

fn default_weights(op: Operation) -> &'static str {
    match op {
        Operation::Addition => "addition.json",
        Operation::Multiplication => "multiplication.json",
    }
}

fn train_scenario(op: Operation, args: &[String]) -> Result<()> {
    let path = args.first().map_or(default_weights(op), String::as_str);
    let epochs = match args.get(1) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("epochs must be a non-negative integer, got {raw:?}");
            process::exit(2);
        }),
        None => DEFAULT_EPOCHS,
    };

    // Products reach 100 on the grid; a smaller step keeps the linear net stable.
    let learning_rate = match op {
        Operation::Addition => 1e-3,
        Operation::Multiplication => 1e-5,
    };
    let config = NetworkConfig::new(2, 2, 1, learning_rate)
        .with_init(InitStrategy::Uniform { bound: 0.5, seed: None });
    let mut network = Network::new(&config)?;

    // A file we cannot import is left alone rather than overwritten below.
    if network.import_if_present(path)? {
        info!(path, "imported prior weights");
    } else {
        info!(path, "no weights to import, starting fresh");
    }

    let samples = arithmetic_grid(op, GRID_MAX);
    let monitor = Sample {
        inputs: vec![5.0, 5.0],
        targets: vec![op.apply(5.0, 5.0)],
    };
    let train_config = TrainConfig::new(epochs).with_logging((epochs / 10).max(1), Some(monitor));
    if let Some(stats) = train_for(&mut network, &samples, &train_config)? {
        info!(epochs = stats.total_epochs, loss = stats.train_loss, "training finished");
    }

    let mut rng = rand::thread_rng();
    let a = rng.gen_range(1..=GRID_MAX) as f64;
    let b = rng.gen_range(1..=GRID_MAX) as f64;
    let prediction = network.evaluate(&[a, b])?[0];
    println!("{a} {} {b} = {prediction:.4}", op.symbol());

    network.export_json(path)?;
    info!(path, "exported weights");
    Ok(())
}

fn use_scenario(args: &[String]) -> Result<()> {
    let op = match args.get(1).map(String::as_str) {
        None | Some("addition") => Operation::Addition,
        Some("multiplication") => Operation::Multiplication,
        Some(other) => {
            eprintln!("unknown operation {other:?}");
            process::exit(2);
        }
    };
    let path = args.first().map_or(default_weights(op), String::as_str);
    let mut network = Network::load_json(path)?;

    for a in 0..20 {
        for b in 0..20 {
            let (a, b) = (a as f64, b as f64);
            let prediction = network.evaluate(&[a, b])?[0];
            println!("{a} {} {b} = {prediction:.4} (expected {})", op.symbol(), op.apply(a, b));
        }
    }
    Ok(())
}
