use clothsim::{bench_tick, bench_tick_curve};
use clothsim::{Cloth, ClothConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file inside `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Log a summary every this many ticks
    #[arg(short, long, default_value_t = 60)]
    every: u64,

    /// Run the tick benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ClothConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let cfg: ClothConfig = serde_yaml::from_reader(reader)?;
    Ok(cfg)
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_tick()?;
        bench_tick_curve()?;
        return Ok(());
    }

    let cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut cloth = Cloth::build(&cfg)?;
    let every = args.every.max(1);

    for _ in 0..args.ticks {
        cloth.tick();
        if let Some(report) = cloth.last_report().filter(|r| r.tick % every == 0) {
            info!(
                tick = report.tick,
                dt = report.dt,
                energy = report.raw_energy,
                estimate = report.estimate,
                "progress"
            );
        }
    }

    let frame = cloth.tick_frame();
    info!(
        ticks = cloth.ticks(),
        occupied = frame.occupied(),
        rows = frame.rows(),
        cols = frame.cols(),
        estimate = cloth.energy_estimate(),
        "final frame"
    );

    Ok(())
}
