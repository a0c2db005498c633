use magpend::{ScenarioConfig, Scenario, Progress};
use magpend::bench_sweep;

use clap::Parser;
use anyhow::{Context, Result};
use log::info;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under `scenarios/`
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Open the interactive viewer instead of running headless
    #[arg(long)]
    view: bool,

    /// Time sweeps over a range of grid sizes and exit
    #[arg(long)]
    bench: bool,
}

fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_sweep();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = Scenario::build_scenario(scenario_cfg)?;

    if args.view {
        run_view(scenario)
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        run_headless(scenario)
    }
}

#[cfg(feature = "viewer")]
fn run_view(scenario: Scenario) -> Result<()> {
    magpend::run_viewer(scenario);
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_view(_scenario: Scenario) -> Result<()> {
    anyhow::bail!("built without the `viewer` feature; rebuild with `--features viewer`")
}

// one full sweep, logging progress at every yield
fn run_headless(mut scenario: Scenario) -> Result<()> {
    let height = scenario.generator.buffer().height();
    scenario.toggle_generation();

    loop {
        match scenario.tick() {
            Progress::Row(row) => info!("{}/{} rows", row + 1, height),
            _ => break,
        }
    }

    let tally = scenario.generator.tally();
    for (k, m) in scenario.magnets.snapshot().iter().enumerate() {
        let count = tally.captured.get(k).copied().unwrap_or(0);
        info!("magnet {} at ({:.3}, {:.3}): {} pixels", k, m.x.x, m.x.y, count);
    }
    info!("open space: {} pixels, unsettled: {} pixels", tally.open, tally.unsettled);
    Ok(())
}
