//! corridor — run the StationSim crowd model once and print its statistics.
//!
//! ```text
//! corridor [config.json]
//! ```
//!
//! Without an argument the default 700-agent, 200 × 100 corridor is used.
//! Any field missing from the JSON file takes its default.  Set `RUST_LOG`
//! (e.g. `RUST_LOG=debug`) for more detail.

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use ss_assim::{make_observations, make_truth, rmse, FilterConfig};
use ss_core::{CrowdConfig, SimRng, Tick};
use ss_sim::{CrowdModel, ModelObserver, PopulationCounts};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Standard deviation of the synthetic sensor noise.
const OBS_NOISE_STD: f64 = 1.0;
/// Print an observation error line every this many ticks.
const OBS_REPORT_EVERY: usize = 100;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tracks the most crowded tick.
#[derive(Default)]
struct PeakActive {
    tick:   Tick,
    active: usize,
}

impl ModelObserver for PeakActive {
    fn on_tick_end(&mut self, tick: Tick, counts: PopulationCounts) {
        if counts.active > self.active {
            self.active = counts.active;
            self.tick = tick;
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config() -> Result<CrowdConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening {path}"))?;
            serde_json::from_reader(BufReader::new(file)).with_context(|| format!("parsing {path}"))
        }
        None => Ok(CrowdConfig::default()),
    }
}

/// The `RUST_LOG` directives if present and well formed, else `info`.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .init();

    let config = load_config()?;
    println!("=== corridor — StationSim crowd model ===");
    println!(
        "Corridor: {} × {}  |  Agents: {}  |  Gates: {} in, {} out  |  Seed: {}",
        config.width,
        config.height,
        config.population_size,
        config.entrance_count,
        config.exit_count,
        config.seed
    );
    println!();

    // 1. Run the model.
    let mut model = CrowdModel::new(config.clone())?;
    let mut peak = PeakActive::default();
    let t0 = Instant::now();
    let report = model.batch_with(config.iteration_limit, &mut peak);
    let elapsed = t0.elapsed();

    println!("Batch complete in {:.3} s", elapsed.as_secs_f64());
    println!("Peak crowd: {} active agents at {}", peak.active, peak.tick);
    println!("{report}");

    if !config.history_enabled {
        return Ok(());
    }

    // 2. Twin experiment inputs: truth and noisy observations of it.
    let truth = make_truth(&config)?;
    let filter = FilterConfig::identity(config.state_len(), OBS_NOISE_STD, 10, 50, truth.len() as u64);
    filter.validate_for(&config)?;
    let mut rng = SimRng::new(config.seed.wrapping_add(1));
    let observations = make_observations(&truth, &filter.observation_operator, 0.0, OBS_NOISE_STD, &mut rng)?;

    println!("Observation RMSE against truth (σ = {OBS_NOISE_STD}):");
    for (i, (obs, state)) in observations.iter().zip(&truth).enumerate() {
        if i % OBS_REPORT_EVERY == 0 || i + 1 == truth.len() {
            println!("  {:<8} {:.4}", Tick(i as u64 + 1), rmse(obs, state)?);
        }
    }

    Ok(())
}
