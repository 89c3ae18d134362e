//! highway — train a cohort of self-driving cars around generated tracks.
//!
//! Every generation runs on a freshly generated closed track.  Cars see the
//! road through nine raw radars plus their speed ratio and are scored on
//! distance covered while staying on the asphalt.  The best network found is
//! written to `checkpoints/highway-best.json`.
//!
//! ```text
//! cargo run -p highway --release
//! cargo run -p highway --release -- --config highway.json
//! cargo run -p highway --release -- --replay checkpoints/highway-best.json
//! ```
//!
//! Set `RUST_LOG=debug` for per-generation controller logs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sdc_cohort::{
    AgentSnapshot, CohortBuilder, CohortObserver, FitnessTable, GenerationSummary, RandomSearch, ScenarioConfig,
    TickSummary, Trainer,
};
use sdc_core::{SimConfig, SimRng, Tick};
use sdc_decision::{DecisionFunction, FeedForwardNet, artifact};
use sdc_output::{CohortOutputObserver, CsvWriter, OutputWriter};
use sdc_surface::{Surface, Track, TrackParams};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:     &str     = "output/highway";
const CHECKPOINT:     &str     = "checkpoints/highway-best.json";
const HIDDEN_LAYERS:  &[usize] = &[6];
const REPLAY_COPIES:  usize    = 1;
const SNAPSHOT_TICKS: u64      = 25;

// ── Run file ──────────────────────────────────────────────────────────────────

/// Optional JSON run file; every section falls back to the built-in preset.
#[derive(Deserialize)]
#[serde(default)]
struct RunFile {
    sim:      SimConfig,
    scenario: ScenarioConfig,
    track:    TrackParams,
}

impl Default for RunFile {
    fn default() -> Self {
        Self {
            sim:      SimConfig { snapshot_interval_ticks: SNAPSHOT_TICKS, ..SimConfig::default() },
            scenario: ScenarioConfig::highway(),
            track:    TrackParams::default(),
        }
    }
}

enum Mode {
    Train,
    Replay(PathBuf),
}

fn parse_args() -> Result<(RunFile, Mode)> {
    let mut run = RunFile::default();
    let mut mode = Mode::Train;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
                run = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
            }
            "--replay" => {
                let path = args.next().context("--replay needs a path")?;
                mode = Mode::Replay(PathBuf::from(path));
            }
            other => bail!("unknown argument {other:?} (expected --config or --replay)"),
        }
    }
    Ok((run, mode))
}

// ── Observer wrapper to print progress ────────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:         CohortOutputObserver<W>,
    snapshot_rows: usize,
    tick_rows:     usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: CohortOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, tick_rows: 0 }
    }
}

impl<W: OutputWriter> CohortObserver for ProgressObserver<W> {
    fn on_generation_start(&mut self, generation: u64, surface: &dyn Surface, agents: usize) {
        let raster = surface.raster();
        info!(generation, agents, width = raster.width(), height = raster.height(), "track ready");
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.tick_rows += 1;
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, generation: u64, tick: Tick, agents: &[AgentSnapshot]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(generation, tick, agents);
    }

    fn on_generation_end(&mut self, s: &GenerationSummary) {
        print_row(s);
        self.inner.on_generation_end(s);
    }
}

fn print_header() {
    println!(
        "{:<6} {:<7} {:<13} {:<8} {:<10} {:>10} {:>10}",
        "Gen", "Ticks", "Reason", "Crashed", "Survivors", "Best", "Mean"
    );
    println!("{}", "-".repeat(70));
}

fn print_row(s: &GenerationSummary) {
    println!(
        "{:<6} {:<7} {:<13} {:<8} {:<10} {:>10.2} {:>10.2}",
        s.generation,
        s.ticks,
        s.reason.as_str(),
        s.collided,
        s.survivors,
        s.best_fitness,
        s.mean_fitness,
    );
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (mut run, mode) = parse_args()?;
    if let Mode::Replay(_) = mode {
        run.scenario.agent_count = REPLAY_COPIES;
        run.sim.epochs = 1;
    }

    println!("=== highway — rust_sdc self-driving cohort ===");
    println!(
        "Agents: {}  |  Epochs: {}  |  Budget: {} ticks  |  Seed: {}",
        run.scenario.agent_count, run.sim.epochs, run.sim.time_budget_ticks, run.sim.seed
    );
    println!();

    // 1. Generate the first track.
    let mut rng = SimRng::new(run.sim.seed);
    let track = Track::new(run.track.clone(), &mut rng)?;
    println!("Track: {} curve samples, start {:?}", track.curve().len(), track.start_pose());

    // 2. Build the cohort.
    let mut cohort = CohortBuilder::new(run.sim.clone(), run.scenario.clone(), track).build()?;

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ProgressObserver::new(CohortOutputObserver::new(writer));

    // 4. Train or replay.
    print_header();
    let t0 = Instant::now();
    match mode {
        Mode::Train => {
            let optimizer = RandomSearch::for_scenario(cohort.scenario(), HIDDEN_LAYERS);
            let mut trainer = Trainer::new(optimizer);
            let outcome = trainer.run(&mut cohort, &mut obs)?;

            println!();
            match (outcome.best_policy, outcome.best_generation) {
                (Some(best), Some(generation)) => {
                    artifact::save_to_path(&best, CHECKPOINT)?;
                    println!(
                        "Best fitness {:.2} in generation {generation}, saved to {CHECKPOINT}",
                        outcome.best_fitness
                    );
                }
                _ => println!("No fitness was reported; nothing saved."),
            }
        }
        Mode::Replay(path) => {
            let net: FeedForwardNet = artifact::load_from_path(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            net.validate()?;
            let policies: Vec<Box<dyn DecisionFunction>> = (0..REPLAY_COPIES)
                .map(|_| Box::new(net.clone()) as Box<dyn DecisionFunction>)
                .collect();
            let mut table = FitnessTable::new(REPLAY_COPIES);
            let summary = cohort.run_generation(policies, &mut table, &mut obs)?;
            println!();
            println!("Replay of {} ended after {} ticks: {}", path.display(), summary.ticks, summary.reason.as_str());
        }
    }
    let elapsed = t0.elapsed();

    obs.inner.finish();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.tick_rows);
    println!("  best score ever     : {:.2}", cohort.best_ever());

    Ok(())
}
