//! parking — train a cohort of self-parking cars in a generated lot.
//!
//! Each generation picks a new free target slot and a new set of parked
//! cars.  Cars see the lot through eight radars plus the fraction of the
//! initial distance to the target already covered.  A car that gets within
//! half a percent of the target snaps into the slot and collects the parking
//! bonus.  The best network found is written to
//! `checkpoints/parking-best.json`.
//!
//! ```text
//! cargo run -p parking --release
//! cargo run -p parking --release -- --layout small
//! cargo run -p parking --release -- --replay checkpoints/parking-best.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sdc_cohort::{
    AgentSnapshot, CohortBuilder, CohortObserver, FitnessTable, GenerationSummary, RandomSearch,
    ScenarioConfig, TickSummary, Trainer,
};
use sdc_core::{SimConfig, SimRng, Tick};
use sdc_decision::{DecisionFunction, FeedForwardNet, OutputDecoding, artifact};
use sdc_output::{CohortOutputObserver, CsvWriter, OutputWriter};
use sdc_surface::{LotLayout, LotParams, ParkingLot, Surface};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:     &str     = "output/parking";
const CHECKPOINT:     &str     = "checkpoints/parking-best.json";
const HIDDEN_LAYERS:  &[usize] = &[6];
const REPLAY_COPIES:  usize    = 1;
const SNAPSHOT_TICKS: u64      = 25;
const TIME_BUDGET:    u64      = 2_000;

// ── Run file ──────────────────────────────────────────────────────────────────

/// Optional JSON run file; every section falls back to the built-in preset.
#[derive(Deserialize)]
#[serde(default)]
struct RunFile {
    sim:      SimConfig,
    scenario: ScenarioConfig,
    lot:      LotParams,
}

impl Default for RunFile {
    fn default() -> Self {
        Self {
            sim: SimConfig {
                time_budget_ticks:       TIME_BUDGET,
                snapshot_interval_ticks: SNAPSHOT_TICKS,
                ..SimConfig::default()
            },
            scenario: ScenarioConfig::parking(),
            // The large lot has the fixed start pose the parking car expects.
            lot: LotParams { layout: LotLayout::Large, occupied: None },
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
    let mut layout = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
                run = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
            }
            "--layout" => {
                layout = match args.next().as_deref() {
                    Some("small") => Some(LotLayout::Small),
                    Some("large") => Some(LotLayout::Large),
                    other => bail!("--layout expects small or large, got {other:?}"),
                };
            }
            "--replay" => {
                let path = args.next().context("--replay needs a path")?;
                mode = Mode::Replay(PathBuf::from(path));
            }
            other => bail!("unknown argument {other:?} (expected --config, --layout or --replay)"),
        }
    }
    // The flag wins over the run file.
    if let Some(layout) = layout {
        run.lot.layout = layout;
    }
    Ok((run, mode))
}

// ── Observer wrapper to print progress ────────────────────────────────────────

struct ProgressObserver<W: OutputWriter> {
    inner:         CohortOutputObserver<W>,
    snapshot_rows: usize,
    parked_total:  usize,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: CohortOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, parked_total: 0 }
    }
}

impl<W: OutputWriter> CohortObserver for ProgressObserver<W> {
    fn on_generation_start(&mut self, generation: u64, surface: &dyn Surface, agents: usize) {
        if let Some(target) = surface.target_position() {
            info!(generation, agents, x = target.x, y = target.y, "target slot chosen");
        }
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, generation: u64, tick: Tick, agents: &[AgentSnapshot]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(generation, tick, agents);
    }

    fn on_generation_end(&mut self, s: &GenerationSummary) {
        self.parked_total += s.parked;
        println!(
            "{:<6} {:<7} {:<13} {:<8} {:<7} {:>10.2} {:>10.2}",
            s.generation,
            s.ticks,
            s.reason.as_str(),
            s.collided,
            s.parked,
            s.best_fitness,
            s.mean_fitness,
        );
        self.inner.on_generation_end(s);
    }
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

    println!("=== parking — rust_sdc self-parking cohort ===");
    println!(
        "Agents: {}  |  Epochs: {}  |  Layout: {:?}  |  Seed: {}",
        run.scenario.agent_count, run.sim.epochs, run.lot.layout, run.sim.seed
    );
    println!();

    // 1. Generate the first lot.
    let mut rng = SimRng::new(run.sim.seed);
    let lot = ParkingLot::new(run.lot.clone(), &mut rng)?;
    println!(
        "Lot: {} slots, {} occupied, target {:?}",
        lot.slots().len(),
        lot.occupied_slots().len(),
        lot.target_slot().id,
    );

    // 2. Build the cohort.
    let mut cohort = CohortBuilder::new(run.sim.clone(), run.scenario.clone(), lot).build()?;

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = ProgressObserver::new(CohortOutputObserver::new(writer).without_tick_summaries());

    // 4. Train or replay.
    println!(
        "{:<6} {:<7} {:<13} {:<8} {:<7} {:>10} {:>10}",
        "Gen", "Ticks", "Reason", "Crashed", "Parked", "Best", "Mean"
    );
    println!("{}", "-".repeat(67));
    let t0 = Instant::now();
    match mode {
        Mode::Train => {
            let optimizer = RandomSearch::new(
                run.scenario.input_len(),
                HIDDEN_LAYERS,
                OutputDecoding::Signs,
                run.scenario.extra_input,
            );
            let mut trainer = Trainer::new(optimizer);
            let outcome = trainer.run(&mut cohort, &mut obs)?;

            println!();
            if let Some(best) = &outcome.best_policy {
                artifact::save_to_path(best, CHECKPOINT)?;
                println!("Best fitness {:.2}, saved to {CHECKPOINT}", outcome.best_fitness);
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
            cohort.run_generation(policies, &mut table, &mut obs)?;
            if let Some((agent, fitness)) = table.best() {
                println!();
                println!("Replay of {}: agent {} scored {fitness:.2}", path.display(), agent.0);
            }
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
    println!("  cars parked         : {}", obs.parked_total);

    Ok(())
}
