//! Cohort observer trait for progress reporting and data collection.

use sdc_core::Tick;
use sdc_surface::Surface;

use crate::{AgentSnapshot, GenerationSummary, TickSummary};

/// Callbacks invoked by the [`CohortController`][crate::CohortController]
/// at key points of a generation.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — generation printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl CohortObserver for Printer {
///     fn on_generation_end(&mut self, s: &GenerationSummary) {
///         println!("gen {}: best {:.1} ({:?})", s.generation, s.best_fitness, s.reason);
///     }
/// }
/// ```
pub trait CohortObserver {
    /// Called after every agent has spawned and been primed.
    fn on_generation_start(&mut self, _generation: u64, _surface: &dyn Surface, _agents: usize) {}

    /// Called at the end of each tick, after fitness has been reported.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.snapshot_interval_ticks` ticks (never when the
    /// interval is 0).
    fn on_snapshot(&mut self, _generation: u64, _tick: Tick, _agents: &[AgentSnapshot]) {}

    /// Called once when a generation ends, after the surface was regenerated.
    fn on_generation_end(&mut self, _summary: &GenerationSummary) {}
}

/// A [`CohortObserver`] that does nothing.
pub struct NoopObserver;

impl CohortObserver for NoopObserver {}
