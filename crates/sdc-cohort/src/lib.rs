//! `sdc-cohort` — generation loop orchestrator for the rust_sdc framework.
//!
//! # Tick loop
//!
//! ```text
//! begin_generation(policies):
//!   spawn every agent at surface.start_pose(), prime corners + radars
//! step(raw_dt, sink):
//!   dt = clamp(raw_dt, min_dt, max_dt)
//!   for every live agent (parallel with the `parallel` feature):
//!     ① Decide  — policy.decide(previous radars, ratios)   → Command
//!     ② Move    — KinematicModel::update(state, command, dt)
//!     ③ Sense   — corners → collision policy → radars
//!     ④ Score   — ScoringPolicy::score(state, contact, target)
//!   report every agent's total score to the sink (slot order)
//!   if nobody is alive          → Ended(AllDead)
//!   else if tick > time budget  → Ended(TimeExpired)
//!   on Ended: surface.regenerate(), map counter += 1
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`scenario`]   | `ScenarioConfig` — vehicle, sensors, policies, agent count       |
//! | [`builder`]    | `CohortBuilder` — validation and construction                    |
//! | [`controller`] | `CohortController` — the generation state machine                |
//! | [`status`]     | `GenerationStatus`, `EndReason`                                  |
//! | [`fitness`]    | `FitnessSink` trait, `FitnessTable`                              |
//! | [`observer`]   | `CohortObserver` trait, `NoopObserver`                           |
//! | [`snapshot`]   | `AgentSnapshot`, `TickSummary`, `GenerationSummary`              |
//! | [`optimizer`]  | `Optimizer` trait, `RandomSearch`                                |
//! | [`trainer`]    | `Trainer`, `TrainingOutcome` — epochs of generations             |
//! | [`error`]      | `CohortError`, `CohortResult<T>`                                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the per-agent step on Rayon's thread pool.        |
//! | `serde`    | Serde derives on `ScenarioConfig` and summaries.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut rng = SimRng::new(config.seed);
//! let track = Track::new(TrackParams::default(), &mut rng)?;
//! let mut cohort = CohortBuilder::new(config, ScenarioConfig::highway(), track).build()?;
//! let mut trainer = Trainer::new(RandomSearch::for_scenario(cohort.scenario(), &[6]));
//! let outcome = trainer.run(&mut cohort, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod fitness;
pub mod observer;
pub mod optimizer;
pub mod scenario;
pub mod snapshot;
pub mod status;
pub mod trainer;

#[cfg(test)]
mod tests;

pub use builder::CohortBuilder;
pub use controller::CohortController;
pub use error::{CohortError, CohortResult};
pub use fitness::{FitnessSink, FitnessTable};
pub use observer::{CohortObserver, NoopObserver};
pub use optimizer::{Optimizer, RandomSearch};
pub use scenario::ScenarioConfig;
pub use snapshot::{AgentSnapshot, GenerationSummary, TickSummary};
pub use status::{EndReason, GenerationStatus};
pub use trainer::{Trainer, TrainingOutcome};
