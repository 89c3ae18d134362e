//! Fluent builder for constructing a [`CohortController`].

use tracing::debug;

use sdc_core::{SimConfig, SimRng, Tick};
use sdc_decision::DecisionFunction;
use sdc_sensor::SensorEngine;
use sdc_surface::Surface;
use sdc_vehicle::KinematicModel;

use crate::{CohortController, CohortError, CohortResult, GenerationStatus, ScenarioConfig};

/// Fluent builder for [`CohortController<S>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, time budget, dt clamp, …
/// - [`ScenarioConfig`] — vehicle, sensors, collision and scoring policies
/// - `S: Surface` — the track or parking lot
///
/// # Optional inputs
///
/// | Method          | Default                                        |
/// |-----------------|------------------------------------------------|
/// | `.policies(v)`  | none; call `begin_generation` before stepping  |
///
/// # Example
///
/// ```rust,ignore
/// let mut cohort = CohortBuilder::new(config, ScenarioConfig::parking(), lot)
///     .policies(policies)
///     .build()?;
/// while cohort.step(dt, &mut table)?.is_running() {}
/// ```
pub struct CohortBuilder<S: Surface> {
    config:   SimConfig,
    scenario: ScenarioConfig,
    surface:  S,
    policies: Option<Vec<Box<dyn DecisionFunction>>>,
}

impl<S: Surface> CohortBuilder<S> {
    pub fn new(config: SimConfig, scenario: ScenarioConfig, surface: S) -> Self {
        Self { config, scenario, surface, policies: None }
    }

    /// Decision functions for the first generation (must be length
    /// `scenario.agent_count`).  The built controller is already running.
    pub fn policies(mut self, policies: Vec<Box<dyn DecisionFunction>>) -> Self {
        self.policies = Some(policies);
        self
    }

    /// Validate every input and return a ready controller.
    pub fn build(self) -> CohortResult<CohortController<S>> {
        self.config.validate()?;
        self.scenario.validate()?;

        if let Some(p) = &self.policies {
            if p.len() != self.scenario.agent_count {
                return Err(CohortError::AgentCountMismatch {
                    expected: self.scenario.agent_count,
                    got:      p.len(),
                    what:     "decision functions",
                });
            }
        }
        if self.scenario.scoring.needs_target() && self.surface.target_position().is_none() {
            return Err(CohortError::Config(
                "goal-seeking scoring needs a surface with a target position".into(),
            ));
        }

        #[cfg(feature = "parallel")]
        if let Some(n) = self.config.num_threads {
            // The global pool can only be configured once per process.
            if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
                debug!(error = %e, "rayon global pool already configured");
            }
        }

        let model = KinematicModel::new(self.scenario.vehicle.clone())?;
        let sensors = SensorEngine::new(
            &self.scenario.vehicle,
            self.scenario.radar.clone(),
            self.scenario.collision,
        )?;
        let rng = SimRng::new(self.config.seed).child(1);

        debug!(
            agents = self.scenario.agent_count,
            radars = self.scenario.radar.count,
            budget = self.config.time_budget_ticks,
            "cohort built"
        );

        let mut cohort = CohortController {
            config:     self.config,
            scenario:   self.scenario,
            surface:    self.surface,
            model,
            sensors,
            rng,
            slots:      Vec::new(),
            status:     GenerationStatus::Idle,
            tick:       Tick::ZERO,
            generation: 0,
            best_score: 0.0,
            best_ever:  f32::NEG_INFINITY,
            last:       None,
        };
        if let Some(policies) = self.policies {
            cohort.begin_generation(policies)?;
        }
        Ok(cohort)
    }
}
