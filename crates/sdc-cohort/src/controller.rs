//! The `CohortController` and its generation state machine.

use tracing::{debug, info, warn};

use sdc_core::{AgentId, AgentRng, SimConfig, SimRng, Tick, Vec2};
use sdc_decision::{DecisionFunction, Observation, SimContext};
use sdc_scoring::ScoringPolicy;
use sdc_sensor::SensorEngine;
use sdc_surface::Surface;
use sdc_vehicle::{AgentState, KinematicModel, TerminalKind};

use crate::{
    AgentSnapshot, CohortError, CohortObserver, CohortResult, EndReason, FitnessSink,
    GenerationStatus, GenerationSummary, NoopObserver, ScenarioConfig, TickSummary,
};

// ── Slot ──────────────────────────────────────────────────────────────────────

/// One agent: its controller, its state and its private RNG.
pub(crate) struct Slot {
    pub(crate) id:     AgentId,
    pub(crate) policy: Box<dyn DecisionFunction>,
    pub(crate) state:  AgentState,
    pub(crate) rng:    AgentRng,
}

/// Everything the per-agent step reads; shared across workers.
struct StepEnv<'a> {
    ctx:          SimContext<'a>,
    model:        &'a KinematicModel,
    sensors:      &'a SensorEngine,
    scoring:      &'a ScoringPolicy,
    target:       Option<Vec2>,
    max_velocity: f32,
}

impl Slot {
    /// Decide → move → sense → score.  Dead agents are left untouched.
    fn step(&mut self, env: &StepEnv<'_>) {
        if !self.state.alive {
            return;
        }
        let command = {
            let obs = Observation {
                radars:         &self.state.radars,
                velocity_ratio: self.state.velocity / env.max_velocity,
                target_ratio:   self.state.target_ratio,
            };
            self.policy.decide(self.id, &obs, &env.ctx, &mut self.rng)
        };
        env.model.update(&mut self.state, command, env.ctx.dt);
        let contact = env.sensors.sense(&mut self.state, env.ctx.surface);
        env.scoring.score(&mut self.state, &contact, env.target);
    }
}

// ── CohortController ──────────────────────────────────────────────────────────

/// Runs generations of agents over one surface.
///
/// Create via [`CohortBuilder`][crate::CohortBuilder].  The controller owns
/// the surface; it is regenerated exactly once whenever a generation ends,
/// for whatever reason.
pub struct CohortController<S: Surface> {
    pub(crate) config:   SimConfig,
    pub(crate) scenario: ScenarioConfig,
    pub(crate) surface:  S,
    pub(crate) model:    KinematicModel,
    pub(crate) sensors:  SensorEngine,
    pub(crate) rng:      SimRng,

    pub(crate) slots:      Vec<Slot>,
    pub(crate) status:     GenerationStatus,
    pub(crate) tick:       Tick,
    /// Generation (and map) counter; advanced when a generation ends.
    pub(crate) generation: u64,
    pub(crate) best_score: f32,
    pub(crate) best_ever:  f32,
    pub(crate) last:       Option<GenerationSummary>,
}

impl<S: Surface> CohortController<S> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Ticks elapsed in the current (or just-finished) generation.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// How many generations (and therefore maps) have finished.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Best total score seen in the current generation.
    #[inline]
    pub fn best_score(&self) -> f32 {
        self.best_score
    }

    /// Best total score seen across every generation so far.
    #[inline]
    pub fn best_ever(&self) -> f32 {
        self.best_ever
    }

    #[inline]
    pub fn last_summary(&self) -> Option<&GenerationSummary> {
        self.last.as_ref()
    }

    pub fn agent_count(&self) -> usize {
        self.slots.len()
    }

    pub fn alive_count(&self) -> usize {
        self.slots.iter().filter(|s| s.state.alive).count()
    }

    pub fn agent(&self, id: AgentId) -> Option<&AgentState> {
        self.slots.get(id.index()).map(|s| &s.state)
    }

    /// Every agent's state, in slot order.
    pub fn agents(&self) -> impl Iterator<Item = (AgentId, &AgentState)> + '_ {
        self.slots.iter().map(|s| (s.id, &s.state))
    }

    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.slots.iter().map(|s| AgentSnapshot::capture(s.id, &s.state)).collect()
    }

    // ── Generation life cycle ─────────────────────────────────────────────

    /// Spawn one agent per policy at the surface's start pose.
    pub fn begin_generation(&mut self, policies: Vec<Box<dyn DecisionFunction>>) -> CohortResult<()> {
        self.begin_generation_observed(policies, &mut NoopObserver)
    }

    pub fn begin_generation_observed<O: CohortObserver>(
        &mut self,
        policies: Vec<Box<dyn DecisionFunction>>,
        observer: &mut O,
    ) -> CohortResult<()> {
        if self.status.is_running() {
            return Err(CohortError::AlreadyRunning);
        }
        self.check_policies(&policies)?;

        let pose = self.surface.start_pose();
        let radar_count = self.scenario.radar.count;
        let seed = self.config.seed;
        let generation = self.generation;

        self.slots = policies
            .into_iter()
            .enumerate()
            .map(|(i, policy)| {
                let id = AgentId(i as u32);
                let mut state = AgentState::spawn(pose, radar_count);
                self.sensors.prime(&mut state, &self.surface);
                Slot { id, policy, state, rng: AgentRng::new(seed, generation, id) }
            })
            .collect();

        self.tick = Tick::ZERO;
        self.best_score = f32::NEG_INFINITY;
        self.status = GenerationStatus::Running;

        debug!(
            generation,
            agents = self.slots.len(),
            x = pose.position.x,
            y = pose.position.y,
            heading = pose.heading,
            "generation started"
        );
        observer.on_generation_start(generation, &self.surface, self.slots.len());
        Ok(())
    }

    /// Advance the running generation by one tick of `raw_dt` (clamped).
    pub fn step<F: FitnessSink>(&mut self, raw_dt: f32, sink: &mut F) -> CohortResult<GenerationStatus> {
        self.step_observed(raw_dt, sink, &mut NoopObserver)
    }

    pub fn step_observed<F: FitnessSink, O: CohortObserver>(
        &mut self,
        raw_dt:   f32,
        sink:     &mut F,
        observer: &mut O,
    ) -> CohortResult<GenerationStatus> {
        if !self.status.is_running() {
            return Err(CohortError::NotRunning);
        }

        let dt = self.config.clamp_dt(raw_dt);
        if dt != raw_dt {
            warn!(raw_dt, dt, "host step clamped");
        }

        self.step_agents(dt);
        self.tick = self.tick + 1;

        // ── Fitness and liveness, sequential in slot order ────────────────
        let mut alive = 0usize;
        let mut total = 0.0f32;
        for slot in &self.slots {
            let score = slot.state.total_score;
            sink.report(slot.id, score);
            self.best_score = self.best_score.max(score);
            total += score;
            alive += usize::from(slot.state.alive);
        }

        let summary = TickSummary {
            generation: self.generation,
            tick:       self.tick,
            dt,
            alive,
            best_score: self.best_score,
            mean_score: if self.slots.is_empty() { 0.0 } else { total / self.slots.len() as f32 },
        };
        observer.on_tick_end(&summary);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && self.tick.0 % interval == 0 {
            observer.on_snapshot(self.generation, self.tick, &self.snapshots());
        }

        if alive == 0 {
            self.end_generation(EndReason::AllDead, observer);
        } else if self.tick.0 > self.config.time_budget_ticks {
            self.end_generation(EndReason::TimeExpired, observer);
        }
        Ok(self.status)
    }

    /// Run a whole generation at the configured fixed `dt`.
    pub fn run_generation<F: FitnessSink, O: CohortObserver>(
        &mut self,
        policies: Vec<Box<dyn DecisionFunction>>,
        sink:     &mut F,
        observer: &mut O,
    ) -> CohortResult<GenerationSummary> {
        self.begin_generation_observed(policies, observer)?;
        let dt = self.config.dt;
        while self.step_observed(dt, sink, observer)?.is_running() {}
        self.last.ok_or(CohortError::NotRunning)
    }

    /// End the running generation now and build a new map.
    pub fn abort_generation(&mut self) -> CohortResult<GenerationSummary> {
        self.abort_generation_observed(&mut NoopObserver)
    }

    pub fn abort_generation_observed<O: CohortObserver>(
        &mut self,
        observer: &mut O,
    ) -> CohortResult<GenerationSummary> {
        if !self.status.is_running() {
            return Err(CohortError::NotRunning);
        }
        Ok(self.end_generation(EndReason::Aborted, observer))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn check_policies(&self, policies: &[Box<dyn DecisionFunction>]) -> CohortResult<()> {
        let expected = self.scenario.agent_count;
        if policies.len() != expected {
            return Err(CohortError::AgentCountMismatch {
                expected,
                got:  policies.len(),
                what: "decision functions",
            });
        }
        let inputs = self.scenario.input_len();
        for (agent, policy) in policies.iter().enumerate() {
            match policy.input_len() {
                Some(got) if got != inputs => {
                    return Err(CohortError::InputMismatch { agent, expected: inputs, got });
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn step_agents(&mut self, dt: f32) {
        let env = StepEnv {
            ctx:          SimContext::new(self.tick, dt, self.generation, &self.surface),
            model:        &self.model,
            sensors:      &self.sensors,
            scoring:      &self.scenario.scoring,
            target:       self.surface.target_position(),
            max_velocity: self.model.params().max_velocity,
        };

        #[cfg(not(feature = "parallel"))]
        for slot in &mut self.slots {
            slot.step(&env);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.slots.par_iter_mut().for_each(|slot| slot.step(&env));
        }
    }

    /// Summarize, regenerate the surface once, advance the map counter.
    fn end_generation<O: CohortObserver>(&mut self, reason: EndReason, observer: &mut O) -> GenerationSummary {
        let mut collided = 0;
        let mut parked = 0;
        let mut best: Option<(AgentId, f32)> = None;
        let mut total = 0.0f32;
        for slot in &self.slots {
            match slot.state.terminal {
                TerminalKind::Collided => collided += 1,
                TerminalKind::Parked   => parked += 1,
                TerminalKind::None     => {}
            }
            let score = slot.state.total_score;
            total += score;
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((slot.id, score));
            }
        }
        let agents = self.slots.len();
        let summary = GenerationSummary {
            generation:   self.generation,
            ticks:        self.tick.0,
            reason,
            agents,
            collided,
            parked,
            survivors:    agents - collided - parked,
            best_agent:   best.map(|(id, _)| id),
            best_fitness: best.map_or(0.0, |(_, v)| v),
            mean_fitness: if agents == 0 { 0.0 } else { total / agents as f32 },
        };

        self.surface.regenerate(&mut self.rng);
        self.generation += 1;
        self.best_ever = self.best_ever.max(summary.best_fitness);
        self.status = GenerationStatus::Ended(reason);
        self.last = Some(summary);

        info!(
            generation = summary.generation,
            ticks = summary.ticks,
            reason = reason.as_str(),
            best = summary.best_fitness,
            mean = summary.mean_fitness,
            collided,
            parked,
            "generation ended"
        );
        observer.on_generation_end(&summary);
        summary
    }
}
