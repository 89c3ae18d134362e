//! Unit tests for sdc-cohort.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sdc_core::{AgentId, Cell, Command, Direction, Pose, Rotation, SimConfig, SimRng, Tick, Vec2};
use sdc_decision::{
    ConstantPolicy, DecisionFunction, ExtraInput, FeedForwardNet, FnPolicy, NeutralPolicy,
    OutputDecoding,
};
use sdc_scoring::ScoringPolicy;
use sdc_sensor::{CollisionPolicy, RadarConfig};
use sdc_surface::{Category, LotParams, ParkingLot, Raster, Rect, StaticSurface, Surface};
use sdc_vehicle::TerminalKind;

use crate::{
    AgentSnapshot, CohortBuilder, CohortController, CohortError, CohortObserver, EndReason,
    FitnessTable, GenerationStatus, GenerationSummary, NoopObserver, Optimizer, RandomSearch,
    ScenarioConfig, TickSummary, Trainer,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Open canvas that counts regenerations and turns to grass while `lava`
/// is set.
struct CountingSurface {
    raster:        Raster,
    start:         Pose,
    lava:          Arc<AtomicBool>,
    regenerations: usize,
}

impl CountingSurface {
    fn new() -> Self {
        Self {
            raster:        Raster::new(400, 400, Category::Drivable),
            start:         Pose::new(Vec2::new(200.5, 200.5), 0.0),
            lava:          Arc::new(AtomicBool::new(false)),
            regenerations: 0,
        }
    }
}

impl Surface for CountingSurface {
    fn raster(&self) -> &Raster {
        &self.raster
    }

    fn start_pose(&self) -> Pose {
        self.start
    }

    fn regenerate(&mut self, _rng: &mut SimRng) {
        self.regenerations += 1;
        self.lava.store(false, Ordering::SeqCst);
    }

    fn classify(&self, cell: Cell) -> Category {
        if self.lava.load(Ordering::SeqCst) {
            Category::OffTrack
        } else {
            self.raster.get(cell)
        }
    }
}

fn config(budget: u64) -> SimConfig {
    SimConfig { time_budget_ticks: budget, ..SimConfig::default() }
}

/// Four short raw radars, stop on any unsafe contact, track scoring.
fn scenario(agents: usize) -> ScenarioConfig {
    ScenarioConfig {
        radar:       RadarConfig { count: 4, max_length: 50, ..RadarConfig::highway() },
        collision:   CollisionPolicy::PARKING,
        scoring:     ScoringPolicy::TRACK_FOLLOWING,
        extra_input: ExtraInput::None,
        agent_count: agents,
        ..ScenarioConfig::highway()
    }
}

fn neutral(n: usize) -> Vec<Box<dyn DecisionFunction>> {
    (0..n).map(|_| Box::new(NeutralPolicy) as Box<dyn DecisionFunction>).collect()
}

fn counting_cohort(agents: usize, budget: u64) -> CohortController<CountingSurface> {
    CohortBuilder::new(config(budget), scenario(agents), CountingSurface::new())
        .build()
        .unwrap()
}

#[derive(Default)]
struct Recorder {
    starts:    Vec<u64>,
    ticks:     Vec<TickSummary>,
    snapshots: Vec<(Tick, Vec<AgentSnapshot>)>,
    ends:      Vec<GenerationSummary>,
}

impl CohortObserver for Recorder {
    fn on_generation_start(&mut self, generation: u64, _surface: &dyn Surface, _agents: usize) {
        self.starts.push(generation);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.ticks.push(*summary);
    }

    fn on_snapshot(&mut self, _generation: u64, tick: Tick, agents: &[AgentSnapshot]) {
        self.snapshots.push((tick, agents.to_vec()));
    }

    fn on_generation_end(&mut self, summary: &GenerationSummary) {
        self.ends.push(*summary);
    }
}

// ── Generation end ────────────────────────────────────────────────────────────

#[cfg(test)]
mod generation_tests {
    use super::*;

    #[test]
    fn all_dead_at_tick_50_ends_and_regenerates_once() {
        let mut cohort = counting_cohort(3, 5_000);
        let lava = Arc::clone(&cohort.surface().lava);

        let policies: Vec<Box<dyn DecisionFunction>> = (0..3)
            .map(|_| {
                let lava = Arc::clone(&lava);
                Box::new(FnPolicy::new(move |_, _, ctx, _| {
                    if ctx.tick.0 >= 49 {
                        lava.store(true, Ordering::SeqCst);
                    }
                    Command::NEUTRAL
                })) as Box<dyn DecisionFunction>
            })
            .collect();
        cohort.begin_generation(policies).unwrap();

        let mut table = FitnessTable::new(3);
        let mut steps = 0;
        while cohort.step(0.17, &mut table).unwrap().is_running() {
            steps += 1;
            assert!(steps < 100, "generation never ended");
        }

        assert_eq!(cohort.status(), GenerationStatus::Ended(EndReason::AllDead));
        assert_eq!(cohort.tick(), Tick(50));
        assert_eq!(cohort.surface().regenerations, 1);
        assert_eq!(cohort.generation(), 1);
        assert!(cohort.agents().all(|(_, s)| s.terminal == TerminalKind::Collided));

        let summary = cohort.last_summary().unwrap();
        assert_eq!(summary.ticks, 50);
        assert_eq!(summary.collided, 3);
        assert_eq!(summary.survivors, 0);
    }

    #[test]
    fn time_budget_ends_generation() {
        let mut cohort = counting_cohort(2, 20);
        let summary = cohort
            .run_generation(neutral(2), &mut FitnessTable::new(2), &mut NoopObserver)
            .unwrap();
        assert_eq!(summary.reason, EndReason::TimeExpired);
        assert_eq!(summary.ticks, 21);
        assert_eq!(summary.survivors, 2);
        assert_eq!(cohort.surface().regenerations, 1);
        assert_eq!(cohort.alive_count(), 2);
    }

    #[test]
    fn budget_must_be_exceeded_before_time_expires() {
        let mut cohort = counting_cohort(2, 1);
        cohort.begin_generation(neutral(2)).unwrap();
        let mut table = FitnessTable::new(2);
        assert_eq!(cohort.step(0.17, &mut table).unwrap(), GenerationStatus::Running);
        assert_eq!(cohort.tick(), Tick(1));
        assert_eq!(
            cohort.step(0.17, &mut table).unwrap(),
            GenerationStatus::Ended(EndReason::TimeExpired)
        );
        assert_eq!(cohort.last_summary().unwrap().ticks, 2);
    }

    #[test]
    fn consecutive_generations_advance_the_map_counter() {
        let mut cohort = counting_cohort(2, 5);
        for _ in 0..3 {
            cohort.run_generation(neutral(2), &mut FitnessTable::new(2), &mut NoopObserver).unwrap();
        }
        assert_eq!(cohort.generation(), 3);
        assert_eq!(cohort.surface().regenerations, 3);
    }

    #[test]
    fn abort_regenerates_and_stops() {
        let mut cohort = counting_cohort(2, 100);
        cohort.begin_generation(neutral(2)).unwrap();
        cohort.step(0.17, &mut FitnessTable::new(2)).unwrap();

        let summary = cohort.abort_generation().unwrap();
        assert_eq!(summary.reason, EndReason::Aborted);
        assert_eq!(summary.ticks, 1);
        assert_eq!(cohort.status(), GenerationStatus::Ended(EndReason::Aborted));
        assert_eq!(cohort.surface().regenerations, 1);
        assert!(matches!(cohort.abort_generation(), Err(CohortError::NotRunning)));
    }

    #[test]
    fn step_requires_a_running_generation() {
        let mut cohort = counting_cohort(1, 10);
        assert!(matches!(cohort.step(0.17, &mut FitnessTable::new(1)), Err(CohortError::NotRunning)));
        cohort.begin_generation(neutral(1)).unwrap();
        assert!(matches!(cohort.begin_generation(neutral(1)), Err(CohortError::AlreadyRunning)));
    }
}

// ── Tick behaviour ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn spawn_primes_radars_before_the_first_decision() {
        let mut cohort = counting_cohort(1, 10);
        cohort.begin_generation(neutral(1)).unwrap();
        let state = cohort.agent(AgentId(0)).unwrap();
        assert_eq!(state.radars, vec![50.0; 4]);
        assert_eq!(state.position, Vec2::new(200.5, 200.5));
    }

    #[test]
    fn fitness_reported_for_every_agent_every_tick() {
        let mut cohort = counting_cohort(3, 10);
        cohort.begin_generation(neutral(3)).unwrap();
        let mut reports: Vec<(AgentId, f32)> = Vec::new();
        let mut sink = |agent: AgentId, fitness: f32| reports.push((agent, fitness));
        for _ in 0..4 {
            cohort.step(0.17, &mut sink).unwrap();
        }
        assert_eq!(reports.len(), 12);
        assert_eq!(reports[0].0, AgentId(0));
        assert_eq!(reports[2].0, AgentId(2));
        // Standing still on track: −time_cost per tick.
        assert!((reports[11].1 + 0.04).abs() < 1e-5);
    }

    #[test]
    fn host_dt_is_clamped() {
        let mut cohort = counting_cohort(1, 10);
        let mut rec = Recorder::default();
        cohort.begin_generation(neutral(1)).unwrap();
        cohort.step_observed(100.0, &mut FitnessTable::new(1), &mut rec).unwrap();
        cohort.step_observed(0.0, &mut FitnessTable::new(1), &mut rec).unwrap();
        cohort.step_observed(f32::NAN, &mut FitnessTable::new(1), &mut rec).unwrap();
        let max_dt = cohort.config().max_dt;
        let min_dt = cohort.config().min_dt;
        assert_eq!(rec.ticks[0].dt, max_dt);
        assert_eq!(rec.ticks[1].dt, min_dt);
        assert_eq!(rec.ticks[2].dt, min_dt);
    }

    #[test]
    fn dead_agents_are_frozen() {
        // Grass from x = 260; agent 0 drives into it, agent 1 idles.
        let mut raster = Raster::new(400, 400, Category::Drivable);
        raster.fill_rect(Rect::new(260, 0, 140, 400), Category::OffTrack);
        let surface = StaticSurface::new(raster, Pose::new(Vec2::new(200.5, 200.5), 0.0));

        let forward = Command::new(Direction::Forward, Rotation::Neutral);
        let policies: Vec<Box<dyn DecisionFunction>> =
            vec![Box::new(ConstantPolicy(forward)), Box::new(NeutralPolicy)];
        let mut cohort = CohortBuilder::new(config(400), scenario(2), surface)
            .policies(policies)
            .build()
            .unwrap();

        let mut table = FitnessTable::new(2);
        let mut frozen = None;
        while cohort.step(0.17, &mut table).unwrap().is_running() {
            let state = cohort.agent(AgentId(0)).unwrap().clone();
            match &frozen {
                None if !state.alive => frozen = Some(state),
                Some(f) => assert_eq!(f, &state),
                None => {}
            }
        }
        let frozen = frozen.expect("agent 0 never reached the grass");
        assert_eq!(frozen.terminal, TerminalKind::Collided);
        assert_eq!(frozen.velocity, 0.0);
        assert_eq!(table.get(AgentId(0)), Some(frozen.total_score));
        assert!(cohort.agent(AgentId(1)).unwrap().alive);
    }

    #[test]
    fn observer_sees_ticks_snapshots_and_end() {
        let cfg = SimConfig { snapshot_interval_ticks: 10, ..config(25) };
        let mut cohort = CohortBuilder::new(cfg, scenario(2), CountingSurface::new()).build().unwrap();
        let mut rec = Recorder::default();
        cohort.run_generation(neutral(2), &mut FitnessTable::new(2), &mut rec).unwrap();

        assert_eq!(rec.starts, vec![0]);
        assert_eq!(rec.ticks.len(), 26);
        assert_eq!(rec.ticks[25].tick, Tick(26));
        assert_eq!(rec.snapshots.iter().map(|(t, _)| *t).collect::<Vec<_>>(), vec![Tick(10), Tick(20)]);
        assert_eq!(rec.snapshots[0].1.len(), 2);
        assert_eq!(rec.snapshots[0].1[0].radar_endpoints.len(), 4);
        assert_eq!(rec.ends.len(), 1);
        assert_eq!(rec.ends[0].reason, EndReason::TimeExpired);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn policy_count_must_match() {
        let err = CohortBuilder::new(config(10), scenario(3), CountingSurface::new())
            .policies(neutral(2))
            .build();
        assert!(matches!(
            err,
            Err(CohortError::AgentCountMismatch { expected: 3, got: 2, .. })
        ));

        let mut cohort = counting_cohort(3, 10);
        assert!(matches!(
            cohort.begin_generation(neutral(4)),
            Err(CohortError::AgentCountMismatch { expected: 3, got: 4, .. })
        ));
    }

    #[test]
    fn network_inputs_must_match_scenario() {
        let mut rng = SimRng::new(1);
        let wrong = FeedForwardNet::random(7, &[3], OutputDecoding::Signs, ExtraInput::None, rng.inner()).unwrap();
        let mut cohort = counting_cohort(1, 10);
        assert!(matches!(
            cohort.begin_generation(vec![Box::new(wrong) as Box<dyn DecisionFunction>]),
            Err(CohortError::InputMismatch { agent: 0, expected: 4, got: 7 })
        ));
    }

    #[test]
    fn goal_seeking_needs_a_target() {
        let sc = ScenarioConfig { scoring: ScoringPolicy::GOAL_SEEKING, ..scenario(1) };
        let err = CohortBuilder::new(config(10), sc, CountingSurface::new()).build();
        assert!(matches!(err, Err(CohortError::Config(_))));
    }

    #[test]
    fn bad_config_fails_fast() {
        let cfg = SimConfig { min_dt: 0.0, ..config(10) };
        assert!(matches!(
            CohortBuilder::new(cfg, scenario(1), CountingSurface::new()).build(),
            Err(CohortError::Core(_))
        ));
        assert!(CohortBuilder::new(config(10), scenario(0), CountingSurface::new()).build().is_err());
        let sc = ScenarioConfig { radar: RadarConfig { count: 0, ..RadarConfig::highway() }, ..scenario(1) };
        assert!(matches!(
            CohortBuilder::new(config(10), sc, CountingSurface::new()).build(),
            Err(CohortError::Sensor(_))
        ));
    }

    #[test]
    fn presets_validate() {
        assert!(ScenarioConfig::highway().validate().is_ok());
        assert!(ScenarioConfig::parking().validate().is_ok());
        assert_eq!(ScenarioConfig::highway().input_len(), 10);
        assert_eq!(ScenarioConfig::parking().input_len(), 9);
    }
}

// ── Scenarios end to end ──────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn parking_cohort_scores_against_the_target() {
        let mut rng = SimRng::new(5);
        let lot = ParkingLot::new(LotParams::default(), &mut rng).unwrap();
        let sc = ScenarioConfig { agent_count: 2, ..ScenarioConfig::parking() };
        let mut cohort = CohortBuilder::new(config(10), sc, lot).build().unwrap();

        let summary = cohort
            .run_generation(neutral(2), &mut FitnessTable::new(2), &mut NoopObserver)
            .unwrap();
        assert_eq!(summary.agents, 2);
        assert_eq!(summary.parked, 0);
        assert!(cohort.agents().all(|(_, s)| s.total_score < 0.0));
        assert!(cohort.agents().all(|(_, s)| s.initial_target_distance.is_some()));
        assert_eq!(cohort.generation(), 1);
    }
}

// ── Training ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trainer_tests {
    use super::*;

    fn train(seed: u64) -> (f32, Option<FeedForwardNet>, usize) {
        let cfg = SimConfig { seed, epochs: 3, ..config(30) };
        let mut cohort = CohortBuilder::new(cfg, scenario(4), CountingSurface::new()).build().unwrap();
        let search = RandomSearch::for_scenario(cohort.scenario(), &[5]);
        let mut trainer = Trainer::new(search);
        let outcome = trainer.run(&mut cohort, &mut NoopObserver).unwrap();
        assert_eq!(outcome.generations.len(), 3);
        assert!(outcome.best_generation.is_some());
        (outcome.best_fitness, outcome.best_policy, cohort.surface().regenerations)
    }

    #[test]
    fn trainer_returns_best_policy() {
        let (best, policy, regenerations) = train(9);
        assert!(best.is_finite());
        let policy = policy.unwrap();
        assert_eq!(policy.inputs(), 4);
        assert_eq!(regenerations, 3);
    }

    #[test]
    fn training_is_deterministic() {
        let (a, pa, _) = train(21);
        let (b, pb, _) = train(21);
        assert_eq!(a, b);
        assert_eq!(pa, pb);
    }

    #[test]
    fn trainer_rejects_a_running_cohort() {
        let mut cohort = CohortBuilder::new(config(30), scenario(2), CountingSurface::new())
            .policies(neutral(2))
            .build()
            .unwrap();
        let mut trainer = Trainer::new(RandomSearch::for_scenario(cohort.scenario(), &[5]));
        let err = trainer.run(&mut cohort, &mut NoopObserver);
        assert!(matches!(err, Err(CohortError::AlreadyRunning)));
        assert!(trainer.optimizer().elite().is_none());
        assert!(cohort.status().is_running());
        assert_eq!(cohort.generation(), 0);
    }

    #[test]
    fn random_search_keeps_an_elite() {
        let mut search = RandomSearch::new(3, &[2], OutputDecoding::Signs, ExtraInput::None)
            .with_elite_fraction(0.5);
        let mut rng = SimRng::new(0);
        let first = search.propose(0, 4, &mut rng).unwrap();
        search.observe(&first, &[1.0, 5.0, 2.0, -1.0]);
        assert_eq!(search.elite().map(|(_, f)| f), Some(5.0));

        let second = search.propose(1, 4, &mut rng).unwrap();
        assert_eq!(second.len(), 4);
        assert_eq!(&second[0], &first[1]);
    }
}
