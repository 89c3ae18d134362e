//! Plain data row types written by output backends.

use sdc_cohort::{AgentSnapshot, GenerationSummary, TickSummary};
use sdc_core::Tick;

/// One agent's pose and score at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub generation: u64,
    pub tick:       u64,
    pub agent_id:   u32,
    pub x:          f32,
    pub y:          f32,
    pub heading:    f32,
    pub velocity:   f32,
    pub alive:      bool,
    /// `"none"`, `"collided"` or `"parked"`.
    pub terminal:   &'static str,
    pub score:      f32,
}

impl AgentSnapshotRow {
    pub fn from_snapshot(generation: u64, tick: Tick, s: &AgentSnapshot) -> Self {
        Self {
            generation,
            tick:     tick.0,
            agent_id: s.agent.0,
            x:        s.position.x,
            y:        s.position.y,
            heading:  s.heading,
            velocity: s.velocity,
            alive:    s.alive,
            terminal: s.terminal.as_str(),
            score:    s.score,
        }
    }
}

/// Summary statistics for one tick of one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub generation: u64,
    pub tick:       u64,
    pub dt:         f32,
    pub alive:      u32,
    pub best_score: f32,
    pub mean_score: f32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            generation: s.generation,
            tick:       s.tick.0,
            dt:         s.dt,
            alive:      s.alive as u32,
            best_score: s.best_score,
            mean_score: s.mean_score,
        }
    }
}

/// Outcome of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationRow {
    pub generation:   u64,
    pub ticks:        u64,
    /// `"all_dead"`, `"time_expired"` or `"aborted"`.
    pub reason:       &'static str,
    pub agents:       u32,
    pub collided:     u32,
    pub parked:       u32,
    pub survivors:    u32,
    /// `None` for an empty cohort.
    pub best_agent:   Option<u32>,
    pub best_fitness: f32,
    pub mean_fitness: f32,
}

impl From<&GenerationSummary> for GenerationRow {
    fn from(s: &GenerationSummary) -> Self {
        Self {
            generation:   s.generation,
            ticks:        s.ticks,
            reason:       s.reason.as_str(),
            agents:       s.agents as u32,
            collided:     s.collided as u32,
            parked:       s.parked as u32,
            survivors:    s.survivors as u32,
            best_agent:   s.best_agent.map(|a| a.0),
            best_fitness: s.best_fitness,
            mean_fitness: s.mean_fitness,
        }
    }
}
