//! Plain-data views of a cohort for renderers and output writers.

use sdc_core::{AgentId, Cell, Tick, Vec2};
use sdc_vehicle::{AgentState, TerminalKind};

use crate::EndReason;

/// What a renderer needs to draw one car.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSnapshot {
    pub agent:            AgentId,
    pub position:         Vec2,
    pub heading:          f32,
    pub velocity:         f32,
    pub alive:            bool,
    pub terminal:         TerminalKind,
    pub score:            f32,
    pub collision_points: [Cell; 4],
    pub radar_endpoints:  Vec<Cell>,
}

impl AgentSnapshot {
    pub fn capture(agent: AgentId, state: &AgentState) -> Self {
        Self {
            agent,
            position:         state.position,
            heading:          state.heading,
            velocity:         state.velocity,
            alive:            state.alive,
            terminal:         state.terminal,
            score:            state.total_score,
            collision_points: state.collision_points,
            radar_endpoints:  state.radar_endpoints.clone(),
        }
    }
}

/// One row per tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub generation: u64,
    pub tick:       Tick,
    pub dt:         f32,
    pub alive:      usize,
    /// Best score seen so far this generation.
    pub best_score: f32,
    pub mean_score: f32,
}

/// One row per finished generation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationSummary {
    pub generation:   u64,
    pub ticks:        u64,
    pub reason:       EndReason,
    pub agents:       usize,
    pub collided:     usize,
    pub parked:       usize,
    pub survivors:    usize,
    pub best_agent:   Option<AgentId>,
    pub best_fitness: f32,
    pub mean_fitness: f32,
}
