//! Where per-agent fitness goes every tick.

use sdc_core::AgentId;

/// Receives every agent's current total score once per tick.
///
/// Dead agents keep reporting their final score, so the last value a sink
/// sees for an agent is its fitness for the generation.
pub trait FitnessSink {
    fn report(&mut self, agent: AgentId, fitness: f32);
}

impl<F: FnMut(AgentId, f32)> FitnessSink for F {
    #[inline]
    fn report(&mut self, agent: AgentId, fitness: f32) {
        self(agent, fitness)
    }
}

/// Latest fitness per agent, indexed by `AgentId`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessTable {
    values: Vec<f32>,
}

impl FitnessTable {
    pub fn new(agent_count: usize) -> Self {
        Self { values: vec![0.0; agent_count] }
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<f32> {
        self.values.get(agent.index()).copied()
    }

    /// The best agent and its fitness.  Ties go to the lower id.
    pub fn best(&self) -> Option<(AgentId, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.values.iter().enumerate() {
            if best.is_none_or(|(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, v)| (AgentId(i as u32), v))
    }

    pub fn mean(&self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f32>() / self.values.len() as f32
    }

    pub fn into_values(self) -> Vec<f32> {
        self.values
    }
}

impl FitnessSink for FitnessTable {
    #[inline]
    fn report(&mut self, agent: AgentId, fitness: f32) {
        let i = agent.index();
        if i >= self.values.len() {
            self.values.resize(i + 1, 0.0);
        }
        self.values[i] = fitness;
    }
}
