//! Hand-written policies for tests and baselines.

use serde::{Deserialize, Serialize};

use sdc_core::{AgentId, AgentRng, Command};

use crate::{DecisionFunction, Observation, SimContext};

/// Always coasts with the wheel centered.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeutralPolicy;

impl DecisionFunction for NeutralPolicy {
    fn decide(
        &self,
        _agent: AgentId,
        _obs:   &Observation<'_>,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Command {
        Command::NEUTRAL
    }
}

/// Issues the same command every tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantPolicy(pub Command);

impl DecisionFunction for ConstantPolicy {
    fn decide(
        &self,
        _agent: AgentId,
        _obs:   &Observation<'_>,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Command {
        self.0
    }
}

/// Wraps a closure over the observation and tick context.
///
/// ```rust,ignore
/// let wall_follower = FnPolicy::new(|_, obs, _, _| {
///     if obs.radars[0] < 40.0 { Command::new(Direction::Forward, Rotation::Left) }
///     else { Command::new(Direction::Forward, Rotation::Neutral) }
/// });
/// ```
#[derive(Clone)]
pub struct FnPolicy<F> {
    f: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(AgentId, &Observation<'_>, &SimContext<'_>, &mut AgentRng) -> Command + Send + Sync + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> DecisionFunction for FnPolicy<F>
where
    F: Fn(AgentId, &Observation<'_>, &SimContext<'_>, &mut AgentRng) -> Command + Send + Sync + 'static,
{
    #[inline]
    fn decide(
        &self,
        agent: AgentId,
        obs:   &Observation<'_>,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Command {
        (self.f)(agent, obs, ctx, rng)
    }
}
