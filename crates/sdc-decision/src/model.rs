//! The `DecisionFunction` trait — the controller behind each car.

use sdc_core::{AgentId, AgentRng, Command};

use crate::{Observation, SimContext};

/// Pluggable per-agent controller.
///
/// The cohort calls [`decide`][Self::decide] once per tick for every live
/// agent, possibly from several threads at once, so implementations must be
/// `Send + Sync`.  Per-agent randomness comes through `rng`, which keeps a
/// run deterministic regardless of thread ordering.
///
/// # Example
///
/// ```rust,ignore
/// struct Creep;
///
/// impl DecisionFunction for Creep {
///     fn decide(&self, _: AgentId, obs: &Observation<'_>, _: &SimContext<'_>, _: &mut AgentRng) -> Command {
///         let front = obs.radars.first().copied().unwrap_or(0.0);
///         if front > 50.0 { Command::new(Direction::Forward, Rotation::Neutral) } else { Command::NEUTRAL }
///     }
/// }
/// ```
pub trait DecisionFunction: Send + Sync + 'static {
    fn decide(
        &self,
        agent: AgentId,
        obs:   &Observation<'_>,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Command;

    /// Length of the input vector this function expects, if it cares.
    ///
    /// The cohort builder checks this against the scenario's radar count and
    /// extra input.  Default: `None` (accepts anything).
    fn input_len(&self) -> Option<usize> {
        None
    }
}

impl<D: DecisionFunction + ?Sized> DecisionFunction for Box<D> {
    #[inline]
    fn decide(
        &self,
        agent: AgentId,
        obs:   &Observation<'_>,
        ctx:   &SimContext<'_>,
        rng:   &mut AgentRng,
    ) -> Command {
        (**self).decide(agent, obs, ctx, rng)
    }

    #[inline]
    fn input_len(&self) -> Option<usize> {
        (**self).input_len()
    }
}
