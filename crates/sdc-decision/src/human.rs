//! External (keyboard-style) control of a single agent.
//!
//! An input thread owns a [`HumanInputHandle`] and writes the currently held
//! direction and rotation; the cohort reads them through [`HumanInput`] on
//! every tick.  Both sides share two atomics, so neither ever blocks.

use std::sync::Arc;
use std::sync::atomic::{AtomicI8, Ordering};

use sdc_core::{AgentId, AgentRng, Command, Direction, Rotation};

use crate::{DecisionFunction, Observation, SimContext};

#[derive(Debug, Default)]
struct Shared {
    direction: AtomicI8,
    rotation:  AtomicI8,
}

/// The decision-function side of a human controller.
#[derive(Clone, Debug)]
pub struct HumanInput {
    shared: Arc<Shared>,
}

/// The input-thread side of a human controller.
#[derive(Clone, Debug)]
pub struct HumanInputHandle {
    shared: Arc<Shared>,
}

impl HumanInput {
    /// A controller that starts neutral, plus the handle that steers it.
    pub fn new() -> (Self, HumanInputHandle) {
        let shared = Arc::new(Shared::default());
        (Self { shared: Arc::clone(&shared) }, HumanInputHandle { shared })
    }

    /// The command currently held.
    pub fn current(&self) -> Command {
        Command::new(
            Direction::from_sign(self.shared.direction.load(Ordering::Relaxed) as i32),
            Rotation::from_sign(self.shared.rotation.load(Ordering::Relaxed) as i32),
        )
    }
}

impl HumanInputHandle {
    pub fn set_direction(&self, direction: Direction) {
        let sign = match direction {
            Direction::Forward  => 1,
            Direction::Backward => -1,
            Direction::Neutral  => 0,
        };
        self.shared.direction.store(sign, Ordering::Relaxed);
    }

    pub fn set_rotation(&self, rotation: Rotation) {
        let sign = match rotation {
            Rotation::Right   => 1,
            Rotation::Left    => -1,
            Rotation::Neutral => 0,
        };
        self.shared.rotation.store(sign, Ordering::Relaxed);
    }

    pub fn set(&self, command: Command) {
        self.set_direction(command.direction);
        self.set_rotation(command.rotation);
    }

    /// Release every key.
    pub fn release(&self) {
        self.set(Command::NEUTRAL);
    }
}

impl DecisionFunction for HumanInput {
    #[inline]
    fn decide(
        &self,
        _agent: AgentId,
        _obs:   &Observation<'_>,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Command {
        self.current()
    }
}
