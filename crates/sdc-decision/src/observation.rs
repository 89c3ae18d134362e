//! What an agent perceives when it is asked for a command.

use serde::{Deserialize, Serialize};

/// The inputs a decision function receives for one agent on one tick.
///
/// `radars` are the readings from the *previous* tick's sensing pass (or the
/// spawn-time priming pass on the first tick).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Observation<'a> {
    pub radars:         &'a [f32],
    /// `velocity / max_velocity`, in `[-1, 1]`.
    pub velocity_ratio: f32,
    /// Fraction of the initial target distance covered, `[0, 1]`.
    pub target_ratio:   f32,
}

/// Which scalar, if any, a numeric controller appends to the radar vector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraInput {
    #[default]
    None,
    VelocityRatio,
    TargetRatio,
}

impl ExtraInput {
    /// Number of values appended after the radars.
    #[inline]
    pub fn width(self) -> usize {
        match self {
            ExtraInput::None => 0,
            _                => 1,
        }
    }
}

impl Observation<'_> {
    /// Write the controller input vector into `out` (cleared first).
    pub fn write_inputs(&self, extra: ExtraInput, out: &mut Vec<f32>) {
        out.clear();
        out.extend_from_slice(self.radars);
        match extra {
            ExtraInput::None          => {}
            ExtraInput::VelocityRatio => out.push(self.velocity_ratio),
            ExtraInput::TargetRatio   => out.push(self.target_ratio),
        }
    }

    /// Number of inputs `write_inputs` produces for `extra`.
    #[inline]
    pub fn input_len(&self, extra: ExtraInput) -> usize {
        self.radars.len() + extra.width()
    }
}
