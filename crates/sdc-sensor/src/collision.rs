//! Footprint corners and what happens when one of them touches something.

use sdc_core::{Cell, Vec2};
use sdc_surface::{Category, Surface};
use sdc_vehicle::{AgentState, TerminalKind, VehicleParams};

use crate::{SensorError, SensorResult};

// ── Footprint ─────────────────────────────────────────────────────────────────

/// Half extents of the collision rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Footprint {
    pub half_width:  f32,
    pub half_height: f32,
}

impl From<&VehicleParams> for Footprint {
    fn from(p: &VehicleParams) -> Self {
        Self { half_width: p.half_width, half_height: p.half_height }
    }
}

impl Footprint {
    /// The four corners rotated by `-heading` about the agent's position,
    /// in the order `(+w,+h), (+w,-h), (-w,+h), (-w,-h)`.
    pub fn corners(&self, position: Vec2, heading: f32) -> [Cell; 4] {
        let (w, h) = (self.half_width, self.half_height);
        [(w, h), (w, -h), (-w, h), (-w, -h)]
            .map(|(dx, dy)| (position + Vec2::new(dx, dy).rotate_deg(-heading)).to_cell())
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// What a corner touching a non-drivable cell does to the agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionPolicy {
    /// Off-track kills the agent (motion kept for the last frame); markup
    /// only costs points.  Each clear corner before the first contact is
    /// counted for speed rewards.
    PenalizeAndContinue {
        offtrack_penalty: f32,
        markup_penalty:   f32,
    },
    /// Any unsafe cell costs `penalty` and stops the agent dead.
    StopOnUnsafe {
        penalty: f32,
    },
}

impl CollisionPolicy {
    pub const HIGHWAY: CollisionPolicy = CollisionPolicy::PenalizeAndContinue {
        offtrack_penalty: 100.0,
        markup_penalty:   10.0,
    };

    pub const PARKING: CollisionPolicy = CollisionPolicy::StopOnUnsafe { penalty: 10.0 };

    pub fn validate(&self) -> SensorResult<()> {
        let penalties = match *self {
            CollisionPolicy::PenalizeAndContinue { offtrack_penalty, markup_penalty } => {
                vec![offtrack_penalty, markup_penalty]
            }
            CollisionPolicy::StopOnUnsafe { penalty } => vec![penalty],
        };
        if penalties.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(SensorError::Policy(format!("penalties must be finite and >= 0: {self:?}")));
        }
        Ok(())
    }
}

/// The worst thing a sensing pass found.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Contact {
    #[default]
    Clear,
    Markup,
    Crash,
}

/// Outcome of one collision check.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactReport {
    pub contact:      Contact,
    /// Safe corners visited before the walk stopped.
    pub clear_points: u32,
}

/// Walk `state.collision_points` in order and apply `policy`.
///
/// Dead agents are not checked.
pub fn check_collision(
    state:   &mut AgentState,
    surface: &dyn Surface,
    policy:  &CollisionPolicy,
) -> ContactReport {
    let mut report = ContactReport::default();
    if !state.alive {
        return report;
    }

    for point in state.collision_points {
        let category = surface.classify(point);
        match (*policy, category) {
            (_, c) if c.is_safe() => report.clear_points += 1,

            (CollisionPolicy::PenalizeAndContinue { offtrack_penalty, .. }, Category::OffTrack) => {
                state.movement_score -= offtrack_penalty;
                state.terminate(TerminalKind::Collided);
                report.contact = Contact::Crash;
                break;
            }
            (CollisionPolicy::PenalizeAndContinue { markup_penalty, .. }, _) => {
                state.movement_score -= markup_penalty;
                report.contact = Contact::Markup;
                break;
            }

            (CollisionPolicy::StopOnUnsafe { penalty }, _) => {
                state.movement_score -= penalty;
                state.stop(TerminalKind::Collided);
                report.contact = Contact::Crash;
                break;
            }
        }
    }
    report
}
