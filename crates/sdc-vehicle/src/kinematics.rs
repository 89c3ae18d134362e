//! The per-tick motion update.

use sdc_core::{Command, Direction, Rotation, Vec2};

use crate::{AgentState, VehicleParams, VehicleResult};

/// Applies a [`Command`] to an [`AgentState`] over a time step.
///
/// Holds a validated copy of the vehicle parameters; cheap to share across
/// threads.
#[derive(Clone, Debug)]
pub struct KinematicModel {
    params: VehicleParams,
}

impl KinematicModel {
    pub fn new(params: VehicleParams) -> VehicleResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    #[inline]
    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    /// Advance `state` by `dt` under `command`.
    ///
    /// Dead agents are left untouched.  `dt == 0` is allowed and moves
    /// nothing.
    pub fn update(&self, state: &mut AgentState, command: Command, dt: f32) {
        if !state.alive {
            return;
        }
        let p = &self.params;

        // ── Acceleration ──────────────────────────────────────────────────
        match command.direction {
            Direction::Forward => {
                if state.velocity < 0.0 {
                    state.acceleration = p.brake_deceleration;
                } else {
                    state.acceleration += dt;
                }
            }
            Direction::Backward => {
                if state.velocity > 0.0 {
                    state.acceleration = -p.brake_deceleration;
                } else {
                    state.acceleration -= dt;
                }
            }
            Direction::Neutral => {
                if state.velocity.abs() > dt * p.free_deceleration {
                    state.acceleration = -p.free_deceleration.copysign(state.velocity);
                } else if dt > 0.0 {
                    state.acceleration = -state.velocity / dt;
                }
            }
        }

        // ── Steering ──────────────────────────────────────────────────────
        match command.rotation {
            Rotation::Right   => state.steering -= p.max_steering * dt,
            Rotation::Left    => state.steering += p.max_steering * dt,
            Rotation::Neutral => state.steering = 0.0,
        }

        // ── Integrate and clamp ───────────────────────────────────────────
        state.velocity += state.acceleration * dt;
        state.velocity = state.velocity.clamp(-p.max_velocity, p.max_velocity);
        state.acceleration = state.acceleration.clamp(-p.max_acceleration, p.max_acceleration);
        state.steering = state.steering.clamp(-p.max_steering, p.max_steering);

        // ── Pose ──────────────────────────────────────────────────────────
        let angular_velocity = if state.steering != 0.0 {
            let sine = state.steering.to_radians().sin();
            if sine.abs() > f32::EPSILON {
                let turning_radius = p.chassis_length / sine;
                state.velocity / turning_radius
            } else {
                0.0
            }
        } else {
            0.0
        };

        state.position += Vec2::new(state.velocity, 0.0).rotate_deg(-state.heading) * dt;
        state.heading += angular_velocity.to_degrees() * dt;
    }
}
