//! `sdc-vehicle` — the car itself.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`params`]      | `VehicleParams` — footprint, limits, scenario presets       |
//! | [`state`]       | `AgentState`, `TerminalKind` — everything one agent carries |
//! | [`kinematics`]  | `KinematicModel` — the per-tick bicycle-style update        |
//! | [`error`]       | `VehicleError`, `VehicleResult<T>`                          |
//!
//! # Motion model
//!
//! Velocity is a signed scalar along the heading.  Each tick the command
//! nudges acceleration and steering, velocity integrates acceleration, then
//! all three are clamped to their limits.  Steering turns the car about a
//! radius `chassis_length / sin(steering)`; a positive steering angle turns
//! left (heading increases), and *right* input drives steering negative.

pub mod error;
pub mod kinematics;
pub mod params;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{VehicleError, VehicleResult};
pub use kinematics::KinematicModel;
pub use params::VehicleParams;
pub use state::{AgentState, TerminalKind};
