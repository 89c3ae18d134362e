//! `sdc-core` — foundational types for the `rust_sdc` car simulation.
//!
//! This crate is a dependency of every other `sdc-*` crate.  It has no
//! `sdc-*` dependencies and only `rand` and `thiserror` (plus optional
//! `serde`) from the outside world.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `SlotId`                                   |
//! | [`geo`]         | `Vec2`, `Cell`, `Pose` in screen coordinates          |
//! | [`command`]     | `Direction`, `Rotation`, `Command` + output decoding  |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `SdcError`, `SdcResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod command;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use command::{Command, Direction, Rotation, DEAD_ZONE};
pub use error::{SdcError, SdcResult};
pub use geo::{Cell, Pose, Vec2};
pub use ids::{AgentId, SlotId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimConfig, Tick};
