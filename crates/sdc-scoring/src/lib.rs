//! `sdc-scoring` — how well an agent is doing.
//!
//! Two fitness shapes exist.  *Track following* rewards safe speed and
//! charges a flat time cost every tick.  *Goal seeking* measures progress
//! toward the surface's target relative to the first distance observed, and
//! snaps to a large bonus (and a full stop) once the agent is close enough.
//!
//! Scoring runs after sensing, once per tick, for every agent that was alive
//! when the tick started.

pub mod error;
pub mod policy;


pub use error::{ScoringError, ScoringResult};
pub use policy::ScoringPolicy;
