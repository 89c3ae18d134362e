//! `sdc-decision` — what drives the car.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                          |
//! |-----------------|-------------------------------------------------------------------|
//! | [`observation`] | `Observation`, `ExtraInput` — what an agent perceives each tick   |
//! | [`context`]     | `SimContext<'a>` — read-only tick snapshot shared by all agents   |
//! | [`model`]       | `DecisionFunction` trait                                          |
//! | [`scripted`]    | `NeutralPolicy`, `ConstantPolicy`, `FnPolicy`                     |
//! | [`network`]     | `FeedForwardNet`, `OutputDecoding`                                |
//! | [`human`]       | `HumanInput`, `HumanInputHandle` — keyboard-style external input  |
//! | [`artifact`]    | JSON blobs and files for any serde-serializable artifact          |
//! | [`error`]       | `DecisionError`, `DecisionResult<T>`                              |
//!
//! # Design notes
//!
//! A decision function sees only the agent's previous-tick radar readings and
//! two scalar ratios, never the agent state itself.  Implementations are
//! `Send + Sync` so the cohort can query every agent in parallel; anything
//! that varies per agent (noise, exploration) comes from the per-agent
//! [`AgentRng`][sdc_core::AgentRng] passed to every call.

pub mod artifact;
pub mod context;
pub mod error;
pub mod human;
pub mod model;
pub mod network;
pub mod observation;
pub mod scripted;

#[cfg(test)]
mod tests;

pub use context::SimContext;
pub use error::{DecisionError, DecisionResult};
pub use human::{HumanInput, HumanInputHandle};
pub use model::DecisionFunction;
pub use network::{FeedForwardNet, OutputDecoding};
pub use observation::{ExtraInput, Observation};
pub use scripted::{ConstantPolicy, FnPolicy, NeutralPolicy};
