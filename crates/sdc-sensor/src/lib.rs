//! `sdc-sensor` — turning a raster into what an agent perceives.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`collision`]   | footprint corners, `CollisionPolicy`, `ContactReport`           |
//! | [`radar`]       | `RadarConfig`, `Normalization`, ray casting                     |
//! | [`engine`]      | `SensorEngine` — one sensing pass per agent per tick            |
//! | [`error`]       | `SensorError`, `SensorResult<T>`                                |
//!
//! Sensors read the surface and write only to the agent they are sensing.

pub mod collision;
pub mod engine;
pub mod error;
pub mod radar;


pub use collision::{CollisionPolicy, Contact, ContactReport, Footprint};
pub use engine::SensorEngine;
pub use error::{SensorError, SensorResult};
pub use radar::{Normalization, RadarConfig, RadarReading};
