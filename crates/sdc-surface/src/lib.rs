//! `sdc-surface` — the maps agents drive on.
//!
//! A surface is a raster of [`Category`] cells plus a start pose and,
//! for parking lots, a target position.  Sensors only ever *read* a surface;
//! the controller regenerates it between generations.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`category`]  | `Category` — drivable / pointer / markup / off-track       |
//! | [`raster`]    | `Raster`, `Rect`, `Side` — the cell grid and draw helpers  |
//! | [`curve`]     | closed Catmull–Rom loop built from cubic Bézier segments   |
//! | [`track`]     | `Track`, `TrackParams` — random closed-loop road           |
//! | [`lot`]       | `ParkingLot`, `LotLayout`, `ParkingSlot`                   |
//! | [`surface`]   | `Surface` trait, `StaticSurface`                           |
//! | [`error`]     | `SurfaceError`, `SurfaceResult<T>`                         |

pub mod category;
pub mod curve;
pub mod error;
pub mod lot;
pub mod raster;
pub mod surface;
pub mod track;


pub use category::Category;
pub use error::{SurfaceError, SurfaceResult};
pub use lot::{LotLayout, LotParams, ParkingLot, ParkingSlot};
pub use raster::{Raster, Rect, Side};
pub use surface::{StaticSurface, Surface};
pub use track::{Track, TrackParams};

/// Canvas width shared by the built-in maps.
pub const CANVAS_WIDTH: u32 = 1320;

/// Canvas height shared by the built-in maps.
pub const CANVAS_HEIGHT: u32 = 768;
