//! Random closed-loop road.
//!
//! Drawing order matters: a white disc of radius `1.1 × width` is stamped at
//! every curve sample, then a road disc of radius `width` on top, leaving a
//! thin white edge line on both sides.  Dashed yellow lane pointers go last.

use sdc_core::{Pose, SimRng, Vec2};
use tracing::debug;

use crate::curve::{closed_catmull_rom, random_loop, split_even};
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH, Category, Raster, Surface, SurfaceError, SurfaceResult};

/// Shape parameters for [`Track`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackParams {
    /// Center the control points are placed around.
    pub center:        Vec2,
    /// Smallest control-point radius.
    pub spread_min:    f32,
    /// Largest control-point radius.
    pub spread_max:    f32,
    /// Half the number of control points.
    pub complexity:    usize,
    /// Road half-width in cells.
    pub width:         f32,
    /// Curve samples after resampling.
    pub samples:       usize,
    pub canvas_width:  u32,
    pub canvas_height: u32,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            center:        Vec2::new(660.0, 384.0),
            spread_min:    150.0,
            spread_max:    350.0,
            complexity:    5,
            width:         30.0,
            samples:       1_000,
            canvas_width:  CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
        }
    }
}

impl TrackParams {
    pub fn validate(&self) -> SurfaceResult<()> {
        let fail = |msg: String| Err(SurfaceError::Configuration(msg));
        if self.complexity < 2 {
            return fail(format!("track complexity must be >= 2, got {}", self.complexity));
        }
        let spread_ok = self.spread_min > 0.0
            && self.spread_min <= self.spread_max
            && self.spread_max.is_finite();
        if !spread_ok {
            return fail(format!(
                "track spread must satisfy 0 < min <= max, got ({}, {})",
                self.spread_min, self.spread_max
            ));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return fail(format!("track center must be finite, got {:?}", self.center));
        }
        if !self.width.is_finite() || self.width < 1.0 {
            return fail(format!("track width must be >= 1, got {}", self.width));
        }
        if self.samples <= self.start_index() + self.width as usize {
            return fail(format!(
                "{} samples is too few for a road of width {}",
                self.samples, self.width
            ));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return fail("track canvas must be non-empty".into());
        }
        Ok(())
    }

    #[inline]
    fn start_index(&self) -> usize {
        self.samples / 10
    }

    /// Number of equal runs the centerline is cut into; every other run is
    /// painted as a lane dash.
    #[inline]
    fn dash_runs(&self) -> usize {
        5 * self.samples / self.width as usize
    }
}

/// A randomly generated closed-loop road.
pub struct Track {
    params: TrackParams,
    curve:  Vec<Vec2>,
    raster: Raster,
    start:  Pose,
}

impl Track {
    /// Validate `params` and generate the first layout.
    pub fn new(params: TrackParams, rng: &mut SimRng) -> SurfaceResult<Self> {
        params.validate()?;
        let (curve, raster, start) = generate(&params, rng);
        Ok(Self { params, curve, raster, start })
    }

    pub fn params(&self) -> &TrackParams {
        &self.params
    }

    /// Resampled centerline, in driving order.
    pub fn curve(&self) -> &[Vec2] {
        &self.curve
    }
}

impl Surface for Track {
    fn raster(&self) -> &Raster {
        &self.raster
    }

    fn start_pose(&self) -> Pose {
        self.start
    }

    fn regenerate(&mut self, rng: &mut SimRng) {
        let (curve, raster, start) = generate(&self.params, rng);
        self.curve = curve;
        self.raster = raster;
        self.start = start;
        debug!(
            start_x = self.start.position.x,
            start_y = self.start.position.y,
            heading = self.start.heading,
            "track regenerated"
        );
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

fn generate(params: &TrackParams, rng: &mut SimRng) -> (Vec<Vec2>, Raster, Pose) {
    let controls = random_loop(
        params.center,
        params.spread_min,
        params.spread_max,
        params.complexity,
        rng,
    );
    let curve = closed_catmull_rom(&controls, params.samples);
    let raster = rasterize(params, &curve);
    let start = start_pose(params, &curve);
    (curve, raster, start)
}

fn rasterize(params: &TrackParams, curve: &[Vec2]) -> Raster {
    let mut raster = Raster::new(params.canvas_width, params.canvas_height, Category::OffTrack);
    for &p in curve {
        raster.fill_disc(p, 1.1 * params.width, Category::Markup);
    }
    for &p in curve {
        raster.fill_disc(p, params.width, Category::Drivable);
    }
    for run in split_even(curve.len(), params.dash_runs()).into_iter().step_by(2) {
        raster.draw_polyline(&curve[run], Category::Pointer);
    }
    raster
}

/// Start at 10 % of the loop facing the point one road-width further along.
fn start_pose(params: &TrackParams, curve: &[Vec2]) -> Pose {
    let idx = params.start_index();
    let here = curve[idx % curve.len()];
    let ahead = curve[(idx + params.width as usize) % curve.len()];
    let d = ahead - here;
    let heading = (-d.y).atan2(d.x).to_degrees();
    Pose::new(here, heading)
}
