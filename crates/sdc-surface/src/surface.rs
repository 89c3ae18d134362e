//! The `Surface` trait — what sensors and the controller need from a map.

use sdc_core::{Cell, Pose, SimRng, Vec2};

use crate::{Category, Raster};

/// A rasterized map agents drive on.
///
/// During a tick the controller lends `&dyn Surface` to every agent's
/// sensors; the only mutation, [`regenerate`][Self::regenerate], needs
/// `&mut self` and so can never overlap a query.
///
/// Implementations must be `Send + Sync` so the `parallel` cohort feature
/// can share one surface across Rayon workers.
pub trait Surface: Send + Sync {
    /// The current category grid.
    fn raster(&self) -> &Raster;

    /// Where every agent of the next generation spawns.
    fn start_pose(&self) -> Pose;

    /// Build a complete new layout from `rng` and swap it in.
    fn regenerate(&mut self, rng: &mut SimRng);

    /// Goal position for goal-seeking scenarios.  `None` on tracks.
    fn target_position(&self) -> Option<Vec2> {
        None
    }

    /// Category at `cell`, `OffTrack` outside the canvas.
    #[inline]
    fn classify(&self, cell: Cell) -> Category {
        self.raster().get(cell)
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn raster(&self) -> &Raster {
        (**self).raster()
    }

    fn start_pose(&self) -> Pose {
        (**self).start_pose()
    }

    fn regenerate(&mut self, rng: &mut SimRng) {
        (**self).regenerate(rng)
    }

    fn target_position(&self) -> Option<Vec2> {
        (**self).target_position()
    }

    fn classify(&self, cell: Cell) -> Category {
        (**self).classify(cell)
    }
}

// ── StaticSurface ─────────────────────────────────────────────────────────────

/// A hand-built map that never changes.  Regeneration is a no-op.
///
/// Useful for tests and for replaying a controller on a fixed layout.
#[derive(Clone, Debug)]
pub struct StaticSurface {
    raster: Raster,
    start:  Pose,
    target: Option<Vec2>,
}

impl StaticSurface {
    pub fn new(raster: Raster, start: Pose) -> Self {
        Self { raster, start, target: None }
    }

    /// An all-drivable canvas.
    pub fn open(width: u32, height: u32, start: Pose) -> Self {
        Self::new(Raster::new(width, height, Category::Drivable), start)
    }

    pub fn with_target(mut self, target: Vec2) -> Self {
        self.target = Some(target);
        self
    }

    /// Mutable access for drawing obstacles after construction.
    pub fn raster_mut(&mut self) -> &mut Raster {
        &mut self.raster
    }
}

impl Surface for StaticSurface {
    fn raster(&self) -> &Raster {
        &self.raster
    }

    fn start_pose(&self) -> Pose {
        self.start
    }

    fn regenerate(&mut self, _rng: &mut SimRng) {}

    fn target_position(&self) -> Option<Vec2> {
        self.target
    }
}
