//! Parking lots with a fixed slot catalog and a shuffled target.
//!
//! Each regeneration shuffles the slot ids: the *last* id becomes the target
//! (outlined in pointer paint, safe to drive over) and the *first* `occupied`
//! ids get a parked car (off-track).  Because `occupied < capacity`, the
//! target is never occupied.

use sdc_core::{Pose, SimRng, SlotId, Vec2};
use tracing::debug;

use crate::{
    CANVAS_HEIGHT, CANVAS_WIDTH, Category, Raster, Rect, Side, Surface, SurfaceError,
    SurfaceResult,
};

/// Width of the white slot lines.
const SLOT_LINE: i32 = 2;
/// Width of the target outline.
const TARGET_LINE: i32 = 5;
/// Gap between a slot's lines and the parked car inside it.
const CAR_INSET: i32 = 6;

/// Paved area inside the fence, shared by both layouts.
const ASPHALT: Rect = Rect::new(20, 20, 1280, 740);
/// Fenced grass island in the large lot.
const ISLAND: Rect = Rect::new(20, 20, 160, 481);

// ── Slots ─────────────────────────────────────────────────────────────────────

/// One marked parking space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkingSlot {
    pub id:      SlotId,
    pub rect:    Rect,
    /// The unmarked side facing the aisle.
    pub opening: Side,
}

impl ParkingSlot {
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// The two built-in lot layouts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LotLayout {
    /// 54 slots around the perimeter; random start pose in the apron.
    Small,
    /// 64 slots with two back-to-back center rows and a grass island;
    /// fixed start pose.
    Large,
}

impl LotLayout {
    pub const fn capacity(self) -> usize {
        match self {
            LotLayout::Small => 54,
            LotLayout::Large => 64,
        }
    }

    /// The slot catalog, ids in catalog order.
    pub fn slots(self) -> Vec<ParkingSlot> {
        let mut rects: Vec<(Rect, Side)> = Vec::with_capacity(self.capacity());
        match self {
            LotLayout::Small => {
                push_row(&mut rects, (0..=1020).step_by(60).map(|dx| (123 + dx, 659)), 54, 98, Side::North);
                push_row(&mut rects, (0..=480).step_by(60).map(|dy| (1199, 603 - dy)), 98, 54, Side::West);
                push_row(&mut rects, (0..=1020).step_by(60).map(|dx| (1143 - dx, 23)), 54, 98, Side::South);
                push_row(&mut rects, (0..=480).step_by(60).map(|dy| (24, 123 + dy)), 98, 54, Side::East);
            }
            LotLayout::Large => {
                push_row(&mut rects, (0..=900).step_by(60).map(|dx| (243 + dx, 658)), 54, 98, Side::North);
                push_row(&mut rects, (0..=480).step_by(60).map(|dy| (1197, 602 - dy)), 98, 54, Side::West);
                push_row(&mut rects, (0..=840).step_by(60).map(|dx| (1143 - dx, 24)), 54, 98, Side::South);
                push_row(&mut rects, (0..=300).step_by(60).map(|dy| (204, 122 + dy)), 98, 54, Side::East);
                push_row(&mut rects, (0..=480).step_by(60).map(|dx| (483 + dx, 404)), 54, 98, Side::South);
                push_row(&mut rects, (0..=480).step_by(60).map(|dx| (483 + dx, 278)), 54, 98, Side::North);
            }
        }
        rects
            .into_iter()
            .enumerate()
            .map(|(i, (rect, opening))| ParkingSlot { id: SlotId(i as u16), rect, opening })
            .collect()
    }

    fn start_pose(self, rng: &mut SimRng) -> Pose {
        match self {
            LotLayout::Small => {
                let x: i32 = rng.gen_range(396..=924);
                let y: i32 = rng.gen_range(230..=538);
                let heading: i32 = rng.gen_range(0..=360);
                Pose::new(Vec2::new(x as f32, y as f32), heading as f32)
            }
            LotLayout::Large => Pose::new(Vec2::new(100.0, 580.0), 0.0),
        }
    }

    /// Everything that does not change between regenerations.
    fn background(self, slots: &[ParkingSlot]) -> Raster {
        let mut raster = Raster::new(CANVAS_WIDTH, CANVAS_HEIGHT, Category::OffTrack);
        raster.fill_rect(ASPHALT, Category::Drivable);
        if self == LotLayout::Large {
            raster.fill_rect(ISLAND, Category::OffTrack);
            raster.stroke_rect(ISLAND, 5, Category::Markup);
        }
        for slot in slots {
            let sides: Vec<Side> = Side::ALL.into_iter().filter(|&s| s != slot.opening).collect();
            raster.stroke_sides(slot.rect, &sides, SLOT_LINE, Category::Markup);
        }
        raster
    }
}

fn push_row(
    rects:   &mut Vec<(Rect, Side)>,
    origins: impl Iterator<Item = (i32, i32)>,
    w:       i32,
    h:       i32,
    opening: Side,
) {
    rects.extend(origins.map(|(x, y)| (Rect::new(x, y, w, h), opening)));
}

// ── ParkingLot ────────────────────────────────────────────────────────────────

/// Construction parameters for [`ParkingLot`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotParams {
    pub layout:   LotLayout,
    /// Parked cars per layout.  `None` draws a fresh count in
    /// `0..capacity` on every regeneration.
    pub occupied: Option<usize>,
}

impl Default for LotParams {
    fn default() -> Self {
        Self { layout: LotLayout::Small, occupied: None }
    }
}

impl LotParams {
    pub fn validate(&self) -> SurfaceResult<()> {
        let capacity = self.layout.capacity();
        match self.occupied {
            Some(requested) if requested >= capacity => {
                Err(SurfaceError::OccupiedExceedsCapacity { requested, capacity })
            }
            _ => Ok(()),
        }
    }
}

/// A parking lot surface.
pub struct ParkingLot {
    params:     LotParams,
    slots:      Vec<ParkingSlot>,
    background: Raster,
    raster:     Raster,
    target:     SlotId,
    occupied:   Vec<SlotId>,
    start:      Pose,
}

impl ParkingLot {
    /// Validate `params` and draw the first arrangement.
    pub fn new(params: LotParams, rng: &mut SimRng) -> SurfaceResult<Self> {
        params.validate()?;
        let slots = params.layout.slots();
        let background = params.layout.background(&slots);
        let mut lot = Self {
            raster: background.clone(),
            params,
            slots,
            background,
            target: SlotId::INVALID,
            occupied: Vec::new(),
            start: Pose::default(),
        };
        lot.arrange(rng);
        Ok(lot)
    }

    pub fn layout(&self) -> LotLayout {
        self.params.layout
    }

    pub fn slots(&self) -> &[ParkingSlot] {
        &self.slots
    }

    pub fn target_slot(&self) -> &ParkingSlot {
        &self.slots[self.target.index()]
    }

    pub fn occupied_slots(&self) -> &[SlotId] {
        &self.occupied
    }

    fn arrange(&mut self, rng: &mut SimRng) {
        let capacity = self.slots.len();
        let count = match self.params.occupied {
            Some(n) => n,
            None    => rng.gen_range(0..capacity),
        };

        let mut order: Vec<SlotId> = self.slots.iter().map(|s| s.id).collect();
        rng.shuffle(&mut order);
        self.target = order[capacity - 1];
        order.truncate(count);
        self.occupied = order;
        self.start = self.params.layout.start_pose(rng);

        let mut raster = self.background.clone();
        for id in &self.occupied {
            raster.fill_rect(self.slots[id.index()].rect.inset(CAR_INSET), Category::OffTrack);
        }
        raster.stroke_rect(self.slots[self.target.index()].rect, TARGET_LINE, Category::Pointer);
        self.raster = raster;
    }
}

impl Surface for ParkingLot {
    fn raster(&self) -> &Raster {
        &self.raster
    }

    fn start_pose(&self) -> Pose {
        self.start
    }

    fn regenerate(&mut self, rng: &mut SimRng) {
        self.arrange(rng);
        debug!(
            target_slot = self.target.0,
            occupied = self.occupied.len(),
            "parking lot regenerated"
        );
    }

    fn target_position(&self) -> Option<Vec2> {
        Some(self.target_slot().center())
    }
}
