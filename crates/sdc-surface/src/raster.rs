//! The category grid and the handful of drawing primitives maps are built
//! from.
//!
//! Every write is clipped to the canvas; every read outside it returns
//! [`Category::OffTrack`].  Nothing in here can panic on bad coordinates.

use sdc_core::{Cell, Vec2};

use crate::Category;

// ── Rect / Side ───────────────────────────────────────────────────────────────

/// An axis-aligned integer rectangle, `(x, y)` top-left, `w × h` cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.x as f32 + self.w as f32 / 2.0, self.y as f32 + self.h as f32 / 2.0)
    }

    #[inline]
    pub fn contains(self, cell: Cell) -> bool {
        cell.x >= self.x && cell.x < self.x + self.w && cell.y >= self.y && cell.y < self.y + self.h
    }

    /// Shrink by `by` cells on every side.  Never goes negative.
    pub fn inset(self, by: i32) -> Rect {
        Rect {
            x: self.x + by,
            y: self.y + by,
            w: (self.w - 2 * by).max(0),
            h: (self.h - 2 * by).max(0),
        }
    }

    /// The `thickness`-wide strip of this rect along `side`, inside its bounds.
    pub fn edge(self, side: Side, thickness: i32) -> Rect {
        let t = thickness.max(0);
        match side {
            Side::North => Rect::new(self.x, self.y, self.w, t.min(self.h)),
            Side::South => Rect::new(self.x, self.y + self.h - t.min(self.h), self.w, t.min(self.h)),
            Side::West  => Rect::new(self.x, self.y, t.min(self.w), self.h),
            Side::East  => Rect::new(self.x + self.w - t.min(self.w), self.y, t.min(self.w), self.h),
        }
    }
}

/// A rectangle side in screen orientation (north is up).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];
}

// ── Raster ────────────────────────────────────────────────────────────────────

/// A dense `width × height` grid of categories, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    width:  u32,
    height: u32,
    cells:  Vec<Category>,
}

impl Raster {
    /// A canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Category) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major cell slice, for renderers.
    #[inline]
    pub fn cells(&self) -> &[Category] {
        &self.cells
    }

    #[inline]
    fn offset(&self, cell: Cell) -> Option<usize> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.width as i32 || cell.y >= self.height as i32 {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.offset(cell).is_some()
    }

    /// Category at `cell`; anything outside the canvas is off-track.
    #[inline]
    pub fn get(&self, cell: Cell) -> Category {
        match self.offset(cell) {
            Some(i) => self.cells[i],
            None    => Category::OffTrack,
        }
    }

    /// Write one cell.  Out-of-canvas writes are dropped.
    #[inline]
    pub fn set(&mut self, cell: Cell, category: Category) {
        if let Some(i) = self.offset(cell) {
            self.cells[i] = category;
        }
    }

    /// Number of cells holding `category`.
    pub fn count(&self, category: Category) -> usize {
        self.cells.iter().filter(|&&c| c == category).count()
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    pub fn fill(&mut self, category: Category) {
        self.cells.fill(category);
    }

    pub fn fill_rect(&mut self, rect: Rect, category: Category) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.w).min(self.width as i32);
        let y1 = (rect.y + rect.h).min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                self.set(Cell::new(x, y), category);
            }
        }
    }

    /// Outline `rect` with a border `thickness` cells wide, drawn inwards.
    pub fn stroke_rect(&mut self, rect: Rect, thickness: i32, category: Category) {
        self.stroke_sides(rect, &Side::ALL, thickness, category);
    }

    /// Outline only the listed sides of `rect`.
    pub fn stroke_sides(&mut self, rect: Rect, sides: &[Side], thickness: i32, category: Category) {
        for &side in sides {
            self.fill_rect(rect.edge(side, thickness), category);
        }
    }

    /// Fill every cell whose center lies within `radius` of `center`.
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, category: Category) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let x0 = ((center.x - radius).floor() as i32).max(0);
        let y0 = ((center.y - radius).floor() as i32).max(0);
        let x1 = ((center.x + radius).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((center.y + radius).ceil() as i32).min(self.height as i32 - 1);
        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.set(Cell::new(x, y), category);
                }
            }
        }
    }

    /// One-cell-wide Bresenham line, both endpoints included.
    pub fn draw_line(&mut self, from: Cell, to: Cell, category: Category) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            self.set(Cell::new(x, y), category);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Open polyline through `points`.
    pub fn draw_polyline(&mut self, points: &[Vec2], category: Category) {
        for pair in points.windows(2) {
            self.draw_line(pair[0].to_cell(), pair[1].to_cell(), category);
        }
        if let [only] = points {
            self.set(only.to_cell(), category);
        }
    }
}
