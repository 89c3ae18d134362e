//! Distance-to-obstacle rays.
//!
//! Ray `k` of an agent with heading `h` is cast at
//! `radians(start_offset − h − k · spacing)`, directly in screen axes.  The
//! ray marches one cell at a time from length 1 to `max_length` and stops at
//! the first cell that is not safe; a ray that never hits reads
//! `max_length`.

use sdc_core::{Cell, Vec2};
use sdc_surface::Surface;

use crate::{SensorError, SensorResult};

/// How raw lengths are presented to the decision function.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Normalization {
    /// Lengths in cells, `[0, max_length]`.
    #[default]
    Raw,
    /// `length / max_length`, `[0, 1]`.
    MaxLength,
    /// `(length − min) / (max − min)` over this agent's rays; falls back to
    /// `MaxLength` when every ray reads the same.
    MinMax,
}

/// Radar layout for one vehicle type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadarConfig {
    pub count:            usize,
    pub spacing_deg:      f32,
    pub start_offset_deg: f32,
    pub max_length:       u32,
    pub normalization:    Normalization,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self::highway()
    }
}

impl RadarConfig {
    /// Nine raw rays, 45° apart, starting dead ahead.
    pub fn highway() -> Self {
        Self {
            count:            9,
            spacing_deg:      45.0,
            start_offset_deg: 360.0,
            max_length:       300,
            normalization:    Normalization::Raw,
        }
    }

    /// Eight normalized rays, 45° apart, reach scaled with the car.
    pub fn parking(scale: f32) -> Self {
        Self {
            count:            8,
            spacing_deg:      45.0,
            start_offset_deg: 90.0,
            max_length:       (300.0 * scale) as u32,
            normalization:    Normalization::MaxLength,
        }
    }

    pub fn validate(&self) -> SensorResult<()> {
        if self.count == 0 {
            return Err(SensorError::Radar("at least one ray is required".into()));
        }
        if self.max_length == 0 {
            return Err(SensorError::Radar("max_length must be > 0".into()));
        }
        if !self.spacing_deg.is_finite() || !self.start_offset_deg.is_finite() {
            return Err(SensorError::Radar("ray angles must be finite".into()));
        }
        Ok(())
    }

    /// Ray angle in radians for ray `k`.
    #[inline]
    pub fn ray_angle(&self, heading: f32, k: usize) -> f32 {
        (self.start_offset_deg - heading - self.spacing_deg * k as f32).to_radians()
    }

    /// Map raw lengths to presented readings, writing into `out`.
    pub fn normalize(&self, lengths: &[u32], out: &mut Vec<f32>) {
        out.clear();
        let max_len = self.max_length as f32;
        match self.normalization {
            Normalization::Raw => out.extend(lengths.iter().map(|&l| l as f32)),
            Normalization::MaxLength => out.extend(lengths.iter().map(|&l| l as f32 / max_len)),
            Normalization::MinMax => {
                let lo = lengths.iter().copied().min().unwrap_or(0) as f32;
                let hi = lengths.iter().copied().max().unwrap_or(0) as f32;
                if hi > lo {
                    out.extend(lengths.iter().map(|&l| (l as f32 - lo) / (hi - lo)));
                } else {
                    out.extend(lengths.iter().map(|&l| l as f32 / max_len));
                }
            }
        }
    }
}

/// One ray's result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RadarReading {
    pub length:   u32,
    pub endpoint: Cell,
}

/// March from `origin` along `angle` until an unsafe cell or `max_length`.
pub fn cast_ray(origin: Vec2, angle: f32, max_length: u32, surface: &dyn Surface) -> RadarReading {
    let dir = Vec2::from_angle(angle);
    for length in 1..=max_length {
        let cell = (origin + dir * length as f32).to_cell();
        if !surface.classify(cell).is_safe() {
            return RadarReading { length, endpoint: cell };
        }
    }
    RadarReading {
        length:   max_length,
        endpoint: (origin + dir * max_length as f32).to_cell(),
    }
}
