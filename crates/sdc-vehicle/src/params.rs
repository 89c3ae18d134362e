//! Vehicle footprint and dynamic limits.

use crate::{VehicleError, VehicleResult};

/// Sprite size (length × width, in cells) the presets derive footprints from.
pub const SPRITE_SIZE: (f32, f32) = (100.0, 50.0);

/// Static parameters of one vehicle type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleParams {
    /// Half extent along the heading used for collision corners.
    pub half_width:         f32,
    /// Half extent across the heading used for collision corners.
    pub half_height:        f32,
    /// Wheelbase term of the turning radius.
    pub chassis_length:     f32,
    /// Acceleration magnitude applied when reversing direction of travel.
    pub brake_deceleration: f32,
    /// Deceleration magnitude while coasting.
    pub free_deceleration:  f32,
    pub max_velocity:       f32,
    pub max_acceleration:   f32,
    /// Steering limit in degrees.
    pub max_steering:       f32,
}

impl VehicleParams {
    /// Footprint from a sprite of `length × width` cells drawn at `scale`.
    ///
    /// The corners sit 5 cells inside the sprite's nose/tail and 10 cells
    /// inside its sides, so bumpers and mirrors do not count as contact.
    pub fn footprint(length: f32, width: f32, scale: f32) -> (f32, f32, f32) {
        let (l, w) = ((length * scale).round(), (width * scale).round());
        ((0.5 * l - 5.0).max(0.0), (0.5 * w - 10.0).max(0.0), 0.03 * w)
    }

    /// Highway car: half-scale sprite, 30 top speed, gentle steering.
    pub fn highway() -> Self {
        let (half_width, half_height, chassis_length) = Self::footprint(SPRITE_SIZE.0, SPRITE_SIZE.1, 0.5);
        Self {
            half_width,
            half_height,
            chassis_length,
            brake_deceleration: 10.0,
            free_deceleration:  2.0,
            max_velocity:       30.0,
            max_acceleration:   3.0,
            max_steering:       1.0,
        }
    }

    /// Parking car at `scale`; limits scale linearly.
    pub fn parking(scale: f32) -> Self {
        let (half_width, half_height, chassis_length) = Self::footprint(SPRITE_SIZE.0, SPRITE_SIZE.1, scale);
        Self {
            half_width,
            half_height,
            chassis_length,
            brake_deceleration: 10.0 * scale,
            free_deceleration:  2.0 * scale,
            max_velocity:       50.0 * scale,
            max_acceleration:   3.0 * scale,
            max_steering:       1.5 * scale,
        }
    }

    /// Limits must be positive and the footprint non-negative.
    pub fn validate(&self) -> VehicleResult<()> {
        let positive = [
            ("chassis_length",   self.chassis_length),
            ("max_velocity",     self.max_velocity),
            ("max_acceleration", self.max_acceleration),
            ("max_steering",     self.max_steering),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(VehicleError::InvalidParam { field, value });
            }
        }
        let non_negative = [
            ("half_width",         self.half_width),
            ("half_height",        self.half_height),
            ("brake_deceleration", self.brake_deceleration),
            ("free_deceleration",  self.free_deceleration),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(VehicleError::InvalidParam { field, value });
            }
        }
        Ok(())
    }
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self::highway()
    }
}
