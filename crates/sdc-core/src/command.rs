//! Discrete control commands and their decoding from controller outputs.
//!
//! A decision function ultimately produces one [`Command`] per tick: a
//! longitudinal [`Direction`] and a steering [`Rotation`].  Two decodings are
//! supported for numeric controller outputs:
//!
//! - **signs** — two continuous values in `[-1, 1]`, each mapped through a
//!   ±[`DEAD_ZONE`] band to `-1 / 0 / +1`;
//! - **one-hot** — the arg-max index of nine outputs, split as
//!   `(index / 3, index % 3)` and shifted to `-1 / 0 / +1`.
//!
//! In both cases `+1` means *forward* and *right*.

/// Magnitude below which a continuous output is read as "neutral".
pub const DEAD_ZONE: f32 = 0.33;

/// Longitudinal input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    Neutral,
}

impl Direction {
    /// `+1 → Forward`, `-1 → Backward`, anything else `→ Neutral`.
    #[inline]
    pub fn from_sign(sign: i32) -> Self {
        match sign.signum() {
            1  => Direction::Forward,
            -1 => Direction::Backward,
            _  => Direction::Neutral,
        }
    }
}

/// Steering input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    Left,
    Right,
    #[default]
    Neutral,
}

impl Rotation {
    /// `+1 → Right`, `-1 → Left`, anything else `→ Neutral`.
    #[inline]
    pub fn from_sign(sign: i32) -> Self {
        match sign.signum() {
            1  => Rotation::Right,
            -1 => Rotation::Left,
            _  => Rotation::Neutral,
        }
    }
}

/// One tick's worth of control input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    pub direction: Direction,
    pub rotation:  Rotation,
}

impl Command {
    /// Coast with the wheel centered.
    pub const NEUTRAL: Command = Command {
        direction: Direction::Neutral,
        rotation:  Rotation::Neutral,
    };

    #[inline]
    pub const fn new(direction: Direction, rotation: Rotation) -> Self {
        Self { direction, rotation }
    }

    /// Decode two continuous outputs (throttle, steering) using the dead zone.
    ///
    /// Non-finite values decode as neutral.
    pub fn from_signs(throttle: f32, steering: f32) -> Self {
        Self {
            direction: Direction::from_sign(dead_zone_sign(throttle)),
            rotation:  Rotation::from_sign(dead_zone_sign(steering)),
        }
    }

    /// Decode the arg-max index of a nine-way output layer.
    ///
    /// Indices `>= 9` decode as neutral.
    pub fn from_one_hot(index: usize) -> Self {
        if index >= 9 {
            return Self::NEUTRAL;
        }
        let (direction, rotation) = (index / 3, index % 3);
        Self {
            direction: Direction::from_sign(direction as i32 - 1),
            rotation:  Rotation::from_sign(rotation as i32 - 1),
        }
    }
}

fn dead_zone_sign(value: f32) -> i32 {
    if value.is_finite() && value.abs() >= DEAD_ZONE {
        if value > 0.0 { 1 } else { -1 }
    } else {
        0
    }
}
