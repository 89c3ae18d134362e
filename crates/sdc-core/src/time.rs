//! Simulation time model.
//!
//! Time advances in integer [`Tick`]s; each tick integrates the vehicle model
//! over a real-valued step `dt`.  The host may pass a measured frame time,
//! which is clamped to `[min_dt, max_dt]` before use so a stalled frame can
//! never teleport an agent through a wall.

use std::fmt;

use crate::{SdcError, SdcResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A tick counter, reset to zero at the start of every generation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration shared by every scenario.
///
/// Typically loaded from a JSON file by a demo binary and handed to the
/// cohort builder and trainer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Number of generations a trainer runs.
    pub epochs: u32,

    /// Time budget per generation; the generation ends on the first tick
    /// that exceeds it, even if agents are still alive.
    pub time_budget_ticks: u64,

    /// Fixed step used by headless runs.
    pub dt: f32,

    /// Lower clamp for host-supplied steps.  Must be positive.
    pub min_dt: f32,

    /// Upper clamp for host-supplied steps.
    pub max_dt: f32,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Report agent snapshots every N ticks.  `0` disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                    42,
            epochs:                  30,
            time_budget_ticks:       1_500,
            dt:                      0.17,
            min_dt:                  0.01,
            max_dt:                  0.5,
            num_threads:             None,
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// Reject configurations that would make the tick loop meaningless.
    pub fn validate(&self) -> SdcResult<()> {
        if self.min_dt.is_nan() || self.min_dt <= 0.0 {
            return Err(SdcError::Config(format!("min_dt must be > 0, got {}", self.min_dt)));
        }
        if self.max_dt < self.min_dt {
            return Err(SdcError::Config(format!(
                "max_dt ({}) is below min_dt ({})",
                self.max_dt, self.min_dt
            )));
        }
        if !(self.dt >= self.min_dt && self.dt <= self.max_dt) {
            return Err(SdcError::Config(format!(
                "dt {} outside [{}, {}]",
                self.dt, self.min_dt, self.max_dt
            )));
        }
        if self.time_budget_ticks == 0 {
            return Err(SdcError::Config("time_budget_ticks must be > 0".into()));
        }
        Ok(())
    }

    /// Clamp a host-supplied step into `[min_dt, max_dt]`.
    ///
    /// NaN collapses to `min_dt`.
    #[inline]
    pub fn clamp_dt(&self, raw: f32) -> f32 {
        if raw.is_nan() {
            self.min_dt
        } else {
            raw.clamp(self.min_dt, self.max_dt)
        }
    }
}
