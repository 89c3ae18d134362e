//! Everything that distinguishes the highway scenario from the parking one.

use sdc_decision::ExtraInput;
use sdc_scoring::ScoringPolicy;
use sdc_sensor::{CollisionPolicy, RadarConfig};
use sdc_vehicle::VehicleParams;

use crate::{CohortError, CohortResult};

/// Per-scenario configuration shared by every agent of a cohort.
///
/// Typically loaded from JSON alongside a [`SimConfig`][sdc_core::SimConfig].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    pub vehicle:     VehicleParams,
    pub radar:       RadarConfig,
    pub collision:   CollisionPolicy,
    pub scoring:     ScoringPolicy,
    /// Scalar appended to the radar vector for numeric controllers.
    pub extra_input: ExtraInput,
    pub agent_count: usize,
}

impl ScenarioConfig {
    /// Closed-loop track: nine raw radars, penalties without stopping,
    /// speed-rewarding fitness.
    pub fn highway() -> Self {
        Self {
            vehicle:     VehicleParams::highway(),
            radar:       RadarConfig::highway(),
            collision:   CollisionPolicy::HIGHWAY,
            scoring:     ScoringPolicy::TRACK_FOLLOWING,
            extra_input: ExtraInput::VelocityRatio,
            agent_count: 30,
        }
    }

    /// Parking lot: eight normalized radars, any unsafe contact stops the
    /// car, fitness measures progress toward the free slot.
    pub fn parking() -> Self {
        Self {
            vehicle:     VehicleParams::parking(1.0),
            radar:       RadarConfig::parking(1.0),
            collision:   CollisionPolicy::PARKING,
            scoring:     ScoringPolicy::GOAL_SEEKING,
            extra_input: ExtraInput::TargetRatio,
            agent_count: 30,
        }
    }

    /// Length of the observation vector a numeric controller receives.
    #[inline]
    pub fn input_len(&self) -> usize {
        self.radar.count + self.extra_input.width()
    }

    pub fn validate(&self) -> CohortResult<()> {
        if self.agent_count == 0 {
            return Err(CohortError::Config("agent_count must be > 0".into()));
        }
        self.vehicle.validate()?;
        self.radar.validate()?;
        self.collision.validate()?;
        self.scoring.validate()?;
        Ok(())
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::highway()
    }
}
