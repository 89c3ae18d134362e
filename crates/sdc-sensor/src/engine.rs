//! One sensing pass: corners, collision policy, radars.

use sdc_surface::Surface;
use sdc_vehicle::{AgentState, VehicleParams};

use crate::collision::check_collision;
use crate::radar::cast_ray;
use crate::{CollisionPolicy, ContactReport, Footprint, RadarConfig, SensorResult};

/// Immutable sensing configuration shared by every agent of a cohort.
#[derive(Clone, Debug)]
pub struct SensorEngine {
    footprint: Footprint,
    radar:     RadarConfig,
    policy:    CollisionPolicy,
}

impl SensorEngine {
    pub fn new(vehicle: &VehicleParams, radar: RadarConfig, policy: CollisionPolicy) -> SensorResult<Self> {
        radar.validate()?;
        policy.validate()?;
        Ok(Self { footprint: Footprint::from(vehicle), radar, policy })
    }

    #[inline]
    pub fn radar(&self) -> &RadarConfig {
        &self.radar
    }

    #[inline]
    pub fn policy(&self) -> &CollisionPolicy {
        &self.policy
    }

    /// Recompute the agent's footprint corners.
    pub fn compute_collision_points(&self, state: &mut AgentState) {
        state.collision_points = self.footprint.corners(state.position, state.heading);
    }

    /// Apply the collision policy to the current corners.
    pub fn check_collision(&self, state: &mut AgentState, surface: &dyn Surface) -> ContactReport {
        check_collision(state, surface, &self.policy)
    }

    /// Recast every ray and store readings and endpoints on the agent.
    pub fn compute_radars(&self, state: &mut AgentState, surface: &dyn Surface) {
        let mut lengths = Vec::with_capacity(self.radar.count);
        state.radar_endpoints.clear();
        for k in 0..self.radar.count {
            let angle = self.radar.ray_angle(state.heading, k);
            let reading = cast_ray(state.position, angle, self.radar.max_length, surface);
            lengths.push(reading.length);
            state.radar_endpoints.push(reading.endpoint);
        }
        self.radar.normalize(&lengths, &mut state.radars);
    }

    /// Full post-move pass for a living agent.
    ///
    /// Radars are recast even when the agent dies this tick so the final
    /// frame shows what it saw.
    pub fn sense(&self, state: &mut AgentState, surface: &dyn Surface) -> ContactReport {
        if !state.alive {
            return ContactReport::default();
        }
        self.compute_collision_points(state);
        let report = self.check_collision(state, surface);
        self.compute_radars(state, surface);
        report
    }

    /// Fill corners and radars at spawn without applying the policy, so the
    /// first decision sees real readings.
    pub fn prime(&self, state: &mut AgentState, surface: &dyn Surface) {
        self.compute_collision_points(state);
        self.compute_radars(state, surface);
    }
}
