//! The two scoring policies.

use sdc_core::Vec2;
use sdc_sensor::ContactReport;
use sdc_vehicle::{AgentState, TerminalKind};

use crate::{ScoringError, ScoringResult};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoringPolicy {
    /// `movement += clear_points · |v| · speed_reward − time_cost`.
    TrackFollowing {
        speed_reward: f32,
        time_cost:    f32,
    },
    /// Progress toward the target, anti-idling pressure, success snap.
    GoalSeeking {
        /// Below this speed the agent counts as idle.
        idle_speed:        f32,
        idle_penalty:      f32,
        moving_penalty:    f32,
        /// Distance score above which the agent is parked.
        success_threshold: f32,
        /// Distance score awarded on parking.
        success_bonus:     f32,
    },
}

impl ScoringPolicy {
    pub const TRACK_FOLLOWING: ScoringPolicy = ScoringPolicy::TrackFollowing {
        speed_reward: 0.001,
        time_cost:    0.01,
    };

    pub const GOAL_SEEKING: ScoringPolicy = ScoringPolicy::GoalSeeking {
        idle_speed:        1.0,
        idle_penalty:      0.1,
        moving_penalty:    0.01,
        success_threshold: 99.0,
        success_bonus:     1_000.0,
    };

    #[inline]
    pub fn needs_target(&self) -> bool {
        matches!(self, ScoringPolicy::GoalSeeking { .. })
    }

    pub fn validate(&self) -> ScoringResult<()> {
        let fields: Vec<(&'static str, f32)> = match *self {
            ScoringPolicy::TrackFollowing { speed_reward, time_cost } => {
                vec![("speed_reward", speed_reward), ("time_cost", time_cost)]
            }
            ScoringPolicy::GoalSeeking {
                idle_speed,
                idle_penalty,
                moving_penalty,
                success_threshold,
                success_bonus,
            } => vec![
                ("idle_speed", idle_speed),
                ("idle_penalty", idle_penalty),
                ("moving_penalty", moving_penalty),
                ("success_threshold", success_threshold),
                ("success_bonus", success_bonus),
            ],
        };
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidParam { field, value });
            }
        }
        if let ScoringPolicy::GoalSeeking { success_threshold, .. } = *self {
            if success_threshold > 100.0 {
                return Err(ScoringError::InvalidParam {
                    field: "success_threshold",
                    value: success_threshold,
                });
            }
        }
        Ok(())
    }

    /// Update `state`'s scores after this tick's sensing pass.
    ///
    /// `target` is the surface's target position; goal-seeking without one
    /// only applies the movement term.
    pub fn score(&self, state: &mut AgentState, contact: &ContactReport, target: Option<Vec2>) {
        match *self {
            ScoringPolicy::TrackFollowing { speed_reward, time_cost } => {
                state.movement_score +=
                    contact.clear_points as f32 * state.velocity.abs() * speed_reward - time_cost;
            }

            ScoringPolicy::GoalSeeking {
                idle_speed,
                idle_penalty,
                moving_penalty,
                success_threshold,
                success_bonus,
            } => {
                state.movement_score -= if state.velocity.abs() < idle_speed {
                    idle_penalty
                } else {
                    moving_penalty
                };

                if let Some(target) = target {
                    let distance = state.position.distance(target);
                    let initial = match state.initial_target_distance {
                        Some(d) => d,
                        None if distance > 0.0 => {
                            state.initial_target_distance = Some(distance);
                            distance
                        }
                        None => 0.0,
                    };
                    state.distance_score = if initial > 0.0 {
                        (100.0 * (initial - distance) / initial).max(0.0)
                    } else {
                        0.0
                    };
                    state.target_ratio = state.distance_score / 100.0;

                    if state.distance_score > success_threshold
                        && state.terminal != TerminalKind::Collided
                    {
                        state.distance_score = success_bonus;
                        state.stop(TerminalKind::Parked);
                    }
                }
            }
        }
        state.total_score = state.distance_score + state.movement_score;
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::TRACK_FOLLOWING
    }
}
