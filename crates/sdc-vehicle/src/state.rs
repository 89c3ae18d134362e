//! Per-agent simulation state.

use sdc_core::{Cell, Pose, Vec2};

/// Why an agent stopped.
///
/// `alive == false` exactly when the kind is not `None`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminalKind {
    #[default]
    None,
    Collided,
    Parked,
}

impl TerminalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminalKind::None     => "none",
            TerminalKind::Collided => "collided",
            TerminalKind::Parked   => "parked",
        }
    }
}

/// Everything one agent carries through a generation.
///
/// Owned by exactly one cohort slot.  Once `alive` is false nothing in the
/// simulation mutates it again until the next spawn.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    pub position:     Vec2,
    /// Degrees; `0` faces `+x`, positive turns up the screen.
    pub heading:      f32,
    pub velocity:     f32,
    pub acceleration: f32,
    pub steering:     f32,

    pub alive:    bool,
    pub terminal: TerminalKind,

    pub movement_score: f32,
    pub distance_score: f32,
    pub total_score:    f32,

    /// Fraction of the initial target distance covered, `[0, 1]`.
    pub target_ratio:            f32,
    /// First non-zero distance to the target seen this generation.
    pub initial_target_distance: Option<f32>,

    /// Latest radar readings, one per configured ray.
    pub radars:           Vec<f32>,
    /// Where each ray stopped, for renderers.
    pub radar_endpoints:  Vec<Cell>,
    /// Rotated footprint corners from the latest sensing pass.
    pub collision_points: [Cell; 4],
}

impl AgentState {
    /// A fresh, stationary, living agent at `pose`.
    pub fn spawn(pose: Pose, radar_count: usize) -> Self {
        let cell = pose.position.to_cell();
        Self {
            position:                pose.position,
            heading:                 pose.heading,
            velocity:                0.0,
            acceleration:            0.0,
            steering:                0.0,
            alive:                   true,
            terminal:                TerminalKind::None,
            movement_score:          0.0,
            distance_score:          0.0,
            total_score:             0.0,
            target_ratio:            0.0,
            initial_target_distance: None,
            radars:                  vec![0.0; radar_count],
            radar_endpoints:         vec![cell; radar_count],
            collision_points:        [cell; 4],
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.heading)
    }

    /// End the agent's run, leaving its motion variables as they are.
    pub fn terminate(&mut self, kind: TerminalKind) {
        self.alive = false;
        self.terminal = kind;
    }

    /// End the agent's run and zero its motion.
    pub fn stop(&mut self, kind: TerminalKind) {
        self.terminate(kind);
        self.velocity = 0.0;
        self.acceleration = 0.0;
        self.steering = 0.0;
    }
}
