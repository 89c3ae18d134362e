//! Unit tests for the vehicle model.

use sdc_core::{Command, Direction, Pose, Rotation, Vec2};

use crate::{AgentState, KinematicModel, TerminalKind, VehicleError, VehicleParams};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn model() -> KinematicModel {
    KinematicModel::new(VehicleParams::highway()).unwrap()
}

fn agent() -> AgentState {
    AgentState::spawn(Pose::new(Vec2::new(100.0, 100.0), 0.0), 9)
}

const FORWARD: Command = Command::new(Direction::Forward, Rotation::Neutral);
const BACKWARD: Command = Command::new(Direction::Backward, Rotation::Neutral);

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn presets_validate() {
        VehicleParams::highway().validate().unwrap();
        VehicleParams::parking(1.0).validate().unwrap();
        VehicleParams::parking(0.5).validate().unwrap();
    }

    #[test]
    fn parking_limits_scale() {
        let p = VehicleParams::parking(2.0);
        assert_eq!(p.max_velocity, 100.0);
        assert_eq!(p.brake_deceleration, 20.0);
        assert_eq!(p.max_steering, 3.0);
    }

    #[test]
    fn footprint_insets_sprite() {
        let (hw, hh, chassis) = VehicleParams::footprint(100.0, 50.0, 1.0);
        assert_eq!(hw, 45.0);
        assert_eq!(hh, 15.0);
        assert!((chassis - 1.5).abs() < 1e-6);
    }

    #[test]
    fn non_positive_limit_rejected() {
        let p = VehicleParams { max_velocity: 0.0, ..VehicleParams::highway() };
        assert!(matches!(
            KinematicModel::new(p),
            Err(VehicleError::InvalidParam { field: "max_velocity", .. })
        ));
    }
}

#[cfg(test)]
mod kinematics_tests {
    use super::*;

    #[test]
    fn forward_accelerates_along_heading() {
        let m = model();
        let mut s = agent();
        for _ in 0..10 {
            m.update(&mut s, FORWARD, 0.1);
        }
        assert!(s.velocity > 0.0);
        assert!(s.position.x > 100.0);
        assert!((s.position.y - 100.0).abs() < 1e-4);
    }

    #[test]
    fn heading_ninety_moves_up_the_screen() {
        let m = model();
        let mut s = AgentState::spawn(Pose::new(Vec2::new(50.0, 50.0), 90.0), 0);
        s.velocity = 10.0;
        m.update(&mut s, Command::new(Direction::Forward, Rotation::Neutral), 0.1);
        assert!(s.position.y < 50.0);
        assert!((s.position.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn forward_while_reversing_brakes() {
        let m = model();
        let mut s = agent();
        s.velocity = -5.0;
        m.update(&mut s, FORWARD, 0.1);
        // brake_deceleration (10) applied for 0.1 before the clamp.
        assert!((s.velocity - -4.0).abs() < 1e-5);
        assert_eq!(s.acceleration, m.params().max_acceleration);
    }

    #[test]
    fn backward_while_moving_forward_brakes() {
        let m = model();
        let mut s = agent();
        s.velocity = 5.0;
        m.update(&mut s, BACKWARD, 0.1);
        assert!((s.velocity - 4.0).abs() < 1e-5);
        assert_eq!(s.acceleration, -m.params().max_acceleration);
    }

    #[test]
    fn neutral_coasts_to_exact_stop() {
        let m = model();
        let mut s = agent();
        s.velocity = 0.05;
        m.update(&mut s, Command::NEUTRAL, 0.1);
        assert!(s.velocity.abs() < 1e-6, "got {}", s.velocity);
    }

    #[test]
    fn neutral_with_zero_dt_does_not_divide() {
        let m = model();
        let mut s = agent();
        m.update(&mut s, Command::NEUTRAL, 0.0);
        assert!(s.acceleration.is_finite());
        assert_eq!(s.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn limits_hold_after_every_update() {
        let m = model();
        let p = m.params().clone();
        let mut s = agent();
        let commands = [
            Command::new(Direction::Forward, Rotation::Right),
            Command::new(Direction::Forward, Rotation::Left),
            Command::new(Direction::Backward, Rotation::Right),
            Command::NEUTRAL,
        ];
        for i in 0..2_000 {
            let c = commands[(i / 37) % commands.len()];
            m.update(&mut s, c, 0.3);
            assert!(s.velocity.abs() <= p.max_velocity);
            assert!(s.acceleration.abs() <= p.max_acceleration);
            assert!(s.steering.abs() <= p.max_steering);
        }
    }

    #[test]
    fn right_turn_decreases_heading() {
        let m = model();
        let mut s = agent();
        s.velocity = 10.0;
        for _ in 0..5 {
            m.update(&mut s, Command::new(Direction::Forward, Rotation::Right), 0.1);
        }
        assert!(s.steering < 0.0);
        assert!(s.heading < 0.0);
    }

    #[test]
    fn neutral_rotation_recenters_immediately() {
        let m = model();
        let mut s = agent();
        s.steering = 0.8;
        m.update(&mut s, FORWARD, 0.1);
        assert_eq!(s.steering, 0.0);
    }

    #[test]
    fn dead_agent_is_frozen() {
        let m = model();
        let mut s = agent();
        s.velocity = 12.0;
        s.heading = 33.0;
        s.terminate(TerminalKind::Collided);
        let before = s.clone();
        m.update(&mut s, FORWARD, 0.2);
        assert_eq!(s, before);
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn spawn_is_alive_and_still() {
        let s = agent();
        assert!(s.alive);
        assert_eq!(s.terminal, TerminalKind::None);
        assert_eq!(s.velocity, 0.0);
        assert_eq!(s.radars.len(), 9);
    }

    #[test]
    fn stop_zeroes_motion() {
        let mut s = agent();
        s.velocity = 3.0;
        s.acceleration = 1.0;
        s.steering = 0.5;
        s.stop(TerminalKind::Parked);
        assert!(!s.alive);
        assert_eq!(s.terminal, TerminalKind::Parked);
        assert_eq!((s.velocity, s.acceleration, s.steering), (0.0, 0.0, 0.0));
    }

    #[test]
    fn terminate_keeps_motion() {
        let mut s = agent();
        s.velocity = 3.0;
        s.terminate(TerminalKind::Collided);
        assert!(!s.alive);
        assert_eq!(s.velocity, 3.0);
    }
}
