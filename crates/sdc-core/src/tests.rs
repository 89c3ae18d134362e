//! Unit tests for sdc-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, SlotId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn slot_id_rejects_overflow() {
        assert!(SlotId::try_from(70_000usize).is_err());
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(SlotId::INVALID.0, u16::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Cell, Vec2};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn heading_zero_points_along_x() {
        let v = Vec2::new(5.0, 0.0).rotate_deg(-0.0);
        assert!(close(v, Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn positive_heading_moves_up_the_screen() {
        // heading 90° → direction (0, -1) in screen coordinates.
        let v = Vec2::new(1.0, 0.0).rotate_deg(-90.0);
        assert!(close(v, Vec2::new(0.0, -1.0)), "got {v}");
    }

    #[test]
    fn to_cell_floors_negative_values() {
        assert_eq!(Vec2::new(-0.5, 2.9).to_cell(), Cell::new(-1, 2));
        assert_eq!(Vec2::new(3.0, 3.0).to_cell(), Cell::new(3, 3));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod command {
    use crate::{Command, Direction, Rotation};

    #[test]
    fn dead_zone_is_neutral() {
        assert_eq!(Command::from_signs(0.2, -0.32), Command::NEUTRAL);
    }

    #[test]
    fn signs_outside_dead_zone() {
        let c = Command::from_signs(0.9, -0.5);
        assert_eq!(c.direction, Direction::Forward);
        assert_eq!(c.rotation, Rotation::Left);

        let c = Command::from_signs(-0.4, 0.4);
        assert_eq!(c.direction, Direction::Backward);
        assert_eq!(c.rotation, Rotation::Right);
    }

    #[test]
    fn nan_decodes_neutral() {
        assert_eq!(Command::from_signs(f32::NAN, f32::INFINITY), Command::NEUTRAL);
    }

    #[test]
    fn one_hot_divmod() {
        assert_eq!(
            Command::from_one_hot(0),
            Command::new(Direction::Backward, Rotation::Left)
        );
        assert_eq!(Command::from_one_hot(4), Command::NEUTRAL);
        assert_eq!(
            Command::from_one_hot(8),
            Command::new(Direction::Forward, Rotation::Right)
        );
        assert_eq!(
            Command::from_one_hot(7),
            Command::new(Direction::Forward, Rotation::Neutral)
        );
        assert_eq!(Command::from_one_hot(12), Command::NEUTRAL);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimConfig, Tick};

    #[test]
    fn tick_display_and_since() {
        assert_eq!(Tick(12).to_string(), "T12");
        assert_eq!(Tick(10).since(Tick(4)), 6);
        assert_eq!(Tick(3).since(Tick(4)), 0);
    }

    #[test]
    fn default_config_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_min_dt_rejected() {
        let cfg = SimConfig { min_dt: 0.0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_budget_rejected() {
        let cfg = SimConfig { time_budget_ticks: 0, ..SimConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn clamp_dt_bounds() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.clamp_dt(10.0), cfg.max_dt);
        assert_eq!(cfg.clamp_dt(0.0), cfg.min_dt);
        assert_eq!(cfg.clamp_dt(f32::NAN), cfg.min_dt);
        assert_eq!(cfg.clamp_dt(0.2), 0.2);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn agent_rng_reproducible() {
        let mut a = AgentRng::new(7, 3, AgentId(5));
        let mut b = AgentRng::new(7, 3, AgentId(5));
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn agents_and_generations_get_distinct_streams() {
        let x: u64 = AgentRng::new(7, 0, AgentId(0)).random();
        let y: u64 = AgentRng::new(7, 0, AgentId(1)).random();
        let z: u64 = AgentRng::new(7, 1, AgentId(0)).random();
        assert_ne!(x, y);
        assert_ne!(x, z);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = SimRng::new(1);
        let mut v: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut v);
        let mut sorted = v.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
