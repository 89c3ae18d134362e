//! Unit tests for sdc-decision.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use sdc_core::{AgentId, AgentRng, Command, Direction, Pose, Rotation, Tick, Vec2};
use sdc_surface::StaticSurface;

use crate::{
    ConstantPolicy, DecisionFunction, ExtraInput, FeedForwardNet, FnPolicy, HumanInput,
    NeutralPolicy, Observation, OutputDecoding, SimContext, artifact,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn surface() -> StaticSurface {
    StaticSurface::open(64, 64, Pose::new(Vec2::new(32.0, 32.0), 0.0))
}

fn decide_with<D: DecisionFunction>(policy: &D, obs: &Observation<'_>) -> Command {
    let surface = surface();
    let ctx = SimContext::new(Tick(3), 0.17, 0, &surface);
    let mut rng = AgentRng::new(7, 0, AgentId(0));
    policy.decide(AgentId(0), obs, &ctx, &mut rng)
}

fn net(inputs: usize, decoding: OutputDecoding, extra: ExtraInput) -> FeedForwardNet {
    let mut rng = SmallRng::seed_from_u64(11);
    FeedForwardNet::random(inputs, &[6], decoding, extra, &mut rng).unwrap()
}

// ── Observation ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod observation_tests {
    use super::*;

    #[test]
    fn appends_selected_extra_input() {
        let radars = [1.0, 2.0, 3.0];
        let obs = Observation { radars: &radars, velocity_ratio: 0.5, target_ratio: 0.25 };
        let mut buf = vec![99.0];

        obs.write_inputs(ExtraInput::None, &mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0]);

        obs.write_inputs(ExtraInput::VelocityRatio, &mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 0.5]);

        obs.write_inputs(ExtraInput::TargetRatio, &mut buf);
        assert_eq!(buf, vec![1.0, 2.0, 3.0, 0.25]);
        assert_eq!(obs.input_len(ExtraInput::TargetRatio), 4);
    }
}

// ── Scripted policies ─────────────────────────────────────────────────────────

#[cfg(test)]
mod scripted_tests {
    use super::*;

    #[test]
    fn neutral_and_constant() {
        let obs = Observation::default();
        assert_eq!(decide_with(&NeutralPolicy, &obs), Command::NEUTRAL);

        let cmd = Command::new(Direction::Forward, Rotation::Left);
        assert_eq!(decide_with(&ConstantPolicy(cmd), &obs), cmd);
    }

    #[test]
    fn fn_policy_sees_observation_and_context() {
        let policy = FnPolicy::new(|_, obs: &Observation<'_>, ctx: &SimContext<'_>, _| {
            if obs.radars[0] < 10.0 && ctx.tick == Tick(3) {
                Command::new(Direction::Backward, Rotation::Neutral)
            } else {
                Command::NEUTRAL
            }
        });
        let close = [5.0];
        let far = [50.0];
        assert_eq!(
            decide_with(&policy, &Observation { radars: &close, ..Default::default() }).direction,
            Direction::Backward,
        );
        assert_eq!(
            decide_with(&policy, &Observation { radars: &far, ..Default::default() }),
            Command::NEUTRAL,
        );
    }

    #[test]
    fn boxed_policy_delegates() {
        let boxed: Box<dyn DecisionFunction> =
            Box::new(ConstantPolicy(Command::new(Direction::Forward, Rotation::Right)));
        assert_eq!(decide_with(&boxed, &Observation::default()).rotation, Rotation::Right);
        assert_eq!(boxed.input_len(), None);
    }
}

// ── Network ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod network_tests {
    use super::*;

    #[test]
    fn shapes_follow_decoding() {
        let signs = net(10, OutputDecoding::Signs, ExtraInput::VelocityRatio);
        assert_eq!(signs.inputs(), 10);
        assert_eq!(signs.outputs(), 2);
        assert_eq!(signs.input_len(), Some(10));
        assert_eq!(signs.parameter_count(), 10 * 6 + 6 + 6 * 2 + 2);
        assert!(signs.validate().is_ok());

        let one_hot = net(9, OutputDecoding::OneHot, ExtraInput::None);
        assert_eq!(one_hot.outputs(), 9);
    }

    #[test]
    fn outputs_are_bounded_by_tanh() {
        let n = net(4, OutputDecoding::OneHot, ExtraInput::None);
        for out in n.forward(&[1e6, -1e6, 3.0, 0.0]) {
            assert!((-1.0..=1.0).contains(&out));
        }
    }

    #[test]
    fn short_input_is_zero_padded() {
        let n = net(4, OutputDecoding::Signs, ExtraInput::None);
        assert_eq!(n.forward(&[0.5]), n.forward(&[0.5, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn same_seed_same_network() {
        assert_eq!(
            net(5, OutputDecoding::Signs, ExtraInput::None),
            net(5, OutputDecoding::Signs, ExtraInput::None),
        );
    }

    #[test]
    fn rejects_degenerate_topology() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(FeedForwardNet::random(0, &[], OutputDecoding::Signs, ExtraInput::None, &mut rng).is_err());
        assert!(FeedForwardNet::random(3, &[4, 0], OutputDecoding::Signs, ExtraInput::None, &mut rng).is_err());
    }

    #[test]
    fn mutation_changes_parameters() {
        let original = net(5, OutputDecoding::Signs, ExtraInput::None);
        let mut mutated = original.clone();
        let mut rng = SmallRng::seed_from_u64(3);
        mutated.mutate(1.0, 0.5, &mut rng);
        assert_ne!(original, mutated);
        assert!(mutated.validate().is_ok());

        let mut untouched = original.clone();
        untouched.mutate(0.0, 0.5, &mut rng);
        assert_eq!(original, untouched);
    }

    #[test]
    fn sign_decoding_uses_dead_zone() {
        let d = OutputDecoding::Signs;
        assert_eq!(d.decode(&[0.9, -0.9]), Command::new(Direction::Forward, Rotation::Left));
        assert_eq!(d.decode(&[0.2, 0.32]), Command::NEUTRAL);
        assert_eq!(d.decode(&[-0.5, 0.5]), Command::new(Direction::Backward, Rotation::Right));
        assert_eq!(d.decode(&[1.0]), Command::NEUTRAL);
    }

    #[test]
    fn one_hot_decoding_takes_first_max() {
        let d = OutputDecoding::OneHot;
        // index 2 → (0, 2) → backward, right
        let mut out = [0.0; 9];
        out[2] = 0.8;
        out[7] = 0.8;
        assert_eq!(d.decode(&out), Command::new(Direction::Backward, Rotation::Right));
        // index 4 → (1, 1) → neutral
        let mut out = [f32::NAN; 9];
        out[4] = -0.3;
        assert_eq!(d.decode(&out), Command::NEUTRAL);
        // index 7 → (2, 1) → forward, straight
        let mut out = [-1.0; 9];
        out[7] = 0.1;
        assert_eq!(d.decode(&out), Command::new(Direction::Forward, Rotation::Neutral));
    }

    #[test]
    fn decide_reads_radars_and_extra() {
        let n = net(3, OutputDecoding::Signs, ExtraInput::TargetRatio);
        let radars = [0.2, 0.7];
        let obs = Observation { radars: &radars, velocity_ratio: 0.0, target_ratio: 0.4 };
        let expected = OutputDecoding::Signs.decode(&n.forward(&[0.2, 0.7, 0.4]));
        assert_eq!(decide_with(&n, &obs), expected);
    }
}

// ── Human input ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod human_tests {
    use super::*;

    #[test]
    fn handle_drives_the_controller() {
        let (input, handle) = HumanInput::new();
        let obs = Observation::default();
        assert_eq!(decide_with(&input, &obs), Command::NEUTRAL);

        handle.set_direction(Direction::Forward);
        handle.set_rotation(Rotation::Left);
        assert_eq!(decide_with(&input, &obs), Command::new(Direction::Forward, Rotation::Left));

        handle.release();
        assert_eq!(input.current(), Command::NEUTRAL);
    }

    #[test]
    fn handle_works_across_threads() {
        let (input, handle) = HumanInput::new();
        std::thread::spawn(move || handle.set(Command::new(Direction::Backward, Rotation::Right)))
            .join()
            .unwrap();
        assert_eq!(input.current(), Command::new(Direction::Backward, Rotation::Right));
    }
}

// ── Artifacts ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod artifact_tests {
    use super::*;

    #[test]
    fn network_survives_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");
        let n = net(9, OutputDecoding::OneHot, ExtraInput::VelocityRatio);

        artifact::save_to_path(&n, &path).unwrap();
        let loaded: FeedForwardNet = artifact::load_from_path(&path).unwrap();
        assert_eq!(loaded, n);
        assert!(loaded.validate().is_ok());
        assert_eq!(loaded.extra_input(), ExtraInput::VelocityRatio);
    }

    #[test]
    fn garbage_blob_is_an_error() {
        assert!(artifact::from_blob::<FeedForwardNet>(b"not json").is_err());
        let blob = artifact::to_blob(&ConstantPolicy(Command::NEUTRAL)).unwrap();
        let back: ConstantPolicy = artifact::from_blob(&blob).unwrap();
        assert_eq!(back.0, Command::NEUTRAL);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = artifact::load_from_path::<FeedForwardNet>(dir.path().join("nope.json"));
        assert!(matches!(err, Err(crate::DecisionError::Io(_))));
    }
}
