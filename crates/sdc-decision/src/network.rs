//! A small fully connected feed-forward network used as an evolvable
//! controller.

use rand::Rng;
use serde::{Deserialize, Serialize};

use sdc_core::{AgentId, AgentRng, Command};

use crate::{DecisionError, DecisionFunction, DecisionResult, ExtraInput, Observation, SimContext};

/// How the output layer becomes a [`Command`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputDecoding {
    /// Two outputs (throttle, steering) through the dead zone.
    #[default]
    Signs,
    /// Nine outputs; the arg-max picks one of the 3 × 3 commands.
    OneHot,
}

impl OutputDecoding {
    #[inline]
    pub fn output_len(self) -> usize {
        match self {
            OutputDecoding::Signs  => 2,
            OutputDecoding::OneHot => 9,
        }
    }

    pub fn decode(self, outputs: &[f32]) -> Command {
        match self {
            OutputDecoding::Signs => match outputs {
                [throttle, steering, ..] => Command::from_signs(*throttle, *steering),
                _ => Command::NEUTRAL,
            },
            OutputDecoding::OneHot => {
                // First maximum wins; NaNs never win.
                let mut best: Option<(usize, f32)> = None;
                for (i, &v) in outputs.iter().enumerate() {
                    if v.is_nan() {
                        continue;
                    }
                    if best.is_none_or(|(_, b)| v > b) {
                        best = Some((i, v));
                    }
                }
                best.map_or(Command::NEUTRAL, |(i, _)| Command::from_one_hot(i))
            }
        }
    }
}

/// One dense layer, weights stored row-major (`outputs × inputs`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Layer {
    inputs:  usize,
    outputs: usize,
    weights: Vec<f32>,
    biases:  Vec<f32>,
}

impl Layer {
    fn random<R: Rng + ?Sized>(inputs: usize, outputs: usize, rng: &mut R) -> Self {
        // Uniform in ±1/√fan_in keeps tanh out of saturation at init.
        let bound = 1.0 / (inputs.max(1) as f32).sqrt();
        Self {
            inputs,
            outputs,
            weights: (0..inputs * outputs).map(|_| rng.gen_range(-bound..=bound)).collect(),
            biases:  (0..outputs).map(|_| rng.gen_range(-bound..=bound)).collect(),
        }
    }

    fn forward(&self, input: &[f32], out: &mut Vec<f32>) {
        out.clear();
        for (row, bias) in self.weights.chunks_exact(self.inputs.max(1)).zip(&self.biases) {
            let sum: f32 = row.iter().zip(input).map(|(w, x)| w * x).sum();
            out.push((sum + bias).tanh());
        }
    }

    fn check(&self) -> DecisionResult<()> {
        if self.weights.len() != self.inputs * self.outputs {
            return Err(DecisionError::ShapeMismatch {
                expected: self.inputs * self.outputs,
                got:      self.weights.len(),
                what:     "weights",
            });
        }
        if self.biases.len() != self.outputs {
            return Err(DecisionError::ShapeMismatch {
                expected: self.outputs,
                got:      self.biases.len(),
                what:     "biases",
            });
        }
        Ok(())
    }
}

/// Fully connected `tanh` network.
///
/// Input is the radar vector followed by the configured [`ExtraInput`];
/// output is decoded with [`OutputDecoding`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardNet {
    layers:   Vec<Layer>,
    decoding: OutputDecoding,
    extra:    ExtraInput,
}

impl FeedForwardNet {
    /// Randomly initialized network with the given hidden layer widths.
    ///
    /// `inputs` must already include the extra input, if any.
    pub fn random<R: Rng + ?Sized>(
        inputs:   usize,
        hidden:   &[usize],
        decoding: OutputDecoding,
        extra:    ExtraInput,
        rng:      &mut R,
    ) -> DecisionResult<Self> {
        if inputs == 0 {
            return Err(DecisionError::Config("network needs at least one input".into()));
        }
        if let Some(pos) = hidden.iter().position(|&w| w == 0) {
            return Err(DecisionError::Config(format!("hidden layer {pos} has zero width")));
        }
        let mut widths = Vec::with_capacity(hidden.len() + 2);
        widths.push(inputs);
        widths.extend_from_slice(hidden);
        widths.push(decoding.output_len());

        let layers = widths.windows(2).map(|w| Layer::random(w[0], w[1], rng)).collect();
        Ok(Self { layers, decoding, extra })
    }

    #[inline]
    pub fn decoding(&self) -> OutputDecoding {
        self.decoding
    }

    #[inline]
    pub fn extra_input(&self) -> ExtraInput {
        self.extra
    }

    /// Width of the input layer.
    pub fn inputs(&self) -> usize {
        self.layers.first().map_or(0, |l| l.inputs)
    }

    /// Width of the output layer.
    pub fn outputs(&self) -> usize {
        self.layers.last().map_or(0, |l| l.outputs)
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(|l| l.weights.len() + l.biases.len()).sum()
    }

    /// Check internal consistency, e.g. after loading an artifact.
    pub fn validate(&self) -> DecisionResult<()> {
        if self.layers.is_empty() {
            return Err(DecisionError::Config("network has no layers".into()));
        }
        for layer in &self.layers {
            layer.check()?;
        }
        for pair in self.layers.windows(2) {
            if pair[0].outputs != pair[1].inputs {
                return Err(DecisionError::ShapeMismatch {
                    expected: pair[0].outputs,
                    got:      pair[1].inputs,
                    what:     "layer inputs",
                });
            }
        }
        if self.outputs() != self.decoding.output_len() {
            return Err(DecisionError::ShapeMismatch {
                expected: self.decoding.output_len(),
                got:      self.outputs(),
                what:     "outputs",
            });
        }
        Ok(())
    }

    /// Run the network.  Missing inputs read as zero; extra ones are ignored.
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut current: Vec<f32> = input.to_vec();
        current.resize(self.inputs(), 0.0);
        let mut next = Vec::new();
        for layer in &self.layers {
            layer.forward(&current, &mut next);
            std::mem::swap(&mut current, &mut next);
        }
        current
    }

    /// Perturb each parameter with probability `rate` by a triangular step of
    /// at most `±scale`.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, scale: f32, rng: &mut R) {
        let rate = rate.clamp(0.0, 1.0);
        for layer in &mut self.layers {
            for p in layer.weights.iter_mut().chain(layer.biases.iter_mut()) {
                if rng.gen_bool(rate) {
                    let delta = (rng.gen_range(-1.0f32..=1.0) + rng.gen_range(-1.0f32..=1.0)) * 0.5;
                    *p += delta * scale;
                }
            }
        }
    }
}

impl DecisionFunction for FeedForwardNet {
    fn decide(
        &self,
        _agent: AgentId,
        obs:    &Observation<'_>,
        _ctx:   &SimContext<'_>,
        _rng:   &mut AgentRng,
    ) -> Command {
        let mut input = Vec::with_capacity(obs.input_len(self.extra));
        obs.write_inputs(self.extra, &mut input);
        self.decoding.decode(&self.forward(&input))
    }

    fn input_len(&self) -> Option<usize> {
        Some(self.inputs())
    }
}
