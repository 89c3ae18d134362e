//! Where each generation's decision functions come from.

use sdc_core::SimRng;
use sdc_decision::{DecisionFunction, ExtraInput, FeedForwardNet, OutputDecoding};

use crate::{CohortResult, ScenarioConfig};

/// Proposes one decision function per agent for each generation and learns
/// from the resulting fitness.
pub trait Optimizer {
    type Policy: DecisionFunction + Clone;

    /// `count` candidates for `generation`.
    fn propose(&mut self, generation: u64, count: usize, rng: &mut SimRng) -> CohortResult<Vec<Self::Policy>>;

    /// Final fitness of the candidates returned by the last `propose`, in the
    /// same order.  Default: ignore.
    fn observe(&mut self, _candidates: &[Self::Policy], _fitness: &[f32]) {}
}

/// Random search over [`FeedForwardNet`]s with an elite.
///
/// The first generation is entirely random.  Afterwards `elite_fraction` of
/// each cohort is the best network so far (once verbatim, then mutated
/// copies) and the rest are fresh random networks.
#[derive(Clone, Debug)]
pub struct RandomSearch {
    pub inputs:         usize,
    pub hidden:         Vec<usize>,
    pub decoding:       OutputDecoding,
    pub extra:          ExtraInput,
    pub elite_fraction: f32,
    pub mutation_rate:  f64,
    pub mutation_scale: f32,

    elite:         Option<FeedForwardNet>,
    elite_fitness: f32,
}

impl RandomSearch {
    pub fn new(inputs: usize, hidden: &[usize], decoding: OutputDecoding, extra: ExtraInput) -> Self {
        Self {
            inputs,
            hidden: hidden.to_vec(),
            decoding,
            extra,
            elite_fraction: 0.3,
            mutation_rate:  0.2,
            mutation_scale: 0.5,
            elite:          None,
            elite_fitness:  f32::NEG_INFINITY,
        }
    }

    /// Networks shaped for `scenario`'s radar count and extra input, with
    /// sign decoding.
    pub fn for_scenario(scenario: &ScenarioConfig, hidden: &[usize]) -> Self {
        Self::new(scenario.input_len(), hidden, OutputDecoding::Signs, scenario.extra_input)
    }

    pub fn with_elite_fraction(mut self, fraction: f32) -> Self {
        self.elite_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation(mut self, rate: f64, scale: f32) -> Self {
        self.mutation_rate = rate;
        self.mutation_scale = scale;
        self
    }

    /// The best network observed so far and its fitness.
    pub fn elite(&self) -> Option<(&FeedForwardNet, f32)> {
        self.elite.as_ref().map(|n| (n, self.elite_fitness))
    }
}

impl Optimizer for RandomSearch {
    type Policy = FeedForwardNet;

    fn propose(&mut self, _generation: u64, count: usize, rng: &mut SimRng) -> CohortResult<Vec<FeedForwardNet>> {
        let mut out = Vec::with_capacity(count);
        if let Some(elite) = &self.elite {
            let n_elite = ((count as f32 * self.elite_fraction).round() as usize).min(count);
            for i in 0..n_elite {
                let mut net = elite.clone();
                if i > 0 {
                    net.mutate(self.mutation_rate, self.mutation_scale, rng.inner());
                }
                out.push(net);
            }
        }
        while out.len() < count {
            out.push(FeedForwardNet::random(
                self.inputs,
                &self.hidden,
                self.decoding,
                self.extra,
                rng.inner(),
            )?);
        }
        Ok(out)
    }

    fn observe(&mut self, candidates: &[FeedForwardNet], fitness: &[f32]) {
        for (net, &f) in candidates.iter().zip(fitness) {
            if f > self.elite_fitness {
                self.elite_fitness = f;
                self.elite = Some(net.clone());
            }
        }
    }
}
