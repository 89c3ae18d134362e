//! Epochs of generations driven by an [`Optimizer`].

use tracing::info;

use sdc_core::{AgentId, SimRng};
use sdc_decision::DecisionFunction;
use sdc_surface::Surface;

use crate::{
    CohortController, CohortError, CohortObserver, CohortResult, FitnessTable, GenerationSummary, Optimizer,
};

/// What a training run produced.
#[derive(Clone, Debug)]
pub struct TrainingOutcome<P> {
    /// Best fitness of any agent in any generation.
    pub best_fitness:    f32,
    /// Clone of the decision function that achieved `best_fitness`.
    pub best_policy:     Option<P>,
    pub best_generation: Option<u64>,
    pub generations:     Vec<GenerationSummary>,
}

/// Runs `config.epochs` generations, feeding fitness back to the optimizer.
pub struct Trainer<O: Optimizer> {
    optimizer: O,
}

impl<O: Optimizer> Trainer<O> {
    pub fn new(optimizer: O) -> Self {
        Self { optimizer }
    }

    #[inline]
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    pub fn into_optimizer(self) -> O {
        self.optimizer
    }

    /// Run `config.epochs` generations on `cohort`.
    ///
    /// The cohort must not be mid-generation: a controller built with
    /// [`CohortBuilder::policies`][crate::CohortBuilder::policies] is already
    /// running and is rejected with [`CohortError::AlreadyRunning`] before
    /// the optimizer is asked for candidates.
    pub fn run<S: Surface, Obs: CohortObserver>(
        &mut self,
        cohort:   &mut CohortController<S>,
        observer: &mut Obs,
    ) -> CohortResult<TrainingOutcome<O::Policy>> {
        if cohort.status().is_running() {
            return Err(CohortError::AlreadyRunning);
        }
        let epochs = cohort.config().epochs;
        let count = cohort.scenario().agent_count;
        let mut rng = SimRng::new(cohort.config().seed).child(2);

        let mut outcome = TrainingOutcome {
            best_fitness:    f32::NEG_INFINITY,
            best_policy:     None,
            best_generation: None,
            generations:     Vec::with_capacity(epochs as usize),
        };

        for _ in 0..epochs {
            let generation = cohort.generation();
            let candidates = self.optimizer.propose(generation, count, &mut rng)?;
            let boxed: Vec<Box<dyn DecisionFunction>> = candidates
                .iter()
                .cloned()
                .map(|p| Box::new(p) as Box<dyn DecisionFunction>)
                .collect();

            let mut table = FitnessTable::new(count);
            let summary = cohort.run_generation(boxed, &mut table, observer)?;
            self.optimizer.observe(&candidates, table.values());

            match table.best() {
                Some((AgentId(best), fitness)) if fitness > outcome.best_fitness => {
                    info!(generation, fitness, agent = best, "new best fitness");
                    outcome.best_fitness = fitness;
                    outcome.best_policy = candidates.get(best as usize).cloned();
                    outcome.best_generation = Some(generation);
                }
                _ => {}
            }
            outcome.generations.push(summary);
        }
        Ok(outcome)
    }
}
