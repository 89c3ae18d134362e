use sdc_core::SdcError;
use sdc_decision::DecisionError;
use sdc_scoring::ScoringError;
use sdc_sensor::SensorError;
use sdc_surface::SurfaceError;
use sdc_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CohortError {
    #[error("cohort configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("policy for agent {agent} expects {got} inputs but the scenario provides {expected}")]
    InputMismatch {
        agent:    usize,
        expected: usize,
        got:      usize,
    },

    #[error("no generation is running")]
    NotRunning,

    #[error("a generation is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Core(#[from] SdcError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Decision(#[from] DecisionError),
}

pub type CohortResult<T> = Result<T, CohortError>;
