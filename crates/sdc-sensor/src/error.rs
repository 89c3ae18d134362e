use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("invalid radar configuration: {0}")]
    Radar(String),

    #[error("invalid collision policy: {0}")]
    Policy(String),
}

pub type SensorResult<T> = Result<T, SensorError>;
