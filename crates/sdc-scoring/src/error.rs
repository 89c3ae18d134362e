use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid scoring parameter `{field}`: {value}")]
    InvalidParam {
        field: &'static str,
        value: f32,
    },

    #[error("goal-seeking scoring needs a surface with a target position")]
    MissingTarget,
}

pub type ScoringResult<T> = Result<T, ScoringError>;
