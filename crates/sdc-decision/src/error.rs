use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("decision configuration error: {0}")]
    Config(String),

    #[error("network shape mismatch: expected {expected} {what}, got {got}")]
    ShapeMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DecisionResult<T> = Result<T, DecisionError>;
