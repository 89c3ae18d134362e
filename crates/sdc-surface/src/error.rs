use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface configuration error: {0}")]
    Configuration(String),

    #[error("{requested} occupied slots requested but the lot only has {capacity} (one must stay free)")]
    OccupiedExceedsCapacity {
        requested: usize,
        capacity:  usize,
    },
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;
