use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("invalid vehicle parameter `{field}`: {value}")]
    InvalidParam {
        field: &'static str,
        value: f32,
    },
}

pub type VehicleResult<T> = Result<T, VehicleError>;
