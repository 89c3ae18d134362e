//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `SdcError` with `#[from]`
//! where a core validation failure can surface through them.

use thiserror::Error;

/// The base error type for `sdc-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum SdcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sdc-core`.
pub type SdcResult<T> = Result<T, SdcError>;
