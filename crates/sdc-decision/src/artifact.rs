//! Persisting controllers (or anything serde-serializable) as JSON.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::DecisionResult;

/// Serialize `artifact` to JSON bytes.
pub fn to_blob<T: Serialize + ?Sized>(artifact: &T) -> DecisionResult<Vec<u8>> {
    Ok(serde_json::to_vec(artifact)?)
}

/// Deserialize an artifact from JSON bytes.
pub fn from_blob<T: DeserializeOwned>(blob: &[u8]) -> DecisionResult<T> {
    Ok(serde_json::from_slice(blob)?)
}

/// Write `artifact` as pretty-printed JSON, creating parent directories.
pub fn save_to_path<T: Serialize + ?Sized>(artifact: &T, path: impl AsRef<Path>) -> DecisionResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_vec_pretty(artifact)?)?;
    Ok(())
}

pub fn load_from_path<T: DeserializeOwned>(path: impl AsRef<Path>) -> DecisionResult<T> {
    let bytes = fs::read(path)?;
    from_blob(&bytes)
}
