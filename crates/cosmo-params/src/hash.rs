use cosmo_core::errors::{CosmoError, ErrorInfo};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalParams;

fn hash_json<T: Serialize>(value: &T) -> Result<String, CosmoError> {
    let json = serde_json::to_vec(value)
        .map_err(|err| CosmoError::Serde(ErrorInfo::new("serialize", err.to_string())))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Computes the canonical hash of a compiled parameter set.
pub fn hash_params(params: &CanonicalParams) -> Result<String, CosmoError> {
    hash_json(params)
}
