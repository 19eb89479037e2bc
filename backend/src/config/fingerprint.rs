//! Deterministic configuration fingerprint

use crate::error::{CohortError, CohortResult};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// SHA-256 (hex) of the canonical JSON form of `config`
///
/// Object keys are sorted recursively, so the digest does not depend on
/// field or map ordering.
pub fn compute_config_hash<T: Serialize>(config: &T) -> CohortResult<String> {
    let value = serde_json::to_value(config)
        .map_err(|e| CohortError::InvalidConfig(format!("config serialization failed: {}", e)))?;

    let json = serde_json::to_string(&canonicalize(value))
        .map_err(|e| CohortError::InvalidConfig(format!("config serialization failed: {}", e)))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}
