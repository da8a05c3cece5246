use crate::config::RunParams;
use crate::geometry::City;
use sha2::{Digest, Sha256};

/// Identifies a run by everything that determines its output: the ordered
/// city list and the parameters (seed and concurrency width included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFingerprint {
    pub hash: String,
}

impl RunFingerprint {
    pub fn from_parts(cities: &[City], params: &RunParams) -> Self {
        let mut hasher = Sha256::new();

        for city in cities {
            hasher.update(city.x.to_le_bytes());
            hasher.update(city.y.to_le_bytes());
        }

        let params_json = serde_json::to_string(params).unwrap_or_default();
        hasher.update(params_json.as_bytes());

        Self {
            hash: hex::encode(hasher.finalize()),
        }
    }

    pub fn short(&self) -> &str {
        &self.hash[..12.min(self.hash.len())]
    }
}
