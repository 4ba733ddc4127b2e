//! Algorithm configuration.
//!
//! An [`AlgorithmConfig`] is created once, validated, and then shared
//! read-only by the algorithm instance and any reporting code that inspects
//! it. The `extra` map carries backend-specific parameters the core never
//! interprets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration shared by all factorization algorithms.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    /// Backend identifier — opaque to the core, reported verbatim.
    pub backend: String,
    /// Quantum sampling repetitions per oracle call. Must be positive.
    pub shots: u32,
    /// Transpilation/optimization level, passed through to the backend.
    pub optimization_level: u8,
    /// Cap on period-finding attempts per factor() call. Must be positive
    /// when set; `None` means the algorithm default.
    pub max_iterations: Option<u32>,
    /// Open mapping of extra backend parameters.
    #[serde(default)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        AlgorithmConfig {
            backend: "simulator".to_string(),
            shots: 1024,
            optimization_level: 1,
            max_iterations: None,
            extra: BTreeMap::new(),
        }
    }
}

impl AlgorithmConfig {
    /// Config with the given backend and defaults for everything else.
    pub fn with_backend(backend: impl Into<String>) -> Self {
        AlgorithmConfig {
            backend: backend.into(),
            ..Default::default()
        }
    }

    /// Enforce the config invariants: shots > 0, max_iterations > 0 if set.
    pub fn validate(&self) -> Result<()> {
        if self.shots == 0 {
            return Err(Error::Config("shots must be positive".to_string()));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::Config(
                "max_iterations must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = AlgorithmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend, "simulator");
        assert_eq!(config.shots, 1024);
    }

    #[test]
    fn zero_shots_rejected() {
        let config = AlgorithmConfig {
            shots: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn zero_max_iterations_rejected() {
        let config = AlgorithmConfig {
            max_iterations: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn with_backend_sets_backend_only() {
        let config = AlgorithmConfig::with_backend("hardware_east");
        assert_eq!(config.backend, "hardware_east");
        assert_eq!(config.shots, AlgorithmConfig::default().shots);
    }

    #[test]
    fn serde_roundtrip() {
        let mut config = AlgorithmConfig::with_backend("simulator");
        config
            .extra
            .insert("noise_model".into(), serde_json::json!("ideal"));
        let json = serde_json::to_string(&config).unwrap();
        let back: AlgorithmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
