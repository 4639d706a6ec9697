//! Revocation store selection and sweep scheduling

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Which blacklist backend the engine runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    /// Volatile in-process map
    Memory,
    /// Hash-indexed rows behind a repository
    Persistent,
}

impl Default for RevocationBackend {
    fn default() -> Self {
        RevocationBackend::Memory
    }
}

impl std::str::FromStr for RevocationBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(RevocationBackend::Memory),
            "persistent" | "database" | "db" => Ok(RevocationBackend::Persistent),
            _ => Err(ConfigError::InvalidValue {
                key: "REVOCATION_STRATEGY".to_string(),
                message: format!("unknown strategy {:?}", s),
            }),
        }
    }
}

/// Revocation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Selected backend
    #[serde(default)]
    pub backend: RevocationBackend,

    /// Seconds between sweeps; `None` picks the backend default
    #[serde(default)]
    pub sweep_interval_secs: Option<u64>,

    /// Whether the periodic sweep runs at all
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            backend: RevocationBackend::default(),
            sweep_interval_secs: None,
            sweep_enabled: default_sweep_enabled(),
        }
    }
}

impl RevocationConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match std::env::var("REVOCATION_STRATEGY") {
            Ok(raw) => raw.parse()?,
            Err(_) => RevocationBackend::default(),
        };
        let sweep_interval_secs = match std::env::var("REVOCATION_SWEEP_INTERVAL_SECS") {
            Ok(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "REVOCATION_SWEEP_INTERVAL_SECS".to_string(),
                message: format!("expected seconds, got {:?}", raw),
            })?),
            Err(_) => None,
        };
        let sweep_enabled = std::env::var("REVOCATION_SWEEP_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            backend,
            sweep_interval_secs,
            sweep_enabled,
        })
    }

    /// Sweep period, falling back to 5 minutes (memory) or 1 hour (persistent)
    pub fn sweep_interval(&self) -> std::time::Duration {
        let secs = self.sweep_interval_secs.unwrap_or(match self.backend {
            RevocationBackend::Memory => 300,
            RevocationBackend::Persistent => 3600,
        });
        std::time::Duration::from_secs(secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sweep_interval_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "sweep_interval_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

fn default_sweep_enabled() -> bool {
    true
}
