//! Registry configuration

use crate::error::{ConnectError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default base seed for the per-worker random streams
pub const DEFAULT_SEED: u64 = 143_202_461;

/// Registry configuration parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct RegistryConfig {
    /// Number of parallel workers; fixed for the registry's lifetime
    pub num_workers: u32,
    /// Base seed; worker `w` draws from a stream seeded with `seed + w`
    pub seed: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            num_workers: 1,
            seed: DEFAULT_SEED,
        }
    }
}

impl RegistryConfig {
    /// Create a configuration with validation
    pub fn new(num_workers: u32, seed: u64) -> Result<Self> {
        let config = Self { num_workers, seed };
        config.validate()?;
        Ok(config)
    }

    /// Validate parameters
    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(ConnectError::invalid_config("num_workers must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.num_workers, 1);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_invalid() {
        assert!(matches!(
            RegistryConfig::new(0, 1),
            Err(ConnectError::InvalidConfiguration { .. })
        ));
        assert_eq!(RegistryConfig::new(4, 7).unwrap().num_workers, 4);
    }
}
