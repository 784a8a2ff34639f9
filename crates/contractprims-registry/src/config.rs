use crate::error::{RegistryError, Result};

/// Controls how the registry sizes its entry map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Number of entries to pre-allocate room for.
    pub initial_capacity: usize,
    /// Number of map shards. Must be a power of two greater than 1.
    /// `None` uses the map's own default.
    pub shard_amount: Option<usize>,
}

impl RegistryConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        match self.shard_amount {
            Some(shards) if shards < 2 || !shards.is_power_of_two() => {
                Err(RegistryError::InvalidArgument(format!(
                    "shard_amount must be a power of two greater than 1, got {shards}"
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            shard_amount: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RegistryConfig::default().validate().is_ok());
    }

    #[test]
    fn shard_amount_must_be_power_of_two() {
        for bad in [0, 1, 3, 12] {
            let config = RegistryConfig {
                shard_amount: Some(bad),
                ..RegistryConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(RegistryError::InvalidArgument(_))
            ));
        }

        let config = RegistryConfig {
            shard_amount: Some(8),
            ..RegistryConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
