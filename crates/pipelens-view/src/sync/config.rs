//! Sync configuration.

use serde::{Deserialize, Serialize};

/// Default capacity of the update queue (number of buffered events).
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for the sync dispatcher with sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Capacity of the update queue (optional).
    pub channel_capacity: Option<usize>,
}

impl SyncConfig {
    /// Creates a new sync configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channel_capacity: None,
        }
    }

    /// Returns the update-queue capacity, using the default if not set.
    #[inline]
    #[must_use]
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Set the update-queue capacity.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Validate the configuration and return any issues.
    pub fn validate(&self) -> Result<(), String> {
        if self.channel_capacity == Some(0) {
            return Err("Update-queue capacity cannot be zero".to_string());
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = SyncConfig::new();
        assert_eq!(config.channel_capacity(), DEFAULT_CHANNEL_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SyncConfig::new().with_channel_capacity(8);
        assert_eq!(config.channel_capacity(), 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let zero_capacity = SyncConfig::new().with_channel_capacity(0);
        assert!(zero_capacity.validate().is_err());
    }
}
