//! Persisted configuration
//!
//! The configuration is stored in flash as a postcard blob wrapped in a
//! small header so stale or foreign data is rejected on boot.

use serde::{Deserialize, Serialize};

use super::types::DashboardConfig;

/// Magic number to identify a dashboard configuration blob
pub const CONFIG_MAGIC: u32 = 0x5049_5443; // "PITC"

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Upper bound on the encoded size
pub const MAX_CONFIG_SIZE: usize = 64;

/// Errors when storing or loading configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer cannot hold the encoded blob
    BufferTooSmall,
    /// Blob could not be decoded
    Corrupt,
    /// Blob does not start with `CONFIG_MAGIC`
    BadMagic,
    /// Blob was written by a different format version
    UnsupportedVersion(u8),
    /// Refresh divisor of zero
    InvalidRefreshDivisor,
}

#[derive(Serialize, Deserialize)]
struct StoredConfig {
    magic: u32,
    version: u8,
    config: DashboardConfig,
}

impl DashboardConfig {
    /// Check values that would make the scheduler misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.refresh_divisor == 0 {
            return Err(ConfigError::InvalidRefreshDivisor);
        }
        Ok(())
    }

    /// Encode into `buf`, returning the used prefix
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        self.validate()?;
        let stored = StoredConfig {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            config: *self,
        };
        postcard::to_slice(&stored, buf).map_err(|e| match e {
            postcard::Error::SerializeBufferFull => ConfigError::BufferTooSmall,
            _ => ConfigError::Corrupt,
        })
    }

    /// Decode and validate a stored blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let stored: StoredConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupt)?;

        if stored.magic != CONFIG_MAGIC {
            return Err(ConfigError::BadMagic);
        }
        if stored.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(stored.version));
        }

        stored.config.validate()?;
        Ok(stored.config)
    }

    /// Load from flash contents, falling back to defaults
    pub fn load_or_default(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes).unwrap_or_default()
    }
}
