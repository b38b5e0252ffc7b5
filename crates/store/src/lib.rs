//! Persistence of the login shield configuration.
//!
//! The shield reads a fresh snapshot from a [`ConfigStore`] at the start of
//! every login request and never writes back; only the settings screen and
//! plugin lifecycle do. Two stores are provided:
//!
//! - [`MemoryStore`] -- an atomically swapped in-process snapshot, for hosts
//!   that keep settings in their own database and push them in.
//! - [`YamlFileStore`] -- a single YAML document on disk.

pub mod file;
pub mod memory;

use std::sync::Arc;

use loginshield_common::{SettingsInput, ShieldConfig, ShieldError, ShieldResult};
use tracing::info;

pub use file::YamlFileStore;
pub use memory::MemoryStore;

/// Get/set access to the single configuration record.
pub trait ConfigStore: Send + Sync {
    /// Return the stored configuration, or defaults when nothing was saved.
    fn load(&self) -> ShieldResult<Arc<ShieldConfig>>;

    /// Write an already normalised and validated configuration.
    fn persist(&self, config: Arc<ShieldConfig>) -> ShieldResult<()>;

    /// Whether a configuration has been saved.
    fn exists(&self) -> ShieldResult<bool>;

    /// Drop the stored configuration. Later loads return defaults.
    fn clear(&self) -> ShieldResult<()>;

    /// Normalise, validate and store a configuration, returning what was
    /// stored.
    fn save(&self, config: ShieldConfig) -> ShieldResult<Arc<ShieldConfig>> {
        let config = config.normalized();
        config
            .validate()
            .map_err(|e| ShieldError::Config(e.to_string()))?;
        let config = Arc::new(config);
        self.persist(Arc::clone(&config))?;
        info!(field_name = %config.honeypot.field_name, "login shield configuration saved");
        Ok(config)
    }

    /// Store defaults unless a configuration already exists. Returns whether
    /// defaults were written.
    fn ensure_defaults(&self) -> ShieldResult<bool> {
        if self.exists()? {
            return Ok(false);
        }
        self.save(ShieldConfig::default())?;
        Ok(true)
    }

    /// Apply a settings form submission on top of the current configuration.
    fn apply_settings(&self, input: &SettingsInput) -> ShieldResult<Arc<ShieldConfig>> {
        let current = self.load()?;
        self.save(current.apply_settings(input))
    }
}
