use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use loginshield_common::{ShieldConfig, ShieldError, ShieldResult};
use tracing::{debug, info};

use crate::ConfigStore;

/// Configuration kept as a YAML document on disk.
///
/// Saves go through a sibling temp file and a rename so readers never see a
/// partially written document.
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ConfigStore for YamlFileStore {
    fn load(&self) -> ShieldResult<Arc<ShieldConfig>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Arc::new(ShieldConfig::default()))
            }
            Err(e) => return Err(e.into()),
        };

        debug!(path = %self.path.display(), "loading login shield configuration");
        let config = ShieldConfig::from_yaml(&content)?;

        // Complete a hand-written document once so later loads see the same name.
        if config.honeypot.field_name.is_empty() {
            info!(path = %self.path.display(), "stored configuration has no honeypot field name");
            return self.save(config);
        }

        config
            .validate()
            .map_err(|e| ShieldError::Config(e.to_string()))?;
        Ok(Arc::new(config))
    }

    fn persist(&self, config: Arc<ShieldConfig>) -> ShieldResult<()> {
        let yaml = serde_yaml::to_string(config.as_ref())?;
        let tmp = self.temp_path();
        std::fs::write(&tmp, yaml)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            std::fs::remove_file(&tmp).ok();
            return Err(e.into());
        }
        Ok(())
    }

    fn exists(&self) -> ShieldResult<bool> {
        Ok(self.path.try_exists()?)
    }

    fn clear(&self) -> ShieldResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "login shield configuration removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
