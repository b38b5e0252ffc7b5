use std::sync::Arc;

use arc_swap::ArcSwapOption;
use loginshield_common::{ShieldConfig, ShieldResult};

use crate::ConfigStore;

/// In-process store. Readers get the current snapshot without locking and
/// keep it alive for as long as they hold the `Arc`, even across a save.
#[derive(Default)]
pub struct MemoryStore {
    current: ArcSwapOption<ShieldConfig>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Create a store already holding `config`, stored as given.
    pub fn with_config(config: ShieldConfig) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(config),
        }
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> ShieldResult<Arc<ShieldConfig>> {
        Ok(self
            .current
            .load_full()
            .unwrap_or_else(|| Arc::new(ShieldConfig::default())))
    }

    fn persist(&self, config: Arc<ShieldConfig>) -> ShieldResult<()> {
        self.current.store(Some(config));
        Ok(())
    }

    fn exists(&self) -> ShieldResult<bool> {
        Ok(self.current.load().is_some())
    }

    fn clear(&self) -> ShieldResult<()> {
        self.current.store(None);
        Ok(())
    }
}
