use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::settings::sanitize_key;

/// Prefix for generated honeypot field names.
pub const FIELD_NAME_PREFIX: &str = "ninja_hp_field_";

pub const DEFAULT_FIELD_LABEL: &str = "Please leave this field empty";
pub const DEFAULT_ERROR_MESSAGE: &str = "Bot detected! Access denied.";

/// Top-level login shield configuration.
///
/// A snapshot of this record is read once per login request and never
/// mutated by the decision logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldConfig {
    #[serde(default = "unnamed_honeypot")]
    pub honeypot: HoneypotConfig,
    #[serde(default)]
    pub messages: MessagesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoneypotConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Empty when a stored document omits it; stores fill it in once and
    /// persist the result so the name stays stable.
    #[serde(default)]
    pub field_name: String,
    #[serde(default = "default_field_label")]
    pub field_label: String,
    #[serde(default = "default_error_message")]
    pub error_message: String,
}

impl Default for HoneypotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            field_name: generate_field_name(),
            field_label: default_field_label(),
            error_message: default_error_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_login_message")]
    pub login_message: String,
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            login_message: default_login_message(),
            failure_message: default_failure_message(),
        }
    }
}

// Default value helpers
fn unnamed_honeypot() -> HoneypotConfig {
    HoneypotConfig {
        field_name: String::new(),
        ..HoneypotConfig::default()
    }
}
fn default_true() -> bool {
    true
}
fn default_field_label() -> String {
    DEFAULT_FIELD_LABEL.to_string()
}
fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}
fn default_login_message() -> String {
    "Welcome to our secure login portal.".to_string()
}
fn default_failure_message() -> String {
    "Invalid credentials or access denied.".to_string()
}

/// Generate a fresh honeypot field name with a random four-digit suffix.
pub fn generate_field_name() -> String {
    let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("{FIELD_NAME_PREFIX}{suffix}")
}

impl ShieldConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document without validating it. Omitted fields take
    /// their defaults, except `honeypot.field_name` which stays empty.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Validate the configuration for consistency.
    pub fn validate(&self) -> anyhow::Result<()> {
        let name = &self.honeypot.field_name;
        if name.is_empty() {
            anyhow::bail!("honeypot.field_name must not be empty");
        }
        if sanitize_key(name) != *name {
            anyhow::bail!(
                "honeypot.field_name '{}' is not a valid form field name \
                 (allowed: lowercase letters, digits, '_' and '-')",
                name
            );
        }
        Ok(())
    }

    /// Return a copy with an empty honeypot field name replaced by a
    /// freshly generated one.
    pub fn normalized(mut self) -> Self {
        if self.honeypot.field_name.is_empty() {
            self.honeypot.field_name = generate_field_name();
            tracing::info!(
                field_name = %self.honeypot.field_name,
                "regenerated empty honeypot field name"
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_suffix(name: &str) -> u16 {
        name.strip_prefix(FIELD_NAME_PREFIX)
            .expect("prefix")
            .parse()
            .expect("numeric suffix")
    }

    #[test]
    fn test_defaults() {
        let config = ShieldConfig::default();
        assert!(config.honeypot.enabled);
        assert!(!config.messages.enabled);
        assert_eq!(config.honeypot.field_label, DEFAULT_FIELD_LABEL);
        assert_eq!(config.honeypot.error_message, DEFAULT_ERROR_MESSAGE);
        assert!(!config.messages.failure_message.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_generated_field_name_range() {
        for _ in 0..100 {
            let suffix = field_suffix(&generate_field_name());
            assert!((1000..=9999).contains(&suffix));
        }
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "messages:\n  enabled: true\n  failure_message: Nope\n";
        let config = ShieldConfig::from_yaml(yaml).unwrap();
        assert!(config.messages.enabled);
        assert_eq!(config.messages.failure_message, "Nope");
        assert!(config.honeypot.enabled);
        assert_eq!(config.honeypot.field_label, DEFAULT_FIELD_LABEL);
        assert_eq!(config.honeypot.field_name, "");
        assert_eq!(config, ShieldConfig::from_yaml(yaml).unwrap());
    }

    #[test]
    fn test_partial_yaml_field_name_is_deterministic() {
        let yaml = "honeypot:\n  enabled: true\n";
        let first = ShieldConfig::from_yaml(yaml).unwrap();
        let second = ShieldConfig::from_yaml(yaml).unwrap();
        assert_eq!(first.honeypot.field_name, "");
        assert_eq!(first, second);
        assert!(first.normalized().honeypot.field_name.starts_with(FIELD_NAME_PREFIX));
    }

    #[test]
    fn test_load_rejects_missing_field_name() {
        let path = std::env::temp_dir().join(format!(
            "loginshield_config_noname_{}_{}.yaml",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::write(&path, "messages:\n  enabled: true\n").unwrap();
        assert!(ShieldConfig::load(path.to_str().unwrap()).is_err());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_validate_rejects_empty_field_name() {
        let mut config = ShieldConfig::default();
        config.honeypot.field_name.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_invalid_token() {
        let mut config = ShieldConfig::default();
        config.honeypot.field_name = "Bad Name!".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalized_regenerates_empty_name() {
        let mut config = ShieldConfig::default();
        config.honeypot.field_name.clear();
        let config = config.normalized();
        assert!(config.honeypot.field_name.starts_with(FIELD_NAME_PREFIX));
        config.validate().unwrap();
    }

    #[test]
    fn test_normalized_keeps_existing_name() {
        let mut config = ShieldConfig::default();
        config.honeypot.field_name = "my_trap".to_string();
        assert_eq!(config.normalized().honeypot.field_name, "my_trap");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "loginshield_config_{}_{}.yaml",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::write(
            &path,
            "honeypot:\n  field_name: hp_check\n  error_message: Go away\n",
        )
        .unwrap();

        let config = ShieldConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.honeypot.field_name, "hp_check");
        assert_eq!(config.honeypot.error_message, "Go away");

        std::fs::remove_file(path).ok();
    }
}
