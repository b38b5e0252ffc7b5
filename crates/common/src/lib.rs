pub mod auth;
pub mod config;
pub mod error;
pub mod settings;

pub use auth::{
    AuthOutcome, CustomCode, ErrorCode, ErrorEntry, LoginErrors, Submission, UserIdentity,
};
pub use config::{
    generate_field_name, HoneypotConfig, MessagesConfig, ShieldConfig, DEFAULT_ERROR_MESSAGE,
    DEFAULT_FIELD_LABEL, FIELD_NAME_PREFIX,
};
pub use error::{ShieldError, ShieldResult};
pub use settings::{sanitize_key, sanitize_text_field, SettingsInput};
