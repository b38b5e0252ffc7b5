//! Login form protection for a hosting web application.
//!
//! The host owns request handling and rendering and calls into
//! [`LoginRequest`] at fixed points of its login pipeline:
//!
//! 1. page head: [`LoginRequest::login_head_css`]
//! 2. form body: [`LoginRequest::login_form_field`]
//! 3. above the form: [`LoginRequest::login_message`]
//! 4. on submit: [`LoginRequest::handle_login`], or
//!    [`LoginRequest::authenticate`] followed by [`LoginRequest::login_errors`]
//!
//! A new [`LoginRequest`] must be started for every HTTP request so that
//! settings changes take effect immediately.

pub mod request;
pub mod telemetry;

use std::sync::Arc;

use loginshield_common::ShieldResult;
use loginshield_store::ConfigStore;
use tracing::info;

pub use loginshield_common::{
    AuthOutcome, ErrorCode, LoginErrors, SettingsInput, ShieldConfig, ShieldError, Submission,
    UserIdentity,
};
pub use loginshield_honeypot::{FieldSpec, GuardVerdict};
pub use loginshield_messages::PageMessage;
pub use loginshield_store::{MemoryStore, YamlFileStore};
pub use request::LoginRequest;
pub use telemetry::init_tracing;

/// Entry point held by the host for the lifetime of the application.
pub struct LoginShield<S: ConfigStore> {
    store: Arc<S>,
}

impl<S: ConfigStore> Clone for LoginShield<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ConfigStore> LoginShield<S> {
    /// Wrap a store, writing default settings into it if it is empty so the
    /// honeypot field name stays stable between requests.
    pub fn new(store: S) -> ShieldResult<Self> {
        if store.ensure_defaults()? {
            info!("installed default login shield configuration");
        }
        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Start handling one login page request or submission.
    pub fn begin_request(&self) -> ShieldResult<LoginRequest> {
        Ok(LoginRequest::new(self.store.load()?))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save a settings form submission.
    pub fn update_settings(&self, input: &SettingsInput) -> ShieldResult<Arc<ShieldConfig>> {
        let saved = self.store.apply_settings(input)?;
        info!(
            honeypot = saved.honeypot.enabled,
            custom_messages = saved.messages.enabled,
            "login shield settings updated"
        );
        Ok(saved)
    }

    /// Remove stored settings, as on uninstall.
    pub fn clear_settings(&self) -> ShieldResult<()> {
        self.store.clear()
    }
}
