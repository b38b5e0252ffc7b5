use std::sync::Arc;

use loginshield_common::{AuthOutcome, LoginErrors, ShieldConfig, Submission};
use loginshield_honeypot::{self as honeypot, FieldSpec, GuardVerdict};
use loginshield_messages::{self as messages, PageMessage};
use tracing::{debug, info};

/// Per-request view of the shield, bound to one configuration snapshot.
///
/// Settings saved while a request is in flight do not affect it; the next
/// request picks them up.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    config: Arc<ShieldConfig>,
}

impl LoginRequest {
    pub fn new(config: Arc<ShieldConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShieldConfig {
        &self.config
    }

    /// Styles hiding the honeypot container, for the page head.
    pub fn login_head_css(&self) -> Option<&'static str> {
        honeypot::hiding_css(&self.config)
    }

    /// The honeypot input to add to the login form.
    pub fn login_form_field(&self) -> Option<FieldSpec> {
        honeypot::render_field(&self.config)
    }

    /// Message to display above the login form.
    pub fn login_message(&self, host_default: &str) -> PageMessage {
        messages::page_message(&self.config, host_default)
    }

    /// Run the honeypot check, then the host's credential check.
    ///
    /// When the honeypot rejects, `credential_check` is not called and the
    /// outcome carries only the honeypot error.
    pub fn authenticate<F>(&self, submission: &Submission, credential_check: F) -> AuthOutcome
    where
        F: FnOnce() -> AuthOutcome,
    {
        match honeypot::evaluate(&self.config, submission) {
            GuardVerdict::Reject { code, message } => {
                info!(code = %code, "login blocked by honeypot");
                AuthOutcome::Failure(LoginErrors::single(code, message))
            }
            GuardVerdict::Accept => credential_check(),
        }
    }

    /// Rewrite a finished authentication outcome before it is displayed.
    pub fn login_errors(&self, outcome: AuthOutcome) -> AuthOutcome {
        messages::rewrite_errors(&self.config, outcome)
    }

    /// Full submit pipeline: honeypot, credential check, then message
    /// rewriting. The rewrite runs last, so a custom failure message replaces
    /// the honeypot error text.
    pub fn handle_login<F>(&self, submission: &Submission, credential_check: F) -> AuthOutcome
    where
        F: FnOnce() -> AuthOutcome,
    {
        let outcome = self.authenticate(submission, credential_check);
        debug!(success = outcome.is_success(), "login attempt evaluated");
        self.login_errors(outcome)
    }
}
