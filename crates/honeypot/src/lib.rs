//! Honeypot guard for the login form.
//!
//! A visually hidden text input is added to the form. People never see it,
//! automated form-fillers usually populate it, and any submission carrying a
//! value for it is rejected before credentials are checked.

pub mod field;

use loginshield_common::{ErrorCode, ShieldConfig, Submission, DEFAULT_ERROR_MESSAGE};
use tracing::{debug, info};

pub use field::{
    hiding_css, render_field, resolve_field_name, FieldSpec, CONTAINER_CLASS,
    DEFAULT_FIELD_NAME, HIDDEN_FIELD_CSS,
};

/// Result of a honeypot check on a login submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardVerdict {
    /// Submission may proceed to the credential check.
    Accept,
    /// The honeypot field was filled in.
    Reject { code: ErrorCode, message: String },
}

impl GuardVerdict {
    pub fn is_reject(&self) -> bool {
        matches!(self, GuardVerdict::Reject { .. })
    }
}

/// Check a submission against the honeypot configuration.
///
/// Any non-empty value, including whitespace, rejects. Missing and empty
/// values accept.
pub fn evaluate(config: &ShieldConfig, submission: &Submission) -> GuardVerdict {
    if !config.honeypot.enabled {
        return GuardVerdict::Accept;
    }

    let field_name = resolve_field_name(config);
    match submission.get(&field_name) {
        Some(value) if !value.is_empty() => {
            info!(field = %field_name, "honeypot field populated, rejecting login");
            let message = if config.honeypot.error_message.is_empty() {
                DEFAULT_ERROR_MESSAGE.to_string()
            } else {
                config.honeypot.error_message.clone()
            };
            GuardVerdict::Reject {
                code: ErrorCode::HoneypotRejected,
                message,
            }
        }
        _ => {
            debug!(field = %field_name, "honeypot field empty");
            GuardVerdict::Accept
        }
    }
}
