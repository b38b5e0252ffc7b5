//! Rewriting of login-page messages and authentication failures with
//! administrator-configured text.

use loginshield_common::{AuthOutcome, ErrorCode, LoginErrors, ShieldConfig};
use serde::Serialize;
use tracing::debug;

/// Failure codes whose host text is replaced by the custom failure message.
pub const OVERRIDDEN_CODES: [ErrorCode; 3] = [
    ErrorCode::IncorrectPassword,
    ErrorCode::InvalidUsername,
    ErrorCode::HoneypotRejected,
];

/// Message shown above the login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum PageMessage {
    /// Administrator text; the host renders it as a styled notice.
    Custom(String),
    /// The host's own message, passed through untouched.
    HostDefault(String),
}

impl PageMessage {
    pub fn text(&self) -> &str {
        match self {
            PageMessage::Custom(text) | PageMessage::HostDefault(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            PageMessage::Custom(text) | PageMessage::HostDefault(text) => text,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PageMessage::Custom(_))
    }
}

/// Pick the message displayed when the login page loads.
pub fn page_message(config: &ShieldConfig, host_default: &str) -> PageMessage {
    if config.messages.enabled && !config.messages.login_message.is_empty() {
        PageMessage::Custom(config.messages.login_message.clone())
    } else {
        PageMessage::HostDefault(host_default.to_string())
    }
}

/// Replace credential and honeypot failures with the custom failure message.
///
/// Codes in [`OVERRIDDEN_CODES`] are removed and a single
/// [`ErrorCode::ShieldFailure`] entry is added in their place. A bare
/// `login_failed` with no attached data also gains the custom entry but is
/// kept. Anything else, and every success, passes through unchanged.
pub fn rewrite_errors(config: &ShieldConfig, outcome: AuthOutcome) -> AuthOutcome {
    let failure_message = &config.messages.failure_message;
    if failure_message.is_empty() {
        return outcome;
    }

    let mut errors = match outcome {
        AuthOutcome::Failure(errors) => errors,
        success => return success,
    };

    let mut removed = 0usize;
    for code in &OVERRIDDEN_CODES {
        if errors.remove(code) {
            removed += 1;
        }
    }

    if removed > 0 || is_bare_login_failed(&errors) {
        debug!(removed, "replacing login failure with custom message");
        errors.add(ErrorCode::ShieldFailure, failure_message.clone());
    }

    AuthOutcome::Failure(errors)
}

/// Exactly `{login_failed}` with no diagnostic data attached.
fn is_bare_login_failed(errors: &LoginErrors) -> bool {
    errors.codes() == [&ErrorCode::LoginFailed] && errors.data(&ErrorCode::LoginFailed).is_none()
}
