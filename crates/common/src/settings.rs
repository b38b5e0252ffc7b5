//! Sanitisation of raw settings submitted from the admin screen.

use serde::{Deserialize, Serialize};

use crate::config::{generate_field_name, ShieldConfig};

/// Raw admin settings form. Unchecked checkboxes and untouched inputs are
/// simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsInput {
    #[serde(default)]
    pub enable_honeypot: Option<String>,
    #[serde(default)]
    pub honeypot_field_name: Option<String>,
    #[serde(default)]
    pub honeypot_field_label: Option<String>,
    #[serde(default)]
    pub honeypot_error_message: Option<String>,
    #[serde(default)]
    pub enable_custom_login_msg: Option<String>,
    #[serde(default)]
    pub custom_login_message: Option<String>,
    #[serde(default)]
    pub custom_failure_message: Option<String>,
}

/// Reduce a string to a form-field key: lowercase ASCII letters, digits,
/// `_` and `-`. Everything else is dropped.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Clean a single-line display string: strip markup tags, collapse
/// whitespace runs into one space and trim.
///
/// A `<` only opens a tag when followed by a letter, `/` or `!` and closed
/// by a later `>`. Any other `<` is kept as text.
pub fn sanitize_text_field(raw: &str) -> String {
    let mut stripped = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('<') {
        stripped.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!');
        match after.find('>') {
            Some(end) if opens_tag => rest = &after[end + 1..],
            _ => {
                stripped.push('<');
                rest = after;
            }
        }
    }
    stripped.push_str(rest);
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn checkbox_checked(value: &Option<String>) -> bool {
    match value.as_deref() {
        None | Some("") | Some("0") => false,
        Some(_) => true,
    }
}

fn text_or_empty(value: &Option<String>) -> String {
    value.as_deref().map(sanitize_text_field).unwrap_or_default()
}

impl ShieldConfig {
    /// Build the configuration that results from saving `input` on top of
    /// `self`.
    ///
    /// A missing checkbox turns its feature off and a missing text input
    /// stores an empty string. The honeypot field name is always non-empty
    /// afterwards.
    pub fn apply_settings(&self, input: &SettingsInput) -> ShieldConfig {
        let mut next = self.clone();

        next.honeypot.enabled = checkbox_checked(&input.enable_honeypot);
        next.honeypot.field_name = input
            .honeypot_field_name
            .as_deref()
            .map(sanitize_key)
            .unwrap_or_default();
        if next.honeypot.field_name.is_empty() {
            next.honeypot.field_name = generate_field_name();
        }
        next.honeypot.field_label = text_or_empty(&input.honeypot_field_label);
        next.honeypot.error_message = text_or_empty(&input.honeypot_error_message);

        next.messages.enabled = checkbox_checked(&input.enable_custom_login_msg);
        next.messages.login_message = text_or_empty(&input.custom_login_message);
        next.messages.failure_message = text_or_empty(&input.custom_failure_message);

        next
    }
}
