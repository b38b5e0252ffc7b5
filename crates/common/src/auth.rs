//! Values that flow through a single login attempt: the posted form, the
//! error codes raised while authenticating and the final outcome.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Error code attached to a failed login attempt.
///
/// Build codes from host strings with `ErrorCode::from`; known strings always
/// map to their named variant and never to [`ErrorCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    IncorrectPassword,
    InvalidUsername,
    HoneypotRejected,
    /// The host's generic catch-all failure.
    LoginFailed,
    /// Synthetic code carrying the administrator's custom failure text.
    ShieldFailure,
    Other(CustomCode),
}

/// A host error code with no named [`ErrorCode`] variant. Only
/// `ErrorCode::from` constructs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomCode(String);

impl CustomCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::IncorrectPassword => "incorrect_password",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::HoneypotRejected => "honeypot_rejected",
            ErrorCode::LoginFailed => "login_failed",
            ErrorCode::ShieldFailure => "ninja_login_failure",
            ErrorCode::Other(code) => code.as_str(),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "incorrect_password" => ErrorCode::IncorrectPassword,
            "invalid_username" => ErrorCode::InvalidUsername,
            "honeypot_rejected" => ErrorCode::HoneypotRejected,
            "login_failed" => ErrorCode::LoginFailed,
            "ninja_login_failure" => ErrorCode::ShieldFailure,
            other => ErrorCode::Other(CustomCode(other.to_string())),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        ErrorCode::from(code.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One error code with its messages and optional diagnostic data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: ErrorCode,
    pub messages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Ordered set of login errors keyed by code.
///
/// Each code appears at most once; adding a message under an existing code
/// appends to that entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ErrorEntry>", into = "Vec<ErrorEntry>")]
pub struct LoginErrors {
    entries: Vec<ErrorEntry>,
}

impl From<Vec<ErrorEntry>> for LoginErrors {
    /// Entries repeating a code are folded into the first one: messages are
    /// appended and later data replaces earlier data.
    fn from(raw: Vec<ErrorEntry>) -> Self {
        let mut errors = LoginErrors::new();
        for entry in raw {
            match errors.entries.iter_mut().find(|e| e.code == entry.code) {
                Some(existing) => {
                    existing.messages.extend(entry.messages);
                    if entry.data.is_some() {
                        existing.data = entry.data;
                    }
                }
                None => errors.entries.push(entry),
            }
        }
        errors
    }
}

impl From<LoginErrors> for Vec<ErrorEntry> {
    fn from(errors: LoginErrors) -> Self {
        errors.entries
    }
}

impl LoginErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding a single code and message.
    pub fn single(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(code, message);
        errors
    }

    pub fn add(&mut self, code: ErrorCode, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|e| e.code == code) {
            Some(entry) => entry.messages.push(message),
            None => self.entries.push(ErrorEntry {
                code,
                messages: vec![message],
                data: None,
            }),
        }
    }

    /// Add a message and attach diagnostic data to the code, replacing any
    /// data it already carried.
    pub fn add_with_data(
        &mut self,
        code: ErrorCode,
        message: impl Into<String>,
        data: serde_json::Value,
    ) {
        self.add(code.clone(), message);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.code == code) {
            entry.data = Some(data);
        }
    }

    /// Remove a code and everything attached to it. Returns whether the code
    /// was present.
    pub fn remove(&mut self, code: &ErrorCode) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.code != code);
        self.entries.len() != before
    }

    pub fn has(&self, code: &ErrorCode) -> bool {
        self.entries.iter().any(|e| &e.code == code)
    }

    pub fn codes(&self) -> Vec<&ErrorCode> {
        self.entries.iter().map(|e| &e.code).collect()
    }

    pub fn messages(&self, code: &ErrorCode) -> &[String] {
        self.entries
            .iter()
            .find(|e| &e.code == code)
            .map(|e| e.messages.as_slice())
            .unwrap_or(&[])
    }

    pub fn data(&self, code: &ErrorCode) -> Option<&serde_json::Value> {
        self.entries
            .iter()
            .find(|e| &e.code == code)
            .and_then(|e| e.data.as_ref())
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The identity of a successfully authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: u64,
    pub login: String,
}

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum AuthOutcome {
    Success(UserIdentity),
    Failure(LoginErrors),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    pub fn errors(&self) -> Option<&LoginErrors> {
        match self {
            AuthOutcome::Success(_) => None,
            AuthOutcome::Failure(errors) => Some(errors),
        }
    }
}

/// The posted login form, field name to value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    fields: HashMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build a submission from a decoded JSON object. Values that are not
    /// strings are treated as absent; a non-object yields an empty submission.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let fields = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();
        Self { fields }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
