use serde::{Deserialize, Serialize};

/// Credentials attached to every outgoing request.
///
/// Handed to the client explicitly instead of being read from process-wide
/// storage, so a test can pass a fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: Option<String>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }

    /// `Authorization` header value, if any.
    pub fn bearer(&self) -> Option<String> {
        match self.token.as_deref() {
            Some(t) if !t.is_empty() => Some(format!("Bearer {}", t)),
            _ => None,
        }
    }

    pub fn revoke(&mut self) {
        self.token = None;
    }
}
