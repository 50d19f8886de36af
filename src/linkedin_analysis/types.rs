use serde::{Deserialize, Serialize};

/// Field mapping returned by the profile API; only `summary` is read
pub type ProfileRecord = serde_json::Map<String, serde_json::Value>;

pub const SUMMARY_FIELD: &str = "summary";

// OAuth2 client-credentials token response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

// Error body returned by the LinkedIn OAuth and REST endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LinkedinApiError {
    #[serde(default, alias = "error")]
    pub error_code: Option<String>,
    #[serde(default, alias = "error_description")]
    pub message: Option<String>,
}

impl LinkedinApiError {
    pub fn describe(&self) -> Option<String> {
        match (&self.error_code, &self.message) {
            (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
            (None, Some(message)) => Some(message.clone()),
            (Some(code), None) => Some(code.clone()),
            (None, None) => None,
        }
    }
}
