// src/error.rs
//! Failure kinds of the profile analysis pipeline

use thiserror::Error;

/// Reasons a pipeline run halts before producing a report.
///
/// Narrative generation failures are not listed here: they never halt the
/// pipeline and are reported through placeholder strings instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    #[error("LinkedIn API keys are not set. Please configure LINKEDIN_CLIENT_ID and LINKEDIN_CLIENT_SECRET.")]
    MissingCredentials,

    #[error("Failed to authenticate with LinkedIn: {message}")]
    Authentication { message: String },

    #[error("Error fetching profile: {message}")]
    Fetch { message: String },

    #[error("No summary text found in this profile.")]
    EmptySummary,
}

impl AnalyzerError {
    pub fn authentication(err: impl std::fmt::Display) -> Self {
        AnalyzerError::Authentication {
            message: err.to_string(),
        }
    }

    pub fn fetch(err: impl std::fmt::Display) -> Self {
        AnalyzerError::Fetch {
            message: err.to_string(),
        }
    }

    /// Stable machine-readable code used by the HTTP API
    pub fn code(&self) -> &'static str {
        match self {
            AnalyzerError::MissingCredentials => "MISSING_CREDENTIALS",
            AnalyzerError::Authentication { .. } => "AUTHENTICATION_ERROR",
            AnalyzerError::Fetch { .. } => "FETCH_ERROR",
            AnalyzerError::EmptySummary => "EMPTY_SUMMARY",
        }
    }

    /// Empty summaries are a warning for the user, not a fault
    pub fn is_warning(&self) -> bool {
        matches!(self, AnalyzerError::EmptySummary)
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            AnalyzerError::MissingCredentials => vec![
                "Set LINKEDIN_CLIENT_ID and LINKEDIN_CLIENT_SECRET in the environment or .env file"
                    .to_string(),
                "Restart the analyzer after changing the environment".to_string(),
            ],
            AnalyzerError::Authentication { .. } => vec![
                "Check that the LinkedIn client id and secret are valid".to_string(),
                "Verify the LinkedIn token endpoint is reachable".to_string(),
            ],
            AnalyzerError::Fetch { .. } => vec![
                "Verify the profile URL is correct and publicly accessible".to_string(),
                "Try again in a few moments".to_string(),
            ],
            AnalyzerError::EmptySummary => vec![
                "Add an About section to the LinkedIn profile".to_string(),
                "Try a different profile URL".to_string(),
            ],
        }
    }
}
