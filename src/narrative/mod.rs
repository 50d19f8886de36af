// src/narrative/mod.rs
//! Summary and recommendation text from a chat-completion model

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

pub mod openai_client;

pub use openai_client::OpenAiClient;

pub const SUMMARY_FAILED_PLACEHOLDER: &str = "Summary generation failed.";
pub const RECOMMENDATION_ERROR_PREFIX: &str = "Error from OpenAI: ";

/// Sends one prompt, returns the generated text
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub fn summary_prompt(text: &str) -> String {
    format!("Summarize this LinkedIn profile:\n{}", text)
}

pub fn recommendation_prompt(text: &str) -> String {
    format!("Provide suggestions to improve this LinkedIn profile:\n{}", text)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeResult {
    pub summary: String,
    pub recommendations: String,
    /// Cause of the failure when the placeholders were used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NarrativeResult {
    /// The failure pair is deliberately asymmetric: a fixed placeholder for
    /// the summary, the cause for the recommendations.
    pub fn failed(cause: String) -> Self {
        Self {
            summary: SUMMARY_FAILED_PLACEHOLDER.to_string(),
            recommendations: format!("{}{}", RECOMMENDATION_ERROR_PREFIX, cause),
            error: Some(cause),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Request the summary, then the recommendations.
///
/// Both requests share one failure boundary: if the summary request fails
/// the recommendation request is never sent, and either failure yields
/// `NarrativeResult::failed`. Never returns an error.
pub async fn generate_narrative<S>(service: &S, text: &str) -> NarrativeResult
where
    S: CompletionService + ?Sized,
{
    let outcome = async {
        let summary = service.complete(&summary_prompt(text)).await?;
        let recommendations = service.complete(&recommendation_prompt(text)).await?;
        Ok::<_, anyhow::Error>((summary, recommendations))
    }
    .await;

    match outcome {
        Ok((summary, recommendations)) => {
            info!("Generated profile summary and recommendations");
            NarrativeResult {
                summary,
                recommendations,
                error: None,
            }
        }
        Err(e) => {
            warn!("Narrative generation failed: {:#}", e);
            NarrativeResult::failed(format!("{:#}", e))
        }
    }
}
