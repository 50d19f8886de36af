// src/linkedin_analysis/profile_fetcher.rs
use super::types::{LinkedinApiError, ProfileRecord, SUMMARY_FIELD};
use crate::error::AnalyzerError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info, warn};

const PROFILES_ENDPOINT: &str = "/profiles";

/// Source of profile records keyed by profile URL
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn get_profile(&self, profile_url: &str) -> Result<ProfileRecord>;
}

/// Authenticated LinkedIn REST client, valid for one analysis run
pub struct LinkedinClient {
    client: Client,
    api_base_url: String,
    access_token: String,
}

impl LinkedinClient {
    pub(crate) fn new(client: Client, api_base_url: String, access_token: String) -> Self {
        Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }
}

#[async_trait]
impl ProfileService for LinkedinClient {
    async fn get_profile(&self, profile_url: &str) -> Result<ProfileRecord> {
        let url = format!("{}{}", self.api_base_url, PROFILES_ENDPOINT);
        info!("Fetching LinkedIn profile: {}", profile_url);

        let response = self
            .client
            .get(&url)
            .query(&[("url", profile_url)])
            .bearer_auth(&self.access_token)
            .header("X-Restli-Protocol-Version", "2.0.0")
            .send()
            .await
            .context("Failed to send request to LinkedIn profile API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            let detail = serde_json::from_str::<LinkedinApiError>(&response_text)
                .ok()
                .and_then(|e| e.describe())
                .unwrap_or(response_text);
            error!("LinkedIn profile API error {}: {}", status, detail);
            anyhow::bail!("LinkedIn profile API returned {}: {}", status, detail);
        }

        let value: serde_json::Value = serde_json::from_str(&response_text)
            .context("Failed to parse LinkedIn profile response")?;

        match value {
            serde_json::Value::Object(record) => Ok(record),
            other => anyhow::bail!(
                "LinkedIn profile response is not an object (got {})",
                json_kind(&other)
            ),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// The record's summary text, or `EmptySummary` when it is missing or blank
pub fn extract_summary(record: &ProfileRecord) -> Result<String, AnalyzerError> {
    match record.get(SUMMARY_FIELD).and_then(|v| v.as_str()) {
        Some(summary) if !summary.trim().is_empty() => Ok(summary.to_string()),
        _ => Err(AnalyzerError::EmptySummary),
    }
}

/// Fetch one profile and pull out its summary.
///
/// Service failures become `AnalyzerError::Fetch`; a record without usable
/// summary text becomes `AnalyzerError::EmptySummary`.
pub async fn fetch_summary<S>(service: &S, profile_url: &str) -> Result<String, AnalyzerError>
where
    S: ProfileService + ?Sized,
{
    if profile_url.trim().is_empty() {
        return Err(AnalyzerError::fetch("Profile URL is empty"));
    }

    let record = service.get_profile(profile_url).await.map_err(|e| {
        error!("Profile fetch failed for {}: {:#}", profile_url, e);
        AnalyzerError::fetch(format!("{:#}", e))
    })?;

    let summary = extract_summary(&record).map_err(|e| {
        warn!("Profile {} has no summary text", profile_url);
        e
    })?;

    info!(
        "Extracted summary for {} ({} chars)",
        profile_url,
        summary.chars().count()
    );
    Ok(summary)
}
