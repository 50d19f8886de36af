// src/linkedin_analysis/auth.rs
use super::profile_fetcher::LinkedinClient;
use super::types::{LinkedinApiError, TokenResponse};
use crate::config::LinkedinSettings;
use crate::error::AnalyzerError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

/// LinkedIn application credentials
#[derive(Clone, Default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Credentials {
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }

    pub fn from_settings(settings: &LinkedinSettings) -> Self {
        Self::new(settings.client_id.clone(), settings.client_secret.clone())
    }

    /// Both values, or `MissingCredentials` when either is absent or blank
    pub fn require(&self) -> Result<(&str, &str), AnalyzerError> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        match (present(&self.client_id), present(&self.client_secret)) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(AnalyzerError::MissingCredentials),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id.as_ref().map(|_| "***"))
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Builds an authenticated profile client from a client id and secret
#[async_trait]
pub trait ProfileConnector: Send + Sync {
    type Service: super::ProfileService;

    async fn connect(&self, client_id: &str, client_secret: &str) -> Result<Self::Service>;
}

/// Validate the credentials, then let the connector build a client.
///
/// Missing credentials fail before any network traffic. Every connector
/// error becomes `AnalyzerError::Authentication`.
pub async fn authenticate<C>(
    connector: &C,
    credentials: &Credentials,
) -> Result<C::Service, AnalyzerError>
where
    C: ProfileConnector + ?Sized,
{
    let (client_id, client_secret) = credentials.require()?;

    connector
        .connect(client_id, client_secret)
        .await
        .map_err(|e| {
            error!("LinkedIn authentication failed: {:#}", e);
            AnalyzerError::authentication(format!("{:#}", e))
        })
}

/// OAuth2 client-credentials login against the LinkedIn token endpoint
pub struct LinkedinConnector {
    settings: LinkedinSettings,
    timeout_seconds: u64,
}

impl LinkedinConnector {
    pub fn new(settings: LinkedinSettings, timeout_seconds: u64) -> Self {
        Self {
            settings,
            timeout_seconds,
        }
    }

    async fn request_token(
        &self,
        client: &Client,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse> {
        info!("Requesting LinkedIn access token: {}", self.settings.token_url);

        let response = client
            .post(&self.settings.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .send()
            .await
            .context("Failed to send request to LinkedIn token endpoint")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read token response body")?;

        if !status.is_success() {
            let detail = serde_json::from_str::<LinkedinApiError>(&response_text)
                .ok()
                .and_then(|e| e.describe())
                .unwrap_or(response_text);
            anyhow::bail!("Token endpoint returned {}: {}", status, detail);
        }

        let token: TokenResponse = serde_json::from_str(&response_text)
            .context("Failed to parse LinkedIn token response")?;

        if token.access_token.trim().is_empty() {
            anyhow::bail!("Token endpoint returned an empty access token");
        }

        Ok(token)
    }
}

#[async_trait]
impl ProfileConnector for LinkedinConnector {
    type Service = LinkedinClient;

    async fn connect(&self, client_id: &str, client_secret: &str) -> Result<LinkedinClient> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        let token = self.request_token(&client, client_id, client_secret).await?;
        info!(
            "Authenticated with LinkedIn (token expires in {}s)",
            token
                .expires_in
                .map(|s| s.to_string())
                .unwrap_or_else(|| "?".to_string())
        );

        Ok(LinkedinClient::new(
            client,
            self.settings.api_base_url.clone(),
            token.access_token,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LINKEDIN_API_URL;

    fn settings(token_url: &str) -> LinkedinSettings {
        LinkedinSettings {
            client_id: None,
            client_secret: None,
            api_base_url: DEFAULT_LINKEDIN_API_URL.to_string(),
            token_url: token_url.to_string(),
        }
    }

    #[test]
    fn test_require_both_values() {
        let both = Credentials::new(Some("id".into()), Some("secret".into()));
        assert_eq!(both.require().unwrap(), ("id", "secret"));

        let cases = [
            Credentials::new(None, Some("secret".into())),
            Credentials::new(Some("id".into()), None),
            Credentials::new(Some("".into()), Some("secret".into())),
            Credentials::new(Some("id".into()), Some("   ".into())),
            Credentials::default(),
        ];
        for credentials in cases {
            assert_eq!(credentials.require(), Err(AnalyzerError::MissingCredentials));
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_network() {
        // Port 9 (discard) on localhost: any attempted request would fail as
        // an authentication error, not as missing credentials.
        let connector = LinkedinConnector::new(settings("http://127.0.0.1:9/token"), 1);
        let result = authenticate(&connector, &Credentials::new(Some("id".into()), None)).await;
        assert!(matches!(result, Err(AnalyzerError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint_is_authentication_error() {
        let connector = LinkedinConnector::new(settings("http://127.0.0.1:9/token"), 1);
        let credentials = Credentials::new(Some("id".into()), Some("secret".into()));
        let result = authenticate(&connector, &credentials).await;
        assert!(matches!(result, Err(AnalyzerError::Authentication { .. })));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let credentials = Credentials::new(Some("my-id".into()), Some("my-secret".into()));
        let printed = format!("{:?}", credentials);
        assert!(!printed.contains("my-secret"));
        assert!(!printed.contains("my-id"));
    }
}
