// src/pipeline.rs
//! authenticate -> fetch summary -> annotate -> generate narrative

use crate::config::AppConfig;
use crate::error::AnalyzerError;
use crate::linkedin_analysis::{
    authenticate, fetch_summary, Credentials, LinkedinConnector, ProfileConnector,
};
use crate::narrative::{generate_narrative, CompletionService, OpenAiClient};
use crate::report::ProfileReport;
use crate::text_analysis::{Annotator, RuleTable};
use anyhow::Result;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Runs one profile through every stage, strictly in sequence
pub struct ProfileAnalyzer<C, G> {
    connector: C,
    completion: G,
    annotator: Annotator,
    credentials: Credentials,
}

impl ProfileAnalyzer<LinkedinConnector, OpenAiClient> {
    /// Wire the LinkedIn and OpenAI clients from the process configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let rules = RuleTable::load_or_default(config.rules_path.as_deref())?;
        let completion = OpenAiClient::new(&config.openai, config.timeout_seconds)?;
        let connector = LinkedinConnector::new(config.linkedin.clone(), config.timeout_seconds);

        Ok(Self::new(
            connector,
            completion,
            Annotator::new(rules),
            Credentials::from_settings(&config.linkedin),
        ))
    }
}

impl<C, G> ProfileAnalyzer<C, G>
where
    C: ProfileConnector,
    G: CompletionService,
{
    pub fn new(connector: C, completion: G, annotator: Annotator, credentials: Credentials) -> Self {
        Self {
            connector,
            completion,
            annotator,
            credentials,
        }
    }

    pub fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    /// Analyze one profile.
    ///
    /// Halts with an `AnalyzerError` before annotation when credentials,
    /// authentication, the fetch or the summary text fail. Narrative
    /// failures do not halt: the report carries placeholder text instead.
    pub async fn analyze(&self, profile_url: &str) -> Result<ProfileReport, AnalyzerError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("profile_analysis", run_id = %run_id);

        async {
            info!("Starting profile analysis for {}", profile_url);

            let service = authenticate(&self.connector, &self.credentials).await?;
            let summary_text = fetch_summary(&service, profile_url).await?;
            drop(service);

            let spans = self.annotator.annotate(&summary_text);
            info!("Found {} pattern match(es)", spans.len());

            let narrative = generate_narrative(&self.completion, &summary_text).await;

            Ok::<_, AnalyzerError>(ProfileReport::new(
                run_id,
                profile_url,
                self.annotator.tagger_version(),
                narrative,
                spans,
            ))
        }
        .instrument(span)
        .await
    }
}
