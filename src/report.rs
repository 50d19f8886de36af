// src/report.rs
use crate::narrative::NarrativeResult;
use crate::text_analysis::AnnotationSpan;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Everything the presentation layer shows for one analyzed profile
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub run_id: Uuid,
    pub profile_url: String,
    pub analyzed_at: DateTime<Utc>,
    pub tagger_version: String,
    pub summary: String,
    pub recommendations: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative_error: Option<String>,
    /// Matched pattern text, in order of appearance
    pub suggestions: Vec<String>,
    pub annotations: Vec<AnnotationSpan>,
}

impl ProfileReport {
    pub fn new(
        run_id: Uuid,
        profile_url: &str,
        tagger_version: &str,
        narrative: NarrativeResult,
        annotations: Vec<AnnotationSpan>,
    ) -> Self {
        Self {
            run_id,
            profile_url: profile_url.to_string(),
            analyzed_at: Utc::now(),
            tagger_version: tagger_version.to_string(),
            summary: narrative.summary,
            recommendations: narrative.recommendations,
            narrative_error: narrative.error,
            suggestions: annotations.iter().map(|span| span.text.clone()).collect(),
            annotations,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str("📝 AI Summary\n");
        out.push_str(&self.summary);
        out.push_str("\n\n💡 AI Recommendations\n");
        out.push_str(&self.recommendations);
        out.push('\n');

        if !self.suggestions.is_empty() {
            out.push_str("\n🔍 Pattern-based Suggestions\n");
            for suggestion in &self.suggestions {
                out.push_str(&format!("- {}\n", suggestion));
            }
        }

        out
    }
}
