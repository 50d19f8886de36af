// src/web/handlers/profile_handlers.rs

use crate::error::AnalyzerError;
use crate::linkedin_analysis::ProfileConnector;
use crate::narrative::CompletionService;
use crate::pipeline::ProfileAnalyzer;
use crate::report::ProfileReport;
use crate::text_analysis::AnnotationSpan;
use crate::web::types::{
    AnalyzeProfileRequest, AnnotateRequest, AnnotationData, DataResponse, DisplayFormat,
    DisplayLayout, DisplaySection, ProfileAnalysisData, StandardErrorResponse, StandardRequest,
};

use rocket::serde::json::Json;
use tracing::{error, info, warn};

const MAX_KEY_POINTS: usize = 5;

pub async fn analyze_profile_handler<C, G>(
    analyzer: &ProfileAnalyzer<C, G>,
    request: StandardRequest<AnalyzeProfileRequest>,
) -> Result<Json<DataResponse<ProfileAnalysisData>>, Json<StandardErrorResponse>>
where
    C: ProfileConnector,
    G: CompletionService,
{
    let (data, conversation_id) = request.into_parts();
    let profile_url = data.profile_url.trim();

    if profile_url.is_empty() {
        return Err(Json(
            StandardErrorResponse::bad_request(
                "Profile URL is required",
                "Provide a LinkedIn profile URL in the profile_url field",
            )
            .in_conversation(conversation_id),
        ));
    }

    info!("Analyzing profile: {}", profile_url);

    match analyzer.analyze(profile_url).await {
        Ok(report) => {
            let message = match &report.narrative_error {
                Some(_) => "Profile analyzed, but AI text generation failed",
                None => "Profile analyzed successfully",
            };
            let display_format = profile_display_format(&report);

            Ok(Json(
                DataResponse::new(message, report)
                    .with_display_format(display_format)
                    .in_conversation(conversation_id),
            ))
        }
        Err(e) => {
            if e.is_warning() {
                warn!("Profile analysis halted for {}: {}", profile_url, e);
            } else {
                error!("Profile analysis failed for {}: {}", profile_url, e);
            }
            Err(Json(error_response(&e, conversation_id)))
        }
    }
}

/// Offline pattern matching; never touches LinkedIn or OpenAI
pub async fn annotate_handler<C, G>(
    analyzer: &ProfileAnalyzer<C, G>,
    request: StandardRequest<AnnotateRequest>,
) -> Json<DataResponse<AnnotationData>>
where
    C: ProfileConnector,
    G: CompletionService,
{
    let (data, conversation_id) = request.into_parts();
    let annotator = analyzer.annotator();

    let matches = annotator.annotate(&data.text);
    let tokens = data.include_tags.then(|| annotator.tag(&data.text));
    let display_format = annotation_display_format(&matches);

    Json(
        DataResponse::new(
            format!("Found {} pattern match(es)", matches.len()),
            AnnotationData {
                tagger_version: annotator.tagger_version().to_string(),
                matches,
                tokens,
            },
        )
        .with_display_format(display_format)
        .in_conversation(conversation_id),
    )
}

pub fn error_response(e: &AnalyzerError, conversation_id: Option<String>) -> StandardErrorResponse {
    StandardErrorResponse::from(e).in_conversation(conversation_id)
}

fn profile_display_format(report: &ProfileReport) -> DisplayFormat {
    let mut sections = vec![
        DisplaySection {
            title: "AI Summary".to_string(),
            content: report.summary.clone(),
            points: Vec::new(),
        },
        DisplaySection {
            title: "AI Recommendations".to_string(),
            content: report.recommendations.clone(),
            points: extract_key_points(&report.recommendations),
        },
    ];

    if !report.suggestions.is_empty() {
        sections.push(DisplaySection {
            title: "Pattern-based Suggestions".to_string(),
            content: format!("{} match(es)", report.suggestions.len()),
            points: report.suggestions.clone(),
        });
    }

    DisplayFormat {
        layout: DisplayLayout::ProfileAnalysis,
        sections,
    }
}

fn annotation_display_format(matches: &[AnnotationSpan]) -> DisplayFormat {
    let content = match matches.len() {
        0 => "No pattern matches".to_string(),
        n => format!("{} match(es)", n),
    };

    DisplayFormat {
        layout: DisplayLayout::Annotation,
        sections: vec![DisplaySection {
            title: "Pattern Matches".to_string(),
            content,
            points: matches
                .iter()
                .map(|span| format!("[{}] {}", span.label, span.text))
                .collect(),
        }],
    }
}

/// Bullet or numbered lines of a generated text
fn extract_key_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with('•')
                || line.starts_with('-')
                || line.starts_with('*')
                || line.chars().next().map_or(false, |c| c.is_ascii_digit())
        })
        .map(|line| {
            line.trim_start_matches(['•', '-', '*'])
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches(['.', ')'])
                .trim()
                .to_string()
        })
        .filter(|point| !point.is_empty())
        .take(MAX_KEY_POINTS)
        .collect()
}
