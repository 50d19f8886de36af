// src/web/handlers/system_handlers.rs
use crate::linkedin_analysis::ProfileConnector;
use crate::narrative::CompletionService;
use crate::pipeline::ProfileAnalyzer;
use crate::web::types::{DataResponse, HealthData};

use rocket::serde::json::Json;
use tracing::debug;

pub async fn health_handler<C, G>(analyzer: &ProfileAnalyzer<C, G>) -> Json<DataResponse<HealthData>>
where
    C: ProfileConnector,
    G: CompletionService,
{
    debug!("Health check");
    let annotator = analyzer.annotator();

    Json(DataResponse::new(
        "OK",
        HealthData {
            status: "ok".to_string(),
            tagger_version: annotator.tagger_version().to_string(),
            rule_count: annotator.rules().rules.len(),
        },
    ))
}
