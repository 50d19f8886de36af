// src/web/mod.rs - JSON API over the profile analysis pipeline

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::linkedin_analysis::LinkedinConnector;
use crate::narrative::OpenAiClient;
use crate::pipeline::ProfileAnalyzer;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

pub type ServerAnalyzer = ProfileAnalyzer<LinkedinConnector, OpenAiClient>;

/// Open CORS policy for the browser front-end
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        response.set_header(Header::new("Access-Control-Max-Age", "86400"));
    }
}

#[post("/analyze-profile", data = "<request>")]
pub async fn analyze_profile(
    request: Json<StandardRequest<AnalyzeProfileRequest>>,
    analyzer: &State<ServerAnalyzer>,
) -> Result<Json<DataResponse<ProfileAnalysisData>>, Json<StandardErrorResponse>> {
    handlers::analyze_profile_handler(analyzer.inner(), request.into_inner()).await
}

#[post("/annotate", data = "<request>")]
pub async fn annotate(
    request: Json<StandardRequest<AnnotateRequest>>,
    analyzer: &State<ServerAnalyzer>,
) -> Json<DataResponse<AnnotationData>> {
    handlers::annotate_handler(analyzer.inner(), request.into_inner()).await
}

#[get("/health")]
pub async fn health(analyzer: &State<ServerAnalyzer>) -> Json<DataResponse<HealthData>> {
    handlers::health_handler(analyzer.inner()).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::bad_request(
        "Invalid request format",
        "Send a JSON body, e.g. {\"profile_url\": \"...\"}",
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::bad_request(
        format!("Request body for {} is missing required fields", request.uri().path()),
        "Check the field names: profile_url for /analyze-profile, text for /annotate",
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error",
        "INTERNAL_ERROR",
        vec!["Try again in a few moments".to_string()],
    ))
}

pub fn build_rocket(analyzer: ServerAnalyzer, port: u16) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(analyzer)
        .register(
            "/api",
            catchers![bad_request, unprocessable_entity, internal_error],
        )
        .mount(
            "/api",
            routes![analyze_profile, annotate, health, options],
        )
}

pub async fn start_web_server(analyzer: ServerAnalyzer, port: u16) -> Result<()> {
    info!(
        "Starting profile analyzer API on http://0.0.0.0:{} (tagger {}, {} rule(s))",
        port,
        analyzer.annotator().tagger_version(),
        analyzer.annotator().rules().rules.len()
    );

    build_rocket(analyzer, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("API server failed: {}", e))?;

    Ok(())
}
