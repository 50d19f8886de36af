use profile_analyzer::config::ConfigFile;
use profile_analyzer::web::build_rocket;
use profile_analyzer::{AppConfig, ProfileAnalyzer};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;

// No credentials, no API key: every outbound call fails before the network
async fn offline_client() -> Client {
    let config = AppConfig::from_sources(ConfigFile::default(), |_| None).unwrap();
    let analyzer = ProfileAnalyzer::from_config(&config).unwrap();
    Client::tracked(build_rocket(analyzer, 0)).await.unwrap()
}

async fn post_json(client: &Client, uri: &str, body: &str) -> (Status, Value) {
    let response = client
        .post(uri)
        .header(ContentType::JSON)
        .body(body)
        .dispatch()
        .await;
    let status = response.status();
    let body = response.into_string().await.unwrap_or_default();
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn health_reports_tagger_and_rules() {
    let client = offline_client().await;
    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
    assert_eq!(body["type"], "data");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["tagger_version"], "lexicon-en-1.1.0");
    assert_eq!(body["data"]["rule_count"], 1);
}

#[tokio::test]
async fn analyze_without_credentials_returns_error_envelope() {
    let client = offline_client().await;
    let (status, body) = post_json(
        &client,
        "/api/analyze-profile",
        r#"{"profile_url": "acme/jdoe", "conversation_id": "c-42"}"#,
    )
    .await;

    assert_eq!(status, Status::Ok);
    assert_eq!(body["type"], "error");
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "MISSING_CREDENTIALS");
    assert_eq!(body["conversation_id"], "c-42");
}

#[tokio::test]
async fn annotate_route_returns_matches() {
    let client = offline_client().await;
    let (_, body) = post_json(
        &client,
        "/api/annotate",
        r#"{"text": "I want to improve at leadership."}"#,
    )
    .await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["matches"][0]["text"], "improve at leadership");
    assert_eq!(body["data"]["matches"][0]["label"], "Improvement");
    assert!(body["data"].get("tokens").is_none());
    assert_eq!(body["display_format"]["type"], "annotation");
}

#[tokio::test]
async fn malformed_body_is_caught() {
    let client = offline_client().await;
    let (status, body) = post_json(&client, "/api/annotate", r#"{"words": "hi"}"#).await;

    assert_eq!(status, Status::UnprocessableEntity);
    assert_eq!(body["error_code"], "BAD_REQUEST");
}

#[tokio::test]
async fn cors_headers_are_attached() {
    let client = offline_client().await;
    let response = client.options("/api/analyze-profile").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
}
