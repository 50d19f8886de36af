use profile_analyzer::config::{LinkedinSettings, OpenAiSettings};
use profile_analyzer::linkedin_analysis::{
    authenticate, fetch_summary, Credentials, LinkedinClient, LinkedinConnector,
};
use profile_analyzer::narrative::{CompletionService, OpenAiClient};
use profile_analyzer::{generate_narrative, AnalyzerError};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

struct Reply {
    status: &'static str,
    body: String,
}

fn reply(status: &'static str, body: &str) -> Reply {
    Reply {
        status,
        body: body.to_string(),
    }
}

type RequestLog = Arc<Mutex<Vec<String>>>;

/// One-shot HTTP/1.1 server: each connection gets the reply chosen by `route`
/// for its request path, then is closed.
async fn serve<F>(route: F) -> (String, RequestLog)
where
    F: Fn(&str) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let route = Arc::new(route);

    let requests = log.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let route = route.clone();
            let requests = requests.clone();
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                let path = request
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                requests.lock().unwrap().push(request);

                let Reply { status, body } = route(&path);
                let raw = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(raw.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), log)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn linkedin(base: &str) -> LinkedinConnector {
    LinkedinConnector::new(
        LinkedinSettings {
            client_id: None,
            client_secret: None,
            api_base_url: base.to_string(),
            token_url: format!("{}/token", base),
        },
        5,
    )
}

fn credentials() -> Credentials {
    Credentials::new(Some("client-id".to_string()), Some("client-secret".to_string()))
}

async fn connect(base: &str) -> Result<LinkedinClient, AnalyzerError> {
    authenticate(&linkedin(base), &credentials()).await
}

fn token_ok() -> Reply {
    reply("200 OK", r#"{"access_token":"tok-123","expires_in":3600}"#)
}

#[tokio::test]
async fn token_then_profile_summary() {
    let (base, log) = serve(|path| {
        if path.starts_with("/token") {
            token_ok()
        } else {
            reply("200 OK", r#"{"summary":"I want to improve at leadership.","headline":"PM"}"#)
        }
    })
    .await;

    let client = connect(&base).await.unwrap();
    let summary = fetch_summary(&client, "acme/jdoe").await.unwrap();
    assert_eq!(summary, "I want to improve at leadership.");

    let requests: Vec<String> = log.lock().unwrap().iter().map(|r| r.to_lowercase()).collect();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("post /token"));
    assert!(requests[0].contains("grant_type=client_credentials"));
    assert!(requests[0].contains("client_id=client-id"));
    assert!(requests[1].starts_with("get /profiles?url=acme%2fjdoe"));
    assert!(requests[1].contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn rejected_token_request_is_authentication_error() {
    let (base, _) = serve(|_| {
        reply(
            "401 Unauthorized",
            r#"{"error":"invalid_client","error_description":"bad"}"#,
        )
    })
    .await;

    match connect(&base).await {
        Err(AnalyzerError::Authentication { message }) => {
            assert!(message.contains("401 Unauthorized: invalid_client: bad"), "{}", message);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("login should fail"),
    }
}

#[tokio::test]
async fn blank_access_token_is_authentication_error() {
    let (base, _) = serve(|_| reply("200 OK", r#"{"access_token":"   "}"#)).await;

    match connect(&base).await {
        Err(AnalyzerError::Authentication { message }) => {
            assert!(message.contains("empty access token"), "{}", message);
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("login should fail"),
    }
}

#[tokio::test]
async fn profile_failures_are_fetch_errors() {
    let (base, _) = serve(|path| {
        if path.starts_with("/token") {
            token_ok()
        } else if path.contains("array") {
            reply("200 OK", "[1, 2]")
        } else if path.contains("missing") {
            reply(
                "404 Not Found",
                r#"{"message":"Profile not found","status":404}"#,
            )
        } else {
            reply("200 OK", r#"{"headline":"Engineer"}"#)
        }
    })
    .await;

    let client = connect(&base).await.unwrap();

    match fetch_summary(&client, "acme/array").await {
        Err(AnalyzerError::Fetch { message }) => {
            assert!(message.contains("not an object (got an array)"), "{}", message);
        }
        other => panic!("expected fetch error, got {:?}", other),
    }

    match fetch_summary(&client, "acme/missing").await {
        Err(AnalyzerError::Fetch { message }) => {
            assert!(message.contains("404 Not Found: Profile not found"), "{}", message);
        }
        other => panic!("expected fetch error, got {:?}", other),
    }

    assert_eq!(
        fetch_summary(&client, "acme/headline-only").await,
        Err(AnalyzerError::EmptySummary)
    );
}

fn openai(base: &str) -> OpenAiClient {
    OpenAiClient::new(
        &OpenAiSettings {
            api_key: Some("sk-test".to_string()),
            base_url: base.to_string(),
            model: "gpt-3.5-turbo".to_string(),
        },
        5,
    )
    .unwrap()
}

#[tokio::test]
async fn completion_returns_first_choice() {
    let (base, log) = serve(|_| {
        reply(
            "200 OK",
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"  A strong leader.\n"}}]}"#,
        )
    })
    .await;

    let text = openai(&base).complete("Summarize this LinkedIn profile:\nhi").await.unwrap();
    assert_eq!(text, "A strong leader.");

    let request = log.lock().unwrap()[0].clone();
    assert!(request.starts_with("POST /chat/completions"));
    assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
    assert!(request.contains(r#""model":"gpt-3.5-turbo""#));
}

#[tokio::test]
async fn completion_error_body_reaches_narrative() {
    let (base, _) = serve(|_| {
        reply(
            "429 Too Many Requests",
            r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#,
        )
    })
    .await;

    let client = openai(&base);
    let err = client.complete("hello").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "OpenAI API returned error 429 Too Many Requests: Rate limit reached"
    );

    let narrative = generate_narrative(&client, "I lead teams.").await;
    assert_eq!(narrative.summary, "Summary generation failed.");
    assert_eq!(
        narrative.recommendations,
        "Error from OpenAI: OpenAI API returned error 429 Too Many Requests: Rate limit reached"
    );
}
