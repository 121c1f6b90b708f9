use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use kbdesk_core::api::{ArticleId, ArticleQuery, SimilarityQuery};
use kbdesk_core::session::{describe_failure, ChatSession, KnowledgeBasePanel, Sender};
use kbdesk_core::{Error, HttpApiClient, KnowledgeBaseApi};

const API_KEY: &str = "secret";

type Log = Arc<Mutex<Vec<String>>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == API_KEY)
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid API key" })),
    )
        .into_response()
}

async fn bot(State(log): State<Log>, Json(body): Json<Value>) -> Response {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    log.lock().unwrap().push(format!("POST /bot {}", query));
    match query.as_str() {
        "boom" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "model offline" })),
        )
            .into_response(),
        "bare" => (StatusCode::BAD_GATEWAY, "upstream down").into_response(),
        "quiet" => Json(json!({})).into_response(),
        _ => Json(json!({ "response": format!("echo: {}", query) })).into_response(),
    }
}

async fn list(
    State(log): State<Log>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut keys: Vec<_> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    keys.sort();
    log.lock().unwrap().push(format!("GET /data {}", keys.join("&")));

    if !authorized(&headers) {
        return unauthorized();
    }

    let articles = json!([
        { "id": 1, "title": "Rust ownership", "url": "https://example.com/rust", "content": "Borrowing rules" },
        { "id": "b2", "source": "https://example.com/tokio", "text": "Async runtime" }
    ]);
    match params.get("search").map(String::as_str) {
        Some("nothing") => Json(json!([])).into_response(),
        _ => Json(articles).into_response(),
    }
}

async fn scrape(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    log.lock().unwrap().push(format!("POST /scrape {}", body["urls"]));
    if !authorized(&headers) {
        return unauthorized();
    }
    let results: Vec<Value> = body["urls"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .map(|url| json!({ "url": url, "success": url != "https://broken.example" }))
        .collect();
    Json(Value::Array(results)).into_response()
}

async fn remove(State(log): State<Log>, headers: HeaderMap, Path(id): Path<String>) -> Response {
    log.lock().unwrap().push(format!("DELETE /data/{}", id));
    if !authorized(&headers) {
        return unauthorized();
    }
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }
    Json(json!({ "deleted": true })).into_response()
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(5);
    let hits: Vec<Value> = (0..limit)
        .map(|i| json!({ "id": i, "url": format!("https://example.com/{}", i), "content": "c", "similarity": 0.9 }))
        .collect();
    Json(Value::Array(hits)).into_response()
}

async fn health() -> Response {
    Json(json!({ "status": "healthy", "timestamp": "2026-01-01T00:00:00+00:00" })).into_response()
}

/// Serve the fake service on an ephemeral port and return its base URL
async fn spawn_server() -> (String, Log) {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/v1/bot", post(bot))
        .route("/v1/data", get(list))
        .route("/v1/data/:id", delete(remove))
        .route("/v1/scrape", post(scrape))
        .route("/v1/search", get(search))
        .route("/v1/health", get(health))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), log)
}

fn client(base: &str) -> HttpApiClient {
    HttpApiClient::with_settings(base, API_KEY, 5).unwrap()
}

#[tokio::test]
async fn test_chat_round_trip() {
    let (base, log) = spawn_server().await;
    let api = client(&base);

    let mut chat = ChatSession::new();
    chat.input = "hello".to_string();
    assert!(chat.send(&api).await);

    let transcript = chat.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].sender, Sender::User);
    assert_eq!(transcript[1].sender, Sender::Bot);
    assert_eq!(transcript[1].content, "echo: hello");
    assert_eq!(log.lock().unwrap().as_slice(), ["POST /bot hello"]);
}

#[tokio::test]
async fn test_chat_error_shapes() {
    let (base, _log) = spawn_server().await;
    let api = client(&base);

    let err = api.ask("boom").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(describe_failure(&err), "Error: model offline");

    let err = api.ask("bare").await.unwrap_err();
    assert_eq!(describe_failure(&err), "Error: Unknown error occurred");

    let reply = api.ask("quiet").await.unwrap();
    assert_eq!(reply.text(), "No response received");
}

#[tokio::test]
async fn test_listing_sends_query_and_key() {
    let (base, log) = spawn_server().await;
    let api = client(&base);

    let articles = api
        .list_articles(&ArticleQuery {
            limit: 10,
            offset: 20,
            search: Some("foo".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].display_title(), "Rust ownership");
    assert_eq!(articles[1].display_url(), "https://example.com/tokio");
    assert_eq!(articles[1].display_content(), "Async runtime");
    assert_eq!(articles[1].id, Some(ArticleId::Text("b2".to_string())));
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["GET /data limit=10&offset=20&search=foo"]
    );
}

#[tokio::test]
async fn test_wrong_key_is_reported_from_detail() {
    let (base, _log) = spawn_server().await;
    let api = HttpApiClient::with_settings(&base, "wrong", 5).unwrap();

    let mut panel = KnowledgeBasePanel::default();
    panel.reload(&api).await;

    assert_eq!(panel.status.message(), Some("Error: Invalid API key"));
    assert!(panel.listing.empty_state().is_some());
}

#[tokio::test]
async fn test_empty_search_shows_hint() {
    let (base, _log) = spawn_server().await;
    let api = client(&base);

    let mut panel = KnowledgeBasePanel::default();
    panel.listing.search("nothing");
    panel.reload(&api).await;

    let empty = panel.listing.empty_state().unwrap();
    assert_eq!(empty.hint, Some("Try a different search term"));
    assert!(!panel.status.is_visible());
}

#[tokio::test]
async fn test_add_and_delete_through_panel() {
    let (base, log) = spawn_server().await;
    let api = client(&base);
    let mut panel = KnowledgeBasePanel::default();

    assert!(panel.add_article(&api, "https://example.com/new").await);
    assert_eq!(panel.listing.articles().len(), 2);

    assert!(!panel.add_article(&api, "https://broken.example").await);
    assert_eq!(
        panel.status.message(),
        Some("Error: Failed to scrape https://broken.example")
    );

    assert!(
        panel
            .delete_article(&api, &ArticleId::Number(1), |_| true)
            .await
    );
    assert!(
        !panel
            .delete_article(&api, &ArticleId::Text("missing".to_string()), |_| true)
            .await
    );
    assert_eq!(
        panel.status.message(),
        Some("Error: Failed to delete article")
    );

    let log = log.lock().unwrap();
    assert_eq!(log.iter().filter(|l| l.starts_with("DELETE")).count(), 2);
    assert!(log.contains(&"DELETE /data/1".to_string()));
}

#[tokio::test]
async fn test_similarity_search_and_health() {
    let (base, _log) = spawn_server().await;
    let api = client(&base);

    let mut query = SimilarityQuery::new("ownership");
    query.limit = 3;
    let hits = api.search_similar(&query).await.unwrap();
    assert_eq!(hits.len(), 3);

    let health = api.health().await.unwrap();
    assert!(health.is_healthy());
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}/v1", addr));
    let err = api.health().await.unwrap_err();

    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_transport());
    assert!(describe_failure(&err).starts_with("Connection error: "));
}
