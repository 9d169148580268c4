use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use rewardlog::config::{Config, NotionConfig};
use rewardlog::notion::NotionClient;

pub const TEST_TOKEN: &str = "secret_test_token";
pub const TEST_DATABASE_ID: &str = "0c6f6b1e2d3a4f5b8c9d0e1f2a3b4c5d";

/// A call received by the mock Notion API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub body: Value,
}

/// In-process stand-in for `api.notion.com`.
#[derive(Clone)]
pub struct MockNotion {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// `None` answers with a freshly created page.
    response: Arc<Mutex<Option<(StatusCode, String)>>>,
}

impl MockNotion {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The single recorded call; panics if there were zero or several.
    pub fn only_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one Notion call");
        requests.into_iter().next().unwrap()
    }

    pub fn respond_with(&self, status: StatusCode, body: &Value) {
        *self.response.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn respond_with_text(&self, status: StatusCode, body: &str) {
        *self.response.lock().unwrap() = Some((status, body.to_string()));
    }
}

async fn create_page(State(mock): State<MockNotion>, headers: HeaderMap, body: Bytes) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(json!(null));
    mock.requests
        .lock()
        .unwrap()
        .push(RecordedRequest { headers, body });

    let configured = mock.response.lock().unwrap().clone();
    let (status, text) = configured.unwrap_or_else(|| {
        let page = json!({ "object": "page", "id": Uuid::now_v7().to_string() });
        (StatusCode::OK, page.to_string())
    });

    (status, [(header::CONTENT_TYPE, "application/json")], text).into_response()
}

pub async fn spawn_mock_notion() -> MockNotion {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock Notion");
    let addr = listener.local_addr().unwrap();

    let mock = MockNotion {
        addr,
        requests: Arc::new(Mutex::new(Vec::new())),
        response: Arc::new(Mutex::new(None)),
    };

    let app = Router::new()
        .route("/v1/pages", post(create_page))
        .with_state(mock.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock Notion failed");
    });

    mock
}

/// A running service instance wired to its own mock Notion API.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub notion: MockNotion,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to the submit endpoint, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a raw body with the given content type, return (body, status).
    pub async fn submit_raw(&self, content_type: &str, raw: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit"))
            .header("content-type", content_type)
            .body(raw.to_string())
            .send()
            .await
            .expect("submit raw failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(notion: NotionConfig) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        log_level: "warn".to_string(),
        notion,
    }
}

/// Spawn the service with both credentials set.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Some(TEST_TOKEN), Some(TEST_DATABASE_ID)).await
}

/// Spawn the service with the given credentials, pointing at a fresh mock Notion.
pub async fn spawn_app_with(token: Option<&str>, database_id: Option<&str>) -> TestApp {
    let notion = spawn_mock_notion().await;

    let notion_config = NotionConfig {
        api_base: notion.base_url(),
        timeout: Duration::from_secs(5),
        ..NotionConfig::new(token.map(String::from), database_id.map(String::from))
    };

    serve(notion_config, notion).await
}

/// Spawn the service with both credentials set, sending Notion calls to `api_base`.
/// The returned mock is idle unless `api_base` points at it.
pub async fn spawn_app_against(api_base: &str) -> TestApp {
    let notion = spawn_mock_notion().await;

    let notion_config = NotionConfig {
        api_base: api_base.to_string(),
        timeout: Duration::from_secs(5),
        ..NotionConfig::new(Some(TEST_TOKEN.to_string()), Some(TEST_DATABASE_ID.to_string()))
    };

    serve(notion_config, notion).await
}

async fn serve(notion_config: NotionConfig, notion: MockNotion) -> TestApp {
    let client = NotionClient::new(&notion_config).expect("Failed to build Notion client");
    let app = rewardlog::build_app(test_config(notion_config), Arc::new(client));

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        notion,
    }
}
