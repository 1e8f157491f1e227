//! テスト用のバックエンド（axum）
//!
//! 登録したルートに固定のJSONを返し、受け取ったリクエストを記録する

#![allow(dead_code)]

use axum::body::to_bytes;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is not JSON")
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: String,
    path: String,
    status: u16,
    body: String,
}

struct BackendState {
    routes: Vec<Route>,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Default)]
pub struct MockBackendBuilder {
    routes: Vec<Route>,
}

impl MockBackendBuilder {
    /// `path` は `/api/...` を含む完全なパス
    pub fn route(mut self, method: &str, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.push(Route {
            method: method.to_string(),
            path: path.to_string(),
            status,
            body: body.into(),
        });
        self
    }

    pub async fn start(self) -> MockBackend {
        let state = Arc::new(BackendState {
            routes: self.routes,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(record_and_respond)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock backend stopped: {e}");
            }
        });

        MockBackend {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }
}

pub struct MockBackend {
    base_url: String,
    state: Arc<BackendState>,
    handle: JoinHandle<()>,
}

impl MockBackend {
    pub fn builder() -> MockBackendBuilder {
        MockBackendBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests lock poisoned").clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// すべてのリクエストを記録し、登録済みルートの応答（なければ404）を返す
async fn record_and_respond(State(state): State<Arc<BackendState>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await.unwrap_or_default();

    let method = parts.method.to_string();
    let path = parts.uri.path().to_string();
    let headers = parts
        .headers
        .iter()
        .map(|(key, value)| {
            (key.as_str().to_string(), value.to_str().unwrap_or_default().to_string())
        })
        .collect();

    let (status, response_body) = state
        .routes
        .iter()
        .find(|route| route.method == method && route.path == path)
        .map(|route| (route.status, route.body.clone()))
        .unwrap_or((404, r#"{"error": "Not found"}"#.to_string()));

    state.requests.lock().expect("requests lock poisoned").push(RecordedRequest {
        method,
        path,
        headers,
        body: body.to_vec(),
    });

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], response_body).into_response()
}

/// `/process` 応答（`image_id` はバックエンド同様に含めない）
pub fn process_response(image_id: &str, translations: u32) -> String {
    let entries: Vec<_> = (1..=translations)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "original_text": format!("セリフ{id}"),
                "translated_text": format!("line {id}"),
                "bbox": [10 * id, 20, 100, 40],
            })
        })
        .collect();

    serde_json::json!({
        "message": "Image processed successfully",
        "original_image": format!("/api/images/uploads/{image_id}.jpg"),
        "inpainted_image": format!("/api/images/inpainted/{image_id}_inpainted.png"),
        "text_only_image": format!("/api/images/text_only/{image_id}_text.png"),
        "boxed_image": format!("/api/images/boxed/{image_id}_boxed.png"),
        "translated_image": format!("/api/images/translated/{image_id}_translated.png"),
        "translations": entries,
        "redirect_url": format!("/view/{image_id}"),
    })
    .to_string()
}

/// `/images/...` 応答（`base64` はエンコード済みの画像データ）
pub fn image_response(base64: &str) -> String {
    serde_json::json!({ "data": format!("data:image/png;base64,{base64}") }).to_string()
}
