// src/test_utils/mock_llm_server.rs
use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A canned HTTP reply: status code plus JSON body.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: Value,
}

impl MockReply {
    pub fn completion(content: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({
                "id": "chatcmpl-mock",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": content},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
            }),
        }
    }

    pub fn error(status: StatusCode, code: &str, message: &str) -> Self {
        Self {
            status,
            body: json!({"error": {"message": message, "type": "invalid_request_error", "code": code}}),
        }
    }
}

#[derive(Clone)]
struct MockServerState {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions_handler(
    axum::extract::State(state): axum::extract::State<MockServerState>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    log::debug!("Mock LLM server received request: {}", payload);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    state.requests.lock().unwrap().push((auth, payload));

    match state.replies.lock().unwrap().pop_front() {
        Some(reply) => (reply.status, Json(reply.body)),
        None => {
            log::error!("Mock LLM server ran out of responses!");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": {"message": "no more mock replies"}})),
            )
        }
    }
}

pub struct MockLLMServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    recorded_requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl MockLLMServer {
    pub async fn start(replies: Vec<MockReply>) -> Self {
        let state = MockServerState {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let recorded_requests = state.requests.clone();

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock LLM server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock LLM server error: {}", e);
                });
        });

        MockLLMServer {
            addr,
            shutdown_tx,
            recorded_requests,
        }
    }

    /// Base URL to hand to `OpenAIClient::with_api_base`.
    pub fn api_base(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock LLM server shutdown signal already sent or receiver dropped.");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    /// Recorded `(authorization header, JSON body)` pairs.
    pub fn get_requests(&self) -> Vec<(Option<String>, Value)> {
        self.recorded_requests.lock().unwrap().clone()
    }
}
