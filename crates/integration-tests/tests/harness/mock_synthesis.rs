//! Mock speech synthesis backend for integration tests
//!
//! Implements the `OpenAI`-speech-shaped endpoint lector talks to and
//! returns deterministic "audio" bytes that echo the request, so tests can
//! assert on the delivered artifact.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Mock synthesis backend with failure injection
pub struct MockSynthesis {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSynthesisState>,
}

struct MockSynthesisState {
    request_count: AtomicU32,
    /// Number of requests to fail before succeeding (0 = never fail)
    fail_count: AtomicU32,
}

impl MockSynthesis {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(0).await
    }

    /// Start a mock server that fails the first `n` requests with 500
    pub async fn start_failing(n: u32) -> anyhow::Result<Self> {
        Self::start_inner(n).await
    }

    async fn start_inner(fail_count: u32) -> anyhow::Result<Self> {
        let state = Arc::new(MockSynthesisState {
            request_count: AtomicU32::new(0),
            fail_count: AtomicU32::new(fail_count),
        });

        let app = Router::new()
            .route("/v1/audio/speech", routing::post(handle_speech))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the synthesis backend
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of synthesis requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockSynthesis {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Debug, Deserialize)]
struct SpeechRequest {
    input: String,
    voice: String,
    speed: f64,
}

async fn handle_speech(State(state): State<Arc<MockSynthesisState>>, Json(req): Json<SpeechRequest>) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    // If fail_count > 0, decrement and return 500
    let remaining = state.fail_count.load(Ordering::Relaxed);
    if remaining > 0 {
        state.fail_count.fetch_sub(1, Ordering::Relaxed);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": {
                    "message": "mock synthesis intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response();
    }

    let audio = format!("RAW:{}:{}:{}", req.voice, req.speed, req.input).into_bytes();

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "audio/wav")],
        audio,
    )
        .into_response()
}
