use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use lector_config::SynthesisConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ConvertError, Result};

/// Voice synthesis capability
///
/// Consumes text plus voice/speed settings and writes a raw audio file to
/// `output_path`. Parameter validation happens in the pipeline before this
/// is ever invoked.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice: &str, speed: f64, output_path: &Path) -> Result<()>;
}

/// HTTP synthesis backend speaking the `OpenAI` speech API shape
///
/// Works against Kokoro-compatible servers and hosted endpoints alike.
pub struct HttpSynthesizer {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl HttpSynthesizer {
    /// Build the synthesizer from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: &SynthesisConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Some(Duration::from_secs(5)))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build synthesis HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(serde::Serialize)]
struct SpeechRequest<'a> {
    input: &'a str,
    voice: &'a str,
    speed: f64,
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str, speed: f64, output_path: &Path) -> Result<()> {
        let url = format!("{}/audio/speech", self.base_url);

        tracing::debug!(voice, speed, input_len = text.len(), "synthesis request");

        let body = SpeechRequest {
            input: text,
            voice,
            speed,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key.expose_secret()));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "synthesis request failed");
            if e.is_timeout() {
                ConvertError::SynthesisUnavailable("synthesis request timed out".to_string())
            } else {
                ConvertError::SynthesisUnavailable(format!("failed to reach synthesis backend: {e}"))
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(%status, body = %error_text, "synthesis backend error");
            return Err(ConvertError::SynthesisUnavailable(format!(
                "synthesis backend returned {status}"
            )));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read synthesis response body");
            ConvertError::SynthesisUnavailable("synthesis response ended prematurely".to_string())
        })?;

        tokio::fs::write(output_path, &audio)
            .await
            .map_err(|e| ConvertError::Internal(format!("failed to write raw audio: {e}")))?;

        tracing::debug!(bytes = audio.len(), path = %output_path.display(), "synthesis complete");

        Ok(())
    }
}
