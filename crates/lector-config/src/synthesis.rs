use secrecy::SecretString;
use serde::Deserialize;

/// Speech synthesis backend configuration
///
/// Points at an OpenAI-speech-compatible endpoint (e.g. a local Kokoro
/// server). Voice and speed limits are enforced by the pipeline before any
/// request reaches the backend.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Base URL of the synthesis endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key sent as a bearer token, if the backend requires one
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Voice identifiers accepted from callers
    #[serde(default = "default_voices")]
    pub voices: Vec<String>,
    /// Lowest accepted speed multiplier
    #[serde(default = "default_speed_min")]
    pub speed_min: f64,
    /// Highest accepted speed multiplier
    #[serde(default = "default_speed_max")]
    pub speed_max: f64,
    /// Request timeout for one synthesis call, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            voices: default_voices(),
            speed_min: default_speed_min(),
            speed_max: default_speed_max(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8880/v1".to_string()
}

fn default_voices() -> Vec<String> {
    vec!["default".to_string()]
}

const fn default_speed_min() -> f64 {
    0.5
}

const fn default_speed_max() -> f64 {
    2.0
}

const fn default_timeout() -> u64 {
    120
}
