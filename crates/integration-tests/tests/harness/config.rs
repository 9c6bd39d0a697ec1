//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use lector_config::{Config, HealthConfig, ServerConfig, StorageConfig, SynthesisConfig, TranscodeConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                synthesis: SynthesisConfig::default(),
                transcode: TranscodeConfig::default(),
                storage: StorageConfig::default(),
            },
        }
    }

    /// Point the synthesis stage at a mock backend
    pub fn with_synthesis(mut self, base_url: &str) -> Self {
        self.config.synthesis.base_url = base_url.to_owned();
        self
    }

    /// Set the accepted voice identifiers
    pub fn with_voices(mut self, voices: &[&str]) -> Self {
        self.config.synthesis.voices = voices.iter().map(|v| (*v).to_owned()).collect();
        self
    }

    /// Set the transcoder binary path
    pub fn with_ffmpeg(mut self, path: &Path) -> Self {
        self.config.transcode.ffmpeg_path = path.to_path_buf();
        self
    }

    /// Set the temporary file directory
    pub fn with_work_dir(mut self, path: &Path) -> Self {
        self.config.storage.work_dir = Some(path.to_path_buf());
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        let config = self.config;
        config.validate().expect("test config must be valid");
        config
    }
}
