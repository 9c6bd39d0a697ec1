#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod server;
pub mod storage;
pub mod synthesis;
pub mod transcode;

use serde::Deserialize;

pub use health::HealthConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use synthesis::SynthesisConfig;
pub use transcode::TranscodeConfig;

/// Top-level lector configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Speech synthesis backend configuration
    #[serde(default)]
    pub synthesis: SynthesisConfig,
    /// Audio transcoding configuration
    #[serde(default)]
    pub transcode: TranscodeConfig,
    /// Temporary file storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}
