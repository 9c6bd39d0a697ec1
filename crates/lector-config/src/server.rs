use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Default multipart body limit for document uploads (32 MiB)
const DEFAULT_BODY_LIMIT_BYTES: usize = 32 << 20;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    /// Maximum accepted upload size in bytes
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            health: HealthConfig::default(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

const fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT_BYTES
}
