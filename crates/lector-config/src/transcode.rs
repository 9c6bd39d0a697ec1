use std::path::PathBuf;

use serde::Deserialize;

/// Audio transcoding configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscodeConfig {
    /// Path to the ffmpeg binary
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,
    /// Timeout for one transcode invocation, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

const fn default_timeout() -> u64 {
    120
}
