use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use lector_config::TranscodeConfig;
use tokio::process::Command;

use crate::error::{ConvertError, Result};
use crate::types::AudioFormat;

/// Audio transcoding capability
///
/// Consumes a raw audio file and produces an encoded file at `output_path`
/// in the requested format.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn transcode(&self, input_path: &Path, format: AudioFormat, output_path: &Path) -> Result<()>;
}

/// Transcoder invoking an external ffmpeg binary
///
/// Paths and format arguments are always passed as an argument vector,
/// never interpolated into a shell string.
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
    timeout: Duration,
}

impl FfmpegTranscoder {
    pub fn new(config: &TranscodeConfig) -> Self {
        Self {
            ffmpeg_path: config.ffmpeg_path.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Check that the configured binary answers `-version`
    ///
    /// Run once at startup; a missing binary is a deployment problem, not
    /// a per-request error.
    pub async fn probe(&self) -> bool {
        Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn transcode(&self, input_path: &Path, format: AudioFormat, output_path: &Path) -> Result<()> {
        let mut command = Command::new(&self.ffmpeg_path);
        command
            .arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input_path)
            .args(format.codec_args())
            .arg(output_path)
            .kill_on_drop(true);

        tracing::debug!(
            input = %input_path.display(),
            output = %output_path.display(),
            %format,
            "starting transcode"
        );

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                tracing::error!(timeout = ?self.timeout, "transcode timed out");
                ConvertError::TranscodeFailed(format!("transcode timed out after {:?}", self.timeout))
            })?
            .map_err(|e| {
                tracing::error!(ffmpeg = %self.ffmpeg_path.display(), error = %e, "failed to launch transcoder");
                ConvertError::TranscodeFailed(format!("failed to launch transcoder: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(status = %output.status, stderr = %stderr.trim(), "transcoder exited with failure");
            return Err(ConvertError::TranscodeFailed(format!(
                "transcoder exited with {}",
                output.status
            )));
        }

        tracing::debug!(output = %output_path.display(), "transcode complete");

        Ok(())
    }
}
