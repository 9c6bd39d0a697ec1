use std::path::{Path, PathBuf};

/// Supported output audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    /// Parse a caller-supplied format name, case-insensitively
    ///
    /// Returns `None` for anything outside the supported set; rejection
    /// happens before any transcoder process is launched.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            _ => None,
        }
    }

    /// File extension for artifacts in this format
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
        }
    }

    /// Content type for HTTP delivery
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
        }
    }

    /// Extra ffmpeg codec arguments for this format
    ///
    /// WAV needs none; the container choice follows the output extension.
    pub const fn codec_args(self) -> &'static [&'static str] {
        match self {
            Self::Mp3 => &["-codec:a", "libmp3lame", "-qscale:a", "2"],
            Self::Wav => &[],
        }
    }
}

impl std::fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Immutable per-request input to the conversion pipeline
#[derive(Debug)]
pub struct ConversionRequest {
    /// Path to the uploaded document bytes on disk
    pub source_path: PathBuf,
    /// Voice identifier, validated against the configured set
    pub voice: String,
    /// Target output format
    pub format: AudioFormat,
    /// Speed multiplier, validated against the configured bounds
    pub speed: f64,
}

/// One-shot handle to the final audio artifact
///
/// The caller invokes [`release`](Self::release) exactly once, after the
/// artifact has been fully handed off. If the handle is dropped without
/// being released (e.g. delivery failed mid-flight) the file is removed
/// best-effort so nothing lingers on disk.
#[derive(Debug)]
pub struct ConversionArtifact {
    path: PathBuf,
    format: AudioFormat,
    released: bool,
}

impl ConversionArtifact {
    pub(crate) const fn new(path: PathBuf, format: AudioFormat) -> Self {
        Self {
            path,
            format,
            released: false,
        }
    }

    /// Path of the final audio file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format of the final audio file
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Delete the final artifact after it has been delivered
    ///
    /// Deletion failure is logged and otherwise ignored; the file is
    /// request-scoped and the name is never reused.
    pub async fn release(mut self) {
        self.released = true;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!(path = %self.path.display(), "released final artifact"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove final artifact");
            }
        }
    }
}

impl Drop for ConversionArtifact {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove undelivered artifact");
        }
    }
}
