use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ConvertError, Result};
use crate::extract::TextExtractor;
use crate::synthesis::SpeechSynthesizer;
use crate::tracker::TempTracker;
use crate::transcode::AudioTranscoder;
use crate::types::{ConversionArtifact, ConversionRequest};

/// Orchestrates one document-to-audio conversion per call
///
/// Stages run strictly in sequence: extract, synthesize, transcode. Every
/// intermediate path carries a per-run UUID so concurrent runs never
/// collide, and every path is registered with a [`TempTracker`] before it
/// is handed to the next stage. Any stage failure triggers exactly one
/// full cleanup sweep and surfaces a single classified error.
pub struct ConversionPipeline {
    extractor: Arc<dyn TextExtractor>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    transcoder: Arc<dyn AudioTranscoder>,
    voices: Vec<String>,
    speed_min: f64,
    speed_max: f64,
    work_dir: PathBuf,
}

impl ConversionPipeline {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        transcoder: Arc<dyn AudioTranscoder>,
        voices: Vec<String>,
        speed_bounds: (f64, f64),
        work_dir: PathBuf,
    ) -> Self {
        Self {
            extractor,
            synthesizer,
            transcoder,
            voices,
            speed_min: speed_bounds.0,
            speed_max: speed_bounds.1,
            work_dir,
        }
    }

    /// Directory where per-run temporary files are created
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run the full conversion for one request
    ///
    /// On success the returned artifact is the only file left on disk; the
    /// uploaded source and the intermediate raw audio are removed
    /// unconditionally. On failure everything the run created is removed
    /// before the error is returned.
    pub async fn convert(&self, request: ConversionRequest) -> Result<ConversionArtifact> {
        let run_id = Uuid::new_v4();
        let mut tracker = TempTracker::new();
        tracker.register(&request.source_path);

        let result = self.run_stages(&request, run_id, &mut tracker).await;

        match result {
            Ok(final_path) => {
                // The final artifact outlives the run; its deletion is
                // deferred to the caller's release handle.
                tracker.forget(&final_path);
                tracker.release_all().await;
                tracing::info!(%run_id, path = %final_path.display(), "conversion succeeded");
                Ok(ConversionArtifact::new(final_path, request.format))
            }
            Err(err) => {
                tracker.release_all().await;
                tracing::warn!(%run_id, error = %err, "conversion failed");
                Err(err)
            }
        }
    }

    fn validate(&self, request: &ConversionRequest) -> Result<()> {
        if !self.voices.iter().any(|v| v == &request.voice) {
            return Err(ConvertError::InvalidVoice(request.voice.clone()));
        }

        if !request.speed.is_finite() || request.speed < self.speed_min || request.speed > self.speed_max {
            return Err(ConvertError::InvalidSpeed(request.speed));
        }

        Ok(())
    }

    async fn run_stages(&self, request: &ConversionRequest, run_id: Uuid, tracker: &mut TempTracker) -> Result<PathBuf> {
        // Parameter validation happens before any stage touches an
        // external capability.
        self.validate(request)?;

        tracing::info!(%run_id, voice = %request.voice, format = %request.format, "starting conversion");

        let text = self.extractor.extract(&request.source_path).await?;
        tracing::debug!(%run_id, chars = text.len(), "extraction complete");

        // Register each planned output before invoking the stage so a
        // partially written file is still swept up on failure.
        let raw_path = self.work_dir.join(format!("{run_id}.raw.wav"));
        tracker.register(&raw_path);
        self.synthesizer
            .synthesize(&text, &request.voice, request.speed, &raw_path)
            .await?;

        let final_path = self.work_dir.join(format!("{run_id}.{}", request.format.extension()));
        tracker.register(&final_path);
        self.transcoder.transcode(&raw_path, request.format, &final_path).await?;

        Ok(final_path)
    }
}
