//! Document-to-audio conversion pipeline
//!
//! One [`ConversionPipeline::convert`] call takes an uploaded document
//! through text extraction, speech synthesis, and audio transcoding, with
//! a per-run [`TempTracker`] guaranteeing that no temporary file
//! outlives the request on any success or failure path.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod extract;
mod pipeline;
mod synthesis;
mod tracker;
mod transcode;
mod types;

pub use error::{ConvertError, Result};
pub use extract::{DocumentExtractor, TextExtractor};
pub use pipeline::ConversionPipeline;
pub use synthesis::{HttpSynthesizer, SpeechSynthesizer};
pub use tracker::TempTracker;
pub use transcode::{AudioTranscoder, FfmpegTranscoder};
pub use types::{AudioFormat, ConversionArtifact, ConversionRequest};
