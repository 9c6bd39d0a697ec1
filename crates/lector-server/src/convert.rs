use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use lector_pipeline::{AudioFormat, ConversionRequest, ConvertError};
use uuid::Uuid;

use crate::AppState;

/// Create the endpoint router for document conversion
pub(crate) fn endpoint_router() -> Router<Arc<AppState>> {
    Router::new().route("/api/convert", post(convert))
}

/// Parsed multipart form for a conversion request
pub(crate) struct ConvertForm {
    pub document: Vec<u8>,
    pub filename: String,
    pub voice: String,
    pub format: String,
    pub speed: f64,
}

/// Extractor for the conversion multipart form
///
/// Fields: `file` (required), `voice` (required), `format` (required,
/// MP3 or WAV), `speed` (optional, defaults to 1.0).
pub(crate) struct ExtractConvert(pub ConvertForm);

impl axum::extract::FromRequest<Arc<AppState>> for ExtractConvert {
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err((
                http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'",
            )
                .into_response());
        }

        let bytes = axum::body::to_bytes(body, state.body_limit_bytes)
            .await
            .map_err(|err| ConvertError::InvalidRequest(format!("failed to read request body: {err}")).into_response())?;

        // Reassemble the request for multipart parsing
        let mut rebuilt = http::Request::builder().method(parts.method.clone()).uri(parts.uri.clone());
        for (key, value) in &parts.headers {
            rebuilt = rebuilt.header(key, value);
        }
        let rebuilt = rebuilt
            .body(Body::from(bytes))
            .map_err(|e| ConvertError::Internal(format!("failed to rebuild request: {e}")).into_response())?;

        let mut multipart = axum::extract::Multipart::from_request(rebuilt, &())
            .await
            .map_err(|e| ConvertError::InvalidRequest(format!("failed to parse multipart form: {e}")).into_response())?;

        let mut document: Option<Vec<u8>> = None;
        let mut filename = String::from("document");
        let mut voice: Option<String> = None;
        let mut format: Option<String> = None;
        let mut speed = 1.0_f64;

        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    if let Some(name) = field.file_name() {
                        filename = name.to_string();
                    }
                    document = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|e| {
                                ConvertError::InvalidRequest(format!("failed to read document data: {e}"))
                                    .into_response()
                            })?
                            .to_vec(),
                    );
                }
                "voice" => {
                    voice = Some(field.text().await.map_err(|e| {
                        ConvertError::InvalidRequest(format!("failed to read voice field: {e}")).into_response()
                    })?);
                }
                "format" => {
                    format = Some(field.text().await.map_err(|e| {
                        ConvertError::InvalidRequest(format!("failed to read format field: {e}")).into_response()
                    })?);
                }
                "speed" => {
                    let speed_str = field.text().await.map_err(|e| {
                        ConvertError::InvalidRequest(format!("failed to read speed field: {e}")).into_response()
                    })?;
                    speed = speed_str.parse::<f64>().map_err(|e| {
                        ConvertError::InvalidRequest(format!("invalid speed value: {e}")).into_response()
                    })?;
                }
                _ => {
                    // Skip unknown fields
                }
            }
        }

        let document = document.ok_or_else(|| {
            ConvertError::InvalidRequest("missing required 'file' field in multipart form".to_string()).into_response()
        })?;

        let voice = voice.ok_or_else(|| {
            ConvertError::InvalidRequest("missing required 'voice' field in multipart form".to_string()).into_response()
        })?;

        let format = format.ok_or_else(|| {
            ConvertError::InvalidRequest("missing required 'format' field in multipart form".to_string())
                .into_response()
        })?;

        Ok(Self(ConvertForm {
            document,
            filename,
            voice,
            format,
            speed,
        }))
    }
}

/// Handle document conversion requests
///
/// Writes the upload to a run-unique path, runs the pipeline, and streams
/// back the final artifact. The artifact is released only after its bytes
/// are fully in hand; if anything fails before that, the handle's drop
/// guard removes the file.
pub(crate) async fn convert(
    State(state): State<Arc<AppState>>,
    ExtractConvert(form): ExtractConvert,
) -> lector_pipeline::Result<Response> {
    tracing::debug!(filename = %form.filename, voice = %form.voice, format = %form.format, "conversion requested");

    let format = AudioFormat::parse(&form.format).ok_or_else(|| ConvertError::UnsupportedFormat(form.format.clone()))?;

    let source_path = state.pipeline.work_dir().join(format!("{}.upload", Uuid::new_v4()));
    if let Err(e) = tokio::fs::write(&source_path, &form.document).await {
        let _ = tokio::fs::remove_file(&source_path).await;
        return Err(ConvertError::Internal(format!("failed to store upload: {e}")));
    }

    let request = ConversionRequest {
        source_path,
        voice: form.voice,
        format,
        speed: form.speed,
    };

    let artifact = state.pipeline.convert(request).await?;

    let audio = tokio::fs::read(artifact.path())
        .await
        .map_err(|e| ConvertError::Internal(format!("failed to read final artifact: {e}")))?;

    artifact.release().await;

    tracing::debug!(bytes = audio.len(), "conversion delivered");

    Ok(audio_response(audio, format, &form.filename))
}

fn audio_response(audio: Vec<u8>, format: AudioFormat, upload_filename: &str) -> Response {
    let download_name = download_filename(upload_filename, format);

    Response::builder()
        .header(http::header::CONTENT_TYPE, format.content_type())
        .header(
            http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        )
        .body(Body::from(audio))
        .unwrap_or_else(|_| {
            Response::builder()
                .status(http::StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::empty())
                .expect("empty response must build")
        })
}

/// Derive a download name from the uploaded filename's stem
fn download_filename(upload_filename: &str, format: AudioFormat) -> String {
    let stem = Path::new(upload_filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ')))
        .unwrap_or("audio");

    format!("{stem}.{}", format.extension())
}
