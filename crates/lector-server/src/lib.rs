#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod convert;
mod health;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use lector_config::Config;
use lector_pipeline::{ConversionPipeline, DocumentExtractor, FfmpegTranscoder, HttpSynthesizer};
use tower_http::trace::TraceLayer;

/// Shared state behind the conversion endpoints
pub(crate) struct AppState {
    pub pipeline: ConversionPipeline,
    pub body_limit_bytes: usize,
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be created or the
    /// synthesis client fails to initialize
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let work_dir: PathBuf = config.storage.resolved_work_dir();
        tokio::fs::create_dir_all(&work_dir)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create work dir {}: {e}", work_dir.display()))?;

        let synthesizer = HttpSynthesizer::new(&config.synthesis)?;

        let transcoder = FfmpegTranscoder::new(&config.transcode);
        if transcoder.probe().await {
            tracing::debug!(ffmpeg = %config.transcode.ffmpeg_path.display(), "transcoder probe succeeded");
        } else {
            tracing::warn!(
                ffmpeg = %config.transcode.ffmpeg_path.display(),
                "transcoder binary did not answer -version; conversions will fail until it is available"
            );
        }

        let pipeline = ConversionPipeline::new(
            Arc::new(DocumentExtractor),
            Arc::new(synthesizer),
            Arc::new(transcoder),
            config.synthesis.voices.clone(),
            (config.synthesis.speed_min, config.synthesis.speed_max),
            work_dir,
        );

        let state = Arc::new(AppState {
            pipeline,
            body_limit_bytes: config.server.body_limit_bytes,
        });

        let mut app = Router::new();

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        app = app.merge(convert::endpoint_router().with_state(state));

        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
