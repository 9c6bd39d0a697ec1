use std::path::{Path, PathBuf};

/// Request-scoped registry of temporary file paths
///
/// Every path a pipeline run creates is registered here before being used
/// as input to the next stage, so one `release_all` sweep cleans up the
/// run no matter where it failed. Registration order is kept for
/// deterministic cleanup logging.
#[derive(Debug, Default)]
pub struct TempTracker {
    paths: Vec<PathBuf>,
}

impl TempTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path for later deletion
    ///
    /// Registering the same path twice is a no-op, so a single deletion
    /// attempt is made per path.
    pub fn register(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.paths.contains(&path) {
            tracing::trace!(path = %path.display(), "tracking temp file");
            self.paths.push(path);
        }
    }

    /// Stop tracking a path without deleting it
    ///
    /// Used to exempt the final artifact once transcoding succeeds; its
    /// lifetime is then owned by the caller's release handle.
    pub fn forget(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    /// Number of currently tracked paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Delete every tracked path that still exists, in registration order
    ///
    /// Individual deletion failures are logged and never interrupt the
    /// sweep or propagate to the caller.
    pub async fn release_all(&mut self) {
        for path in self.paths.drain(..) {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "removed temp file"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::trace!(path = %path.display(), "temp file already gone");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove temp file");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_registered_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("upload.pdf");
        let second = dir.path().join("raw.wav");
        tokio::fs::write(&first, b"pdf").await.unwrap();
        tokio::fs::write(&second, b"wav").await.unwrap();

        let mut tracker = TempTracker::new();
        tracker.register(&first);
        tracker.register(&second);
        tracker.release_all().await;

        assert!(!first.exists());
        assert!(!second.exists());
        assert!(tracker.is_empty());
    }

    #[tokio::test]
    async fn duplicate_registration_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload.pdf");
        tokio::fs::write(&path, b"pdf").await.unwrap();

        let mut tracker = TempTracker::new();
        tracker.register(&path);
        tracker.register(&path);

        assert_eq!(tracker.len(), 1);
        tracker.release_all().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn tolerates_paths_that_never_materialized() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.wav");
        tokio::fs::write(&real, b"wav").await.unwrap();

        let mut tracker = TempTracker::new();
        tracker.register(dir.path().join("never-created.wav"));
        tracker.register(&real);

        // The missing path must not stop the sweep
        tracker.release_all().await;
        assert!(!real.exists());
    }

    #[tokio::test]
    async fn forgotten_paths_survive_the_sweep() {
        let dir = tempfile::tempdir().unwrap();
        let kept = dir.path().join("final.mp3");
        let dropped = dir.path().join("raw.wav");
        tokio::fs::write(&kept, b"mp3").await.unwrap();
        tokio::fs::write(&dropped, b"wav").await.unwrap();

        let mut tracker = TempTracker::new();
        tracker.register(&kept);
        tracker.register(&dropped);
        tracker.forget(&kept);
        tracker.release_all().await;

        assert!(kept.exists());
        assert!(!dropped.exists());
    }
}
