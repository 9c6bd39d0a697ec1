use std::path::PathBuf;

use serde::Deserialize;

/// Temporary file storage configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory for per-run temporary files
    ///
    /// Defaults to the system temp directory. Every file created during a
    /// conversion run lives here under a run-unique name.
    pub work_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the working directory, falling back to the system default
    pub fn resolved_work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
