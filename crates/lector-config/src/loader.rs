use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the health path is not rooted, the voice set is
    /// empty, speed bounds are not a sane positive range, or a timeout is
    /// zero
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_synthesis()?;
        self.validate_transcode()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        // Router::route panics on paths without a leading slash
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must begin with '/' (got {:?})", health.path);
        }

        Ok(())
    }

    fn validate_synthesis(&self) -> anyhow::Result<()> {
        let synthesis = &self.synthesis;

        if synthesis.voices.is_empty() {
            anyhow::bail!("synthesis.voices must name at least one voice");
        }

        if synthesis.voices.iter().any(|v| v.trim().is_empty()) {
            anyhow::bail!("synthesis.voices must not contain empty identifiers");
        }

        if !synthesis.speed_min.is_finite() || !synthesis.speed_max.is_finite() {
            anyhow::bail!("synthesis speed bounds must be finite");
        }

        if synthesis.speed_min <= 0.0 || synthesis.speed_min > synthesis.speed_max {
            anyhow::bail!(
                "synthesis speed bounds must satisfy 0 < speed_min <= speed_max (got {}..{})",
                synthesis.speed_min,
                synthesis.speed_max
            );
        }

        if synthesis.timeout_seconds == 0 {
            anyhow::bail!("synthesis.timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    fn validate_transcode(&self) -> anyhow::Result<()> {
        if self.transcode.ffmpeg_path.as_os_str().is_empty() {
            anyhow::bail!("transcode.ffmpeg_path must not be empty");
        }

        if self.transcode.timeout_seconds == 0 {
            anyhow::bail!("transcode.timeout_seconds must be greater than 0");
        }

        Ok(())
    }
}
