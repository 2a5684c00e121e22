//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Orchestrator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum rows fetched per execution before truncation
    pub max_result_rows: usize,
    /// Run the full and baseline paths concurrently
    ///
    /// The paths share no mutable state, so this is purely a latency
    /// decision. Sequential runs make scripted test fixtures
    /// deterministic.
    pub concurrent_paths: bool,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a row cap
    #[inline]
    #[must_use]
    pub fn with_max_result_rows(mut self, max: usize) -> Self {
        self.max_result_rows = max;
        self
    }

    /// With concurrent path execution on or off
    #[inline]
    #[must_use]
    pub fn with_concurrent_paths(mut self, concurrent: bool) -> Self {
        self.concurrent_paths = concurrent;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_result_rows: 1_000,
            concurrent_paths: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::new();
        assert_eq!(config.max_result_rows, 1_000);
        assert!(config.concurrent_paths);
    }

    #[test]
    fn builder_overrides() {
        let config = PipelineConfig::new()
            .with_max_result_rows(10)
            .with_concurrent_paths(false);
        assert_eq!(config.max_result_rows, 10);
        assert!(!config.concurrent_paths);
    }
}
