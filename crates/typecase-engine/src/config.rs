//! Engine Configuration

use std::time::Duration;

use typecase_net::detect::DEFAULT_POLL_INTERVAL;
use typecase_net::{LoaderConfig, TrackerConfig};
use typecase_text::NormalizerConfig;

/// Engine configuration options
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Load timeout and stylesheet endpoint
    pub tracker: TrackerConfig,

    /// Baseline family and measuring size
    pub normalizer: NormalizerConfig,

    /// HTTP client settings
    pub loader: LoaderConfig,

    /// How often the font database is checked for a pending family
    pub detect_poll_interval: Option<Duration>,
}

impl EngineConfig {
    pub fn tracker(mut self, tracker: TrackerConfig) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn loader(mut self, loader: LoaderConfig) -> Self {
        self.loader = loader;
        self
    }

    pub fn detect_poll_interval(mut self, interval: Duration) -> Self {
        self.detect_poll_interval = Some(interval);
        self
    }

    /// Shorthand for the tracker's load timeout
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.tracker = self.tracker.timeout(timeout);
        self
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.detect_poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL)
    }
}
