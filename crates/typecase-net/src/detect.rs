//! Render detection
//!
//! A family counts as rendered once a face for it can be resolved by name.
//! Detection never gives up on its own; the tracker bounds it with a timeout.

use std::time::Duration;

use smol::future::FutureExt;
use smol::Timer;
use typecase_text::{FontStyle, SharedFontDatabase};

use crate::{BoxFuture, NetError, Result};

/// Default interval between database checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Capability for observing that a family renders
pub trait RenderDetector: Send + Sync + 'static {
    /// Resolves once `family` at `weight` and `style` is usable
    fn detect(&self, family: &str, weight: u16, style: FontStyle) -> BoxFuture<Result<()>>;
}

/// Polls the shared font database for the family
#[derive(Debug, Clone)]
pub struct DatabaseDetector {
    db: SharedFontDatabase,
    poll_interval: Duration,
}

impl DatabaseDetector {
    pub fn new(db: SharedFontDatabase) -> Self {
        Self {
            db,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn is_available(&self, family: &str, style: FontStyle) -> Result<bool> {
        let db = self.db.read().map_err(|_| NetError::Database)?;
        Ok(db.has_face(family, style))
    }
}

impl RenderDetector for DatabaseDetector {
    fn detect(&self, family: &str, weight: u16, style: FontStyle) -> BoxFuture<Result<()>> {
        let detector = self.clone();
        let family = family.to_string();
        async move {
            loop {
                if detector.is_available(&family, style)? {
                    tracing::debug!("Detected {} ({} {})", family, weight, style.as_str());
                    return Ok(());
                }
                Timer::after(detector.poll_interval).await;
            }
        }
        .boxed()
    }
}
