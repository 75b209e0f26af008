//! Font load tracking
//!
//! Each family moves `Unrequested -> Pending -> Loaded | Failed` exactly once
//! per tracker. Requesting a family spawns one detached task that fetches its
//! stylesheet and waits for render detection, bounded by a timeout. Tasks only
//! report back over a channel; the tracker owns the state sets and applies the
//! reports itself.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use smol::channel::{self, Receiver, Sender};
use smol::Timer;
use typecase_catalog::{FontDescriptor, FontStyle};

use crate::detect::RenderDetector;
use crate::fetch::StylesheetFetcher;
use crate::stylesheet::{StylesheetEndpoint, stylesheet_url};
use crate::{NetError, Result};

/// Default bound on fetch plus detection
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Load state of one family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    Unrequested,
    Pending,
    Loaded,
    Failed,
}

impl LoadState {
    /// Loaded or failed
    pub fn is_resolved(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed)
    }
}

/// How a pending family resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
}

/// Completion report sent by a load task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEvent {
    pub font_id: String,
    pub outcome: LoadOutcome,
}

/// Tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Bound on fetch plus detection per family
    pub timeout: Duration,
    /// Where stylesheets are requested from
    pub endpoint: StylesheetEndpoint,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_LOAD_TIMEOUT,
            endpoint: StylesheetEndpoint::default(),
        }
    }
}

impl TrackerConfig {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(mut self, endpoint: StylesheetEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }
}

/// Per-session font load tracker
pub struct FontLoadTracker {
    fetcher: Arc<dyn StylesheetFetcher>,
    detector: Arc<dyn RenderDetector>,
    config: TrackerConfig,
    requested: HashSet<String>,
    loaded: HashSet<String>,
    failed: HashSet<String>,
    events_tx: Sender<LoadEvent>,
    events_rx: Receiver<LoadEvent>,
}

impl FontLoadTracker {
    pub fn new(fetcher: impl StylesheetFetcher, detector: impl RenderDetector) -> Self {
        Self::with_config(fetcher, detector, TrackerConfig::default())
    }

    pub fn with_config(
        fetcher: impl StylesheetFetcher,
        detector: impl RenderDetector,
        config: TrackerConfig,
    ) -> Self {
        let (events_tx, events_rx) = channel::unbounded();
        Self {
            fetcher: Arc::new(fetcher),
            detector: Arc::new(detector),
            config,
            requested: HashSet::new(),
            loaded: HashSet::new(),
            failed: HashSet::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Request every family in `fonts` not requested before.
    ///
    /// Safe to call with each new view; returns how many families were newly
    /// requested. Completed loads are applied first.
    pub fn request(&mut self, fonts: &[FontDescriptor]) -> usize {
        self.apply_completed();

        let mut issued = 0;
        for font in fonts {
            if !self.requested.insert(font.id.clone()) {
                continue;
            }
            issued += 1;

            match stylesheet_url(font, &self.config.endpoint) {
                Ok(url) => {
                    tracing::debug!("{} -> pending ({})", font.id, url);
                    self.spawn_load(font.clone(), url);
                }
                Err(e) => {
                    tracing::warn!("Cannot build stylesheet URL for {}: {}", font.name, e);
                    self.apply(LoadEvent {
                        font_id: font.id.clone(),
                        outcome: LoadOutcome::Failed,
                    });
                }
            }
        }
        issued
    }

    fn spawn_load(&self, font: FontDescriptor, url: url::Url) {
        let fetcher = Arc::clone(&self.fetcher);
        let detector = Arc::clone(&self.detector);
        let events = self.events_tx.clone();
        let timeout = self.config.timeout;

        smol::spawn(async move {
            let outcome = match load_family(fetcher, detector, url, &font, timeout).await {
                Ok(()) => LoadOutcome::Loaded,
                Err(e) => {
                    tracing::warn!("Font {} failed to load: {}", font.name, e);
                    LoadOutcome::Failed
                }
            };
            // Tracker dropped: nobody is listening
            let _ = events.send(LoadEvent { font_id: font.id, outcome }).await;
        })
        .detach();
    }

    /// Apply every completion already reported, without waiting
    pub fn apply_completed(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next family to resolve. `None` when nothing is pending.
    pub async fn next_resolution(&mut self) -> Option<LoadEvent> {
        if self.pending_count() == 0 {
            return None;
        }
        let event = self.events_rx.recv().await.ok()?;
        self.apply(event.clone());
        Some(event)
    }

    /// Wait until every requested family has resolved
    pub async fn settle(&mut self) {
        while self.next_resolution().await.is_some() {}
    }

    fn apply(&mut self, event: LoadEvent) {
        if !self.requested.contains(&event.font_id) || self.state(&event.font_id).is_resolved() {
            return;
        }
        match event.outcome {
            LoadOutcome::Loaded => {
                tracing::debug!("{} -> loaded", event.font_id);
                self.loaded.insert(event.font_id);
            }
            LoadOutcome::Failed => {
                tracing::debug!("{} -> failed", event.font_id);
                self.failed.insert(event.font_id);
            }
        }
    }

    pub fn state(&self, font_id: &str) -> LoadState {
        if self.loaded.contains(font_id) {
            LoadState::Loaded
        } else if self.failed.contains(font_id) {
            LoadState::Failed
        } else if self.requested.contains(font_id) {
            LoadState::Pending
        } else {
            LoadState::Unrequested
        }
    }

    /// Families confirmed renderable
    pub fn loaded(&self) -> &HashSet<String> {
        &self.loaded
    }

    /// Families that failed or timed out
    pub fn failed(&self) -> &HashSet<String> {
        &self.failed
    }

    pub fn requested_count(&self) -> usize {
        self.requested.len()
    }

    pub fn pending_count(&self) -> usize {
        self.requested.len() - self.loaded.len() - self.failed.len()
    }
}

impl std::fmt::Debug for FontLoadTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLoadTracker")
            .field("config", &self.config)
            .field("requested", &self.requested.len())
            .field("loaded", &self.loaded.len())
            .field("failed", &self.failed.len())
            .finish()
    }
}

/// Fetch then detect, both under one timeout. A fetch error is only logged:
/// the family may still be available locally.
async fn load_family(
    fetcher: Arc<dyn StylesheetFetcher>,
    detector: Arc<dyn RenderDetector>,
    url: url::Url,
    font: &FontDescriptor,
    timeout: Duration,
) -> Result<()> {
    let load = async {
        if let Err(e) = fetcher.fetch(url, font).await {
            tracing::warn!("Stylesheet for {} failed: {}", font.name, e);
        }
        detector
            .detect(&font.name, font.representative_weight(), FontStyle::Normal)
            .await
    };
    let expire = async {
        Timer::after(timeout).await;
        Err(NetError::Timeout(timeout))
    };
    smol::future::or(load, expire).await
}
