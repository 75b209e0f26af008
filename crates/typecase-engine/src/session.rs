//! Preview session
//!
//! Ties the view to font loading and normalization: every view update hands
//! the required families to the tracker, and styles are computed from each
//! family's load state.

use typecase_catalog::{Catalog, Favorite, FontDescriptor, FontStyle, ViewState, required_fonts};
use typecase_net::{
    DatabaseDetector, FontLoadTracker, LoadState, ResourceLoader, WebFontInstaller,
};
use typecase_text::{
    NormalizationRequest, ScaleCache, ShapingMeasurer, SharedFontDatabase, TextMeasurer,
    VisualNormalizer,
};

use crate::preview::{PreviewSettings, PreviewStyle, LOADING_OPACITY};
use crate::{EngineConfig, Result};

/// Load tracking and normalization for one browsing session
#[derive(Debug)]
pub struct PreviewSession<M> {
    tracker: FontLoadTracker,
    normalizer: VisualNormalizer<M>,
    scales: ScaleCache,
    /// Reference text the cached scales were measured over
    scaled_text: String,
}

impl PreviewSession<ShapingMeasurer> {
    /// Session that installs web fonts into `db` and measures with them
    pub fn with_web_fonts(db: SharedFontDatabase, config: EngineConfig) -> Result<Self> {
        tracing::info!("Typecase engine {} starting", crate::VERSION);

        let loader = ResourceLoader::with_config(config.loader.clone())?;
        let installer = WebFontInstaller::new(loader, db.clone());
        let detector = DatabaseDetector::new(db.clone()).poll_interval(config.poll_interval());
        let tracker = FontLoadTracker::with_config(installer, detector, config.tracker);
        let normalizer = VisualNormalizer::with_config(ShapingMeasurer::new(db), config.normalizer);

        Ok(Self::new(tracker, normalizer))
    }
}

impl<M: TextMeasurer> PreviewSession<M> {
    pub fn new(tracker: FontLoadTracker, normalizer: VisualNormalizer<M>) -> Self {
        Self {
            tracker,
            normalizer,
            scales: ScaleCache::new(),
            scaled_text: String::new(),
        }
    }

    /// Request the families the view needs. Returns how many were new.
    pub fn update(&mut self, catalog: &Catalog, view: &ViewState, favorites: &[&Favorite]) -> usize {
        let fonts = required_fonts(catalog, view, favorites);
        self.request(&fonts)
    }

    /// Request specific families
    pub fn request(&mut self, fonts: &[FontDescriptor]) -> usize {
        let issued = self.tracker.request(fonts);
        if issued > 0 {
            tracing::debug!("Requested {} new families ({} pending)", issued, self.tracker.pending_count());
        }
        issued
    }

    /// Wait until every requested family has loaded or failed
    pub async fn settle(&mut self) {
        self.tracker.settle().await;
    }

    pub fn state(&self, font_id: &str) -> LoadState {
        self.tracker.state(font_id)
    }

    pub fn tracker(&self) -> &FontLoadTracker {
        &self.tracker
    }

    pub fn normalizer(&self) -> &VisualNormalizer<M> {
        &self.normalizer
    }

    /// Style for previewing `font` with `settings`. Loads that finished
    /// since the last call are applied first.
    ///
    /// Only loaded families are normalized; measuring anything else would
    /// measure the fallback face.
    pub fn style_for(&mut self, font: &FontDescriptor, settings: &PreviewSettings) -> PreviewStyle {
        self.tracker.apply_completed();
        let weight = font.render_weight(settings.weight);
        let style = if settings.italic && font.has_italic() {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        };

        let state = self.tracker.state(&font.id);
        let (font_size, opacity) = match state {
            LoadState::Loaded => {
                // Scales only hold for the text they were measured over
                if self.scaled_text != settings.reference_text {
                    self.scales.clear();
                    self.scaled_text.clone_from(&settings.reference_text);
                }
                let request = NormalizationRequest::new(&font.name, &settings.reference_text)
                    .weight(weight)
                    .style(style);
                let scale = self.scales.get_or_measure(&self.normalizer, &request);
                (settings.nominal_size * scale, 1.0)
            }
            LoadState::Pending | LoadState::Unrequested | LoadState::Failed => {
                (settings.nominal_size, LOADING_OPACITY)
            }
        };

        PreviewStyle {
            family: font.name.clone(),
            fallback: settings.fallback_family(),
            weight,
            style,
            font_size,
            letter_spacing: settings.letter_spacing,
            line_height: settings.line_height,
            opacity,
            not_found: state == LoadState::Failed,
        }
    }

    /// Width of the reference text in the baseline family at the nominal
    /// size, the width every loaded preview is scaled to
    pub fn target_width(&self, settings: &PreviewSettings) -> f32 {
        self.normalizer.reference_width(&settings.reference_text, settings.nominal_size)
    }
}
