//! Visual size normalization
//!
//! Typefaces with the same nominal size can differ a lot in how big they
//! look. The normalizer measures a reference string in the target family and
//! in a baseline family (Arial) at a fixed measuring size, and scales the
//! requested size by `baseline_width / target_width` so the string covers
//! the same width in both.
//!
//! Example: if Arial sets "Hello" 100px wide and the target sets it 125px
//! wide, the scale is 0.8 and a nominal 32px becomes 25.6px.

use std::collections::HashMap;

use typecase_catalog::FontStyle;

use crate::matching::{resolve_generic_family, FontQuery};
use crate::measure::TextMeasurer;

/// Measuring size large enough that rounding is negligible
pub const DEFAULT_MEASURE_SIZE: f32 = 48.0;

/// Normalizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    /// Family every other family is matched against
    pub baseline_family: String,
    /// Font size used for both measurements
    pub measure_size: f32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            baseline_family: "Arial".into(),
            measure_size: DEFAULT_MEASURE_SIZE,
        }
    }
}

impl NormalizerConfig {
    pub fn baseline_family(mut self, family: &str) -> Self {
        self.baseline_family = family.to_string();
        self
    }

    pub fn measure_size(mut self, size: f32) -> Self {
        self.measure_size = size;
        self
    }
}

/// What to normalize: a family at a weight and style, over a reference text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizationRequest {
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
    pub reference_text: String,
}

impl NormalizationRequest {
    pub fn new(family: &str, reference_text: &str) -> Self {
        Self {
            family: family.to_string(),
            weight: 400,
            style: FontStyle::Normal,
            reference_text: reference_text.to_string(),
        }
    }

    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

/// Computes font-size multipliers that equalize rendered widths
#[derive(Debug, Clone)]
pub struct VisualNormalizer<M> {
    measurer: M,
    config: NormalizerConfig,
}

impl<M: TextMeasurer> VisualNormalizer<M> {
    pub fn new(measurer: M) -> Self {
        Self::with_config(measurer, NormalizerConfig::default())
    }

    pub fn with_config(measurer: M, config: NormalizerConfig) -> Self {
        Self { measurer, config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Multiplier for the nominal size. 1.0 whenever either width is
    /// unavailable or the target width is not a positive finite number.
    pub fn scale(&self, request: &NormalizationRequest) -> f32 {
        let size = self.config.measure_size;
        let text = request.reference_text.as_str();

        let target = FontQuery::with_fallback(&request.family)
            .weight(request.weight)
            .style(request.style);
        let baseline = self.baseline_query()
            .weight(request.weight)
            .style(request.style);

        let Some(target_width) = self.measurer.measure(text, &target, size) else {
            return 1.0;
        };
        if !(target_width.is_finite() && target_width > 0.0) {
            return 1.0;
        }
        let Some(baseline_width) = self.measurer.measure(text, &baseline, size) else {
            return 1.0;
        };

        let scale = baseline_width / target_width;
        if scale.is_finite() && scale > 0.0 {
            tracing::trace!(
                "Scale for {} {} {}: {:.4}",
                request.family,
                request.weight,
                request.style.as_str(),
                scale
            );
            scale
        } else {
            1.0
        }
    }

    /// Nominal size multiplied by the scale
    pub fn normalized_size(&self, request: &NormalizationRequest, nominal_size: f32) -> f32 {
        nominal_size * self.scale(request)
    }

    /// Width of `text` in the baseline family at weight 400, or 0.0 when it
    /// cannot be measured
    pub fn reference_width(&self, text: &str, size: f32) -> f32 {
        self.measurer
            .measure(text, &self.baseline_query(), size)
            .filter(|w| w.is_finite())
            .unwrap_or(0.0)
    }

    fn baseline_query(&self) -> FontQuery {
        let baseline = self.config.baseline_family.as_str();
        let mut families = vec![baseline];
        families.extend(resolve_generic_family(baseline).iter().copied());
        families.push("sans-serif");
        FontQuery::new(&families)
    }
}

/// Memoized scales keyed by the full normalization request
#[derive(Debug, Default)]
pub struct ScaleCache {
    scales: HashMap<NormalizationRequest, f32>,
}

impl ScaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_measure<M: TextMeasurer>(
        &mut self,
        normalizer: &VisualNormalizer<M>,
        request: &NormalizationRequest,
    ) -> f32 {
        if let Some(scale) = self.scales.get(request) {
            return *scale;
        }
        let scale = normalizer.scale(request);
        self.scales.insert(request.clone(), scale);
        scale
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn clear(&mut self) {
        self.scales.clear();
    }
}
