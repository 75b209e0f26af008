//! Preview session tests
//!
//! Loading and measurement are faked: the detector renders a fixed set of
//! families and every family has a fixed per-character width.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use smol::future::FutureExt;
use typecase_engine::catalog::{
    Catalog, Category, Favorite, FontDescriptor, FontStyle, OrphanFavorites, Subcategory, ViewState,
};
use typecase_engine::net::{
    BoxFuture, FontLoadTracker, LoadState, RenderDetector, Result, StylesheetFetcher, TrackerConfig,
    Url,
};
use typecase_engine::text::{FontQuery, TextMeasurer, VisualNormalizer};
use typecase_engine::{PreviewSession, PreviewSettings, LOADING_OPACITY};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Clone, Default)]
struct CountingFetcher {
    requested: Arc<Mutex<Vec<String>>>,
}

impl StylesheetFetcher for CountingFetcher {
    fn fetch(&self, _url: Url, font: &FontDescriptor) -> BoxFuture<Result<()>> {
        self.requested.lock().unwrap().push(font.id.clone());
        async { Ok(()) }.boxed()
    }
}

struct FixedDetector {
    renders: HashSet<&'static str>,
}

impl RenderDetector for FixedDetector {
    fn detect(&self, family: &str, _weight: u16, _style: FontStyle) -> BoxFuture<Result<()>> {
        let renders = self.renders.contains(family);
        async move {
            if !renders {
                smol::future::pending::<()>().await;
            }
            Ok(())
        }
        .boxed()
    }
}

/// Width per character at 1px for the first family of each query
struct CharWidths {
    widths: HashMap<&'static str, f32>,
    calls: Arc<AtomicUsize>,
}

impl TextMeasurer for CharWidths {
    fn measure(&self, text: &str, query: &FontQuery, size: f32) -> Option<f32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let family = query.families.first()?;
        let width = self.widths.get(family.as_str())?;
        Some(width * text.chars().count() as f32 * size)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn catalog() -> Catalog {
    Catalog::new(vec![Category {
        id: "sans".into(),
        name: "Sans Serif".into(),
        subcategories: vec![
            Subcategory {
                id: "grotesque".into(),
                name: "Grotesque".into(),
                fonts: vec![
                    FontDescriptor::new("roboto", "Roboto", &[400, 700]),
                    FontDescriptor::new("wide", "Wide Sans", &[400]),
                    FontDescriptor::new("ghost", "Ghost Sans", &[400]).with_italic(),
                ],
            },
            Subcategory {
                id: "geometric".into(),
                name: "Geometric".into(),
                fonts: vec![FontDescriptor::new("inter", "Inter", &[100, 900]).variable()],
            },
        ],
    }])
}

fn session(fetcher: CountingFetcher) -> PreviewSession<CharWidths> {
    counted_session(fetcher, Arc::default())
}

fn counted_session(fetcher: CountingFetcher, calls: Arc<AtomicUsize>) -> PreviewSession<CharWidths> {
    let detector = FixedDetector {
        renders: ["Roboto", "Wide Sans", "Inter", "Lost Font"].into_iter().collect(),
    };
    let config = TrackerConfig::default().timeout(Duration::from_millis(100));
    let tracker = FontLoadTracker::with_config(fetcher, detector, config);
    let widths = CharWidths {
        widths: HashMap::from([
            ("Arial", 0.5),
            ("Roboto", 0.5),
            ("Wide Sans", 1.0),
            ("Inter", 0.4),
        ]),
        calls,
    };
    PreviewSession::new(tracker, VisualNormalizer::new(widths))
}

fn favorite(font_id: &str, font_name: &str) -> Favorite {
    Favorite {
        id: 1,
        user_id: "user-1".into(),
        font_id: font_id.into(),
        font_name: font_name.into(),
        weight: 400,
        line_height: 1.2,
        letter_spacing: 0.0,
        kind: None,
        created_at: 0,
    }
}

// ============================================================================
// Styles by load state
// ============================================================================

#[test]
fn test_unrequested_is_dimmed() {
    let mut session = session(CountingFetcher::default());
    let catalog = catalog();
    let font = catalog.font("roboto").unwrap();

    let style = session.style_for(font, &PreviewSettings::default());
    assert_eq!(session.state("roboto"), LoadState::Unrequested);
    assert_eq!(style.font_size, 36.0);
    assert_eq!(style.opacity, LOADING_OPACITY);
    assert!(!style.not_found);
}

#[test]
fn test_loaded_fonts_are_normalized() {
    let mut session = session(CountingFetcher::default());
    let catalog = catalog();
    session.update(&catalog, &ViewState::new(), &[]);
    smol::block_on(session.settle());

    let settings = PreviewSettings::default();

    let roboto = session.style_for(catalog.font("roboto").unwrap(), &settings);
    assert!((roboto.font_size - 36.0).abs() < 1e-3);
    assert_eq!(roboto.opacity, 1.0);

    let wide = session.style_for(catalog.font("wide").unwrap(), &settings);
    assert!((wide.font_size - 18.0).abs() < 1e-3);
    assert!(wide.is_confirmed());
    assert_eq!(wide.family, "Wide Sans");
}

#[test]
fn test_failed_fonts_are_flagged() {
    let mut session = session(CountingFetcher::default());
    let catalog = catalog();
    session.update(&catalog, &ViewState::new(), &[]);
    smol::block_on(session.settle());

    let style = session.style_for(catalog.font("ghost").unwrap(), &PreviewSettings::default());
    assert_eq!(session.state("ghost"), LoadState::Failed);
    assert_eq!(style.font_size, 36.0);
    assert_eq!(style.opacity, LOADING_OPACITY);
    assert!(style.not_found);
}

#[test]
fn test_weight_and_style_resolution() {
    let mut session = session(CountingFetcher::default());
    let catalog = catalog();

    let settings = PreviewSettings::default().weight(600).italic(true);
    let roboto = session.style_for(catalog.font("roboto").unwrap(), &settings);
    assert_eq!(roboto.weight, 700);
    assert_eq!(roboto.style, FontStyle::Normal);

    let ghost = session.style_for(catalog.font("ghost").unwrap(), &settings);
    assert_eq!(ghost.style, FontStyle::Italic);

    let inter = session.style_for(catalog.font("inter").unwrap(), &settings);
    assert_eq!(inter.weight, 600);
}

#[test]
fn test_target_width() {
    let session = session(CountingFetcher::default());
    let settings = PreviewSettings::default().reference_text("abcd").nominal_size(10.0);
    assert!((session.target_width(&settings) - 20.0).abs() < 1e-3);
}

// ============================================================================
// View updates
// ============================================================================

#[test]
fn test_update_requests_each_family_once() {
    let fetcher = CountingFetcher::default();
    let mut session = session(fetcher.clone());
    let catalog = catalog();

    let grotesque = ViewState::new().select("grotesque");
    assert_eq!(session.update(&catalog, &grotesque, &[]), 3);
    assert_eq!(session.update(&catalog, &grotesque, &[]), 0);

    let hovering = grotesque.clone().hover(Some("geometric"));
    assert_eq!(session.update(&catalog, &hovering, &[]), 1);
    assert_eq!(session.update(&catalog, &grotesque, &[]), 0);

    smol::block_on(session.settle());
    assert_eq!(fetcher.requested.lock().unwrap().len(), 4);
}

#[test]
fn test_orphan_favorites_policy() {
    let catalog = catalog();
    let lost = favorite("lost", "Lost Font");

    let mut requesting = session(CountingFetcher::default());
    requesting.update(&catalog, &ViewState::new().select("geometric"), &[&lost]);
    smol::block_on(requesting.settle());
    assert_eq!(requesting.state("lost"), LoadState::Loaded);

    let mut hiding = session(CountingFetcher::default());
    let view = ViewState::new()
        .select("geometric")
        .orphan_favorites(OrphanFavorites::Hide);
    hiding.update(&catalog, &view, &[&lost]);
    assert_eq!(hiding.state("lost"), LoadState::Unrequested);
}

#[test]
fn test_style_applies_finished_loads() {
    let mut session = session(CountingFetcher::default());
    let catalog = catalog();
    session.update(&catalog, &ViewState::new().select("geometric"), &[]);

    smol::block_on(smol::Timer::after(Duration::from_millis(50)));
    let style = session.style_for(catalog.font("inter").unwrap(), &PreviewSettings::default());
    assert!(style.is_confirmed());
    assert_eq!(session.state("inter"), LoadState::Loaded);
    assert_eq!(session.tracker().pending_count(), 0);
}

// ============================================================================
// Scale cache
// ============================================================================

#[test]
fn test_scales_are_cached_per_reference_text() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut session = counted_session(CountingFetcher::default(), calls.clone());
    let catalog = catalog();
    let roboto = catalog.font("roboto").unwrap();
    session.update(&catalog, &ViewState::new(), &[]);
    smol::block_on(session.settle());

    let first = PreviewSettings::default().reference_text("first");
    session.style_for(roboto, &first);
    let measured = calls.load(Ordering::SeqCst);
    assert!(measured > 0);

    // Same text and font: served from the cache
    session.style_for(roboto, &first);
    assert_eq!(calls.load(Ordering::SeqCst), measured);

    // New text drops every cached scale
    let second = PreviewSettings::default().reference_text("second");
    let wide = session.style_for(catalog.font("wide").unwrap(), &second);
    assert!((wide.font_size - 18.0).abs() < 1e-3);
    let after_second = calls.load(Ordering::SeqCst);
    assert!(after_second > measured);

    let again = session.style_for(roboto, &first);
    assert!(calls.load(Ordering::SeqCst) > after_second);
    assert!((again.font_size - 36.0).abs() < 1e-3);
}
