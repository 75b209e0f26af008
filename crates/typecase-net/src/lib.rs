//! Typecase Networking
//!
//! Web font delivery for previews:
//! - One stylesheet URL per family (`stylesheet`)
//! - HTTP fetching on smol's blocking pool (`loader`)
//! - `@font-face` extraction and font installation (`font_face`, `fetch`)
//! - Render detection against the shared font database (`detect`)
//! - Per-family load state tracking with timeouts (`tracker`)

pub mod stylesheet;
pub mod loader;
pub mod font_face;
pub mod fetch;
pub mod detect;
pub mod tracker;

use std::time::Duration;

pub use stylesheet::{StylesheetEndpoint, stylesheet_url};
pub use loader::{LoaderConfig, Request, ResourceLoader};
pub use font_face::{FontFaceRule, parse_font_faces};
pub use fetch::{StylesheetFetcher, WebFontInstaller};
pub use detect::{DatabaseDetector, RenderDetector};
pub use tracker::{FontLoadTracker, LoadEvent, LoadOutcome, LoadState, TrackerConfig};
pub use url::Url;

/// Boxed future returned by the fetch and detection capabilities
pub type BoxFuture<T> = smol::future::Boxed<T>;

/// HTTP Response
#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Check if response is OK (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get body as text
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone())
            .map_err(|e| NetError::Network(e.to_string()))
    }
}

/// Network error
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Stylesheet error: {0}")]
    Stylesheet(String),

    #[error("No usable font faces for {0}")]
    NoFontFaces(String),

    #[error("Font database unavailable")]
    Database,

    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, NetError>;
