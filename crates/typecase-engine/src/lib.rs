//! Typecase Engine
//!
//! Font previews whose sizes are normalized to a common visual width, with
//! web fonts loaded on demand as the view changes.
//!
//! # Example
//! ```rust,ignore
//! use typecase_engine::{EngineConfig, PreviewSession, PreviewSettings};
//! use typecase_engine::text::FontDatabase;
//!
//! let db = FontDatabase::with_system_fonts().into_shared();
//! let mut session = PreviewSession::with_web_fonts(db, EngineConfig::default())?;
//! session.update(&catalog, &view, &favorites);
//! smol::block_on(session.settle());
//! let style = session.style_for(&font, &PreviewSettings::default());
//! ```

mod config;
mod preview;
mod session;

pub use config::EngineConfig;
pub use preview::{PreviewSettings, PreviewStyle, LOADING_OPACITY};
pub use session::PreviewSession;

// Re-export sub-crates for advanced usage
pub use typecase_catalog as catalog;
pub use typecase_text as text;
pub use typecase_net as net;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    Network(#[from] typecase_net::NetError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
