//! Stylesheet fetching
//!
//! A browser fetches a `<link rel="stylesheet">` and then the font files it
//! references. `WebFontInstaller` does the same and registers the fonts with
//! the shared database, where detection and measurement will find them.

use smol::future::FutureExt;
use typecase_catalog::FontDescriptor;
use typecase_text::SharedFontDatabase;
use url::Url;

use crate::font_face::parse_font_faces;
use crate::loader::{Request, ResourceLoader};
use crate::{BoxFuture, NetError, Result};

/// Capability for requesting a family's stylesheet
pub trait StylesheetFetcher: Send + Sync + 'static {
    /// Fetch the stylesheet at `url` for `font`
    fn fetch(&self, url: Url, font: &FontDescriptor) -> BoxFuture<Result<()>>;
}

/// Downloads stylesheets and the font files they reference
#[derive(Debug, Clone)]
pub struct WebFontInstaller {
    loader: ResourceLoader,
    db: SharedFontDatabase,
}

impl WebFontInstaller {
    pub fn new(loader: ResourceLoader, db: SharedFontDatabase) -> Self {
        Self { loader, db }
    }

    /// Fetch, parse and install. Returns the number of faces registered.
    pub async fn install(&self, url: &Url, family: &str) -> Result<usize> {
        let css = self.loader.request(Request::stylesheet(url.as_str())).await?.text()?;

        let mut sources: Vec<Url> = Vec::new();
        for face in parse_font_faces(&css)? {
            for source in face.sources {
                match url.join(&source) {
                    Ok(resolved) if !sources.contains(&resolved) => sources.push(resolved),
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Skipping font source {} for {}: {}", source, family, e),
                }
            }
        }

        let mut installed = 0;
        for source in &sources {
            match self.loader.fetch(source.as_str()).await {
                Ok(response) => installed += register(&self.db, response.body)?,
                Err(e) => tracing::warn!("Font file {} for {} failed: {}", source, family, e),
            }
        }

        if installed == 0 {
            return Err(NetError::NoFontFaces(family.to_string()));
        }
        tracing::info!("Installed {} faces for {}", installed, family);
        Ok(installed)
    }
}

impl StylesheetFetcher for WebFontInstaller {
    fn fetch(&self, url: Url, font: &FontDescriptor) -> BoxFuture<Result<()>> {
        let installer = self.clone();
        let family = font.name.clone();
        async move { installer.install(&url, &family).await.map(|_| ()) }.boxed()
    }
}

fn register(db: &SharedFontDatabase, data: Vec<u8>) -> Result<usize> {
    let mut db = db.write().map_err(|_| NetError::Database)?;
    Ok(db.load_font_data(data))
}
