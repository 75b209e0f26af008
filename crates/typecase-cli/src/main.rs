//! Typecase command line
//!
//! Inspect and edit a font catalog, manage favorites, and load families from
//! the upstream font API to preview their normalized sizes.
//!
//! # Usage
//!
//! ```bash
//! typecase url roboto
//! typecase load --subcategory geometric --timeout-ms 5000
//! typecase normalize inter --size 48 --weight 700
//! typecase normalize inter --font-file ./Inter.ttf
//! typecase move --category "Sans Serif" --subcategory Geometric Inter Manrope
//! typecase favorites --user alice add roboto --weight 700
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use typecase_engine::catalog::{
    Catalog, FavoriteKey, FavoritesStore, FontDescriptor, NewFavorite, PreviewKind, UserIdentity,
    ViewState,
};
use typecase_engine::net::{TrackerConfig, stylesheet_url};
use typecase_engine::text::FontDatabase;
use typecase_engine::{EngineConfig, PreviewSession, PreviewSettings};

/// Preview and manage a font catalog
#[derive(Parser, Debug)]
#[command(name = "typecase", author, version, about, long_about = None)]
struct Cli {
    /// Catalog document
    #[arg(long, global = true, default_value = "fonts.json")]
    catalog: PathBuf,

    /// Favorites document
    #[arg(long, global = true, default_value = "favorites.json")]
    favorites: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the stylesheet URL for a font
    Url {
        /// Font id or name
        font: String,
    },

    /// Load a subcategory's families and report which rendered
    Load {
        /// Subcategory id (defaults to the first one)
        #[arg(long)]
        subcategory: Option<String>,

        /// Search instead of listing a subcategory
        #[arg(long)]
        search: Option<String>,

        /// Also load this user's favorites
        #[arg(long)]
        user: Option<String>,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Load one family and print its normalized preview size
    Normalize {
        /// Font id or name
        font: String,

        /// Reference text (defaults to the preview kind's sample)
        #[arg(long)]
        text: Option<String>,

        /// Nominal size in pixels
        #[arg(long)]
        size: Option<f32>,

        #[arg(long, default_value_t = 400)]
        weight: u16,

        #[arg(long)]
        italic: bool,

        /// heading, paragraph or code
        #[arg(long, default_value = "heading")]
        kind: PreviewKind,

        #[command(flatten)]
        load: LoadArgs,
    },

    /// Move fonts into a subcategory
    Move {
        /// Target category name
        #[arg(long)]
        category: String,

        /// Target subcategory name
        #[arg(long)]
        subcategory: String,

        /// Font names, in the order they should be appended
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove fonts from the catalog
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Manage favorites
    Favorites {
        /// User subject; without it nothing is listed and edits are refused
        #[arg(long)]
        user: Option<String>,

        #[command(subcommand)]
        cmd: FavoritesCommand,
    },
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Per-family load timeout
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Extra font file to register before loading (repeatable)
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    List,
    Add(FavoriteArgs),
    Remove(FavoriteArgs),
}

#[derive(Args, Debug)]
struct FavoriteArgs {
    /// Font id or name
    font: String,

    #[arg(long, default_value_t = 400)]
    weight: u16,

    #[arg(long, default_value_t = 1.2)]
    line_height: f32,

    /// In em
    #[arg(long, default_value_t = 0.0)]
    letter_spacing: f32,

    #[arg(long, default_value = "heading")]
    kind: PreviewKind,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Url { font } => {
            let catalog = load_catalog(&cli.catalog)?;
            let font = find_font(&catalog, &font)?;
            let url = stylesheet_url(font, &Default::default())?;
            println!("{url}");
        }
        Command::Load { subcategory, search, user, load } => {
            let catalog = load_catalog(&cli.catalog)?;
            let favorites = open_favorites(&cli.favorites)?;
            let identity = user.as_deref().map(UserIdentity::new);

            let mut view = ViewState::new();
            if let Some(id) = &subcategory {
                catalog.subcategory(id).ok_or_else(|| anyhow!("unknown subcategory: {id}"))?;
                view = view.select(id);
            }
            if let Some(query) = &search {
                view = view.search(query);
            }

            let mut session = web_session(&load)?;
            let requested = session.update(&catalog, &view, &favorites.list(identity.as_ref()));
            tracing::info!("Loading {} families", requested);
            smol::block_on(session.settle());

            print_set("loaded", session.tracker().loaded().iter());
            print_set("failed", session.tracker().failed().iter());
        }
        Command::Normalize { font, text, size, weight, italic, kind, load } => {
            let catalog = load_catalog(&cli.catalog)?;
            let font = find_font(&catalog, &font)?;

            let mut settings = PreviewSettings::for_kind(kind).weight(weight).italic(italic);
            if let Some(text) = &text {
                settings = settings.reference_text(text);
            }
            if let Some(size) = size {
                settings = settings.nominal_size(size);
            }

            let mut session = web_session(&load)?;
            session.request(std::slice::from_ref(font));
            smol::block_on(session.settle());

            let style = session.style_for(font, &settings);
            if style.not_found {
                tracing::warn!("{} did not load; showing the nominal size", font.name);
            }
            println!("state:  {:?}", session.state(&font.id));
            println!("scale:  {:.4}", style.font_size / settings.nominal_size);
            println!("size:   {:.2}px", style.font_size);
            println!("target: {:.2}px", session.target_width(&settings));
            println!("css:    {}", style.to_css());
        }
        Command::Move { category, subcategory, names } => {
            let mut catalog = load_catalog(&cli.catalog)?;
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            catalog.move_fonts(&category, &subcategory, &names)?;
            save_catalog(&catalog, &cli.catalog)?;
            println!("Moved {} fonts to {} / {}", names.len(), category, subcategory);
        }
        Command::Remove { names } => {
            let mut catalog = load_catalog(&cli.catalog)?;
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let removed = catalog.remove_fonts(&names)?;
            save_catalog(&catalog, &cli.catalog)?;
            println!("Removed {removed} entries");
        }
        Command::Favorites { user, cmd } => {
            let mut favorites = open_favorites(&cli.favorites)?;
            let identity = user.as_deref().map(UserIdentity::new);
            run_favorites(&cli.catalog, &mut favorites, identity.as_ref(), cmd)?;
        }
    }

    Ok(())
}

fn run_favorites(
    catalog_path: &Path,
    favorites: &mut FavoritesStore,
    identity: Option<&UserIdentity>,
    cmd: FavoritesCommand,
) -> Result<()> {
    match cmd {
        FavoritesCommand::List => {
            for favorite in favorites.list(identity) {
                println!(
                    "{}\t{}\t{}\t{}\t{}em\t{}",
                    favorite.id,
                    favorite.font_name,
                    favorite.weight,
                    favorite.line_height,
                    favorite.letter_spacing,
                    favorite.kind.map(|k| k.as_str()).unwrap_or("-"),
                );
            }
        }
        FavoritesCommand::Add(args) => {
            let catalog = load_catalog(catalog_path)?;
            let font = find_font(&catalog, &args.font)?;
            let id = favorites.add(identity, NewFavorite {
                key: favorite_key(font, &args),
                font_name: font.name.clone(),
            })?;
            println!("{id}");
        }
        FavoritesCommand::Remove(args) => {
            // Favorites may outlive their catalog entry
            let font_id = load_catalog(catalog_path)
                .ok()
                .and_then(|catalog| find_font(&catalog, &args.font).ok().map(|f| f.id.clone()))
                .unwrap_or_else(|| args.font.clone());
            let key = FavoriteKey { font_id, ..favorite_key_values(&args) };
            if !favorites.remove(identity, &key)? {
                println!("No matching favorite");
            }
        }
    }
    Ok(())
}

fn favorite_key(font: &FontDescriptor, args: &FavoriteArgs) -> FavoriteKey {
    FavoriteKey {
        font_id: font.id.clone(),
        ..favorite_key_values(args)
    }
}

fn favorite_key_values(args: &FavoriteArgs) -> FavoriteKey {
    FavoriteKey {
        font_id: String::new(),
        weight: args.weight,
        line_height: args.line_height,
        letter_spacing: args.letter_spacing,
        kind: args.kind,
    }
}

fn web_session(load: &LoadArgs) -> Result<PreviewSession<typecase_engine::text::ShapingMeasurer>> {
    let mut db = FontDatabase::with_system_fonts();
    for path in &load.font_files {
        db.load_font_file(path).with_context(|| format!("reading font {}", path.display()))?;
    }
    let db = db.into_shared();
    let config = EngineConfig::default()
        .tracker(TrackerConfig::default().timeout(Duration::from_millis(load.timeout_ms)));
    Ok(PreviewSession::with_web_fonts(db, config)?)
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("reading catalog {}", path.display()))
}

fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    catalog.save(path).with_context(|| format!("writing catalog {}", path.display()))
}

fn open_favorites(path: &Path) -> Result<FavoritesStore> {
    FavoritesStore::open(path.to_path_buf())
        .with_context(|| format!("reading favorites {}", path.display()))
}

fn find_font<'a>(catalog: &'a Catalog, id_or_name: &str) -> Result<&'a FontDescriptor> {
    catalog
        .font(id_or_name)
        .or_else(|| catalog.font_by_name(id_or_name))
        .ok_or_else(|| anyhow!("font not found: {id_or_name}"))
}

fn print_set<'a>(label: &str, ids: impl Iterator<Item = &'a String>) {
    let mut ids: Vec<&String> = ids.collect();
    ids.sort();
    println!("{label} ({}):", ids.len());
    for id in ids {
        println!("  {id}");
    }
}
