//! Build-Card Renderer
//!
//! Renders a fixed-layout 720x140 status card summarizing one player's
//! character build: level, stats, equipped artifacts, weapon, skill
//! levels, and a leaderboard rank. The input is a fully-enriched build
//! record; fetching and scoring happen upstream.
//!
//! # Pipeline
//!
//! - **Enrichment**: [`model::BuildRecord::enrich`] resolves every icon
//!   and label reference against an immutable [`assets::AssetRegistry`].
//! - **Render group**: the eight panels render concurrently on a bounded
//!   worker pool; two panels fan out again internally.
//! - **Compositor**: panels are pasted onto the background at fixed
//!   offsets, in a fixed order, on a single thread.
//! - **Cache gate**: [`cache::render_to_file_cached`] skips the whole
//!   render when the deterministic key already exists.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use buildcard::{AssetRegistry, BuildRecord, DirCache};
//!
//! # fn main() -> buildcard::Result<()> {
//! let registry = AssetRegistry::load(Path::new("assets/manifest.json"))?;
//! let record = BuildRecord::from_json(&std::fs::read_to_string("build.json")?)?;
//! let cache = DirCache::open(Path::new("ranking_images"))?;
//! let path = buildcard::cache::render_to_file_cached(&record, 0, &registry, &cache)?;
//! println!("card at {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod cache;
pub mod error;
pub mod model;
pub mod rendering;

pub use assets::AssetRegistry;
pub use cache::{CacheGate, DirCache};
pub use error::{Error, Result};
pub use model::{BuildRecord, EnrichedBuild};
pub use rendering::{encode_jpeg, render_card, save_png};
