//! Card rendering pipeline
//!
//! Fan-out/fan-in: the eight panel renders run on a bounded worker pool,
//! and only after every panel has joined does the single-threaded
//! compositor paste them onto the background at their fixed offsets. A
//! failed panel fails the card; a partial card is never produced.

pub mod canvas;
pub mod layout;
pub mod panels;
pub mod pool;

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::debug;

use crate::assets::AssetRegistry;
use crate::error::{Error, Result};
use crate::model::EnrichedBuild;
use crate::rendering::canvas::Canvas;
use crate::rendering::pool::Job;

/// Number of top-level panels in the render group.
const PANEL_COUNT: usize = 8;

/// Render the full 720x140 card for one enriched build.
pub fn render_card(build: &EnrichedBuild, registry: &AssetRegistry) -> Result<RgbaImage> {
    let character = &build.character;
    debug!(
        "rendering card for uid {} rank {} ({} artifacts)",
        build.uid,
        build.rank,
        character.artifacts.len()
    );

    let jobs: Vec<Job<'_>> = vec![
        Box::new(move || panels::background(&character.costume, registry)),
        Box::new(move || panels::full_status(character, registry)),
        Box::new(move || {
            panels::level_and_const(
                character.level,
                character.constellations,
                &character.costume,
                registry,
            )
        }),
        Box::new(move || panels::skill_block(&character.skills, registry)),
        Box::new(move || panels::artifact_list(character, registry)),
        Box::new(move || panels::total_score_panel(character, registry)),
        Box::new(move || panels::weapon_panel(&character.weapon, registry)),
        Box::new(move || panels::header_panel(build, registry)),
    ];
    debug_assert_eq!(jobs.len(), PANEL_COUNT);
    let rendered = pool::run_all(pool::default_workers(PANEL_COUNT), jobs)?;
    let rendered: [RgbaImage; PANEL_COUNT] = rendered
        .try_into()
        .map_err(|_| Error::Render("panel group size mismatch".into()))?;
    let [background, status, level, skill, artifacts, score, weapon, header] = rendered;

    // Compositing is single-threaded and order-fixed.
    let mut card = Canvas::from_image(background);
    card.paste(&status, layout::PASTE_STATUS.0, layout::PASTE_STATUS.1);
    card.paste(&level, layout::PASTE_LEVEL.0, layout::PASTE_LEVEL.1);
    card.paste(&skill, layout::PASTE_SKILL.0, layout::PASTE_SKILL.1);
    card.paste(&artifacts, layout::PASTE_ARTIFACTS.0, layout::PASTE_ARTIFACTS.1);
    card.paste(&score, layout::PASTE_SCORE.0, layout::PASTE_SCORE.1);
    card.paste(&weapon, layout::PASTE_WEAPON.0, layout::PASTE_WEAPON.1);
    card.paste(&header, layout::PASTE_HEADER.0, layout::PASTE_HEADER.1);
    Ok(card.into_image())
}

/// Encode the card as maximum-quality JPEG bytes (flattened to RGB).
pub fn encode_jpeg(card: &RgbaImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(card.clone()).to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut bytes), 100).encode_image(&rgb)?;
    Ok(bytes)
}

/// Write the card to `path` as an alpha-preserving PNG.
pub fn save_png(card: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    card.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
