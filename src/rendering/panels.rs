//! The eight card panels
//!
//! Every renderer is a pure function from a slice of the enriched build
//! (plus the shared registry) to a standalone RGBA buffer; no panel reads
//! another panel's output. Unresolved identifiers fail the panel, and the
//! render group turns that into a failed card. Absent optional data
//! (missing artifact slot, weapon without a sub-stat) renders as a blank
//! placeholder instead.

use image::{Rgba, RgbaImage};

use crate::assets::{AssetRegistry, StatusIcon};
use crate::error::{Error, Result};
use crate::model::{
    elemental_damage_label, ArtifactSlot, CostumePaths, EnrichedArtifact, EnrichedBuild,
    EnrichedCharacter, EnrichedWeapon, Skill,
};
use crate::rendering::canvas::{self, Canvas, TextAnchor, GRAY, WHITE};
use crate::rendering::layout;
use crate::rendering::pool::{self, Job};

/// Display tokens for character constellation counts 0 through 6.
pub const CONSTELLATION_TOKENS: [&str; 7] = ["無", "1", "2", "3", "4", "5", "完"];

/// Display tokens for weapon refinement ranks 0 through 5. One entry
/// shorter than the character table: refinement caps at 5.
pub const REFINEMENT_TOKENS: [&str; 6] = ["無", "1", "2", "3", "4", "完"];

/// Header bar color per character element.
pub fn element_color(element: &str) -> Result<Rgba<u8>> {
    let rgb = match element {
        "Electric" => (144, 89, 181),
        "Fire" => (209, 89, 73),
        "Grass" => (75, 150, 52),
        "Ice" => (60, 145, 187),
        "Rock" => (167, 120, 26),
        "Water" => (53, 89, 166),
        "Wind" => (84, 157, 118),
        _ => return Err(Error::UnknownElement(element.to_string())),
    };
    Ok(Rgba([rgb.0, rgb.1, rgb.2, 255]))
}

pub fn constellation_token(constellations: u32) -> Result<&'static str> {
    CONSTELLATION_TOKENS
        .get(constellations as usize)
        .copied()
        .ok_or_else(|| Error::Render(format!("constellation count out of range: {constellations}")))
}

pub fn refinement_token(rank: u32) -> Result<&'static str> {
    REFINEMENT_TOKENS
        .get(rank as usize)
        .copied()
        .ok_or_else(|| Error::Render(format!("refinement rank out of range: {rank}")))
}

/// Skill levels joined for display: `level + add_level`, `" / "`-separated,
/// in list order.
pub fn skill_levels_text(skills: &[Skill]) -> String {
    skills
        .iter()
        .map(|s| (s.level + s.add_level).to_string())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Sum of all present artifact scores, rounded to one decimal place.
pub fn total_score<'a, I>(artifacts: I) -> f64
where
    I: IntoIterator<Item = &'a EnrichedArtifact>,
{
    let sum: f64 = artifacts.into_iter().map(|a| a.score).sum();
    (sum * 10.0).round() / 10.0
}

/// Background panel: splash art dimmed to 30%, the avatar thumbnail, and
/// the shadow overlay, on the 720x140 base canvas.
pub fn background(costume: &CostumePaths, registry: &AssetRegistry) -> Result<RgbaImage> {
    let (w, h) = layout::CARD_SIZE;
    let mut img = Canvas::new(w, h);

    let mut splash = Canvas::new(w, h);
    splash.add_image(
        &costume.gacha_icon,
        Some(layout::SPLASH_SIZE),
        layout::SPLASH_OFFSET,
    )?;
    img.paste(
        &canvas::dimmed(splash.image(), layout::SPLASH_BRIGHTNESS),
        0,
        0,
    );

    img.add_image(
        &costume.avatar_icon,
        Some(layout::AVATAR_SIZE),
        layout::AVATAR_OFFSET,
    )?;
    img.add_image(registry.background_shadow(), None, (0, 0))?;
    Ok(img.into_image())
}

/// Level/constellation badge: `Lv {level}` over the constellation token,
/// beside the side portrait.
pub fn level_and_const(
    level: u32,
    constellations: u32,
    costume: &CostumePaths,
    registry: &AssetRegistry,
) -> Result<RgbaImage> {
    let (w, h) = layout::LEVEL_PANEL_SIZE;
    let mut img = Canvas::new(w, h);
    let token = constellation_token(constellations)?;
    img.draw_text(
        registry.font(),
        &format!("Lv {level}\n{token}凸"),
        layout::LEVEL_TEXT_POS,
        layout::LEVEL_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    img.add_image(&costume.side_icon, Some(layout::SIDE_ICON_SIZE), (0, 0))?;
    Ok(img.into_image())
}

/// One stat row: icon plus value text. Highlighted rows draw white text
/// with a white outward glow (radius 2, zero offset); plain rows are gray.
fn status_row(
    value: &str,
    icon: &std::path::Path,
    highlighted: bool,
    registry: &AssetRegistry,
) -> Result<RgbaImage> {
    let (w, h) = layout::STATUS_ROW_SIZE;
    let mut img = Canvas::new(w, h);
    img.add_image(icon, Some(layout::STATUS_ICON_SIZE), (0, 0))?;
    if highlighted {
        img.draw_text_with_glow(
            registry.font(),
            value,
            layout::STATUS_VALUE_POS,
            layout::STATUS_FONT_SIZE,
            WHITE,
            WHITE,
            2.0,
            TextAnchor::LeftTop,
        );
    } else {
        img.draw_text(
            registry.font(),
            value,
            layout::STATUS_VALUE_POS,
            layout::STATUS_FONT_SIZE,
            GRAY,
            TextAnchor::LeftTop,
        );
    }
    Ok(img.into_image())
}

/// Percent stats display with as many decimals as the value carries.
fn format_stat(value: f64) -> String {
    format!("{value}")
}

/// Full-status block: up to 8 rows, rendered concurrently, stacked four
/// per column. HP is the highlighted row.
pub fn full_status(character: &EnrichedCharacter, registry: &AssetRegistry) -> Result<RgbaImage> {
    let mut rows: Vec<(String, std::path::PathBuf, bool)> = vec![
        (
            format!("+{}", character.added_hp),
            registry.status_icon(StatusIcon::Hp).to_path_buf(),
            true,
        ),
        (
            format!("+{}", character.added_attack),
            registry.status_icon(StatusIcon::Attack).to_path_buf(),
            false,
        ),
        (
            format!("+{}", character.added_defense),
            registry.status_icon(StatusIcon::Defense).to_path_buf(),
            false,
        ),
        (
            format!("+{}", character.elemental_mastery),
            registry.status_icon(StatusIcon::Mastery).to_path_buf(),
            false,
        ),
        (
            format!("{}%", format_stat(character.critical_rate)),
            registry.status_icon(StatusIcon::Critical).to_path_buf(),
            false,
        ),
        (
            format!("{}%", format_stat(character.critical_damage)),
            registry.status_icon(StatusIcon::CriticalDamage).to_path_buf(),
            false,
        ),
        (
            format!("{}%", format_stat(character.charge_efficiency)),
            registry.status_icon(StatusIcon::Charge).to_path_buf(),
            false,
        ),
    ];

    if let Some(element) = &character.elemental_name {
        // The row only exists for a known element; an unknown one is a
        // hard failure, not a skipped row.
        elemental_damage_label(element)
            .ok_or_else(|| Error::UnknownElement(element.clone()))?;
        let icon = registry
            .element_icon(element)
            .ok_or_else(|| Error::UnknownElement(element.clone()))?;
        rows.push((
            character.elemental_value.clone().unwrap_or_default(),
            icon.to_path_buf(),
            false,
        ));
    }

    let jobs: Vec<Job<'_>> = rows
        .iter()
        .map(|(value, icon, highlighted)| {
            Box::new(move || status_row(value, icon, *highlighted, registry)) as Job<'_>
        })
        .collect();
    let rendered = pool::run_all(pool::default_workers(jobs.len()), jobs)?;

    let (w, h) = layout::STATUS_PANEL_SIZE;
    let mut img = Canvas::new(w, h);
    for (i, row) in rendered.iter().enumerate() {
        let (x, y) = if i >= layout::STATUS_ROWS_PER_COLUMN {
            (
                layout::STATUS_SECOND_COLUMN_X,
                layout::STATUS_ROW_STRIDE * (i - layout::STATUS_ROWS_PER_COLUMN) as i64,
            )
        } else {
            (0, layout::STATUS_ROW_STRIDE * i as i64)
        };
        img.paste(row, x, y);
    }
    Ok(img.into_image())
}

/// Skill block: header label over the joined skill levels.
pub fn skill_block(skills: &[Skill], registry: &AssetRegistry) -> Result<RgbaImage> {
    let (w, h) = layout::SKILL_PANEL_SIZE;
    let mut img = Canvas::new(w, h);
    img.draw_text(
        registry.font(),
        "天賦レベル",
        layout::SKILL_HEADER_POS,
        layout::SKILL_HEADER_FONT_SIZE,
        GRAY,
        TextAnchor::LeftTop,
    );
    img.draw_text(
        registry.font(),
        &skill_levels_text(skills),
        layout::SKILL_LEVELS_POS,
        layout::SKILL_LEVELS_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    Ok(img.into_image())
}

/// One 32x32 artifact tile. An absent slot is a blank tile, never an
/// error; an unknown main-stat name is fatal.
pub fn artifact_tile(
    artifact: Option<&EnrichedArtifact>,
    registry: &AssetRegistry,
) -> Result<RgbaImage> {
    let (w, h) = layout::ARTIFACT_TILE_SIZE;
    let mut img = Canvas::new(w, h);
    let Some(artifact) = artifact else {
        return Ok(img.into_image());
    };
    img.add_image(&artifact.icon_path, Some(layout::ARTIFACT_TILE_SIZE), (0, 0))?;
    let main_icon = registry
        .stat_icon(&artifact.main_name)
        .ok_or_else(|| Error::UnknownStat(artifact.main_name.clone()))?;
    img.add_image(
        main_icon,
        Some(layout::ARTIFACT_MAIN_ICON_SIZE),
        layout::ARTIFACT_MAIN_ICON_OFFSET,
    )?;
    Ok(img.into_image())
}

/// Artifact list: the five canonical slots left to right at a 32px
/// stride, tiles rendered concurrently but joined in slot order.
pub fn artifact_list(
    character: &EnrichedCharacter,
    registry: &AssetRegistry,
) -> Result<RgbaImage> {
    let jobs: Vec<Job<'_>> = ArtifactSlot::ALL
        .iter()
        .map(|slot| {
            Box::new(move || artifact_tile(character.artifacts.get(slot), registry)) as Job<'_>
        })
        .collect();
    let tiles = pool::run_all(pool::default_workers(jobs.len()), jobs)?;

    let (w, h) = layout::ARTIFACT_LIST_SIZE;
    let mut img = Canvas::new(w, h);
    for (i, tile) in tiles.iter().enumerate() {
        img.paste(tile, layout::ARTIFACT_TILE_STRIDE * i as i64, 0);
    }
    Ok(img.into_image())
}

/// Total-score block: build label header plus the 1-dp score sum.
pub fn total_score_panel(
    character: &EnrichedCharacter,
    registry: &AssetRegistry,
) -> Result<RgbaImage> {
    let (w, h) = layout::SCORE_PANEL_SIZE;
    let mut img = Canvas::new(w, h);
    img.draw_text(
        registry.font(),
        &format!("{} スコア合計", character.build_label),
        layout::SCORE_HEADER_POS,
        layout::SCORE_HEADER_FONT_SIZE,
        GRAY,
        TextAnchor::LeftTop,
    );
    img.draw_text(
        registry.font(),
        &format!("{:.1}", total_score(character.artifacts.values())),
        layout::SCORE_VALUE_POS,
        layout::SCORE_VALUE_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    Ok(img.into_image())
}

/// Weapon block: weapon icon, optional sub-stat icon, level and
/// refinement token. A weapon without a sub-stat skips the icon lookup.
pub fn weapon_panel(weapon: &EnrichedWeapon, registry: &AssetRegistry) -> Result<RgbaImage> {
    let (w, h) = layout::WEAPON_PANEL_SIZE;
    let mut img = Canvas::new(w, h);
    img.add_image(&weapon.icon_path, Some(layout::WEAPON_ICON_SIZE), (0, 0))?;

    if let Some(sub_name) = &weapon.sub_name {
        let icon = registry
            .stat_icon(sub_name)
            .ok_or_else(|| Error::UnknownStat(sub_name.clone()))?;
        img.add_image(
            icon,
            Some(layout::WEAPON_SUB_ICON_SIZE),
            layout::WEAPON_SUB_ICON_OFFSET,
        )?;
    }

    let token = refinement_token(weapon.rank)?;
    img.draw_text(
        registry.font(),
        &format!("Lv {}\n{token}凸", weapon.level),
        layout::WEAPON_TEXT_POS,
        layout::WEAPON_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    Ok(img.into_image())
}

/// Header/rank panel: element-colored bar, leaderboard rank, nickname,
/// and world level.
pub fn header_panel(build: &EnrichedBuild, registry: &AssetRegistry) -> Result<RgbaImage> {
    let (w, h) = layout::CARD_SIZE;
    let mut img = Canvas::new(w, h);

    let color = element_color(&build.character.element)?;
    let (bar_w, bar_h) = layout::ELEMENT_BAR_SIZE;
    img.paste(
        &canvas::solid(bar_w, bar_h, color),
        layout::ELEMENT_BAR_OFFSET.0,
        layout::ELEMENT_BAR_OFFSET.1,
    );

    img.draw_text(
        registry.font(),
        &format!("{}位", build.rank),
        layout::RANK_TEXT_CENTER,
        layout::RANK_FONT_SIZE,
        WHITE,
        TextAnchor::MiddleMiddle,
    );
    img.draw_text(
        registry.font(),
        &build.nickname,
        layout::NICKNAME_POS,
        layout::NICKNAME_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    img.draw_text(
        registry.font(),
        "世界ランク",
        layout::WORLD_RANK_LABEL_POS,
        layout::WORLD_RANK_LABEL_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    img.draw_text(
        registry.font(),
        &build.world_level.to_string(),
        layout::WORLD_RANK_VALUE_POS,
        layout::WORLD_RANK_VALUE_FONT_SIZE,
        WHITE,
        TextAnchor::LeftTop,
    );
    Ok(img.into_image())
}
