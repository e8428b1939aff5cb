//! Shared fixtures for the rendering integration tests.
//!
//! Icon assets are tiny generated PNGs in a per-test temp directory. Text
//! rendering needs a real TTF font; tests that render full panels follow
//! the golden-test convention of skipping with a message when no usable
//! font is found (set `BUILDCARD_TEST_FONT` to force one).

use std::path::{Path, PathBuf};

use buildcard::AssetRegistry;
use image::{Rgba, RgbaImage};

/// Locate a TTF font for text rendering, or `None` to skip the test.
pub fn find_font() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("BUILDCARD_TEST_FONT") {
        let p = PathBuf::from(p);
        if p.exists() {
            return Some(p);
        }
    }
    for candidate in [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

/// Temp asset directory plus a loaded registry. Cleaned up on drop.
pub struct Fixture {
    pub dir: PathBuf,
    pub registry: AssetRegistry,
}

impl Drop for Fixture {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn write_icon(path: &Path, color: Rgba<u8>) {
    RgbaImage::from_pixel(8, 8, color)
        .save(path)
        .expect("write fixture icon");
}

/// Build a complete asset fixture. Returns `None` (skip) when no font is
/// available on this machine.
pub fn fixture(name: &str) -> Option<Fixture> {
    let font = match find_font() {
        Some(f) => f,
        None => {
            println!("No TTF font found; set BUILDCARD_TEST_FONT to run this test. Skipping.");
            return None;
        }
    };

    let dir = std::env::temp_dir().join(format!("buildcard-{}-{}", name, std::process::id()));
    std::fs::remove_dir_all(&dir).ok();
    let icons = dir.join("icons");
    std::fs::create_dir_all(&icons).expect("create fixture dir");

    let entries = [
        ("hp.png", Rgba([255, 0, 0, 255])),
        ("atk.png", Rgba([0, 255, 0, 255])),
        ("def.png", Rgba([0, 0, 255, 255])),
        ("mas.png", Rgba([255, 255, 0, 255])),
        ("cri.png", Rgba([255, 0, 255, 255])),
        ("crid.png", Rgba([0, 255, 255, 255])),
        ("chg.png", Rgba([200, 200, 200, 255])),
        ("ice.png", Rgba([60, 145, 187, 255])),
        ("stat_hp.png", Rgba([120, 30, 30, 255])),
        ("stat_atk.png", Rgba([30, 120, 30, 255])),
        ("avatar.png", Rgba([90, 90, 90, 255])),
        ("side.png", Rgba([70, 70, 70, 255])),
        ("gacha.png", Rgba([50, 50, 50, 255])),
        ("flower.png", Rgba([200, 40, 40, 255])),
        ("plume.png", Rgba([40, 200, 40, 255])),
        ("sands.png", Rgba([40, 40, 200, 255])),
        ("goblet.png", Rgba([200, 200, 40, 255])),
        ("circlet.png", Rgba([40, 200, 200, 255])),
        ("sword.png", Rgba([160, 160, 160, 255])),
    ];
    for (file, color) in entries {
        write_icon(&icons.join(file), color);
    }
    // Shadow overlay: card-sized, faint.
    RgbaImage::from_pixel(720, 140, Rgba([0, 0, 0, 40]))
        .save(dir.join("shadow.png"))
        .expect("write shadow");

    let manifest = format!(
        r#"{{
        "font": {font:?},
        "background_shadow": "shadow.png",
        "status_icons": {{
            "hp": "icons/hp.png", "attack": "icons/atk.png",
            "defense": "icons/def.png", "mastery": "icons/mas.png",
            "critical": "icons/cri.png", "critical_damage": "icons/crid.png",
            "charge": "icons/chg.png"
        }},
        "element_icons": {{"Ice": "icons/ice.png"}},
        "stat_icons": {{
            "FIGHT_PROP_HP": "icons/stat_hp.png",
            "FIGHT_PROP_ATTACK": "icons/stat_atk.png"
        }},
        "characters": {{
            "10000002": {{
                "element": "Ice",
                "costumes": {{"default": {{
                    "avatar_icon": "icons/avatar.png",
                    "side_icon": "icons/side.png",
                    "gacha_icon": "icons/gacha.png"
                }}}}
            }},
            "99999999": {{
                "element": "Phantom",
                "costumes": {{"default": {{
                    "avatar_icon": "icons/avatar.png",
                    "side_icon": "icons/side.png",
                    "gacha_icon": "icons/gacha.png"
                }}}}
            }}
        }},
        "artifact_icons": {{
            "flower_a": "icons/flower.png", "plume_a": "icons/plume.png",
            "sands_a": "icons/sands.png", "goblet_a": "icons/goblet.png",
            "circlet_a": "icons/circlet.png"
        }},
        "weapon_icons": {{"sword_a": "icons/sword.png"}},
        "build_labels": {{"crit": "会心"}}
    }}"#,
        font = font.display().to_string()
    );
    let manifest_path = dir.join("manifest.json");
    std::fs::write(&manifest_path, manifest).expect("write manifest");

    let registry = AssetRegistry::load(&manifest_path).expect("load fixture registry");
    Some(Fixture { dir, registry })
}

/// A build record with artifacts in the given slots (wire names).
pub fn record_json(character_id: &str, slots: &[&str]) -> String {
    let artifacts: Vec<String> = slots
        .iter()
        .zip(["flower_a", "plume_a", "sands_a", "goblet_a", "circlet_a"])
        .map(|(slot, icon)| {
            format!(r#""{slot}": {{"icon_name": "{icon}", "main_name": "FIGHT_PROP_HP", "score": 10.5}}"#)
        })
        .collect();
    format!(
        r#"{{
        "rank": 1,
        "uid": 800000001,
        "level": 60,
        "nickname": "traveler",
        "create_date": "2024-05-01",
        "character": {{
            "id": "{character_id}",
            "constellations": 2,
            "level": 90,
            "added_hp": 4780,
            "added_attack": 311,
            "added_defense": 58,
            "critical_rate": 75.5,
            "critical_damage": 180.2,
            "charge_efficiency": 120.0,
            "elemental_mastery": 40,
            "elemental_name": "Ice",
            "elemental_value": "61.6%",
            "build_type": "crit",
            "skills": [
                {{"level": 8, "add_level": 3}},
                {{"level": 6, "add_level": 0}},
                {{"level": 9, "add_level": 3}}
            ],
            "artifacts": {{{artifacts}}},
            "weapon": {{
                "icon_name": "sword_a",
                "sub_name": "FIGHT_PROP_ATTACK",
                "level": 90,
                "rank": 1
            }}
        }}
    }}"#,
        artifacts = artifacts.join(",\n")
    )
}

pub const ALL_SLOTS: [&str; 5] = [
    "EQUIP_BRACER",
    "EQUIP_NECKLACE",
    "EQUIP_SHOES",
    "EQUIP_RING",
    "EQUIP_DRESS",
];
