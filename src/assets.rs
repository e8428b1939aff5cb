//! Immutable icon/asset registry
//!
//! Loaded once at process start from a JSON manifest and then only read.
//! All renderers receive it by reference; nothing mutates it during a
//! render, so it is freely shared across worker threads.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::CostumePaths;

/// The seven fixed per-status icons of the full-status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Hp,
    Attack,
    Defense,
    Mastery,
    Critical,
    CriticalDamage,
    Charge,
}

/// One character's registry entry: element plus costume icon paths.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterEntry {
    pub element: String,
    pub costumes: HashMap<String, CostumePaths>,
}

#[derive(Debug, Deserialize)]
struct StatusIconPaths {
    hp: PathBuf,
    attack: PathBuf,
    defense: PathBuf,
    mastery: PathBuf,
    critical: PathBuf,
    critical_damage: PathBuf,
    charge: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    font: PathBuf,
    background_shadow: PathBuf,
    status_icons: StatusIconPaths,
    element_icons: HashMap<String, PathBuf>,
    /// Main/sub-stat name to icon path ("icon namehash" table).
    stat_icons: HashMap<String, PathBuf>,
    characters: HashMap<String, CharacterEntry>,
    artifact_icons: HashMap<String, PathBuf>,
    weapon_icons: HashMap<String, PathBuf>,
    build_labels: HashMap<String, String>,
}

/// Read-only registry of every asset path a render may touch.
pub struct AssetRegistry {
    font: FontArc,
    manifest: Manifest,
}

impl std::fmt::Debug for AssetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetRegistry")
            .field("characters", &self.manifest.characters.len())
            .field("stat_icons", &self.manifest.stat_icons.len())
            .finish()
    }
}

impl AssetRegistry {
    /// Load the manifest at `path`. Relative asset paths are resolved
    /// against the manifest's directory. The font is loaded eagerly so a
    /// bad font path fails here rather than mid-render.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let mut manifest: Manifest = serde_json::from_str(&data)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        manifest.rebase(base);

        let font_bytes = std::fs::read(&manifest.font)?;
        let font = FontArc::try_from_vec(font_bytes)
            .map_err(|e| Error::Render(format!("invalid font {:?}: {e}", manifest.font)))?;

        Ok(Self { font, manifest })
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn background_shadow(&self) -> &Path {
        &self.manifest.background_shadow
    }

    pub fn status_icon(&self, icon: StatusIcon) -> &Path {
        let icons = &self.manifest.status_icons;
        match icon {
            StatusIcon::Hp => &icons.hp,
            StatusIcon::Attack => &icons.attack,
            StatusIcon::Defense => &icons.defense,
            StatusIcon::Mastery => &icons.mastery,
            StatusIcon::Critical => &icons.critical,
            StatusIcon::CriticalDamage => &icons.critical_damage,
            StatusIcon::Charge => &icons.charge,
        }
    }

    pub fn element_icon(&self, element: &str) -> Option<&Path> {
        self.manifest.element_icons.get(element).map(PathBuf::as_path)
    }

    /// Icon for a main/sub-stat name. `None` means the name is unknown,
    /// which callers treat as fatal.
    pub fn stat_icon(&self, stat_name: &str) -> Option<&Path> {
        self.manifest.stat_icons.get(stat_name).map(PathBuf::as_path)
    }

    pub fn character(&self, id: &str) -> Option<&CharacterEntry> {
        self.manifest.characters.get(id)
    }

    pub fn artifact_icon(&self, icon_name: &str) -> Option<&Path> {
        self.manifest.artifact_icons.get(icon_name).map(PathBuf::as_path)
    }

    pub fn weapon_icon(&self, icon_name: &str) -> Option<&Path> {
        self.manifest.weapon_icons.get(icon_name).map(PathBuf::as_path)
    }

    pub fn build_label(&self, build_type: &str) -> Option<&str> {
        self.manifest.build_labels.get(build_type).map(String::as_str)
    }
}

impl Manifest {
    fn rebase(&mut self, base: &Path) {
        fn reb(base: &Path, p: &mut PathBuf) {
            if p.is_relative() {
                let joined = base.join(&*p);
                *p = joined;
            }
        }
        reb(base, &mut self.font);
        reb(base, &mut self.background_shadow);
        let s = &mut self.status_icons;
        for p in [
            &mut s.hp,
            &mut s.attack,
            &mut s.defense,
            &mut s.mastery,
            &mut s.critical,
            &mut s.critical_damage,
            &mut s.charge,
        ] {
            reb(base, p);
        }
        for p in self.element_icons.values_mut() {
            reb(base, p);
        }
        for p in self.stat_icons.values_mut() {
            reb(base, p);
        }
        for p in self.artifact_icons.values_mut() {
            reb(base, p);
        }
        for p in self.weapon_icons.values_mut() {
            reb(base, p);
        }
        for entry in self.characters.values_mut() {
            for costume in entry.costumes.values_mut() {
                reb(base, &mut costume.avatar_icon);
                reb(base, &mut costume.side_icon);
                reb(base, &mut costume.gacha_icon);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_rebases_relative_paths() {
        let json = r#"{
            "font": "fonts/main.ttf",
            "background_shadow": "/abs/shadow.png",
            "status_icons": {
                "hp": "i/hp.png", "attack": "i/atk.png", "defense": "i/def.png",
                "mastery": "i/mas.png", "critical": "i/cri.png",
                "critical_damage": "i/crid.png", "charge": "i/chg.png"
            },
            "element_icons": {"Fire": "e/fire.png"},
            "stat_icons": {"FIGHT_PROP_HP": "s/hp.png"},
            "characters": {},
            "artifact_icons": {},
            "weapon_icons": {},
            "build_labels": {"crit": "会心"}
        }"#;
        let mut manifest: Manifest = serde_json::from_str(json).unwrap();
        manifest.rebase(Path::new("/data/assets"));
        assert_eq!(manifest.font, PathBuf::from("/data/assets/fonts/main.ttf"));
        // Absolute paths stay put.
        assert_eq!(manifest.background_shadow, PathBuf::from("/abs/shadow.png"));
        assert_eq!(
            manifest.element_icons["Fire"],
            PathBuf::from("/data/assets/e/fire.png")
        );
        assert_eq!(manifest.build_labels["crit"], "会心");
    }
}
