//! Build-record data model
//!
//! Two-phase: the serde-facing raw types (`BuildRecord` and friends) carry
//! exactly what the upstream stats provider hands over, and
//! [`BuildRecord::enrich`] resolves every icon/label reference against the
//! [`AssetRegistry`] up front. Renderers only ever see the enriched types,
//! so a missing resolution cannot surface mid-render.

use std::collections::HashMap;

use serde::Deserialize;

use crate::assets::AssetRegistry;
use crate::error::{Error, Result};

/// The five canonical artifact equip slots, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ArtifactSlot {
    #[serde(rename = "EQUIP_BRACER")]
    Bracer,
    #[serde(rename = "EQUIP_NECKLACE")]
    Necklace,
    #[serde(rename = "EQUIP_SHOES")]
    Shoes,
    #[serde(rename = "EQUIP_RING")]
    Ring,
    #[serde(rename = "EQUIP_DRESS")]
    Dress,
}

impl ArtifactSlot {
    /// Fixed left-to-right order of the artifact tiles.
    pub const ALL: [ArtifactSlot; 5] = [
        ArtifactSlot::Bracer,
        ArtifactSlot::Necklace,
        ArtifactSlot::Shoes,
        ArtifactSlot::Ring,
        ArtifactSlot::Dress,
    ];
}

/// One equipped artifact as delivered by the stats provider.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    pub icon_name: String,
    pub main_name: String,
    #[serde(default)]
    pub score: f64,
}

/// The equipped weapon. `sub_name` is absent for weapons without a sub-stat.
#[derive(Debug, Clone, Deserialize)]
pub struct Weapon {
    pub icon_name: String,
    #[serde(default)]
    pub sub_name: Option<String>,
    pub level: u32,
    /// Refinement rank, 0 through 5.
    pub rank: u32,
}

/// One skill; the displayed level is `level + add_level`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Skill {
    pub level: u32,
    pub add_level: u32,
}

/// A character snapshot with all derived stats already resolved upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct Character {
    pub id: String,
    #[serde(default = "default_costume_id")]
    pub costume_id: String,
    /// Constellation count, 0 through 6.
    pub constellations: u32,
    pub level: u32,
    pub added_hp: i64,
    pub added_attack: i64,
    pub added_defense: i64,
    pub critical_rate: f64,
    pub critical_damage: f64,
    pub charge_efficiency: f64,
    pub elemental_mastery: i64,
    /// Damage-bonus element, absent when the build has no elemental bonus.
    #[serde(default)]
    pub elemental_name: Option<String>,
    #[serde(default)]
    pub elemental_value: Option<String>,
    pub build_type: String,
    pub skills: Vec<Skill>,
    pub artifacts: HashMap<ArtifactSlot, Artifact>,
    pub weapon: Weapon,
}

fn default_costume_id() -> String {
    "default".to_string()
}

/// Top-level build record: one player, one character snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildRecord {
    pub rank: u32,
    pub uid: u64,
    /// World level of the player.
    pub level: u32,
    pub nickname: String,
    pub create_date: String,
    pub character: Character,
}

impl BuildRecord {
    /// Parse a build record from provider JSON.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Resolve every icon and label reference against the registry,
    /// producing the render-ready form. Any unknown identifier fails the
    /// whole enrichment.
    pub fn enrich(&self, registry: &AssetRegistry) -> Result<EnrichedBuild> {
        let character = self.character.enrich(registry)?;
        Ok(EnrichedBuild {
            rank: self.rank,
            uid: self.uid,
            world_level: self.level,
            nickname: self.nickname.clone(),
            create_date: self.create_date.clone(),
            character,
        })
    }
}

impl Character {
    fn enrich(&self, registry: &AssetRegistry) -> Result<EnrichedCharacter> {
        let entry = registry
            .character(&self.id)
            .ok_or_else(|| Error::UnknownCharacter(self.id.clone()))?;
        let costume = entry
            .costumes
            .get(&self.costume_id)
            .ok_or_else(|| Error::UnknownCostume {
                character_id: self.id.clone(),
                costume_id: self.costume_id.clone(),
            })?;

        let build_label = registry
            .build_label(&self.build_type)
            .ok_or_else(|| Error::UnknownBuildType(self.build_type.clone()))?
            .to_string();

        let mut artifacts = HashMap::new();
        for (&slot, artifact) in &self.artifacts {
            let icon_path = registry
                .artifact_icon(&artifact.icon_name)
                .ok_or_else(|| Error::UnknownIcon(artifact.icon_name.clone()))?
                .to_path_buf();
            artifacts.insert(
                slot,
                EnrichedArtifact {
                    icon_path,
                    main_name: artifact.main_name.clone(),
                    score: artifact.score,
                },
            );
        }

        let weapon_icon = registry
            .weapon_icon(&self.weapon.icon_name)
            .ok_or_else(|| Error::UnknownIcon(self.weapon.icon_name.clone()))?
            .to_path_buf();

        Ok(EnrichedCharacter {
            element: entry.element.clone(),
            costume: costume.clone(),
            build_label,
            constellations: self.constellations,
            level: self.level,
            added_hp: self.added_hp,
            added_attack: self.added_attack,
            added_defense: self.added_defense,
            critical_rate: self.critical_rate,
            critical_damage: self.critical_damage,
            charge_efficiency: self.charge_efficiency,
            elemental_mastery: self.elemental_mastery,
            elemental_name: self.elemental_name.clone(),
            elemental_value: self.elemental_value.clone(),
            skills: self.skills.clone(),
            artifacts,
            weapon: EnrichedWeapon {
                icon_path: weapon_icon,
                sub_name: self.weapon.sub_name.clone(),
                level: self.weapon.level,
                rank: self.weapon.rank,
            },
        })
    }
}

/// Icon paths for one costume of a character.
#[derive(Debug, Clone, Deserialize)]
pub struct CostumePaths {
    pub avatar_icon: std::path::PathBuf,
    pub side_icon: std::path::PathBuf,
    pub gacha_icon: std::path::PathBuf,
}

/// Artifact with its icon path resolved.
#[derive(Debug, Clone)]
pub struct EnrichedArtifact {
    pub icon_path: std::path::PathBuf,
    pub main_name: String,
    pub score: f64,
}

/// Weapon with its icon path resolved.
#[derive(Debug, Clone)]
pub struct EnrichedWeapon {
    pub icon_path: std::path::PathBuf,
    pub sub_name: Option<String>,
    pub level: u32,
    pub rank: u32,
}

/// Render-ready character snapshot.
#[derive(Debug, Clone)]
pub struct EnrichedCharacter {
    /// The character's own element, used to color the header bar.
    pub element: String,
    pub costume: CostumePaths,
    /// Localized build-type label shown above the score total.
    pub build_label: String,
    pub constellations: u32,
    pub level: u32,
    pub added_hp: i64,
    pub added_attack: i64,
    pub added_defense: i64,
    pub critical_rate: f64,
    pub critical_damage: f64,
    pub charge_efficiency: f64,
    pub elemental_mastery: i64,
    pub elemental_name: Option<String>,
    pub elemental_value: Option<String>,
    pub skills: Vec<Skill>,
    pub artifacts: HashMap<ArtifactSlot, EnrichedArtifact>,
    pub weapon: EnrichedWeapon,
}

/// Render-ready build record. Renderers accept only this form.
#[derive(Debug, Clone)]
pub struct EnrichedBuild {
    pub rank: u32,
    pub uid: u64,
    pub world_level: u32,
    pub nickname: String,
    pub create_date: String,
    pub character: EnrichedCharacter,
}

/// Localized name of the elemental-damage bonus row, by provider element id.
pub fn elemental_damage_label(element: &str) -> Option<&'static str> {
    match element {
        "Physics" => Some("物理ダメージ"),
        "Fire" => Some("炎元素ダメージ"),
        "Electric" => Some("雷元素ダメージ"),
        "Water" => Some("水元素ダメージ"),
        "Grass" => Some("草元素ダメージ"),
        "Wind" => Some("風元素ダメージ"),
        "Rock" => Some("岩元素ダメージ"),
        "Ice" => Some("氷元素ダメージ"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_order_is_fixed() {
        assert_eq!(ArtifactSlot::ALL[0], ArtifactSlot::Bracer);
        assert_eq!(ArtifactSlot::ALL[4], ArtifactSlot::Dress);
        assert_eq!(ArtifactSlot::ALL.len(), 5);
    }

    #[test]
    fn deserializes_wire_slot_names() {
        let json = r#"{"EQUIP_BRACER": {"icon_name": "flower_a", "main_name": "HP", "score": 12.3}}"#;
        let map: HashMap<ArtifactSlot, Artifact> = serde_json::from_str(json).unwrap();
        assert!(map.contains_key(&ArtifactSlot::Bracer));
        assert_eq!(map[&ArtifactSlot::Bracer].score, 12.3);
    }

    #[test]
    fn elemental_damage_labels_cover_all_eight() {
        for e in [
            "Physics", "Fire", "Electric", "Water", "Grass", "Wind", "Rock", "Ice",
        ] {
            assert!(elemental_damage_label(e).is_some());
        }
        assert!(elemental_damage_label("Phantom").is_none());
    }

    #[test]
    fn build_record_from_json() {
        let json = r#"{
            "rank": 3,
            "uid": 800000001,
            "level": 60,
            "nickname": "traveler",
            "create_date": "2024-05-01",
            "character": {
                "id": "10000002",
                "constellations": 2,
                "level": 90,
                "added_hp": 4780,
                "added_attack": 311,
                "added_defense": 0,
                "critical_rate": 75.5,
                "critical_damage": 180.2,
                "charge_efficiency": 120.0,
                "elemental_mastery": 40,
                "build_type": "crit",
                "skills": [{"level": 10, "add_level": 3}],
                "artifacts": {},
                "weapon": {"icon_name": "sword_a", "level": 90, "rank": 1}
            }
        }"#;
        let record = BuildRecord::from_json(json).unwrap();
        assert_eq!(record.character.costume_id, "default");
        assert_eq!(record.character.weapon.sub_name, None);
        assert_eq!(record.character.skills.len(), 1);
    }
}
