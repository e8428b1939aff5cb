//! Render cache gate
//!
//! Write-once memoization keyed by a deterministic filename. A key that
//! already exists is never re-rendered or invalidated; the gate has no
//! TTL and no eviction. Exclusivity for concurrent writers of the same
//! key is the storage boundary's concern, and results are idempotent, so
//! a duplicated render wastes work but corrupts nothing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};

use crate::assets::AssetRegistry;
use crate::error::Result;
use crate::model::BuildRecord;
use crate::rendering;

/// Deterministic cache key for one rendered card. The five identifying
/// fields make the key, nothing else does.
pub fn cache_key(
    create_date: &str,
    uid: u64,
    character_id: &str,
    build_type: &str,
    highlight: u8,
) -> String {
    format!("{create_date}_{uid}_{character_id}_{build_type}_{highlight}.png")
}

/// Cache collaborator contract: existence check plus registration.
pub trait CacheGate {
    fn exists(&self, key: &str) -> bool;
    fn register(&self, key: &str);
}

/// Directory-backed cache: rendered cards live as files under the
/// directory, and the index holds every registered key. The index is
/// rebuilt from the directory listing on startup, so a lost index only
/// costs re-checks, not correctness.
pub struct DirCache {
    dir: PathBuf,
    index: Mutex<HashSet<String>>,
}

impl DirCache {
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        let mut index = HashSet::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                index.insert(name.to_string());
            }
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            index: Mutex::new(index),
        })
    }

    /// Path a given key renders to.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl CacheGate for DirCache {
    fn exists(&self, key: &str) -> bool {
        match self.index.lock() {
            Ok(index) => index.contains(key),
            Err(_) => {
                warn!("cache index poisoned; treating {key} as absent");
                false
            }
        }
    }

    fn register(&self, key: &str) {
        if let Ok(mut index) = self.index.lock() {
            index.insert(key.to_string());
        }
    }
}

/// Render one build record to a PNG under the cache directory, skipping
/// the render entirely when the key is already registered. Returns the
/// file path either way.
pub fn render_to_file_cached(
    record: &BuildRecord,
    highlight: u8,
    registry: &AssetRegistry,
    cache: &DirCache,
) -> Result<PathBuf> {
    let key = cache_key(
        &record.create_date,
        record.uid,
        &record.character.id,
        &record.character.build_type,
        highlight,
    );
    let path = cache.path_for(&key);
    if cache.exists(&key) {
        debug!("cache hit for {key}");
        return Ok(path);
    }

    let enriched = record.enrich(registry)?;
    let card = rendering::render_card(&enriched, registry)?;
    rendering::save_png(&card, &path)?;
    cache.register(&key);
    debug!("rendered and registered {key}");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_built_from_the_five_identifying_fields() {
        let key = cache_key("2024-05-01", 800000001, "10000002", "crit", 0);
        assert_eq!(key, "2024-05-01_800000001_10000002_crit_0.png");
    }

    #[test]
    fn key_changes_with_highlight_selector() {
        let a = cache_key("d", 1, "c", "b", 0);
        let b = cache_key("d", 1, "c", "b", 5);
        assert_ne!(a, b);
    }

    #[test]
    fn dir_cache_registers_and_reports_keys() {
        let dir = std::env::temp_dir().join("buildcard-dircache-test");
        std::fs::remove_dir_all(&dir).ok();
        let cache = DirCache::open(&dir).unwrap();
        assert!(!cache.exists("a.png"));
        cache.register("a.png");
        assert!(cache.exists("a.png"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn dir_cache_rebuilds_index_from_directory() {
        let dir = std::env::temp_dir().join("buildcard-dircache-rebuild");
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("old.png"), b"x").unwrap();
        let cache = DirCache::open(&dir).unwrap();
        assert!(cache.exists("old.png"));
        std::fs::remove_dir_all(&dir).ok();
    }
}
