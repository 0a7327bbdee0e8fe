//! User settings for the ruleset, stored as TOML.
//!
//! ```toml
//! [keybinds]
//! 4 = ["KeyS", "KeyD", "KeyK", "KeyL"]
//! 1004 = ["KeyW", "KeyE", "KeyI", "KeyO"]
//! ```
//!
//! Keybinds are keyed by variant id. Variants without an entry use the
//! default layout.

use crate::core::input::{KeyCode, keycode_name};
use crate::error::RulesetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesetSettings {
    /// Variant id -> key names in column order.
    #[serde(default)]
    pub keybinds: BTreeMap<String, Vec<String>>,
}

impl RulesetSettings {
    /// Loads settings, falling back to defaults if the file is missing or broken.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("SETTINGS: {} not found, using defaults", path.display());
            return Self::default();
        }
        load_toml(path).unwrap_or_default()
    }

    pub fn save(&self, path: &Path) -> Result<(), RulesetError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RulesetError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| RulesetError::Config(e.to_string()))?;
        }
        fs::write(path, content).map_err(|e| RulesetError::Config(e.to_string()))?;
        log::info!("SETTINGS: saved {}", path.display());
        Ok(())
    }

    pub fn keybinds_for(&self, variant: i32) -> Option<&[String]> {
        self.keybinds.get(&variant.to_string()).map(Vec::as_slice)
    }

    /// Stores custom keys for a variant.
    pub fn set_keybinds(&mut self, variant: i32, keys: &[KeyCode]) {
        let names = keys
            .iter()
            .filter_map(|k| keycode_name(*k))
            .map(str::to_string)
            .collect();
        self.keybinds.insert(variant.to_string(), names);
    }

    pub fn clear_keybinds(&mut self, variant: i32) {
        self.keybinds.remove(&variant.to_string());
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RulesetError> {
    let content = fs::read_to_string(path).map_err(|e| RulesetError::Config(e.to_string()))?;
    match toml::from_str(&content) {
        Ok(data) => Ok(data),
        Err(e) => {
            log::error!("Failed to parse TOML file {:?}: {}", path, e);
            Err(RulesetError::Config(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("ruleset.toml");

        let mut settings = RulesetSettings::default();
        settings.set_keybinds(4, &[KeyCode::KeyS, KeyCode::KeyD, KeyCode::KeyK, KeyCode::KeyL]);
        settings.save(&path).unwrap();

        let loaded = RulesetSettings::load(&path);
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.keybinds_for(4),
            Some(&["KeyS", "KeyD", "KeyK", "KeyL"].map(String::from)[..])
        );
        assert_eq!(loaded.keybinds_for(7), None);
    }

    #[test]
    fn test_missing_or_broken_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(RulesetSettings::load(&missing), RulesetSettings::default());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "keybinds = 3").unwrap();
        assert_eq!(RulesetSettings::load(&broken), RulesetSettings::default());
    }

    #[test]
    fn test_parse_handwritten_file() {
        let settings: RulesetSettings =
            toml::from_str("[keybinds]\n1004 = [\"KeyW\", \"KeyE\", \"KeyI\", \"KeyO\"]\n").unwrap();
        assert_eq!(settings.keybinds_for(1004).map(<[String]>::len), Some(4));

        let mut settings = settings;
        settings.clear_keybinds(1004);
        assert!(settings.keybinds.is_empty());
    }
}
