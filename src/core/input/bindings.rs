use super::actions::ColumnAction;
use super::generator::default_bindings;
use crate::models::settings::RulesetSettings;
use crate::models::variant::Layout;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// One action bound to one physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub action: ColumnAction,
    pub key: KeyCode,
}

impl KeyBinding {
    pub fn new(action: ColumnAction, key: KeyCode) -> Self {
        Self { action, key }
    }
}

/// Column bindings in effect for one layout.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    layout: Layout,
    bindings: Vec<KeyBinding>,
    lookup: HashMap<KeyCode, ColumnAction>,
}

impl KeyBindings {
    /// Default bindings for `layout`.
    pub fn new(layout: Layout) -> Self {
        Self::from_bindings(layout, default_bindings(layout))
    }

    /// Default bindings, replaced by the user's keys for this variant when
    /// the settings hold a usable override.
    pub fn from_settings(layout: Layout, settings: &RulesetSettings) -> Self {
        let mut bindings = Self::new(layout);
        bindings.reload_from_settings(settings);
        bindings
    }

    fn from_bindings(layout: Layout, bindings: Vec<KeyBinding>) -> Self {
        let lookup = bindings.iter().map(|b| (b.key, b.action)).collect();
        Self {
            layout,
            bindings,
            lookup,
        }
    }

    pub fn reload_from_settings(&mut self, settings: &RulesetSettings) {
        let variant = self.layout.variant();
        let Some(custom_keys) = settings.keybinds_for(variant) else {
            return;
        };

        match parse_override(custom_keys, self.layout.total_columns()) {
            Ok(keys) => {
                let bindings = self
                    .bindings
                    .iter()
                    .zip(keys)
                    .map(|(b, key)| KeyBinding::new(b.action, key))
                    .collect();
                *self = Self::from_bindings(self.layout, bindings);
                log::debug!("INPUT: loaded custom bindings for {}", self.layout);
            }
            Err(reason) => {
                log::warn!(
                    "INPUT: ignoring custom bindings for {} ({}), keeping defaults",
                    self.layout,
                    reason
                );
            }
        }
    }

    pub fn resolve(&self, key: KeyCode) -> Option<ColumnAction> {
        self.lookup.get(&key).copied()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Keys in column order, as stored in the settings file.
    pub fn key_names(&self) -> Vec<String> {
        self.bindings
            .iter()
            .filter_map(|b| keycode_name(b.key))
            .map(str::to_string)
            .collect()
    }
}

/// Parses a user override. It must name exactly `columns` distinct keys.
fn parse_override(names: &[String], columns: usize) -> Result<Vec<KeyCode>, String> {
    if names.len() != columns {
        return Err(format!("expected {} keys, found {}", columns, names.len()));
    }

    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| {
            let key = parse_keycode(name).ok_or_else(|| format!("unknown keycode {}", name))?;
            if !seen.insert(key) {
                return Err(format!("{} bound twice", name));
            }
            Ok(key)
        })
        .collect()
}

/// Names used for keys in settings files (winit `KeyCode` variant names).
const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("KeyA", KeyCode::KeyA),
    ("KeyB", KeyCode::KeyB),
    ("KeyC", KeyCode::KeyC),
    ("KeyD", KeyCode::KeyD),
    ("KeyE", KeyCode::KeyE),
    ("KeyF", KeyCode::KeyF),
    ("KeyG", KeyCode::KeyG),
    ("KeyH", KeyCode::KeyH),
    ("KeyI", KeyCode::KeyI),
    ("KeyJ", KeyCode::KeyJ),
    ("KeyK", KeyCode::KeyK),
    ("KeyL", KeyCode::KeyL),
    ("KeyM", KeyCode::KeyM),
    ("KeyN", KeyCode::KeyN),
    ("KeyO", KeyCode::KeyO),
    ("KeyP", KeyCode::KeyP),
    ("KeyQ", KeyCode::KeyQ),
    ("KeyR", KeyCode::KeyR),
    ("KeyS", KeyCode::KeyS),
    ("KeyT", KeyCode::KeyT),
    ("KeyU", KeyCode::KeyU),
    ("KeyV", KeyCode::KeyV),
    ("KeyW", KeyCode::KeyW),
    ("KeyX", KeyCode::KeyX),
    ("KeyY", KeyCode::KeyY),
    ("KeyZ", KeyCode::KeyZ),
    ("Digit0", KeyCode::Digit0),
    ("Digit1", KeyCode::Digit1),
    ("Digit2", KeyCode::Digit2),
    ("Digit3", KeyCode::Digit3),
    ("Digit4", KeyCode::Digit4),
    ("Digit5", KeyCode::Digit5),
    ("Digit6", KeyCode::Digit6),
    ("Digit7", KeyCode::Digit7),
    ("Digit8", KeyCode::Digit8),
    ("Digit9", KeyCode::Digit9),
    ("Space", KeyCode::Space),
    ("Enter", KeyCode::Enter),
    ("Escape", KeyCode::Escape),
    ("Backspace", KeyCode::Backspace),
    ("Tab", KeyCode::Tab),
    ("ShiftLeft", KeyCode::ShiftLeft),
    ("ShiftRight", KeyCode::ShiftRight),
    ("ControlLeft", KeyCode::ControlLeft),
    ("ControlRight", KeyCode::ControlRight),
    ("AltLeft", KeyCode::AltLeft),
    ("AltRight", KeyCode::AltRight),
    ("Semicolon", KeyCode::Semicolon),
    ("Quote", KeyCode::Quote),
    ("Comma", KeyCode::Comma),
    ("Period", KeyCode::Period),
    ("Slash", KeyCode::Slash),
    ("Backslash", KeyCode::Backslash),
    ("BracketLeft", KeyCode::BracketLeft),
    ("BracketRight", KeyCode::BracketRight),
    ("Minus", KeyCode::Minus),
    ("Equal", KeyCode::Equal),
];

pub fn parse_keycode(name: &str) -> Option<KeyCode> {
    KEY_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, key)| *key)
}

pub fn keycode_name(key: KeyCode) -> Option<&'static str> {
    KEY_NAMES
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(variant: i32, keys: &[&str]) -> RulesetSettings {
        let mut settings = RulesetSettings::default();
        settings.keybinds.insert(
            variant.to_string(),
            keys.iter().map(|k| k.to_string()).collect(),
        );
        settings
    }

    #[test]
    fn test_resolve_defaults() {
        let bindings = KeyBindings::new(Layout::single(4).unwrap());
        assert_eq!(bindings.resolve(KeyCode::KeyD), Some(ColumnAction::new(0, 0)));
        assert_eq!(bindings.resolve(KeyCode::KeyK), Some(ColumnAction::new(0, 3)));
        assert_eq!(bindings.resolve(KeyCode::Space), None);
    }

    #[test]
    fn test_custom_bindings_replace_defaults() {
        let settings = settings_with(4, &["KeyS", "KeyD", "KeyK", "KeyL"]);
        let bindings = KeyBindings::from_settings(Layout::single(4).unwrap(), &settings);
        assert_eq!(bindings.resolve(KeyCode::KeyS), Some(ColumnAction::new(0, 0)));
        assert_eq!(bindings.resolve(KeyCode::KeyL), Some(ColumnAction::new(0, 3)));
        assert_eq!(bindings.resolve(KeyCode::KeyF), None);
        assert_eq!(bindings.key_names(), vec!["KeyS", "KeyD", "KeyK", "KeyL"]);
    }

    #[test]
    fn test_invalid_overrides_keep_defaults() {
        let layout = Layout::single(4).unwrap();
        let defaults = KeyBindings::new(layout);

        for keys in [
            &["KeyS", "KeyD", "KeyK"][..],
            &["KeyS", "KeyD", "KeyK", "NotAKey"][..],
            &["KeyS", "KeyS", "KeyK", "KeyL"][..],
        ] {
            let bindings = KeyBindings::from_settings(layout, &settings_with(4, keys));
            assert_eq!(bindings.bindings(), defaults.bindings());
        }
    }

    #[test]
    fn test_override_is_per_variant() {
        let settings = settings_with(4, &["KeyS", "KeyD", "KeyK", "KeyL"]);
        let bindings = KeyBindings::from_settings(Layout::dual(2).unwrap(), &settings);
        assert_eq!(bindings.bindings(), KeyBindings::new(Layout::dual(2).unwrap()).bindings());
    }

    #[test]
    fn test_editing_keys_are_bindable() {
        let settings = settings_with(2, &["Escape", "Backspace"]);
        let bindings = KeyBindings::from_settings(Layout::single(2).unwrap(), &settings);
        assert_eq!(bindings.resolve(KeyCode::Escape), Some(ColumnAction::new(0, 0)));
        assert_eq!(bindings.resolve(KeyCode::Backspace), Some(ColumnAction::new(0, 1)));
    }

    #[test]
    fn test_key_names_round_trip() {
        for (name, key) in KEY_NAMES {
            assert_eq!(parse_keycode(name), Some(*key));
            assert_eq!(keycode_name(*key), Some(*name));
        }
        assert_eq!(parse_keycode("keyd"), None);
    }
}
