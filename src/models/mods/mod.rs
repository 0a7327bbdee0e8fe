//! Gameplay modifiers ("mods") for the mania ruleset.
//!
//! A [`Mod`] is identified by its [`ModKind`]; settings carried alongside it
//! never take part in equality. Mods that exclude each other are grouped in
//! a [`MultiMod`] by the catalog.

pub mod catalog;
pub mod legacy;
pub mod settings;

pub use catalog::{ModEntry, MultiMod, mods_for};
pub use legacy::{LegacyMods, convert_from_legacy, convert_to_legacy};
pub use settings::{ModSetting, SettingBounds, SettingValue};

use crate::error::RulesetError;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Category a mod is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModType {
    DifficultyReduction,
    DifficultyIncrease,
    Conversion,
    Automation,
    Fun,
    /// Mods applied by the client itself; the mania ruleset lists none.
    System,
}

impl ModType {
    pub const ALL: [ModType; 6] = [
        ModType::DifficultyReduction,
        ModType::DifficultyIncrease,
        ModType::Conversion,
        ModType::Automation,
        ModType::Fun,
        ModType::System,
    ];
}

/// Every mod the mania ruleset knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModKind {
    Easy,
    NoFail,
    HalfTime,
    Daycore,
    HardRock,
    SuddenDeath,
    Perfect,
    DoubleTime,
    Nightcore,
    FadeIn,
    Hidden,
    Flashlight,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Key10,
    Random,
    DualStages,
    Mirror,
    DifficultyAdjust,
    Classic,
    Invert,
    ConstantSpeed,
    HoldOff,
    Autoplay,
    Cinema,
    WindUp,
    WindDown,
    Muted,
    AdaptiveSpeed,
}

impl ModKind {
    pub const ALL: [ModKind; 36] = [
        ModKind::Easy,
        ModKind::NoFail,
        ModKind::HalfTime,
        ModKind::Daycore,
        ModKind::HardRock,
        ModKind::SuddenDeath,
        ModKind::Perfect,
        ModKind::DoubleTime,
        ModKind::Nightcore,
        ModKind::FadeIn,
        ModKind::Hidden,
        ModKind::Flashlight,
        ModKind::Key1,
        ModKind::Key2,
        ModKind::Key3,
        ModKind::Key4,
        ModKind::Key5,
        ModKind::Key6,
        ModKind::Key7,
        ModKind::Key8,
        ModKind::Key9,
        ModKind::Key10,
        ModKind::Random,
        ModKind::DualStages,
        ModKind::Mirror,
        ModKind::DifficultyAdjust,
        ModKind::Classic,
        ModKind::Invert,
        ModKind::ConstantSpeed,
        ModKind::HoldOff,
        ModKind::Autoplay,
        ModKind::Cinema,
        ModKind::WindUp,
        ModKind::WindDown,
        ModKind::Muted,
        ModKind::AdaptiveSpeed,
    ];

    pub fn acronym(self) -> &'static str {
        match self {
            ModKind::Easy => "EZ",
            ModKind::NoFail => "NF",
            ModKind::HalfTime => "HT",
            ModKind::Daycore => "DC",
            ModKind::HardRock => "HR",
            ModKind::SuddenDeath => "SD",
            ModKind::Perfect => "PF",
            ModKind::DoubleTime => "DT",
            ModKind::Nightcore => "NC",
            ModKind::FadeIn => "FI",
            ModKind::Hidden => "HD",
            ModKind::Flashlight => "FL",
            ModKind::Key1 => "1K",
            ModKind::Key2 => "2K",
            ModKind::Key3 => "3K",
            ModKind::Key4 => "4K",
            ModKind::Key5 => "5K",
            ModKind::Key6 => "6K",
            ModKind::Key7 => "7K",
            ModKind::Key8 => "8K",
            ModKind::Key9 => "9K",
            ModKind::Key10 => "10K",
            ModKind::Random => "RD",
            ModKind::DualStages => "DS",
            ModKind::Mirror => "MR",
            ModKind::DifficultyAdjust => "DA",
            ModKind::Classic => "CL",
            ModKind::Invert => "IN",
            ModKind::ConstantSpeed => "CS",
            ModKind::HoldOff => "HO",
            ModKind::Autoplay => "AT",
            ModKind::Cinema => "CN",
            ModKind::WindUp => "WU",
            ModKind::WindDown => "WD",
            ModKind::Muted => "MU",
            ModKind::AdaptiveSpeed => "AS",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModKind::Easy => "Easy",
            ModKind::NoFail => "No Fail",
            ModKind::HalfTime => "Half Time",
            ModKind::Daycore => "Daycore",
            ModKind::HardRock => "Hard Rock",
            ModKind::SuddenDeath => "Sudden Death",
            ModKind::Perfect => "Perfect",
            ModKind::DoubleTime => "Double Time",
            ModKind::Nightcore => "Nightcore",
            ModKind::FadeIn => "Fade In",
            ModKind::Hidden => "Hidden",
            ModKind::Flashlight => "Flashlight",
            ModKind::Key1 => "One Key",
            ModKind::Key2 => "Two Keys",
            ModKind::Key3 => "Three Keys",
            ModKind::Key4 => "Four Keys",
            ModKind::Key5 => "Five Keys",
            ModKind::Key6 => "Six Keys",
            ModKind::Key7 => "Seven Keys",
            ModKind::Key8 => "Eight Keys",
            ModKind::Key9 => "Nine Keys",
            ModKind::Key10 => "Ten Keys",
            ModKind::Random => "Random",
            ModKind::DualStages => "Dual Stages",
            ModKind::Mirror => "Mirror",
            ModKind::DifficultyAdjust => "Difficulty Adjust",
            ModKind::Classic => "Classic",
            ModKind::Invert => "Invert",
            ModKind::ConstantSpeed => "Constant Speed",
            ModKind::HoldOff => "Hold Off",
            ModKind::Autoplay => "Autoplay",
            ModKind::Cinema => "Cinema",
            ModKind::WindUp => "Wind Up",
            ModKind::WindDown => "Wind Down",
            ModKind::Muted => "Muted",
            ModKind::AdaptiveSpeed => "Adaptive Speed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ModKind::Easy => "More forgiving HP drain, less accuracy required, and three lives!",
            ModKind::NoFail => "You can't fail, no matter what.",
            ModKind::HalfTime => "Less zoom...",
            ModKind::Daycore => "Whoaaaaa...",
            ModKind::HardRock => "Everything just got a bit harder...",
            ModKind::SuddenDeath => "Miss and fail.",
            ModKind::Perfect => "SS or quit.",
            ModKind::DoubleTime => "Zoooooooooom...",
            ModKind::Nightcore => "Uguuuuuuuu...",
            ModKind::FadeIn => "Keys appear out of nowhere!",
            ModKind::Hidden => "Keys fade out before you hit them!",
            ModKind::Flashlight => "Restricted view area.",
            ModKind::Key1
            | ModKind::Key2
            | ModKind::Key3
            | ModKind::Key4
            | ModKind::Key5
            | ModKind::Key6
            | ModKind::Key7
            | ModKind::Key8
            | ModKind::Key9
            | ModKind::Key10 => "Play with a fixed number of keys.",
            ModKind::Random => "Shuffle around the keys!",
            ModKind::DualStages => "Double the stages, double the fun!",
            ModKind::Mirror => "Notes are flipped horizontally.",
            ModKind::DifficultyAdjust => "Override a beatmap's difficulty settings.",
            ModKind::Classic => "Feeling nostalgic?",
            ModKind::Invert => "Hold the keys. To the beat.",
            ModKind::ConstantSpeed => "No more tricky speed changes!",
            ModKind::HoldOff => "Replaces all hold notes with normal notes.",
            ModKind::Autoplay => "Watch a perfect automated play through the song.",
            ModKind::Cinema => "Watch the video without visual distractions.",
            ModKind::WindUp => "Can you keep up?",
            ModKind::WindDown => "Sloooow doooown...",
            ModKind::Muted => "Can you still feel the rhythm without music?",
            ModKind::AdaptiveSpeed => "Let track speed adapt to you.",
        }
    }

    pub fn mod_type(self) -> ModType {
        match self {
            ModKind::Easy | ModKind::NoFail | ModKind::HalfTime | ModKind::Daycore => {
                ModType::DifficultyReduction
            }
            ModKind::HardRock
            | ModKind::SuddenDeath
            | ModKind::Perfect
            | ModKind::DoubleTime
            | ModKind::Nightcore
            | ModKind::FadeIn
            | ModKind::Hidden
            | ModKind::Flashlight => ModType::DifficultyIncrease,
            ModKind::Autoplay | ModKind::Cinema => ModType::Automation,
            ModKind::WindUp | ModKind::WindDown | ModKind::Muted | ModKind::AdaptiveSpeed => {
                ModType::Fun
            }
            _ => ModType::Conversion,
        }
    }

    pub fn score_multiplier(self) -> f64 {
        match self {
            ModKind::Easy | ModKind::NoFail => 0.5,
            ModKind::HalfTime | ModKind::Daycore => 0.5,
            ModKind::DifficultyAdjust | ModKind::AdaptiveSpeed => 0.5,
            ModKind::WindUp | ModKind::WindDown => 0.5,
            ModKind::Classic => 0.96,
            ModKind::ConstantSpeed | ModKind::HoldOff => 0.9,
            ModKind::Invert => 0.4,
            k if k.key_count().is_some() => 0.9,
            _ => 1.0,
        }
    }

    /// Whether plays with this mod are eligible for ranking.
    pub fn ranked(self) -> bool {
        match self {
            ModKind::Easy
            | ModKind::NoFail
            | ModKind::HalfTime
            | ModKind::Daycore
            | ModKind::HardRock
            | ModKind::SuddenDeath
            | ModKind::Perfect
            | ModKind::DoubleTime
            | ModKind::Nightcore
            | ModKind::FadeIn
            | ModKind::Hidden
            | ModKind::Flashlight
            | ModKind::Random
            | ModKind::DualStages
            | ModKind::Mirror => true,
            // 10K has no legacy bit to submit under.
            ModKind::Key10 => false,
            k => k.key_count().is_some(),
        }
    }

    /// Column count forced by a key mod.
    pub fn key_count(self) -> Option<usize> {
        match self {
            ModKind::Key1 => Some(1),
            ModKind::Key2 => Some(2),
            ModKind::Key3 => Some(3),
            ModKind::Key4 => Some(4),
            ModKind::Key5 => Some(5),
            ModKind::Key6 => Some(6),
            ModKind::Key7 => Some(7),
            ModKind::Key8 => Some(8),
            ModKind::Key9 => Some(9),
            ModKind::Key10 => Some(10),
            _ => None,
        }
    }

    /// Case-insensitive acronym lookup.
    pub fn from_acronym(acronym: &str) -> Result<ModKind, RulesetError> {
        ModKind::ALL
            .iter()
            .copied()
            .find(|k| k.acronym().eq_ignore_ascii_case(acronym))
            .ok_or_else(|| RulesetError::UnknownAcronym(acronym.to_string()))
    }

    fn default_settings(self) -> Vec<ModSetting> {
        match self {
            ModKind::Easy => vec![ModSetting::int("retries", "Extra lives", 0, 10, 2)],
            ModKind::HalfTime => vec![
                ModSetting::float("speed_change", "Speed decrease", 0.5, 0.99, 0.01, 0.75),
                ModSetting::boolean("adjust_pitch", "Adjust pitch", false),
            ],
            ModKind::Daycore => vec![ModSetting::float(
                "speed_change",
                "Speed decrease",
                0.5,
                0.99,
                0.01,
                0.75,
            )],
            ModKind::DoubleTime => vec![
                ModSetting::float("speed_change", "Speed increase", 1.01, 2.0, 0.01, 1.5),
                ModSetting::boolean("adjust_pitch", "Adjust pitch", false),
            ],
            ModKind::Nightcore => vec![ModSetting::float(
                "speed_change",
                "Speed increase",
                1.01,
                2.0,
                0.01,
                1.5,
            )],
            ModKind::SuddenDeath | ModKind::Perfect => {
                vec![ModSetting::boolean("restart", "Restart on fail", false)]
            }
            ModKind::FadeIn | ModKind::Hidden => vec![ModSetting::float(
                "coverage",
                "Coverage",
                0.2,
                0.8,
                0.1,
                0.5,
            )],
            ModKind::Flashlight => vec![
                ModSetting::float("size_multiplier", "Flashlight size", 0.5, 3.0, 0.1, 1.0),
                ModSetting::boolean("combo_based_size", "Change size based on combo", false),
            ],
            ModKind::Random => vec![ModSetting::optional_int("seed", "Seed")],
            ModKind::DifficultyAdjust => vec![
                ModSetting::float("drain_rate", "HP Drain", 0.0, 10.0, 0.1, 5.0),
                ModSetting::float("overall_difficulty", "Accuracy", 0.0, 10.0, 0.1, 5.0),
            ],
            ModKind::WindUp => vec![
                ModSetting::float("initial_rate", "Initial rate", 0.5, 1.95, 0.01, 1.0),
                ModSetting::float("final_rate", "Final rate", 0.55, 2.0, 0.01, 1.5),
                ModSetting::boolean("adjust_pitch", "Adjust pitch", false),
            ],
            ModKind::WindDown => vec![
                ModSetting::float("initial_rate", "Initial rate", 0.55, 2.0, 0.01, 1.0),
                ModSetting::float("final_rate", "Final rate", 0.5, 1.95, 0.01, 0.75),
                ModSetting::boolean("adjust_pitch", "Adjust pitch", false),
            ],
            ModKind::Muted => vec![
                ModSetting::boolean("inverse_muting", "Start muted", false),
                ModSetting::boolean("enable_metronome", "Enable metronome", true),
                ModSetting::int("mute_combo_count", "Final volume at combo", 0, 500, 100),
            ],
            ModKind::AdaptiveSpeed => vec![
                ModSetting::float("initial_rate", "Initial rate", 0.5, 2.0, 0.01, 1.0),
                ModSetting::boolean("adjust_pitch", "Adjust pitch", true),
            ],
            _ => Vec::new(),
        }
    }
}

/// A mod instance with its own copy of the settings.
///
/// Cloning yields independent settings. Equality and hashing look at the
/// kind only.
#[derive(Debug, Clone)]
pub struct Mod {
    kind: ModKind,
    settings: Vec<ModSetting>,
}

impl Mod {
    pub fn new(kind: ModKind) -> Self {
        Self {
            kind,
            settings: kind.default_settings(),
        }
    }

    pub fn from_acronym(acronym: &str) -> Result<Self, RulesetError> {
        ModKind::from_acronym(acronym).map(Self::new)
    }

    pub fn kind(&self) -> ModKind {
        self.kind
    }

    pub fn acronym(&self) -> &'static str {
        self.kind.acronym()
    }

    pub fn mod_type(&self) -> ModType {
        self.kind.mod_type()
    }

    pub fn score_multiplier(&self) -> f64 {
        self.kind.score_multiplier()
    }

    pub fn ranked(&self) -> bool {
        self.kind.ranked()
    }

    pub fn settings(&self) -> &[ModSetting] {
        &self.settings
    }

    pub fn setting(&self, key: &str) -> Option<&ModSetting> {
        self.settings.iter().find(|s| s.key == key)
    }

    pub fn set_setting(&mut self, key: &str, value: SettingValue) -> Result<(), RulesetError> {
        self.settings
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or_else(|| RulesetError::UnknownSetting(key.to_string()))?
            .set(value)
    }

    /// Builder form of [`Mod::set_setting`].
    pub fn with_setting(mut self, key: &str, value: SettingValue) -> Result<Self, RulesetError> {
        self.set_setting(key, value)?;
        Ok(self)
    }

    /// Constant playback rate applied by this mod (1.0 if it does not change speed).
    pub fn speed_change(&self) -> f64 {
        match self.kind {
            ModKind::HalfTime | ModKind::Daycore | ModKind::DoubleTime | ModKind::Nightcore => self
                .setting("speed_change")
                .and_then(ModSetting::as_f64)
                .unwrap_or(1.0),
            _ => 1.0,
        }
    }

    /// Two mods are incompatible when the catalog bundles them in the same slot.
    pub fn is_compatible_with(&self, other: &Mod) -> bool {
        self.kind == other.kind || !catalog::share_slot(self.kind, other.kind)
    }
}

impl PartialEq for Mod {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Mod {}

impl Hash for Mod {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl From<ModKind> for Mod {
    fn from(kind: ModKind) -> Self {
        Mod::new(kind)
    }
}

/// Lists every pair of mutually exclusive mods in `mods`. A mod listed
/// twice conflicts with itself.
///
/// Decoding never calls this: legacy data may legitimately be contradictory,
/// and rejecting it is left to the caller.
pub fn validate_combination(mods: &[Mod]) -> Vec<(ModKind, ModKind)> {
    let mut conflicts = Vec::new();
    for (i, a) in mods.iter().enumerate() {
        for b in &mods[i + 1..] {
            if a.kind == b.kind || !a.is_compatible_with(b) {
                conflicts.push((a.kind, b.kind));
            }
        }
    }
    conflicts
}

/// Combined score multiplier of a selection.
pub fn total_score_multiplier(mods: &[Mod]) -> f64 {
    mods.iter().map(Mod::score_multiplier).product()
}

/// Combined constant playback rate of a selection.
pub fn total_rate(mods: &[Mod]) -> f64 {
    mods.iter().map(Mod::speed_change).product()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_settings() {
        let a = Mod::new(ModKind::DoubleTime);
        let b = Mod::new(ModKind::DoubleTime)
            .with_setting("speed_change", SettingValue::Float(2.0))
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Mod::new(ModKind::Nightcore));
    }

    #[test]
    fn test_copy_has_independent_settings() {
        let mut original = Mod::new(ModKind::DoubleTime);
        let copy = original.clone();

        original
            .set_setting("speed_change", SettingValue::Float(2.0))
            .unwrap();

        assert!((original.speed_change() - 2.0).abs() < 1e-9);
        assert!((copy.speed_change() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_acronym_lookup() {
        assert_eq!(ModKind::from_acronym("nc"), Ok(ModKind::Nightcore));
        assert_eq!(ModKind::from_acronym("10K"), Ok(ModKind::Key10));
        assert_eq!(
            ModKind::from_acronym("XX"),
            Err(RulesetError::UnknownAcronym("XX".to_string()))
        );
        for kind in ModKind::ALL {
            assert_eq!(ModKind::from_acronym(kind.acronym()), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_setting() {
        let mut hr = Mod::new(ModKind::HardRock);
        assert_eq!(
            hr.set_setting("speed_change", SettingValue::Float(1.2)),
            Err(RulesetError::UnknownSetting("speed_change".to_string()))
        );
    }

    #[test]
    fn test_bundled_mods_conflict() {
        let mods = vec![
            Mod::new(ModKind::Key4),
            Mod::new(ModKind::Key7),
            Mod::new(ModKind::HardRock),
            Mod::new(ModKind::Hidden),
            Mod::new(ModKind::FadeIn),
        ];
        let conflicts = validate_combination(&mods);
        assert_eq!(
            conflicts,
            vec![
                (ModKind::Key4, ModKind::Key7),
                (ModKind::Hidden, ModKind::FadeIn)
            ]
        );
    }

    #[test]
    fn test_duplicates_conflict() {
        let mods = vec![
            Mod::new(ModKind::DoubleTime),
            Mod::new(ModKind::Mirror),
            Mod::new(ModKind::DoubleTime),
        ];
        assert_eq!(
            validate_combination(&mods),
            vec![(ModKind::DoubleTime, ModKind::DoubleTime)]
        );
    }

    #[test]
    fn test_ranked() {
        for kind in [ModKind::Key1, ModKind::Key9, ModKind::DualStages, ModKind::Mirror] {
            assert!(kind.ranked(), "{:?}", kind);
        }
        for kind in [
            ModKind::Key10,
            ModKind::DifficultyAdjust,
            ModKind::Invert,
            ModKind::Autoplay,
            ModKind::Cinema,
            ModKind::WindUp,
        ] {
            assert!(!kind.ranked(), "{:?}", kind);
        }
        assert!(Mod::new(ModKind::Nightcore).ranked());
    }

    #[test]
    fn test_rates_and_multipliers() {
        let mods = vec![Mod::new(ModKind::HalfTime), Mod::new(ModKind::NoFail)];
        assert!((total_rate(&mods) - 0.75).abs() < 1e-9);
        assert!((total_score_multiplier(&mods) - 0.25).abs() < 1e-9);
        assert!((total_rate(&[]) - 1.0).abs() < 1e-9);
    }
}
