//! Conversion between mania mods and the legacy 32-bit mod bitmask.
//!
//! The bit layout is the one stored in legacy scores and replays and must
//! not change. Decoding is total: unknown bits are ignored and contradictory
//! combinations (e.g. two key-count bits) decode to one mod per bit.
//!
//! Round-tripping is only guaranteed for masks produced by
//! [`convert_to_legacy`]; the codec is many-to-one (e.g. Daycore encodes as
//! Half Time).

use super::{Mod, ModKind};
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Legacy mod bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyMods(u32);

impl LegacyMods {
    pub const NONE: Self = Self(0);
    pub const NO_FAIL: Self = Self(1 << 0);
    pub const EASY: Self = Self(1 << 1);
    pub const TOUCH_DEVICE: Self = Self(1 << 2);
    pub const HIDDEN: Self = Self(1 << 3);
    pub const HARD_ROCK: Self = Self(1 << 4);
    pub const SUDDEN_DEATH: Self = Self(1 << 5);
    pub const DOUBLE_TIME: Self = Self(1 << 6);
    pub const RELAX: Self = Self(1 << 7);
    pub const HALF_TIME: Self = Self(1 << 8);
    /// Always stored together with `DOUBLE_TIME`.
    pub const NIGHTCORE: Self = Self(1 << 9);
    pub const FLASHLIGHT: Self = Self(1 << 10);
    pub const AUTOPLAY: Self = Self(1 << 11);
    pub const SPUN_OUT: Self = Self(1 << 12);
    pub const AUTOPILOT: Self = Self(1 << 13);
    /// Always stored together with `SUDDEN_DEATH`.
    pub const PERFECT: Self = Self(1 << 14);
    pub const KEY4: Self = Self(1 << 15);
    pub const KEY5: Self = Self(1 << 16);
    pub const KEY6: Self = Self(1 << 17);
    pub const KEY7: Self = Self(1 << 18);
    pub const KEY8: Self = Self(1 << 19);
    pub const FADE_IN: Self = Self(1 << 20);
    pub const RANDOM: Self = Self(1 << 21);
    /// Always stored together with `AUTOPLAY`.
    pub const CINEMA: Self = Self(1 << 22);
    pub const TARGET: Self = Self(1 << 23);
    pub const KEY9: Self = Self(1 << 24);
    pub const KEY_COOP: Self = Self(1 << 25);
    pub const KEY1: Self = Self(1 << 26);
    pub const KEY3: Self = Self(1 << 27);
    pub const KEY2: Self = Self(1 << 28);
    pub const SCORE_V2: Self = Self(1 << 29);
    pub const MIRROR: Self = Self(1 << 30);

    /// Key-count bits. 10K has no legacy bit.
    pub const KEY_MODS: Self = Self(
        Self::KEY1.0
            | Self::KEY2.0
            | Self::KEY3.0
            | Self::KEY4.0
            | Self::KEY5.0
            | Self::KEY6.0
            | Self::KEY7.0
            | Self::KEY8.0
            | Self::KEY9.0,
    );

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for LegacyMods {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for LegacyMods {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for LegacyMods {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<LegacyMods> for u32 {
    fn from(mods: LegacyMods) -> Self {
        mods.0
    }
}

/// Ordered decode table. Within a group the first matching flag wins and
/// the rest of the group is skipped, so a more specific flag hides the
/// general one it implies. Groups are evaluated top to bottom.
const DECODE_RULES: &[&[(LegacyMods, ModKind)]] = &[
    &[
        (LegacyMods::NIGHTCORE, ModKind::Nightcore),
        (LegacyMods::DOUBLE_TIME, ModKind::DoubleTime),
    ],
    &[
        (LegacyMods::PERFECT, ModKind::Perfect),
        (LegacyMods::SUDDEN_DEATH, ModKind::SuddenDeath),
    ],
    &[
        (LegacyMods::CINEMA, ModKind::Cinema),
        (LegacyMods::AUTOPLAY, ModKind::Autoplay),
    ],
    &[(LegacyMods::EASY, ModKind::Easy)],
    &[(LegacyMods::FADE_IN, ModKind::FadeIn)],
    &[(LegacyMods::FLASHLIGHT, ModKind::Flashlight)],
    &[(LegacyMods::HALF_TIME, ModKind::HalfTime)],
    &[(LegacyMods::HARD_ROCK, ModKind::HardRock)],
    &[(LegacyMods::HIDDEN, ModKind::Hidden)],
    &[(LegacyMods::KEY1, ModKind::Key1)],
    &[(LegacyMods::KEY2, ModKind::Key2)],
    &[(LegacyMods::KEY3, ModKind::Key3)],
    &[(LegacyMods::KEY4, ModKind::Key4)],
    &[(LegacyMods::KEY5, ModKind::Key5)],
    &[(LegacyMods::KEY6, ModKind::Key6)],
    &[(LegacyMods::KEY7, ModKind::Key7)],
    &[(LegacyMods::KEY8, ModKind::Key8)],
    &[(LegacyMods::KEY9, ModKind::Key9)],
    &[(LegacyMods::KEY_COOP, ModKind::DualStages)],
    &[(LegacyMods::NO_FAIL, ModKind::NoFail)],
    &[(LegacyMods::RANDOM, ModKind::Random)],
    &[(LegacyMods::MIRROR, ModKind::Mirror)],
];

/// Bits that the decode table looks at.
fn recognised_bits() -> u32 {
    DECODE_RULES
        .iter()
        .flat_map(|group| group.iter())
        .fold(0, |acc, (flag, _)| acc | flag.bits())
}

/// Decodes a legacy bitmask into mods, in decode-table order.
pub fn convert_from_legacy(flags: LegacyMods) -> Vec<Mod> {
    let ignored = flags.bits() & !recognised_bits();
    if ignored != 0 {
        log::debug!("LEGACY: ignoring unknown mod bits {:#010x}", ignored);
    }

    let key_bits = (flags.bits() & LegacyMods::KEY_MODS.bits()).count_ones();
    if key_bits > 1 {
        log::warn!(
            "LEGACY: {} key-count bits set in {:#010x}, decoding all of them",
            key_bits,
            flags.bits()
        );
    }

    DECODE_RULES
        .iter()
        .filter_map(|group| {
            group
                .iter()
                .find(|(flag, _)| flags.contains(*flag))
                .map(|(_, kind)| Mod::new(*kind))
        })
        .collect()
}

/// Bits any ruleset sets for a mod family, before mania-specific handling.
///
/// Fade In belongs to the Hidden family here, which is why the mania pass
/// has to take the Hidden bit back off.
fn family_bits(kind: ModKind) -> LegacyMods {
    match kind {
        ModKind::NoFail => LegacyMods::NO_FAIL,
        ModKind::Easy => LegacyMods::EASY,
        ModKind::Hidden | ModKind::FadeIn => LegacyMods::HIDDEN,
        ModKind::HardRock => LegacyMods::HARD_ROCK,
        ModKind::Perfect => LegacyMods::PERFECT | LegacyMods::SUDDEN_DEATH,
        ModKind::SuddenDeath => LegacyMods::SUDDEN_DEATH,
        ModKind::Nightcore => LegacyMods::NIGHTCORE | LegacyMods::DOUBLE_TIME,
        ModKind::DoubleTime => LegacyMods::DOUBLE_TIME,
        ModKind::HalfTime | ModKind::Daycore => LegacyMods::HALF_TIME,
        ModKind::Flashlight => LegacyMods::FLASHLIGHT,
        ModKind::Cinema => LegacyMods::CINEMA | LegacyMods::AUTOPLAY,
        ModKind::Autoplay => LegacyMods::AUTOPLAY,
        _ => LegacyMods::NONE,
    }
}

/// Encodes mods into a legacy bitmask.
///
/// Runs in two passes. The family pass ORs in the generic bits of every
/// mod. The mania pass then adds the ruleset's own bits and applies the
/// Fade In override: Fade In sets its bit and clears Hidden, even if a
/// separate Hidden mod is also present. Mods with no legacy bit (10K,
/// conversion and fun mods) are skipped.
pub fn convert_to_legacy(mods: &[Mod]) -> LegacyMods {
    let mut value = mods
        .iter()
        .fold(LegacyMods::NONE, |acc, m| acc | family_bits(m.kind()));

    for m in mods {
        match m.kind() {
            ModKind::Key1 => value |= LegacyMods::KEY1,
            ModKind::Key2 => value |= LegacyMods::KEY2,
            ModKind::Key3 => value |= LegacyMods::KEY3,
            ModKind::Key4 => value |= LegacyMods::KEY4,
            ModKind::Key5 => value |= LegacyMods::KEY5,
            ModKind::Key6 => value |= LegacyMods::KEY6,
            ModKind::Key7 => value |= LegacyMods::KEY7,
            ModKind::Key8 => value |= LegacyMods::KEY8,
            ModKind::Key9 => value |= LegacyMods::KEY9,
            ModKind::DualStages => value |= LegacyMods::KEY_COOP,
            ModKind::FadeIn => {
                value |= LegacyMods::FADE_IN;
                value.remove(LegacyMods::HIDDEN);
            }
            ModKind::Mirror => value |= LegacyMods::MIRROR,
            ModKind::Random => value |= LegacyMods::RANDOM,
            _ => {}
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(mods: &[Mod]) -> Vec<ModKind> {
        mods.iter().map(Mod::kind).collect()
    }

    #[test]
    fn test_nightcore_hides_double_time() {
        let flags = LegacyMods::NIGHTCORE | LegacyMods::DOUBLE_TIME;
        assert_eq!(kinds(&convert_from_legacy(flags)), vec![ModKind::Nightcore]);
        assert_eq!(
            kinds(&convert_from_legacy(LegacyMods::DOUBLE_TIME)),
            vec![ModKind::DoubleTime]
        );
    }

    #[test]
    fn test_perfect_and_cinema_precedence() {
        let flags = LegacyMods::PERFECT
            | LegacyMods::SUDDEN_DEATH
            | LegacyMods::CINEMA
            | LegacyMods::AUTOPLAY;
        assert_eq!(
            kinds(&convert_from_legacy(flags)),
            vec![ModKind::Perfect, ModKind::Cinema]
        );
    }

    #[test]
    fn test_decode_order() {
        let flags = LegacyMods::MIRROR
            | LegacyMods::KEY7
            | LegacyMods::HIDDEN
            | LegacyMods::EASY
            | LegacyMods::DOUBLE_TIME;
        assert_eq!(
            kinds(&convert_from_legacy(flags)),
            vec![
                ModKind::DoubleTime,
                ModKind::Easy,
                ModKind::Hidden,
                ModKind::Key7,
                ModKind::Mirror
            ]
        );
    }

    #[test]
    fn test_contradictory_key_bits_decode_each() {
        let flags = LegacyMods::KEY4 | LegacyMods::KEY7 | LegacyMods::KEY_COOP;
        assert_eq!(
            kinds(&convert_from_legacy(flags)),
            vec![ModKind::Key4, ModKind::Key7, ModKind::DualStages]
        );
    }

    #[test]
    fn test_fade_in_clears_hidden() {
        let value = convert_to_legacy(&[Mod::new(ModKind::FadeIn)]);
        assert_eq!(value, LegacyMods::FADE_IN);

        // The override wins even when Hidden is selected explicitly.
        let value = convert_to_legacy(&[Mod::new(ModKind::Hidden), Mod::new(ModKind::FadeIn)]);
        assert_eq!(value, LegacyMods::FADE_IN);
    }

    #[test]
    fn test_implied_bits_are_encoded() {
        assert_eq!(
            convert_to_legacy(&[Mod::new(ModKind::Nightcore)]),
            LegacyMods::NIGHTCORE | LegacyMods::DOUBLE_TIME
        );
        assert_eq!(
            convert_to_legacy(&[Mod::new(ModKind::Perfect)]),
            LegacyMods::PERFECT | LegacyMods::SUDDEN_DEATH
        );
        assert_eq!(
            convert_to_legacy(&[Mod::new(ModKind::Cinema)]),
            LegacyMods::CINEMA | LegacyMods::AUTOPLAY
        );
        assert_eq!(
            convert_to_legacy(&[Mod::new(ModKind::Daycore)]),
            LegacyMods::HALF_TIME
        );
    }

    #[test]
    fn test_mods_without_legacy_bits() {
        let mods: Vec<Mod> = [
            ModKind::Key10,
            ModKind::Classic,
            ModKind::Invert,
            ModKind::WindUp,
            ModKind::AdaptiveSpeed,
        ]
        .into_iter()
        .map(Mod::new)
        .collect();
        assert!(convert_to_legacy(&mods).is_empty());
    }

    #[test]
    fn test_contains_requires_all_bits() {
        let flags = LegacyMods::NIGHTCORE;
        assert!(flags.contains(LegacyMods::NIGHTCORE));
        assert!(!flags.contains(LegacyMods::NIGHTCORE | LegacyMods::DOUBLE_TIME));
        assert!(!flags.contains(LegacyMods::NONE));
    }
}
