//! Mods offered by the mania ruleset, per category, in display order.

use super::{Mod, ModKind, ModType};

/// A bundle of mutually exclusive mods shown as one slot.
/// At most one member is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiMod {
    pub mods: Vec<Mod>,
}

impl MultiMod {
    pub fn new(kinds: &[ModKind]) -> Self {
        Self {
            mods: kinds.iter().copied().map(Mod::new).collect(),
        }
    }

    pub fn contains(&self, kind: ModKind) -> bool {
        self.mods.iter().any(|m| m.kind() == kind)
    }

    /// The member of this bundle that is active in `selected`, if any.
    pub fn active<'a>(&self, selected: &'a [Mod]) -> Option<&'a Mod> {
        selected.iter().find(|m| self.contains(m.kind()))
    }
}

/// One catalog slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ModEntry {
    Single(Mod),
    Multi(MultiMod),
}

impl ModEntry {
    pub fn contains(&self, kind: ModKind) -> bool {
        match self {
            ModEntry::Single(m) => m.kind() == kind,
            ModEntry::Multi(multi) => multi.contains(kind),
        }
    }

    /// Every mod reachable from this slot.
    pub fn kinds(&self) -> Vec<ModKind> {
        match self {
            ModEntry::Single(m) => vec![m.kind()],
            ModEntry::Multi(multi) => multi.mods.iter().map(Mod::kind).collect(),
        }
    }
}

fn single(kind: ModKind) -> ModEntry {
    ModEntry::Single(Mod::new(kind))
}

fn multi(kinds: &[ModKind]) -> ModEntry {
    ModEntry::Multi(MultiMod::new(kinds))
}

/// Mods listed under `mod_type`, in display order.
/// Categories the ruleset does not populate yield an empty list.
pub fn mods_for(mod_type: ModType) -> Vec<ModEntry> {
    use ModKind::*;

    match mod_type {
        ModType::DifficultyReduction => vec![
            single(Easy),
            single(NoFail),
            multi(&[HalfTime, Daycore]),
        ],
        ModType::DifficultyIncrease => vec![
            single(HardRock),
            multi(&[SuddenDeath, Perfect]),
            multi(&[DoubleTime, Nightcore]),
            multi(&[FadeIn, Hidden]),
            single(Flashlight),
        ],
        // 4K-9K come first, then 10K, then the rarely used 1K-3K.
        ModType::Conversion => vec![
            multi(&[Key4, Key5, Key6, Key7, Key8, Key9, Key10, Key1, Key2, Key3]),
            single(Random),
            single(DualStages),
            single(Mirror),
            single(DifficultyAdjust),
            single(Classic),
            single(Invert),
            single(ConstantSpeed),
            single(HoldOff),
        ],
        ModType::Automation => vec![multi(&[Autoplay, Cinema])],
        ModType::Fun => vec![
            multi(&[WindUp, WindDown]),
            single(Muted),
            single(AdaptiveSpeed),
        ],
        ModType::System => Vec::new(),
    }
}

/// Whether `a` and `b` are distinct members of the same catalog bundle.
pub(crate) fn share_slot(a: ModKind, b: ModKind) -> bool {
    if a == b || a.mod_type() != b.mod_type() {
        return false;
    }
    mods_for(a.mod_type())
        .iter()
        .any(|entry| matches!(entry, ModEntry::Multi(m) if m.contains(a) && m.contains(b)))
}
