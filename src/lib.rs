//! Mania ruleset codec for rVsrg.
//!
//! Converts legacy mod bitmasks to mods and back, maps playfield variant ids
//! to layouts, and derives the default key bindings of every layout. All of
//! it is pure and deterministic, so any function here can be called from any
//! thread and its output cached by input.

pub mod core;
pub mod database;
pub mod error;
pub mod models;

pub use crate::core::input::{ColumnAction, KeyBinding, KeyBindings, KeyCode};
pub use error::RulesetError;
pub use models::mods::{LegacyMods, Mod, ModEntry, ModKind, ModType, MultiMod};
pub use models::variant::{Layout, MAX_STAGE_KEYS, PlayfieldType};

/// Mods encoded in a legacy bitmask. Unknown bits are ignored.
pub fn decode_legacy_flags(flags: u32) -> Vec<Mod> {
    models::mods::convert_from_legacy(LegacyMods::from_bits(flags))
}

/// Legacy bitmask for a mod selection. Mods without a legacy bit are skipped.
pub fn encode_legacy_flags(mods: &[Mod]) -> u32 {
    models::mods::convert_to_legacy(mods).bits()
}

/// Mods listed under a category, in display order.
pub fn mods_for_category(mod_type: ModType) -> Vec<ModEntry> {
    models::mods::mods_for(mod_type)
}

/// Every selectable variant, single stages first.
pub fn enumerate_variants() -> Vec<i32> {
    models::variant::available_variants()
}

pub fn variant_to_layout(variant: i32) -> Result<Layout, RulesetError> {
    Layout::from_variant(variant)
}

pub fn layout_to_variant(layout: Layout) -> i32 {
    layout.variant()
}

pub fn display_name(variant: i32) -> Result<String, RulesetError> {
    models::variant::variant_name(variant)
}

/// Default key bindings for a variant, stage 1 before stage 2.
pub fn default_bindings(variant: i32) -> Result<Vec<KeyBinding>, RulesetError> {
    Layout::from_variant(variant).map(crate::core::input::default_bindings)
}
