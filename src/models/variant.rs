//! Playfield variants.
//!
//! A variant is the integer id under which key bindings are stored. Values
//! `1..=MAX_STAGE_KEYS` are single stage layouts with that many columns.
//! Values from `PlayfieldType::Dual.base()` upward are dual stage layouts,
//! at even offsets: `1000 + 2 * keys_per_stage`.

use crate::error::RulesetError;
use crate::models::mods::{Mod, ModKind};
use std::fmt;

/// The maximum number of supported keys in a single stage.
pub const MAX_STAGE_KEYS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayfieldType {
    /// Columns are grouped into a single stage.
    Single,
    /// Columns are split evenly across two stages.
    Dual,
}

/// Declared bases, highest first. A variant belongs to the first base not above it.
const PLAYFIELD_BASES: [PlayfieldType; 2] = [PlayfieldType::Dual, PlayfieldType::Single];

impl PlayfieldType {
    pub fn base(self) -> i32 {
        match self {
            PlayfieldType::Single => 0,
            PlayfieldType::Dual => 1000,
        }
    }

    pub fn stage_count(self) -> usize {
        match self {
            PlayfieldType::Single => 1,
            PlayfieldType::Dual => 2,
        }
    }

    /// Classifies a variant by the greatest base not above it.
    pub fn for_variant(variant: i32) -> Result<PlayfieldType, RulesetError> {
        PLAYFIELD_BASES
            .iter()
            .copied()
            .find(|kind| variant >= kind.base())
            .ok_or(RulesetError::NegativeVariant(variant))
    }
}

/// A validated playfield layout. Construction rejects key counts outside
/// `1..=MAX_STAGE_KEYS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    playfield: PlayfieldType,
    keys_per_stage: usize,
}

impl Layout {
    pub fn single(keys: usize) -> Result<Self, RulesetError> {
        Self::new(PlayfieldType::Single, keys)
    }

    pub fn dual(keys_per_stage: usize) -> Result<Self, RulesetError> {
        Self::new(PlayfieldType::Dual, keys_per_stage)
    }

    pub fn new(playfield: PlayfieldType, keys_per_stage: usize) -> Result<Self, RulesetError> {
        if !(1..=MAX_STAGE_KEYS).contains(&keys_per_stage) {
            return Err(RulesetError::KeyCountOutOfRange(keys_per_stage));
        }
        Ok(Self {
            playfield,
            keys_per_stage,
        })
    }

    /// Decodes a variant id.
    pub fn from_variant(variant: i32) -> Result<Self, RulesetError> {
        let playfield = PlayfieldType::for_variant(variant)?;
        let offset = variant - playfield.base();

        let keys = match playfield {
            PlayfieldType::Single => offset,
            PlayfieldType::Dual => {
                if offset % 2 != 0 {
                    return Err(RulesetError::OddDualOffset(variant));
                }
                offset / 2
            }
        };

        Self::new(playfield, keys as usize)
    }

    /// Encodes this layout as a variant id.
    pub fn variant(&self) -> i32 {
        let keys = self.keys_per_stage as i32;
        match self.playfield {
            PlayfieldType::Single => self.playfield.base() + keys,
            PlayfieldType::Dual => self.playfield.base() + 2 * keys,
        }
    }

    /// Layout a play ends up with after conversion mods are applied to a
    /// beatmap with `base_keys` columns. A key mod overrides the column
    /// count; Dual Stages doubles the stage count with that many keys each.
    pub fn from_mods(base_keys: usize, mods: &[Mod]) -> Result<Self, RulesetError> {
        let keys = mods
            .iter()
            .find_map(|m| m.kind().key_count())
            .unwrap_or(base_keys);

        if mods.iter().any(|m| m.kind() == ModKind::DualStages) {
            Self::dual(keys)
        } else {
            Self::single(keys)
        }
    }

    pub fn playfield(&self) -> PlayfieldType {
        self.playfield
    }

    pub fn keys_per_stage(&self) -> usize {
        self.keys_per_stage
    }

    pub fn stage_count(&self) -> usize {
        self.playfield.stage_count()
    }

    pub fn total_columns(&self) -> usize {
        self.keys_per_stage * self.stage_count()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.playfield {
            PlayfieldType::Single => write!(f, "{}K", self.keys_per_stage),
            PlayfieldType::Dual => write!(f, "{0}K + {0}K", self.keys_per_stage),
        }
    }
}

/// Every selectable variant: single stages 1K..10K, then dual stages
/// 1K + 1K .. 10K + 10K.
pub fn available_variants() -> Vec<i32> {
    let max = MAX_STAGE_KEYS as i32;
    let single = PlayfieldType::Single.base();
    let dual = PlayfieldType::Dual.base();

    (1..=max)
        .map(|i| single + i)
        .chain((2..=max * 2).step_by(2).map(|i| dual + i))
        .collect()
}

/// Human-readable name of a variant, e.g. "4K" or "4K + 4K".
pub fn variant_name(variant: i32) -> Result<String, RulesetError> {
    Layout::from_variant(variant).map(|layout| layout.to_string())
}
