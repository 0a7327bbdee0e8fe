//! Error type shared by the ruleset codec.
//!
//! Malformed legacy data never produces an error (decoding is lossy but
//! total). Errors are reserved for caller contract violations such as an
//! out-of-range variant, and for configuration problems.

use crate::models::variant::MAX_STAGE_KEYS;

#[derive(Debug, Clone, PartialEq)]
pub enum RulesetError {
    /// Variants are non-negative.
    NegativeVariant(i32),
    /// A stage must have between 1 and `MAX_STAGE_KEYS` columns.
    KeyCountOutOfRange(usize),
    /// Dual stage variants sit at even offsets from the dual base.
    OddDualOffset(i32),
    /// No modifier uses this acronym.
    UnknownAcronym(String),
    /// The modifier has no setting with this key.
    UnknownSetting(String),
    /// The value does not have the setting's type.
    SettingTypeMismatch(&'static str),
    /// The value lies outside the setting's bounds.
    SettingOutOfRange { setting: &'static str, value: f64 },
    /// The replay was written by an unsupported format version.
    UnsupportedReplayVersion(u8),
    /// A replay input targets a column the layout does not have.
    ColumnOutOfRange { column: usize, columns: usize },
    /// Reading or writing configuration failed.
    Config(String),
}

impl std::fmt::Display for RulesetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RulesetError::NegativeVariant(v) => write!(f, "Negative variant: {}", v),
            RulesetError::KeyCountOutOfRange(n) => {
                write!(f, "Key count {} outside 1..={}", n, MAX_STAGE_KEYS)
            }
            RulesetError::OddDualOffset(v) => {
                write!(f, "Variant {} has an odd dual stage offset", v)
            }
            RulesetError::UnknownAcronym(a) => write!(f, "Unknown mod acronym: {}", a),
            RulesetError::UnknownSetting(s) => write!(f, "Unknown mod setting: {}", s),
            RulesetError::SettingTypeMismatch(s) => {
                write!(f, "Wrong value type for setting {}", s)
            }
            RulesetError::SettingOutOfRange { setting, value } => {
                write!(f, "Value {} out of range for setting {}", value, setting)
            }
            RulesetError::UnsupportedReplayVersion(v) => {
                write!(f, "Unsupported replay version: {}", v)
            }
            RulesetError::ColumnOutOfRange { column, columns } => {
                write!(f, "Column {} out of range ({} columns)", column, columns)
            }
            RulesetError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for RulesetError {}
