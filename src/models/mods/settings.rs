//! Configurable settings attached to a modifier.

use crate::error::RulesetError;
use serde::{Deserialize, Serialize};

/// Current or default value of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Unset means "pick at play time" (e.g. a random seed).
    OptionalInt(Option<i64>),
}

/// Allowed range for numeric settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingBounds {
    None,
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64, precision: f64 },
}

/// A named, bounded setting with its default and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct ModSetting {
    pub key: &'static str,
    pub label: &'static str,
    pub bounds: SettingBounds,
    pub default: SettingValue,
    value: SettingValue,
}

impl ModSetting {
    pub fn boolean(key: &'static str, label: &'static str, default: bool) -> Self {
        Self::with_bounds(key, label, SettingBounds::None, SettingValue::Bool(default))
    }

    pub fn int(key: &'static str, label: &'static str, min: i64, max: i64, default: i64) -> Self {
        Self::with_bounds(
            key,
            label,
            SettingBounds::Int { min, max },
            SettingValue::Int(default),
        )
    }

    pub fn float(
        key: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        precision: f64,
        default: f64,
    ) -> Self {
        Self::with_bounds(
            key,
            label,
            SettingBounds::Float {
                min,
                max,
                precision,
            },
            SettingValue::Float(default),
        )
    }

    pub fn optional_int(key: &'static str, label: &'static str) -> Self {
        Self::with_bounds(key, label, SettingBounds::None, SettingValue::OptionalInt(None))
    }

    fn with_bounds(
        key: &'static str,
        label: &'static str,
        bounds: SettingBounds,
        default: SettingValue,
    ) -> Self {
        Self {
            key,
            label,
            bounds,
            default,
            value: default,
        }
    }

    pub fn value(&self) -> SettingValue {
        self.value
    }

    pub fn is_default(&self) -> bool {
        self.value == self.default
    }

    pub fn reset(&mut self) {
        self.value = self.default;
    }

    /// Replaces the current value.
    ///
    /// The value must have the same type as the default and lie within the
    /// bounds. Floats are snapped to the setting's precision.
    pub fn set(&mut self, value: SettingValue) -> Result<(), RulesetError> {
        let accepted = match (self.default, value, self.bounds) {
            (SettingValue::Bool(_), SettingValue::Bool(_), _) => value,
            (SettingValue::OptionalInt(_), SettingValue::OptionalInt(_), _) => value,
            (SettingValue::Int(_), SettingValue::Int(v), SettingBounds::Int { min, max }) => {
                if v < min || v > max {
                    return Err(RulesetError::SettingOutOfRange {
                        setting: self.key,
                        value: v as f64,
                    });
                }
                value
            }
            (
                SettingValue::Float(_),
                SettingValue::Float(v),
                SettingBounds::Float {
                    min,
                    max,
                    precision,
                },
            ) => {
                if !v.is_finite() || v < min || v > max {
                    return Err(RulesetError::SettingOutOfRange {
                        setting: self.key,
                        value: v,
                    });
                }
                let snapped = (v / precision).round() * precision;
                SettingValue::Float(snapped.clamp(min, max))
            }
            _ => return Err(RulesetError::SettingTypeMismatch(self.key)),
        };

        self.value = accepted;
        Ok(())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            SettingValue::Float(v) => Some(v),
            SettingValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_setting_snaps_to_precision() {
        let mut speed = ModSetting::float("speed_change", "Speed change", 1.01, 2.0, 0.01, 1.5);
        speed.set(SettingValue::Float(1.7349)).unwrap();
        let v = speed.as_f64().unwrap();
        assert!((v - 1.73).abs() < 1e-9);
        assert!(!speed.is_default());

        speed.reset();
        assert!(speed.is_default());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut retries = ModSetting::int("retries", "Extra lives", 0, 10, 2);
        let err = retries.set(SettingValue::Int(11)).unwrap_err();
        assert!(matches!(err, RulesetError::SettingOutOfRange { setting: "retries", .. }));
        assert_eq!(retries.value(), SettingValue::Int(2));
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let mut restart = ModSetting::boolean("restart", "Restart on fail", false);
        assert_eq!(
            restart.set(SettingValue::Int(1)),
            Err(RulesetError::SettingTypeMismatch("restart"))
        );
        restart.set(SettingValue::Bool(true)).unwrap();
        assert_eq!(restart.value(), SettingValue::Bool(true));
    }

    #[test]
    fn test_optional_int_accepts_none_and_some() {
        let mut seed = ModSetting::optional_int("seed", "Seed");
        seed.set(SettingValue::OptionalInt(Some(1337))).unwrap();
        assert_eq!(seed.value(), SettingValue::OptionalInt(Some(1337)));
        seed.set(SettingValue::OptionalInt(None)).unwrap();
        assert!(seed.is_default());
    }
}
