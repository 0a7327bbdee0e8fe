//! Serializable replay structures.
//!
//! Mods are stored in the legacy bitmask so replays stay readable by older
//! tooling, and the playfield is stored as its variant id.
//!
//! All timestamps are in **microseconds (i64)**.

use crate::error::RulesetError;
use crate::models::mods::{self, LegacyMods, Mod};
use crate::models::variant::Layout;
use serde::{Deserialize, Serialize};

/// Current replay format version for compatibility.
pub const REPLAY_FORMAT_VERSION: u8 = 1;

/// A single user input (press or release).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayInput {
    /// Absolute time in microseconds since map start.
    pub time_us: i64,
    /// Packed data: (column << 1) | is_press
    /// Bit 0: is_press (1 = press, 0 = release)
    /// Bits 1-7: column index
    pub payload: u8,
}

impl ReplayInput {
    /// Unpack column and is_press from payload.
    #[inline]
    pub fn unpack(&self) -> (usize, bool) {
        let is_press = (self.payload & 1) != 0;
        let column = (self.payload >> 1) as usize;
        (column, is_press)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayData {
    /// Format version for future compatibility.
    pub version: u8,
    /// Playfield variant id.
    pub variant: i32,
    /// Active mods as a legacy bitmask.
    pub legacy_mods: LegacyMods,
    /// Playback rate implied by the mods at record time.
    pub rate: f64,
    /// All user inputs in chronological order.
    pub inputs: Vec<ReplayInput>,
}

impl ReplayData {
    pub fn new(layout: Layout, selected: &[Mod]) -> Self {
        Self {
            version: REPLAY_FORMAT_VERSION,
            variant: layout.variant(),
            legacy_mods: mods::convert_to_legacy(selected),
            rate: mods::total_rate(selected),
            inputs: Vec::new(),
        }
    }

    /// Mods decoded from the stored bitmask.
    pub fn mods(&self) -> Vec<Mod> {
        mods::convert_from_legacy(self.legacy_mods)
    }

    pub fn layout(&self) -> Result<Layout, RulesetError> {
        Layout::from_variant(self.variant)
    }

    /// Adds an input (press or release).
    ///
    /// The column must exist in the replay's layout; this also keeps it
    /// inside the 7 bits the payload has room for.
    pub fn add_input(
        &mut self,
        time_us: i64,
        column: usize,
        is_press: bool,
    ) -> Result<(), RulesetError> {
        let columns = self.layout()?.total_columns();
        if column >= columns {
            return Err(RulesetError::ColumnOutOfRange { column, columns });
        }

        let payload = ((column as u8) << 1) | (is_press as u8);
        self.inputs.push(ReplayInput { time_us, payload });
        Ok(())
    }

    /// Adds a key press input.
    #[inline]
    pub fn add_press(&mut self, time_us: i64, column: usize) -> Result<(), RulesetError> {
        self.add_input(time_us, column, true)
    }

    /// Adds a key release input.
    #[inline]
    pub fn add_release(&mut self, time_us: i64, column: usize) -> Result<(), RulesetError> {
        self.add_input(time_us, column, false)
    }

    /// Checks the version, the variant and that every input fits the layout.
    pub fn validate(&self) -> Result<(), RulesetError> {
        if self.version != REPLAY_FORMAT_VERSION {
            return Err(RulesetError::UnsupportedReplayVersion(self.version));
        }

        let columns = self.layout()?.total_columns();
        for input in &self.inputs {
            let (column, _) = input.unpack();
            if column >= columns {
                return Err(RulesetError::ColumnOutOfRange { column, columns });
            }
        }
        Ok(())
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
