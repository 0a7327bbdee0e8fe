//! Abstract input actions bound to physical keys.

use serde::{Deserialize, Serialize};

/// Pressing one playfield column.
///
/// `column` counts across the whole playfield, so on a dual stage layout the
/// second stage continues where the first one stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnAction {
    pub stage: usize,
    pub column: usize,
}

impl ColumnAction {
    pub fn new(stage: usize, column: usize) -> Self {
        Self { stage, column }
    }
}
