//! Default key layouts per variant.
//!
//! Each stage fills its columns from the inside of two key rows: the last
//! `n / 2` keys of the left row, the stage's special key when `n` is odd,
//! then the first `n / 2` keys of the right row. 10K swaps in rows that
//! grow toward the centre of the keyboard instead of its edges.

use super::actions::ColumnAction;
use super::bindings::KeyBinding;
use crate::models::variant::{Layout, PlayfieldType};
use winit::keyboard::KeyCode;

/// Key rows of one stage.
struct StageKeys {
    left: &'static [KeyCode],
    right: &'static [KeyCode],
    special: KeyCode,
}

const SINGLE_STAGE: StageKeys = StageKeys {
    left: &[KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD, KeyCode::KeyF],
    right: &[KeyCode::KeyJ, KeyCode::KeyK, KeyCode::KeyL, KeyCode::Semicolon],
    special: KeyCode::Space,
};

const SINGLE_STAGE_10K: StageKeys = StageKeys {
    left: &[
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::KeyD,
        KeyCode::KeyF,
        KeyCode::KeyV,
    ],
    right: &[
        KeyCode::KeyN,
        KeyCode::KeyJ,
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::Semicolon,
    ],
    special: KeyCode::Space,
};

const DUAL_STAGE_1: StageKeys = StageKeys {
    left: &[KeyCode::KeyQ, KeyCode::KeyW, KeyCode::KeyE, KeyCode::KeyR],
    right: &[KeyCode::KeyU, KeyCode::KeyI, KeyCode::KeyO, KeyCode::KeyP],
    special: KeyCode::KeyV,
};

const DUAL_STAGE_1_10K: StageKeys = StageKeys {
    left: &[
        KeyCode::KeyQ,
        KeyCode::KeyW,
        KeyCode::KeyE,
        KeyCode::KeyR,
        KeyCode::KeyV,
    ],
    right: &[
        KeyCode::KeyM,
        KeyCode::KeyI,
        KeyCode::KeyO,
        KeyCode::KeyP,
        KeyCode::BracketLeft,
    ],
    special: KeyCode::KeyV,
};

const DUAL_STAGE_2: StageKeys = StageKeys {
    left: &[KeyCode::KeyS, KeyCode::KeyD, KeyCode::KeyF, KeyCode::KeyG],
    right: &[KeyCode::KeyK, KeyCode::KeyL, KeyCode::Semicolon, KeyCode::Quote],
    special: KeyCode::KeyB,
};

const DUAL_STAGE_2_10K: StageKeys = StageKeys {
    left: &[
        KeyCode::KeyS,
        KeyCode::KeyD,
        KeyCode::KeyF,
        KeyCode::KeyG,
        KeyCode::KeyB,
    ],
    right: &[
        KeyCode::KeyK,
        KeyCode::KeyL,
        KeyCode::Semicolon,
        KeyCode::Quote,
        KeyCode::Comma,
    ],
    special: KeyCode::KeyB,
};

impl StageKeys {
    /// Appends bindings for one stage of `columns` keys, numbering actions
    /// from `first_column`.
    fn generate(
        &self,
        stage: usize,
        columns: usize,
        first_column: usize,
        out: &mut Vec<KeyBinding>,
    ) {
        let half = columns / 2;
        let mut column = first_column;
        let mut push = |key: KeyCode| {
            out.push(KeyBinding::new(ColumnAction::new(stage, column), key));
            column += 1;
        };

        for &key in &self.left[self.left.len() - half..] {
            push(key);
        }
        if columns % 2 == 1 {
            push(self.special);
        }
        for &key in &self.right[..half] {
            push(key);
        }
    }
}

fn single_stage(keys: usize) -> Vec<KeyBinding> {
    let rows = if keys == 10 {
        &SINGLE_STAGE_10K
    } else {
        &SINGLE_STAGE
    };

    let mut bindings = Vec::with_capacity(keys);
    rows.generate(0, keys, 0, &mut bindings);
    bindings
}

fn dual_stage(keys_per_stage: usize) -> Vec<KeyBinding> {
    let (stage1, stage2) = if keys_per_stage == 10 {
        (&DUAL_STAGE_1_10K, &DUAL_STAGE_2_10K)
    } else {
        (&DUAL_STAGE_1, &DUAL_STAGE_2)
    };

    let mut bindings = Vec::with_capacity(keys_per_stage * 2);
    stage1.generate(0, keys_per_stage, 0, &mut bindings);
    stage2.generate(1, keys_per_stage, keys_per_stage, &mut bindings);
    bindings
}

/// Default bindings for a layout: stage 1 first, then stage 2.
pub fn default_bindings(layout: Layout) -> Vec<KeyBinding> {
    match layout.playfield() {
        PlayfieldType::Single => single_stage(layout.keys_per_stage()),
        PlayfieldType::Dual => dual_stage(layout.keys_per_stage()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::variant::MAX_STAGE_KEYS;
    use std::collections::HashSet;

    fn keys(bindings: &[KeyBinding]) -> Vec<KeyCode> {
        bindings.iter().map(|b| b.key).collect()
    }

    #[test]
    fn test_single_stage_tables() {
        let layout = |n| Layout::single(n).unwrap();
        assert_eq!(keys(&default_bindings(layout(1))), vec![KeyCode::Space]);
        assert_eq!(
            keys(&default_bindings(layout(4))),
            vec![KeyCode::KeyD, KeyCode::KeyF, KeyCode::KeyJ, KeyCode::KeyK]
        );
        assert_eq!(
            keys(&default_bindings(layout(7))),
            vec![
                KeyCode::KeyS,
                KeyCode::KeyD,
                KeyCode::KeyF,
                KeyCode::Space,
                KeyCode::KeyJ,
                KeyCode::KeyK,
                KeyCode::KeyL
            ]
        );
        assert_eq!(
            keys(&default_bindings(layout(10))),
            vec![
                KeyCode::KeyA,
                KeyCode::KeyS,
                KeyCode::KeyD,
                KeyCode::KeyF,
                KeyCode::KeyV,
                KeyCode::KeyN,
                KeyCode::KeyJ,
                KeyCode::KeyK,
                KeyCode::KeyL,
                KeyCode::Semicolon
            ]
        );
    }

    #[test]
    fn test_dual_stage_continues_numbering() {
        let bindings = default_bindings(Layout::dual(3).unwrap());
        assert_eq!(
            keys(&bindings),
            vec![
                KeyCode::KeyR,
                KeyCode::KeyV,
                KeyCode::KeyU,
                KeyCode::KeyG,
                KeyCode::KeyB,
                KeyCode::KeyK
            ]
        );
        let actions: Vec<_> = bindings.iter().map(|b| (b.action.stage, b.action.column)).collect();
        assert_eq!(actions, vec![(0, 0), (0, 1), (0, 2), (1, 3), (1, 4), (1, 5)]);
    }

    #[test]
    fn test_no_duplicate_keys_in_any_layout() {
        for n in 1..=MAX_STAGE_KEYS {
            for layout in [Layout::single(n).unwrap(), Layout::dual(n).unwrap()] {
                let bindings = default_bindings(layout);
                assert_eq!(bindings.len(), layout.total_columns());
                let unique: HashSet<_> = keys(&bindings).into_iter().collect();
                assert_eq!(unique.len(), bindings.len(), "duplicate key in {}", layout);
            }
        }
    }

    #[test]
    fn test_generation_is_stable() {
        let layout = Layout::dual(9).unwrap();
        assert_eq!(default_bindings(layout), default_bindings(layout));
    }
}
