//! Input actions and the physical keys bound to them.

pub mod actions;
pub mod bindings;
pub mod generator;

pub use actions::ColumnAction;
pub use bindings::{KeyBinding, KeyBindings, keycode_name, parse_keycode};
pub use generator::default_bindings;
pub use winit::keyboard::KeyCode;
