//! Input events and their crossterm conversion.

pub mod input;

pub use input::{InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseBtn, MouseEvent};
