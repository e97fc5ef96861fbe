//! Input events, decoupled from crossterm.
//!
//! The table view only cares about pointer movement, clicks, the wheel, and a
//! handful of navigation keys. Crossterm events are converted with
//! [`InputEvent::from_crossterm`]; anything else is dropped.

use std::ops::BitOr;

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Other,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Whether every bit of `other` is set.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl From<ct::KeyModifiers> for Modifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        if m.contains(ct::KeyModifiers::SHIFT) {
            out = out | Modifiers::SHIFT;
        }
        if m.contains(ct::KeyModifiers::CONTROL) {
            out = out | Modifiers::CTRL;
        }
        if m.contains(ct::KeyModifiers::ALT) {
            out = out | Modifiers::ALT;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// KeyEvent / MouseEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Whether this is the Ctrl+C chord.
    pub fn is_interrupt(&self) -> bool {
        self.code == Key::Char('c') && self.modifiers.contains(Modifiers::CTRL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down(MouseBtn),
    Up(MouseBtn),
    Drag(MouseBtn),
    Moved,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

/// A pointer event at screen position (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub kind: MouseAction,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn new(kind: MouseAction, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// A vertical wheel turns into horizontal scrolling while Shift or Alt is held.
    pub fn wheel_is_horizontal(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT) || self.modifiers.contains(Modifiers::ALT)
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize { width: u16, height: u16 },
}

impl InputEvent {
    /// Convert a crossterm event. Focus, paste, and key-release events yield `None`.
    pub fn from_crossterm(event: ct::Event) -> Option<InputEvent> {
        match event {
            ct::Event::Key(ke) if ke.kind != ct::KeyEventKind::Release => {
                Some(InputEvent::Key(KeyEvent::new(convert_key(ke.code), ke.modifiers.into())))
            }
            ct::Event::Mouse(me) => {
                let kind = match me.kind {
                    ct::MouseEventKind::Down(b) => MouseAction::Down(convert_button(b)),
                    ct::MouseEventKind::Up(b) => MouseAction::Up(convert_button(b)),
                    ct::MouseEventKind::Drag(b) => MouseAction::Drag(convert_button(b)),
                    ct::MouseEventKind::Moved => MouseAction::Moved,
                    ct::MouseEventKind::ScrollUp => MouseAction::ScrollUp,
                    ct::MouseEventKind::ScrollDown => MouseAction::ScrollDown,
                    ct::MouseEventKind::ScrollLeft => MouseAction::ScrollLeft,
                    ct::MouseEventKind::ScrollRight => MouseAction::ScrollRight,
                };
                Some(InputEvent::Mouse(
                    MouseEvent::new(kind, me.column, me.row).with_modifiers(me.modifiers.into()),
                ))
            }
            ct::Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        }
    }
}

fn convert_key(code: ct::KeyCode) -> Key {
    match code {
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Esc => Key::Escape,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        _ => Key::Other,
    }
}

fn convert_button(b: ct::MouseButton) -> MouseBtn {
    match b {
        ct::MouseButton::Left => MouseBtn::Left,
        ct::MouseButton::Right => MouseBtn::Right,
        ct::MouseButton::Middle => MouseBtn::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_combine() {
        let mods = Modifiers::SHIFT | Modifiers::ALT;
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::ALT));
        assert!(!mods.contains(Modifiers::CTRL));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn wheel_direction_follows_modifiers() {
        let plain = MouseEvent::new(MouseAction::ScrollDown, 0, 0);
        assert!(!plain.wheel_is_horizontal());
        assert!(plain.with_modifiers(Modifiers::SHIFT).wheel_is_horizontal());
        assert!(plain.with_modifiers(Modifiers::ALT).wheel_is_horizontal());
        assert!(!plain.with_modifiers(Modifiers::CTRL).wheel_is_horizontal());
    }

    #[test]
    fn crossterm_mouse_conversion() {
        let event = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: ct::KeyModifiers::SHIFT,
        });
        let converted = InputEvent::from_crossterm(event);
        assert_eq!(
            converted,
            Some(InputEvent::Mouse(
                MouseEvent::new(MouseAction::Down(MouseBtn::Left), 7, 3)
                    .with_modifiers(Modifiers::SHIFT)
            ))
        );
    }

    #[test]
    fn crossterm_key_conversion() {
        let event = ct::Event::Key(ct::KeyEvent::new(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL));
        match InputEvent::from_crossterm(event) {
            Some(InputEvent::Key(ke)) => assert!(ke.is_interrupt()),
            other => panic!("unexpected conversion: {other:?}"),
        }
    }

    #[test]
    fn crossterm_resize_and_unhandled() {
        assert_eq!(
            InputEvent::from_crossterm(ct::Event::Resize(80, 24)),
            Some(InputEvent::Resize { width: 80, height: 24 })
        );
        assert_eq!(InputEvent::from_crossterm(ct::Event::FocusGained), None);
    }
}
