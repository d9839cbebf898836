//! Per-frame input snapshots.

use crate::geom::ScreenPoint;

/// A key relevant to text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Delete the character before the cursor.
    Backspace,
    /// Delete the character at the cursor.
    Delete,
    /// Move the cursor left.
    Left,
    /// Move the cursor right.
    Right,
    /// Any other key.
    Other,
}

impl Key {
    /// Map a host key name (as used by GPUI keystrokes) to a [`Key`].
    ///
    /// `text` carries the produced character for printable keys.
    pub fn from_name(name: &str, text: Option<&str>) -> Self {
        match name {
            "enter" => Self::Enter,
            "backspace" => Self::Backspace,
            "delete" => Self::Delete,
            "left" => Self::Left,
            "right" => Self::Right,
            "space" => Self::Char(' '),
            _ => {
                let mut chars = text.unwrap_or(name).chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if !ch.is_control() => Self::Char(ch),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// A key press delivered push-style by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
}

impl KeyEvent {
    /// Wrap a key press.
    pub fn new(key: Key) -> Self {
        Self { key }
    }
}

/// Input state sampled once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Pointer position in canvas coordinates.
    pub pointer: ScreenPoint,
    /// Whether the primary pointer button is held.
    pub pointer_down: bool,
    /// Whether any key is held.
    pub key_down: bool,
    /// Most recently pressed key.
    pub key: Option<Key>,
    /// Seconds since the sketch started.
    pub time: f64,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            pointer: ScreenPoint::new(-1.0, -1.0),
            pointer_down: false,
            key_down: false,
            key: None,
            time: 0.0,
        }
    }
}

impl FrameInput {
    /// Snapshot with the pointer at `(x, y)` and nothing pressed.
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pointer: ScreenPoint::new(x, y),
            ..Self::default()
        }
    }

    /// Same snapshot with the pointer held down.
    pub fn pressed(self) -> Self {
        Self {
            pointer_down: true,
            ..self
        }
    }

    /// Same snapshot with `key` held down.
    pub fn with_key(self, key: Key) -> Self {
        Self {
            key_down: true,
            key: Some(key),
            ..self
        }
    }

    /// Same snapshot at `time` seconds.
    pub fn at_time(self, time: f64) -> Self {
        Self { time, ..self }
    }
}
