//! Input events delivered to a [`Model`](crate::app::Model): [`Msg`],
//! [`Key`], [`MouseAction`].

use std::time::Instant;

use crate::geom::Pos;

/// A keyboard key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    /// A printable character.
    Char(char),
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Primary (left) button pressed.
    Main,
    /// Secondary (right) button pressed.
    Secondary,
    /// Button released.
    Release,
    /// Pointer moved, with or without a button held.
    Move,
}

/// A message delivered to the application model.
#[derive(Clone, Debug)]
pub enum Msg {
    /// Sent once when the application starts.
    Init,
    /// A key was pressed.
    KeyDown { key: Key, time: Instant },
    /// A mouse event at a screen position.
    Mouse {
        action: MouseAction,
        pos: Pos,
        time: Instant,
    },
    /// The terminal was resized.
    Screen { rows: i32, cols: i32, time: Instant },
    /// Sent by the app loop after every poll, so models can animate.
    Tick { time: Instant },
    /// Request to quit.
    Quit,
}

impl Msg {
    /// A `KeyDown` stamped now.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }

    /// A mouse message stamped now.
    pub fn mouse(action: MouseAction, pos: Pos) -> Self {
        Self::Mouse {
            action,
            pos,
            time: Instant::now(),
        }
    }

    /// A `Tick` stamped now.
    pub fn tick() -> Self {
        Self::Tick {
            time: Instant::now(),
        }
    }
}
