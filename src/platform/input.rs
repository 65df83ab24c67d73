//! Keyboard events to intent snapshot
//!
//! Terminals with the keyboard-enhancement protocol report key releases;
//! classic terminals only repeat presses while a key is held. Each intent
//! remembers the frame it was last pressed and counts as held for a short
//! window afterwards, or until an explicit release arrives.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::sim::TickInput;

/// Frames a press stays live without a repeat or release
///
/// OS key repeat runs at 15 Hz or faster, so at 60 fps the next repeat
/// always arrives inside this window.
pub const HOLD_WINDOW: u64 = 8;

/// One of the five player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

impl Intent {
    /// WASD, arrow keys and space
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Intent::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Intent::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Intent::Right),
            KeyCode::Char(' ') => Some(Intent::Fire),
            _ => None,
        }
    }
}

/// Latest keyboard state, sampled once per frame
#[derive(Debug, Default)]
pub struct KeyboardIntents {
    /// Intent -> frame of its last press or repeat
    last_seen: HashMap<Intent, u64>,
}

impl KeyboardIntents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event seen during `frame`; returns the intent it maps to
    pub fn handle(&mut self, event: &KeyEvent, frame: u64) -> Option<Intent> {
        let intent = Intent::from_key(event.code)?;
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(intent, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&intent);
            }
        }
        Some(intent)
    }

    pub fn is_held(&self, intent: Intent, frame: u64) -> bool {
        self.last_seen
            .get(&intent)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Intent snapshot for `frame`
    pub fn snapshot(&self, frame: u64) -> TickInput {
        TickInput {
            move_up: self.is_held(Intent::Up, frame),
            move_down: self.is_held(Intent::Down, frame),
            move_left: self.is_held(Intent::Left, frame),
            move_right: self.is_held(Intent::Right, frame),
            fire: self.is_held(Intent::Fire, frame),
        }
    }
}
