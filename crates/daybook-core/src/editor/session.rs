//! Pull-based editing loop over an abstract key source

use std::collections::VecDeque;

use tracing::debug;

use super::EditBuffer;
use crate::error::{JournalError, Result};

/// Editing input, independent of any terminal library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    Home,
    End,
    Save,
    Cancel,
}

/// Blocking source of key events
pub trait KeySource {
    fn next_key(&mut self) -> Result<KeyEvent>;
}

/// Replays a fixed sequence of keys
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        ScriptedKeys {
            keys: keys.into_iter().collect(),
        }
    }

    /// One `Char` per character, `Enter` for each newline
    pub fn typing(text: &str) -> Self {
        Self::new(text.chars().map(|c| match c {
            '\n' => KeyEvent::Enter,
            c => KeyEvent::Char(c),
        }))
    }

    /// Queue more keys after the current ones
    pub fn then(mut self, keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        self.keys.extend(keys);
        self
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| JournalError::Other("key input ended before save or cancel".into()))
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Caller should write this text, then call `mark_saved`
    Save(String),
    /// Buffer discarded; nothing to write
    Cancelled,
}

/// Drives one [`EditBuffer`] from a [`KeySource`]
#[derive(Debug)]
pub struct EditorSession {
    buffer: EditBuffer,
}

impl EditorSession {
    pub fn new(buffer: EditBuffer) -> Self {
        EditorSession { buffer }
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> EditBuffer {
        self.buffer
    }

    /// Apply one key; returns the outcome when the key ends the session
    pub fn apply(&mut self, key: KeyEvent) -> Option<SessionOutcome> {
        let buffer = &mut self.buffer;
        match key {
            KeyEvent::Char(c) => buffer.insert_char(c),
            KeyEvent::Enter => buffer.insert_char('\n'),
            KeyEvent::Backspace => buffer.backspace(),
            KeyEvent::Delete => buffer.delete(),
            KeyEvent::Left => buffer.move_left(),
            KeyEvent::Right => buffer.move_right(),
            KeyEvent::Up => buffer.move_up(),
            KeyEvent::Down => buffer.move_down(),
            KeyEvent::WordLeft => buffer.word_left(),
            KeyEvent::WordRight => buffer.word_right(),
            KeyEvent::Home => buffer.line_start(),
            KeyEvent::End => buffer.line_end(),
            KeyEvent::Save => return Some(SessionOutcome::Save(buffer.text())),
            KeyEvent::Cancel => {
                buffer.discard();
                return Some(SessionOutcome::Cancelled);
            }
        }
        None
    }

    /// Read keys until save or cancel, calling `render` before each read
    pub fn run<S, R>(&mut self, source: &mut S, mut render: R) -> Result<SessionOutcome>
    where
        S: KeySource + ?Sized,
        R: FnMut(&EditBuffer) -> Result<()>,
    {
        loop {
            render(&self.buffer)?;
            let key = source.next_key()?;
            if let Some(outcome) = self.apply(key) {
                debug!(
                    saved = matches!(outcome, SessionOutcome::Save(_)),
                    words = self.buffer.word_count(),
                    "editor session finished"
                );
                return Ok(outcome);
            }
        }
    }
}
