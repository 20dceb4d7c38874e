//! In-memory text editing model
//!
//! [`EditBuffer`] holds the text of one entry as logical lines plus a cursor.
//! It never touches the filesystem: a session hands the flattened text back
//! to the caller, which performs the write and then calls
//! [`EditBuffer::mark_saved`].

pub mod session;
pub mod viewport;

use serde::Serialize;

use crate::entry::word_count;

pub use session::{EditorSession, KeyEvent, KeySource, ScriptedKeys, SessionOutcome};
pub use viewport::Viewport;

/// Lifecycle of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferState {
    /// No change since load
    Clean,
    /// Edited and not yet written
    Dirty,
    /// Written by the caller
    Saved,
    /// Abandoned; no write happened
    Discarded,
}

/// Cursor position; `col` counts characters, not bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

/// Lines of text under edit with a cursor and a following viewport
#[derive(Debug, Clone)]
pub struct EditBuffer {
    lines: Vec<String>,
    cursor: Cursor,
    state: BufferState,
    viewport: Viewport,
}

impl EditBuffer {
    /// Empty buffer showing `height` lines at a time
    pub fn new(height: usize) -> Self {
        Self::from_text("", height)
    }

    /// Buffer over `text` with the cursor at the start
    pub fn from_text(text: &str, height: usize) -> Self {
        EditBuffer {
            lines: text.split('\n').map(String::from).collect(),
            cursor: Cursor::default(),
            state: BufferState::Clean,
            viewport: Viewport::new(height),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn state(&self) -> BufferState {
        self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_dirty(&self) -> bool {
        self.state == BufferState::Dirty
    }

    /// Flattened text, lines joined by `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Words in the whole buffer, recomputed on every call
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| word_count(line)).sum()
    }

    /// Lines currently inside the viewport, with their indexes
    pub fn visible_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let range = self.viewport.visible(self.lines.len());
        range.map(|row| (row, self.lines[row].as_str()))
    }

    /// The caller wrote `text()` successfully
    pub fn mark_saved(&mut self) {
        self.state = BufferState::Saved;
    }

    /// Abandon all edits
    pub fn discard(&mut self) {
        self.state = BufferState::Discarded;
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.split_line();
            return;
        }
        let at = self.byte_col();
        self.lines[self.cursor.row].insert(at, c);
        self.cursor.col += 1;
        self.touch();
    }

    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    /// Remove the character before the cursor, joining lines at column 0
    pub fn backspace(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
            let at = self.byte_col();
            self.lines[self.cursor.row].remove(at);
            self.touch();
        } else if self.cursor.row > 0 {
            let current = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            self.cursor.col = self.line_len(self.cursor.row);
            self.lines[self.cursor.row].push_str(&current);
            self.touch();
        }
    }

    /// Remove the character under the cursor, joining lines at line end
    pub fn delete(&mut self) {
        let row = self.cursor.row;
        if self.cursor.col < self.line_len(row) {
            let at = self.byte_col();
            self.lines[row].remove(at);
            self.touch();
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            self.touch();
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.line_len(self.cursor.row);
        }
        self.scroll();
    }

    pub fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.row) {
            self.cursor.col += 1;
        } else if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
        self.scroll();
    }

    pub fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.clamp_col();
        }
        self.scroll();
    }

    pub fn move_down(&mut self) {
        if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.clamp_col();
        }
        self.scroll();
    }

    /// Back to the start of the current or previous word.
    ///
    /// At column 0 the cursor moves to the end of the previous line.
    pub fn word_left(&mut self) {
        if self.cursor.col == 0 {
            self.move_left();
            return;
        }
        let chars: Vec<char> = self.lines[self.cursor.row].chars().collect();
        let mut col = self.cursor.col.min(chars.len());
        while col > 0 && chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }
        self.cursor.col = col;
        self.scroll();
    }

    /// Forward to the end of the current or next word.
    ///
    /// At line end the cursor moves to the start of the next line.
    pub fn word_right(&mut self) {
        let chars: Vec<char> = self.lines[self.cursor.row].chars().collect();
        if self.cursor.col >= chars.len() {
            self.move_right();
            return;
        }
        let mut col = self.cursor.col;
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }
        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        self.cursor.col = col;
        self.scroll();
    }

    pub fn line_start(&mut self) {
        self.cursor.col = 0;
        self.scroll();
    }

    pub fn line_end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.row);
        self.scroll();
    }

    fn split_line(&mut self) {
        let at = self.byte_col();
        let row = self.cursor.row;
        let tail = self.lines[row].split_off(at);
        self.lines.insert(row + 1, tail);
        self.cursor = Cursor { row: row + 1, col: 0 };
        self.touch();
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn clamp_col(&mut self) {
        self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
    }

    /// Byte offset of the cursor column within its line
    fn byte_col(&self) -> usize {
        let line = &self.lines[self.cursor.row];
        line.char_indices()
            .nth(self.cursor.col)
            .map_or(line.len(), |(i, _)| i)
    }

    fn touch(&mut self) {
        self.state = BufferState::Dirty;
        self.scroll();
    }

    fn scroll(&mut self) {
        self.viewport = self.viewport.follow(self.cursor.row);
    }
}
