//! Built-in full-screen editor on top of crossterm
//!
//! Keys: arrows move, Ctrl+Left/Right jump words, Home/End, Ctrl+S saves,
//! Esc or Ctrl+Q cancels.

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent as TermKey, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use daybook_core::editor::{EditBuffer, EditorSession, KeyEvent, KeySource, SessionOutcome};
use daybook_core::error::{JournalError, Result};

/// Rows taken by the title bar and the status line
const CHROME_ROWS: usize = 2;

fn term_err(e: io::Error) -> JournalError {
    JournalError::io_operation("drive", "terminal", e)
}

/// Keys read from the terminal in raw mode
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read().map_err(term_err)? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(mapped) = map_key(key) {
                    return Ok(mapped);
                }
            }
        }
    }
}

/// Editor key for a terminal key press; `None` for unbound keys
pub fn map_key(key: TermKey) -> Option<KeyEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => Some(KeyEvent::Save),
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => Some(KeyEvent::Cancel),
        KeyCode::Esc => Some(KeyEvent::Cancel),
        KeyCode::Left if ctrl => Some(KeyEvent::WordLeft),
        KeyCode::Right if ctrl => Some(KeyEvent::WordRight),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(KeyEvent::Char(c)),
        KeyCode::Tab => Some(KeyEvent::Char('\t')),
        KeyCode::Enter => Some(KeyEvent::Enter),
        KeyCode::Backspace => Some(KeyEvent::Backspace),
        KeyCode::Delete => Some(KeyEvent::Delete),
        KeyCode::Left => Some(KeyEvent::Left),
        KeyCode::Right => Some(KeyEvent::Right),
        KeyCode::Up => Some(KeyEvent::Up),
        KeyCode::Down => Some(KeyEvent::Down),
        KeyCode::Home => Some(KeyEvent::Home),
        KeyCode::End => Some(KeyEvent::End),
        _ => None,
    }
}

/// Raw mode plus alternate screen, restored on drop
struct RawScreen {
    out: Stdout,
}

impl RawScreen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut screen = RawScreen { out: io::stdout() };
        execute!(screen.out, EnterAlternateScreen, Clear(ClearType::All))?;
        Ok(screen)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Edit `body` full screen until the user saves or cancels
pub fn edit_body(title: &str, body: &str, viewport_height: usize) -> Result<SessionOutcome> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        return Err(JournalError::UsageError(
            "the built-in editor needs a terminal; pass --content, pipe the text, or use --editor"
                .to_string(),
        ));
    }

    let (_, rows) = terminal::size().map_err(term_err)?;
    let height = viewport_height.min((rows as usize).saturating_sub(CHROME_ROWS));
    let mut session = EditorSession::new(EditBuffer::from_text(body, height));

    let mut screen = RawScreen::enter().map_err(term_err)?;
    session.run(&mut TerminalKeys, |buffer| {
        render(&mut screen.out, title, buffer).map_err(term_err)
    })
}

fn render(out: &mut Stdout, title: &str, buffer: &EditBuffer) -> io::Result<()> {
    let width = terminal::size()?.0 as usize;
    let viewport = buffer.viewport();
    let cursor = buffer.cursor();

    queue!(
        out,
        Hide,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Reverse),
        Print(fit(&title_bar(title), width)),
        SetAttribute(Attribute::Reset)
    )?;

    for (offset, (_, line)) in buffer.visible_lines().enumerate() {
        queue!(
            out,
            MoveTo(0, (offset + 1) as u16),
            Print(fit(&line.replace('\t', " "), width))
        )?;
    }

    queue!(
        out,
        MoveTo(0, (viewport.height + 1) as u16),
        Print(fit(&status_line(buffer), width)),
        MoveTo(cursor.col as u16, (cursor.row - viewport.top + 1) as u16),
        Show
    )?;
    out.flush()
}

fn title_bar(title: &str) -> String {
    format!(" {}  |  Ctrl+S save  Esc cancel", title)
}

fn status_line(buffer: &EditBuffer) -> String {
    let cursor = buffer.cursor();
    format!(
        "{} words  Ln {}, Col {}{}",
        buffer.word_count(),
        cursor.row + 1,
        cursor.col + 1,
        if buffer.is_dirty() { "  [modified]" } else { "" }
    )
}

/// At most `width` characters of `text`
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TermKey {
        TermKey::new(code, modifiers)
    }

    #[test]
    fn test_control_keys_end_the_session() {
        assert_eq!(
            map_key(press(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(KeyEvent::Save)
        );
        assert_eq!(
            map_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyEvent::Cancel)
        );
        assert_eq!(map_key(press(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_plain_keys_edit() {
        assert_eq!(
            map_key(press(KeyCode::Char('s'), KeyModifiers::NONE)),
            Some(KeyEvent::Char('s'))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('S'), KeyModifiers::SHIFT)),
            Some(KeyEvent::Char('S'))
        );
        assert_eq!(
            map_key(press(KeyCode::Left, KeyModifiers::CONTROL)),
            Some(KeyEvent::WordLeft)
        );
        assert_eq!(map_key(press(KeyCode::F(2), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_status_line_tracks_changes() {
        let mut buffer = EditBuffer::from_text("two words", 5);
        assert_eq!(status_line(&buffer), "2 words  Ln 1, Col 1");
        buffer.line_end();
        buffer.insert_str(" more");
        assert_eq!(status_line(&buffer), "3 words  Ln 1, Col 15  [modified]");
    }

    #[test]
    fn test_fit_counts_characters() {
        assert_eq!(fit("héllo", 2), "hé");
        assert_eq!(fit("ok", 10), "ok");
    }
}
