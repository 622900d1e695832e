/// Keyboard input session.
///
/// Raw mode is held by a `KeySession` value: acquired once at startup and
/// released when the session is dropped, on every exit path.
///
/// One key is read per tick. `next_token` blocks for at most the given
/// timeout; a timeout yields `None`, which the loop treats as "no input".

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::sim::command::Token;

pub struct KeySession {
    _raw: (),
}

impl KeySession {
    pub fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(KeySession { _raw: () })
    }

    /// Wait up to `timeout` for a key. Non-key events and unmapped keys
    /// come back as `None`.
    pub fn next_token(&mut self, timeout: Duration) -> io::Result<Option<Token>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(token_from_key(key)),
            _ => Ok(None),
        }
    }
}

impl Drop for KeySession {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Translate a key event. Releases are ignored; 'e', Esc and Ctrl+C exit.
pub fn token_from_key(key: KeyEvent) -> Option<Token> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(Token::Exit);
    }

    match key.code {
        KeyCode::Up => Some(Token::Up),
        KeyCode::Down => Some(Token::Down),
        KeyCode::Left => Some(Token::Left),
        KeyCode::Right => Some(Token::Right),
        KeyCode::PageUp => Some(Token::PageUp),
        KeyCode::PageDown => Some(Token::PageDown),
        KeyCode::Enter => Some(Token::Enter),
        KeyCode::Esc | KeyCode::Char('e') => Some(Token::Exit),
        KeyCode::Char(' ') => Some(Token::Space),
        KeyCode::Char(c) => Some(Token::Char(c)),
        _ => None,
    }
}
