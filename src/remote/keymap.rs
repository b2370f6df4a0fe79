//! Key bindings
//!
//! Bluetooth key fobs and IR receivers on the device present themselves as
//! keyboards, so remote buttons arrive as key presses.

use crate::config::FrameLength;
use crate::machine::RemoteEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward to the timer
    Remote(RemoteEvent),
    /// Leave the program
    Quit,
}

/// Mapping from key presses to inputs
#[derive(Debug, Clone, Copy, Default)]
pub struct Keymap;

impl Keymap {
    /// The device bindings
    pub fn new() -> Self {
        Keymap
    }

    /// Translate a key event; releases and unbound keys give `None`
    pub fn map(&self, key: &KeyEvent) -> Option<Input> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        let event = match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => RemoteEvent::Toggle,
            KeyCode::Char('s') | KeyCode::Char('S') => RemoteEvent::Start,
            KeyCode::Char('p') | KeyCode::Char('P') => RemoteEvent::Pause,
            KeyCode::Char('r') | KeyCode::Char('R') => RemoteEvent::ResetShot,
            KeyCode::Char('f') | KeyCode::Char('F') | KeyCode::Backspace | KeyCode::Delete => {
                RemoteEvent::ResetFrame
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = (c as u8 - b'1') as usize;
                RemoteEvent::SelectFrame(FrameLength::ALL[index])
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Input::Quit),
            _ => return None,
        };
        Some(Input::Remote(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keymap = Keymap::new();
        assert_eq!(
            keymap.map(&press(KeyCode::Enter)),
            Some(Input::Remote(RemoteEvent::Toggle))
        );
        assert_eq!(
            keymap.map(&press(KeyCode::Char('r'))),
            Some(Input::Remote(RemoteEvent::ResetShot))
        );
        assert_eq!(
            keymap.map(&press(KeyCode::Backspace)),
            Some(Input::Remote(RemoteEvent::ResetFrame))
        );
        assert_eq!(
            keymap.map(&press(KeyCode::Char('4'))),
            Some(Input::Remote(RemoteEvent::SelectFrame(
                FrameLength::Minutes5Secs30
            )))
        );
        assert_eq!(keymap.map(&press(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(keymap.map(&press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Keymap::new().map(&key), Some(Input::Quit));
    }

    #[test]
    fn test_release_is_ignored() {
        let key = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Keymap::new().map(&key), None);
    }
}
