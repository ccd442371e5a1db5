use std::io::Write;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{Message, Model};

/// Map a terminal event to a message.
pub fn handle_event<W: Write>(event: &Event, model: &Model<'_, W>) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(*key, model),
        Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
        _ => None,
    }
}

pub fn handle_key<W: Write>(key: KeyEvent, model: &Model<'_, W>) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Message::Interrupt),
        KeyCode::Char('d') if ctrl => {
            if model.input.is_empty() {
                Some(Message::Eof)
            } else {
                Some(Message::DeleteForward)
            }
        }
        KeyCode::Char('a') if ctrl => Some(Message::CursorHome),
        KeyCode::Char('e') if ctrl => Some(Message::CursorEnd),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Message::InputChar(c)),
        KeyCode::Enter => Some(Message::Submit),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Delete => Some(Message::DeleteForward),
        KeyCode::Left => Some(Message::CursorLeft),
        KeyCode::Right => Some(Message::CursorRight),
        KeyCode::Home => Some(Message::CursorHome),
        KeyCode::End if ctrl => Some(Message::FollowTail),
        KeyCode::End => Some(Message::CursorEnd),
        KeyCode::Up if ctrl => Some(Message::ScrollUp(1)),
        KeyCode::Down if ctrl => Some(Message::ScrollDown(1)),
        KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::PageDown => Some(Message::PageDown),
        KeyCode::Esc => Some(Message::FollowTail),
        _ => None,
    }
}
