use std::io::Write;

use crate::annotate::MAX_LINE_INPUT_LENGTH;
use crate::app::Model;
use crate::app::model::{StatusLevel, transcript_height};
use crate::session::{EndReason, Submit};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Prompt editing
    /// Type a character at the cursor
    InputChar(char),
    /// Delete the character before the cursor
    Backspace,
    /// Delete the character under the cursor
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Hand the typed line to the session
    Submit,

    // Transcript scrolling
    /// Scroll up by n rows
    ScrollUp(usize),
    /// Scroll down by n rows
    ScrollDown(usize),
    PageUp,
    PageDown,
    /// Jump back to the newest line
    FollowTail,

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Session end
    /// End of input (Ctrl+D on an empty prompt)
    Eof,
    /// Ctrl+C
    Interrupt,
}

/// Apply `msg` to the model.
///
/// Only [`Message::Submit`] reaches outside the model: it records the line
/// through the session, which writes it to the note file.
pub fn update<'a, W: Write>(mut model: Model<'a, W>, msg: Message) -> Model<'a, W> {
    match msg {
        Message::InputChar(ch) => {
            if !model.insert_char(ch) && !ch.is_control() {
                model.show_status(
                    StatusLevel::Info,
                    format!("Line limit reached ({MAX_LINE_INPUT_LENGTH} characters)"),
                );
            }
        }
        Message::Backspace => model.delete_back(),
        Message::DeleteForward => model.delete_forward(),
        Message::CursorLeft => model.move_left(),
        Message::CursorRight => model.move_right(),
        Message::CursorHome => model.move_home(),
        Message::CursorEnd => model.move_end(),
        Message::Submit => {
            let raw = model.take_input();
            match model.session.submit(&raw) {
                Ok(Submit::Recorded) => {
                    model.clear_status();
                    model.viewport.go_to_bottom();
                    model.sync_viewport();
                }
                Ok(Submit::Quit) => model.end(EndReason::Command),
                Err(err) => {
                    tracing::warn!("note write failed: {err}");
                    model.show_status(StatusLevel::Error, format!("Write failed: {err}"));
                    model.sync_viewport();
                    model.end(EndReason::Error);
                }
            }
        }

        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::FollowTail => model.viewport.go_to_bottom(),

        Message::Resize(width, height) => {
            model.viewport.resize(width, transcript_height(height));
        }

        Message::Eof => model.end(EndReason::Eof),
        Message::Interrupt => model.end(EndReason::Interrupt),
    }
    model
}
