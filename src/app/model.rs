use std::io::Write;
use std::path::PathBuf;

use crate::annotate::MAX_LINE_INPUT_LENGTH;
use crate::session::{EndReason, Session};
use crate::ui::viewport::Viewport;

/// Rows taken by the prompt line and the status bar.
pub const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// The complete state of the windowed front end.
///
/// The session is borrowed so the caller can always tear it down, whatever
/// happens to the terminal.
pub struct Model<'a, W: Write> {
    /// The running note session
    pub session: &'a mut Session<W>,
    /// Path of the note file, shown in the status bar
    pub file_path: PathBuf,
    /// Line being typed
    pub input: String,
    /// Cursor position in `input`, in characters
    pub cursor: usize,
    /// Transcript pane scroll state
    pub viewport: Viewport,
    status: Option<(StatusLevel, String)>,
    /// Set once the session should end
    pub end_reason: Option<EndReason>,
    pub should_quit: bool,
}

impl<W: Write> std::fmt::Debug for Model<'_, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("input", &self.input)
            .field("cursor", &self.cursor)
            .field("end_reason", &self.end_reason)
            .finish_non_exhaustive()
    }
}

impl<'a, W: Write> Model<'a, W> {
    /// Create a model for a terminal of `terminal_size` (width, height).
    pub fn new(session: &'a mut Session<W>, file_path: PathBuf, terminal_size: (u16, u16)) -> Self {
        let (width, height) = terminal_size;
        let viewport = Viewport::new(
            width,
            transcript_height(height),
            session.transcript().total_rows(),
        );
        Self {
            session,
            file_path,
            input: String::new(),
            cursor: 0,
            viewport,
            status: None,
            end_reason: None,
            should_quit: false,
        }
    }

    pub fn status(&self) -> Option<(StatusLevel, &str)> {
        self.status
            .as_ref()
            .map(|(level, message)| (*level, message.as_str()))
    }

    pub fn show_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Some((level, message.into()));
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// End the session with `reason`. The first reason wins.
    pub fn end(&mut self, reason: EndReason) {
        self.end_reason.get_or_insert(reason);
        self.should_quit = true;
    }

    /// Take the typed line, leaving the prompt empty.
    pub fn take_input(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.input)
    }

    /// Insert `ch` at the cursor unless the line is already full.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if ch.is_control() || self.input.chars().count() >= MAX_LINE_INPUT_LENGTH {
            return false;
        }
        let at = self.cursor_byte();
        self.input.insert(at, ch);
        self.cursor += 1;
        true
    }

    pub fn delete_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.cursor_byte();
        self.input.remove(at);
    }

    pub fn delete_forward(&mut self) {
        if self.cursor >= self.input.chars().count() {
            return;
        }
        let at = self.cursor_byte();
        self.input.remove(at);
    }

    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// Byte offset of the cursor in `input`.
    pub fn cursor_byte(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }

    /// Re-read the transcript size after a line was recorded.
    pub fn sync_viewport(&mut self) {
        self.viewport
            .set_total_rows(self.session.transcript().total_rows());
    }
}

/// Rows left for the transcript in a terminal `height` rows tall.
pub const fn transcript_height(height: u16) -> u16 {
    height.saturating_sub(CHROME_ROWS)
}
