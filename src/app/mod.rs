//! Full-screen front end.
//!
//! This module follows The Elm Architecture (TEA):
//! - [`Model`]: The complete front-end state
//! - [`Message`]: All possible events and actions
//! - [`update`]: State transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use input::{handle_event, handle_key};
pub use model::{CHROME_ROWS, Model, StatusLevel, transcript_height};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::cancel::CancelToken;

/// Owns the terminal for the duration of a windowed session.
pub struct App {
    file_path: PathBuf,
    cancel: CancelToken,
}

impl App {
    /// Create an application writing notes to `file_path`.
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            cancel: CancelToken::new(),
        }
    }

    /// Observe `cancel` (e.g. the Ctrl+C handler's token) in the event loop.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}
