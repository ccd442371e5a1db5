// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. note_file::NoteFileError)
    clippy::module_name_repetitions
)]

//! # cnote
//!
//! A terminal note-taking tool.
//!
//! Each typed line is annotated with indentation or heading markup, kept in
//! an in-memory transcript, written to a plain-text note file, and redrawn
//! in a scrolling view.
//!
//! ## Markers
//!
//! - `>` indents, `<` outdents, `<>` returns to the root level
//! - `^` turns the line into a heading block
//! - `exit` / `quit` end the session
//!
//! ## Modules
//!
//! - [`annotate`]: Marker parsing and line markup
//! - [`transcript`]: Ordered line buffer and viewport windowing
//! - [`session`]: Session context tying annotator, transcript and file together
//! - [`note_file`]: Note file headers, prompts and line writer
//! - [`app`]: Full-screen front end (The Elm Architecture)
//! - [`plain`]: Line-oriented front end
//! - [`ui`]: Terminal UI components
//! - [`cancel`]: Ctrl+C handling
//! - [`config`]: Saved default flags
//! - [`logging`]: Tracing subscriber setup

pub mod annotate;
pub mod app;
pub mod cancel;
pub mod config;
pub mod logging;
pub mod note_file;
pub mod plain;
pub mod session;
pub mod transcript;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::annotate::{Annotated, Annotator, annotate};
    pub use crate::app::{App, Message, Model};
    pub use crate::session::{EndReason, Session};
    pub use crate::transcript::{Line, TranscriptBuffer};
}
