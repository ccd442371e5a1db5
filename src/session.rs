//! A note-taking session.
//!
//! [`Session`] is the single context object of a run: it owns the annotator,
//! the current indent depth, the in-memory transcript and the note file.
//! Front ends feed it raw lines and call [`Session::finish`] exactly once on
//! the way out, whatever ended the session.

use std::io::Write;

use crate::annotate::{Annotated, Annotator, IndentState};
use crate::note_file::{NoteFileError, NoteWriter};
use crate::transcript::{Line, TranscriptBuffer};

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// `exit` or `quit` was typed.
    Command,
    /// End of input.
    Eof,
    /// Ctrl+C.
    Interrupt,
    /// A front end failed.
    Error,
}

/// Outcome of submitting one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    Recorded,
    Quit,
}

/// What a finished session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub reason: EndReason,
    pub lines_written: usize,
}

pub struct Session<W: Write> {
    annotator: Annotator,
    indent: IndentState,
    transcript: TranscriptBuffer,
    writer: Option<NoteWriter<W>>,
    summary: Option<SessionSummary>,
}

impl<W: Write> std::fmt::Debug for Session<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("indent", &self.indent)
            .field("lines", &self.transcript.len())
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

impl<W: Write> Session<W> {
    /// Start a session writing to `writer`. The header is expected to be
    /// written already.
    pub fn new(writer: NoteWriter<W>, annotator: Annotator) -> Self {
        Self {
            annotator,
            indent: IndentState::default(),
            transcript: TranscriptBuffer::new(),
            writer: Some(writer),
            summary: None,
        }
    }

    /// Use `transcript` (e.g. one with a retention cap) instead of an
    /// unbounded buffer.
    pub fn with_transcript(mut self, transcript: TranscriptBuffer) -> Self {
        self.transcript = transcript;
        self
    }

    pub const fn indent(&self) -> IndentState {
        self.indent
    }

    pub const fn transcript(&self) -> &TranscriptBuffer {
        &self.transcript
    }

    pub const fn annotator(&self) -> &Annotator {
        &self.annotator
    }

    pub fn lines_written(&self) -> usize {
        self.writer.as_ref().map_or(0, NoteWriter::lines_written)
    }

    pub const fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    /// Annotate `raw`, record it in the transcript and write it to the note
    /// file.
    ///
    /// A finished session treats every line as a quit request.
    ///
    /// # Errors
    ///
    /// Returns an error if the note file cannot be written. The line stays in
    /// the transcript.
    pub fn submit(&mut self, raw: &str) -> Result<Submit, NoteFileError> {
        if self.is_finished() {
            return Ok(Submit::Quit);
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(Submit::Quit);
        };
        let annotation = match self.annotator.annotate(raw, self.indent.depth()) {
            Annotated::Quit => return Ok(Submit::Quit),
            Annotated::Line(annotation) => annotation,
        };
        self.indent = IndentState::new(annotation.indent);
        tracing::debug!(
            indent = annotation.indent,
            heading = annotation.is_heading,
            "recorded line"
        );
        let line = Line::from(annotation);
        let written = writer.write_line(&line.text);
        self.transcript.append(line);
        written.map(|()| Submit::Recorded)
    }

    /// Tear the session down: flush the note file, release the transcript.
    ///
    /// Only the first call does any work; later calls return the same
    /// summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush fails.
    pub fn finish(&mut self, reason: EndReason) -> Result<SessionSummary, NoteFileError> {
        if let Some(summary) = self.summary {
            return Ok(summary);
        }
        let mut lines_written = 0;
        let flushed = match self.writer.as_mut() {
            Some(writer) => {
                lines_written = writer.lines_written();
                writer.flush()
            }
            None => Ok(()),
        };
        self.transcript.clear();
        let summary = SessionSummary {
            reason,
            lines_written,
        };
        self.summary = Some(summary);
        tracing::info!(?reason, lines_written, "session finished");
        flushed.map(|()| summary)
    }

    /// Finish (if needed) and hand back the underlying writer.
    pub fn into_inner(mut self) -> Option<W> {
        if let Err(err) = self.finish(EndReason::Command) {
            tracing::warn!("flush on close failed: {err}");
        }
        self.writer.take().map(NoteWriter::into_inner)
    }
}

impl<W: Write> Drop for Session<W> {
    fn drop(&mut self) {
        if self.is_finished() {
            return;
        }
        if let Err(err) = self.finish(EndReason::Error) {
            tracing::warn!("flush on drop failed: {err}");
        }
    }
}
