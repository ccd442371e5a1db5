//! Line-oriented front end.
//!
//! Clears the screen and shows a prompt indented to the current depth before
//! every read. Input is read on a helper thread so the loop can notice Ctrl+C
//! while waiting for a line.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::annotate::IndentState;
use crate::cancel::CancelToken;
use crate::session::{EndReason, Session, Submit};

/// Text shown after the indent tabs.
pub const PROMPT: &str = "cnote: ";

/// How often a blocked read checks for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run the plain front end on stdin/stdout until the session ends.
///
/// # Errors
///
/// Returns an error if the terminal or the note file cannot be written.
pub fn run<W: Write>(session: &mut Session<W>, cancel: &CancelToken) -> Result<EndReason> {
    let lines = spawn_stdin_reader();
    let mut out = io::stdout();
    let reason = run_lines(session, &lines, &mut out, cancel);
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.flush()?;
    reason
}

/// Forward stdin lines over a channel. The channel closes at EOF.
fn spawn_stdin_reader() -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || forward_lines(io::stdin().lock(), &tx));
    rx
}

/// Send every line of `reader` to `tx` until EOF, a read error, or the
/// receiver going away.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so only
/// real I/O failures reach the channel as errors.
fn forward_lines<R: BufRead>(mut reader: R, tx: &Sender<io::Result<String>>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let line = match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => Ok(decode_line(&buf)),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => Err(err),
        };
        let failed = line.is_err();
        if tx.send(line).is_err() || failed {
            return;
        }
    }
}

/// Strip the line ending and decode lossily.
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Drive `session` from `lines`, drawing prompts to `out`.
///
/// # Errors
///
/// Returns an error if reading input, drawing the prompt or writing the note
/// file fails.
pub fn run_lines<W: Write, O: Write>(
    session: &mut Session<W>,
    lines: &Receiver<io::Result<String>>,
    out: &mut O,
    cancel: &CancelToken,
) -> Result<EndReason> {
    loop {
        if cancel.is_cancelled() {
            return Ok(EndReason::Interrupt);
        }
        show_prompt(out, session.indent())?;

        let line = loop {
            if cancel.is_cancelled() {
                return Ok(EndReason::Interrupt);
            }
            match lines.recv_timeout(POLL_INTERVAL) {
                Ok(line) => break line,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => return Ok(EndReason::Eof),
            }
        };
        let line = line.context("Failed to read input")?;

        match session.submit(&line).context("Failed to write note")? {
            Submit::Recorded => {}
            Submit::Quit => return Ok(EndReason::Command),
        }
    }
}

fn show_prompt<O: Write>(out: &mut O, indent: IndentState) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(format!("\r{}{PROMPT}", indent.prefix()))
    )?;
    out.flush()
}
