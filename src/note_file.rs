//! The note file a session writes to.
//!
//! A fresh or overwritten file starts with a timestamp header. Appending to an
//! existing file first writes a separator block so each session stays
//! distinguishable. Every transcript line is flushed as soon as it is written.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// Character used for the append separator rules.
pub const SEPARATOR_CHAR: char = '-';

/// `strftime`-style format of the session timestamp.
pub const TIMESTAMP_FORMAT: &str = "%c";

#[derive(Debug, Error)]
pub enum NoteFileError {
    #[error("{} already exists; leaving it untouched", .0.display())]
    Aborted(PathBuf),
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write note file")]
    Write(#[from] io::Error),
}

/// What to do with a note file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingFileAction {
    Overwrite,
    Append,
    Abort,
}

impl ExistingFileAction {
    /// Interpret a prompt answer. Anything unrecognized aborts.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('o' | 'y') => Self::Overwrite,
            Some('a') => Self::Append,
            _ => Self::Abort,
        }
    }
}

/// Ask the user what to do with an existing file.
///
/// EOF on `input` counts as abort.
pub fn prompt_existing<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> io::Result<ExistingFileAction> {
    write!(
        output,
        "{} already exists. (o)verwrite, (a)ppend, or abort? [o/a/N]: ",
        path.display()
    )?;
    output.flush()?;
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(ExistingFileAction::Abort);
    }
    Ok(ExistingFileAction::from_answer(&answer))
}

/// Decide how to open `path`: new files are created, a preset action wins,
/// otherwise the user is asked.
pub fn choose_action<R: BufRead, W: Write>(
    path: &Path,
    preset: Option<ExistingFileAction>,
    input: &mut R,
    output: &mut W,
) -> io::Result<ExistingFileAction> {
    if !path.exists() {
        return Ok(ExistingFileAction::Overwrite);
    }
    match preset {
        Some(action) => Ok(action),
        None => prompt_existing(path, input, output),
    }
}

/// Current local time in the session header format.
pub fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Header text written before a session's first line.
pub fn session_header(action: ExistingFileAction, timestamp: &str) -> String {
    match action {
        ExistingFileAction::Append => {
            let rule = SEPARATOR_CHAR.to_string().repeat(timestamp.width());
            format!("\n{rule}\n{timestamp}\n{rule}\n\n")
        }
        ExistingFileAction::Overwrite | ExistingFileAction::Abort => format!("{timestamp}\n\n"),
    }
}

/// Line-oriented writer for transcript text.
#[derive(Debug)]
pub struct NoteWriter<W: Write> {
    inner: W,
    lines_written: usize,
}

/// A note file on disk.
pub type NoteFile = NoteWriter<BufWriter<File>>;

impl<W: Write> NoteWriter<W> {
    pub const fn new(inner: W) -> Self {
        Self {
            inner,
            lines_written: 0,
        }
    }

    /// Write the session header for `action`.
    pub fn write_header(
        &mut self,
        action: ExistingFileAction,
        timestamp: &str,
    ) -> Result<(), NoteFileError> {
        self.inner
            .write_all(session_header(action, timestamp).as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }

    /// Write one transcript entry followed by a newline, then flush.
    pub fn write_line(&mut self, text: &str) -> Result<(), NoteFileError> {
        writeln!(self.inner, "{text}")?;
        self.inner.flush()?;
        self.lines_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NoteFileError> {
        self.inner.flush()?;
        Ok(())
    }

    /// Transcript entries written so far (headers excluded).
    pub const fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl NoteFile {
    /// Open `path` according to `action` and write the session header.
    ///
    /// # Errors
    ///
    /// Returns [`NoteFileError::Aborted`] for [`ExistingFileAction::Abort`]
    /// without touching the file, or an I/O error if opening or writing
    /// fails.
    pub fn open(
        path: &Path,
        action: ExistingFileAction,
        timestamp: &str,
    ) -> Result<Self, NoteFileError> {
        let mut options = OpenOptions::new();
        match action {
            ExistingFileAction::Abort => return Err(NoteFileError::Aborted(path.to_path_buf())),
            ExistingFileAction::Overwrite => options.write(true).create(true).truncate(true),
            ExistingFileAction::Append => options.append(true).create(true),
        };
        let file = options.open(path).map_err(|source| NoteFileError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), ?action, "opened note file");
        let mut writer = Self::new(BufWriter::new(file));
        writer.write_header(action, timestamp)?;
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_answers_map_to_actions() {
        assert_eq!(ExistingFileAction::from_answer("o\n"), ExistingFileAction::Overwrite);
        assert_eq!(ExistingFileAction::from_answer("Y"), ExistingFileAction::Overwrite);
        assert_eq!(ExistingFileAction::from_answer(" append"), ExistingFileAction::Append);
        assert_eq!(ExistingFileAction::from_answer(""), ExistingFileAction::Abort);
        assert_eq!(ExistingFileAction::from_answer("nope"), ExistingFileAction::Abort);
    }

    #[test]
    fn test_prompt_reads_answer() {
        let mut input = Cursor::new("a\n");
        let mut output = Vec::new();
        let action = prompt_existing(Path::new("notes.txt"), &mut input, &mut output).unwrap();
        assert_eq!(action, ExistingFileAction::Append);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("notes.txt already exists."));
    }

    #[test]
    fn test_prompt_eof_aborts() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let action = prompt_existing(Path::new("notes.txt"), &mut input, &mut output).unwrap();
        assert_eq!(action, ExistingFileAction::Abort);
    }

    #[test]
    fn test_choose_action_creates_missing_file_without_prompt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let action = choose_action(&path, None, &mut input, &mut output).unwrap();
        assert_eq!(action, ExistingFileAction::Overwrite);
        assert!(output.is_empty());
    }

    #[test]
    fn test_choose_action_prefers_preset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.txt");
        std::fs::write(&path, "old\n").unwrap();
        let mut input = Cursor::new("o\n");
        let mut output = Vec::new();
        let action =
            choose_action(&path, Some(ExistingFileAction::Append), &mut input, &mut output)
                .unwrap();
        assert_eq!(action, ExistingFileAction::Append);
        assert!(output.is_empty());
    }

    #[test]
    fn test_append_header_is_separator_block() {
        let header = session_header(ExistingFileAction::Append, "Mon 1");
        assert_eq!(header, "\n-----\nMon 1\n-----\n\n");
    }

    #[test]
    fn test_overwrite_header_is_timestamp() {
        let header = session_header(ExistingFileAction::Overwrite, "Mon 1");
        assert_eq!(header, "Mon 1\n\n");
    }

    #[test]
    fn test_writer_counts_lines() {
        let mut writer = NoteWriter::new(Vec::new());
        writer.write_line("a").unwrap();
        writer.write_line("\tb").unwrap();
        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.into_inner(), b"a\n\tb\n");
    }

    #[test]
    fn test_open_overwrite_truncates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "previous content\n").unwrap();

        let mut file = NoteFile::open(&path, ExistingFileAction::Overwrite, "TS").unwrap();
        file.write_line("fresh").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "TS\n\nfresh\n");
    }

    #[test]
    fn test_open_append_keeps_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "old\n").unwrap();

        let mut file = NoteFile::open(&path, ExistingFileAction::Append, "TS").unwrap();
        file.write_line("new").unwrap();
        drop(file);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "old\n\n--\nTS\n--\n\nnew\n"
        );
    }

    #[test]
    fn test_open_abort_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "keep me\n").unwrap();

        let err = NoteFile::open(&path, ExistingFileAction::Abort, "TS").unwrap_err();
        assert!(matches!(err, NoteFileError::Aborted(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me\n");
    }

    #[test]
    fn test_timestamp_is_not_empty() {
        assert!(!timestamp().is_empty());
    }
}
