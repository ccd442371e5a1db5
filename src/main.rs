//! cnote - A terminal note-taking tool.
//!
//! # Usage
//!
//! ```bash
//! cnote notes.txt
//! cnote --append notes.txt
//! cnote --plain notes.txt
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use cnote::annotate::Annotator;
use cnote::app::App;
use cnote::cancel::{CancelToken, install_interrupt_handler};
use cnote::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use cnote::note_file::{ExistingFileAction, NoteFile, choose_action, timestamp};
use cnote::session::{EndReason, Session};
use cnote::transcript::TranscriptBuffer;

/// A terminal note-taking tool
#[derive(Parser, Debug)]
#[command(name = "cnote", version, about, long_about = None)]
struct Cli {
    /// Note file to write
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Use plain line-by-line terminal I/O instead of the full-screen view
    #[arg(long)]
    plain: bool,

    /// Append to an existing file without asking
    #[arg(long, conflicts_with = "overwrite")]
    append: bool,

    /// Overwrite an existing file without asking
    #[arg(long)]
    overwrite: bool,

    /// Character used to draw heading rules
    #[arg(long, value_name = "CHAR")]
    rule_char: Option<char>,

    /// Keep at most N lines in memory for the scrolling view
    #[arg(long, value_name = "N")]
    scrollback: Option<usize>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<ExitCode> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    cnote::logging::init(effective.log.as_deref())?;

    let Some(file) = cli.file else {
        if cli.save || cli.clear {
            return Ok(ExitCode::SUCCESS);
        }
        let mut stderr = io::stderr();
        writeln!(stderr, "{}", Cli::command().render_usage())?;
        return Ok(ExitCode::FAILURE);
    };

    let action = {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        choose_action(&file, effective.on_existing, &mut stdin.lock(), &mut stdout)
            .context("Failed to ask about existing file")?
    };
    if action == ExistingFileAction::Abort {
        eprintln!("{} left untouched", file.display());
        return Ok(ExitCode::FAILURE);
    }

    let writer = NoteFile::open(&file, action, &timestamp())
        .with_context(|| format!("Failed to open {}", file.display()))?;

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel)?;

    let annotator = effective
        .rule_char
        .map_or_else(Annotator::default, Annotator::new);
    let transcript = effective
        .scrollback
        .map_or_else(TranscriptBuffer::new, TranscriptBuffer::with_capacity_limit);
    let mut session = Session::new(writer, annotator).with_transcript(transcript);
    tracing::info!(path = %file.display(), plain = effective.plain, "session started");

    let outcome = if effective.plain {
        cnote::plain::run(&mut session, &cancel)
    } else {
        App::new(file.clone())
            .with_cancel_token(cancel)
            .run(&mut session)
    };

    // Teardown runs on every path out of the front end.
    let reason = outcome.as_ref().map_or(EndReason::Error, |reason| *reason);
    let summary = session
        .finish(reason)
        .with_context(|| format!("Failed to flush {}", file.display()))?;
    outcome.context("Application error")?;

    println!(
        "{} line{} saved to {}",
        summary.lines_written,
        if summary.lines_written == 1 { "" } else { "s" },
        file.display()
    );
    Ok(ExitCode::SUCCESS)
}
