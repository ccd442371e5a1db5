use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, handle_event, update};
use crate::session::{EndReason, Session};

/// How long a single poll waits before checking the cancel token again.
const POLL_MS: u64 = 100;

impl App {
    /// Run the main event loop until the session ends.
    ///
    /// The terminal is restored on every path out, including errors. The
    /// session itself is left to the caller to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or drawing fails, or if
    /// the note file could not be written.
    pub fn run<W: Write>(&self, session: &mut Session<W>) -> Result<EndReason> {
        let mut terminal = ratatui::try_init().context(
            "Failed to initialize terminal; cnote needs an interactive terminal (try --plain)",
        )?;
        let result = terminal
            .size()
            .context("Failed to read terminal size")
            .and_then(|size| {
                let model = Model::new(session, self.file_path.clone(), (size.width, size.height));
                self.event_loop(&mut terminal, model)
            });

        // Restore terminal
        ratatui::restore();

        result
    }

    fn event_loop<W: Write>(
        &self,
        terminal: &mut DefaultTerminal,
        mut model: Model<'_, W>,
    ) -> Result<EndReason> {
        let mut needs_render = true;

        loop {
            if self.cancel.is_cancelled() && !model.should_quit {
                model = update(model, Message::Interrupt);
            }
            if model.should_quit {
                break;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(&model, frame))?;
                needs_render = false;
            }

            if event::poll(Duration::from_millis(POLL_MS))? {
                if let Some(msg) = handle_event(&event::read()?, &model) {
                    tracing::trace!(?msg, "event");
                    model = update(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while !model.should_quit && event::poll(Duration::ZERO)? {
                    if let Some(msg) = handle_event(&event::read()?, &model) {
                        model = update(model, msg);
                        needs_render = true;
                    }
                }
            }
        }

        let reason = model.end_reason.unwrap_or(EndReason::Command);
        if reason == EndReason::Error {
            let message = model
                .status()
                .map_or("session failed", |(_, message)| message);
            anyhow::bail!("{message}");
        }
        Ok(reason)
    }
}
