use std::io::Write;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, StatusLevel};

use super::style;

pub fn render_status_bar<W: Write>(model: &Model<'_, W>, frame: &mut Frame, area: Rect) {
    if let Some((level, message)) = model.status() {
        let prefix = match level {
            StatusLevel::Info => "[info]",
            StatusLevel::Error => "[error]",
        };
        let bar = Paragraph::new(format!(" {prefix} {message}"))
            .style(style::status_message_style(level));
        frame.render_widget(bar, area);
        return;
    }

    let filename = model
        .file_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "untitled".to_string());

    let depth = model.session.indent().depth();
    let lines = model.session.lines_written();
    let scroll_indicator = if model.viewport.is_following() {
        ""
    } else {
        " [scroll]"
    };

    let status = format!(
        " {filename}  depth {depth}  {lines} lines{scroll_indicator}  exit/quit: close  > < <> ^: markers"
    );

    let status_bar = Paragraph::new(status).style(style::status_bar_style());

    frame.render_widget(status_bar, area);
}
