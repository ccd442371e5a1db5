use std::io::Write;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::plain::PROMPT;

use super::{TAB_WIDTH, status, style};

/// Split the screen into transcript pane, prompt line and status bar.
pub fn split_rows(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render<W: Write>(model: &Model<'_, W>, frame: &mut Frame) {
    let chunks = split_rows(frame.area());
    render_transcript(model, frame, chunks[0]);
    render_prompt(model, frame, chunks[1]);
    status::render_status_bar(model, frame, chunks[2]);
}

fn render_transcript<W: Write>(model: &Model<'_, W>, frame: &mut Frame, area: Rect) {
    let transcript = model.session.transcript();
    let rows = if model.viewport.is_following() {
        transcript.render_rows(area.height as usize)
    } else {
        transcript.rows_in(model.viewport.visible_range())
    };
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|row| Line::styled(expand_tabs(row.text), style::style_for_row(row)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_prompt<W: Write>(model: &Model<'_, W>, frame: &mut Frame, area: Rect) {
    let indent = " ".repeat(TAB_WIDTH * usize::from(model.session.indent().depth()));
    let label_width = indent.width() + PROMPT.width();
    let before_cursor = &model.input[..model.cursor_byte()];

    // Keep the cursor on screen by dropping input from the left.
    let available = (area.width as usize).saturating_sub(label_width + 1).max(1);
    let skip = before_cursor.width().saturating_sub(available);
    let visible = skip_columns(&model.input, skip);
    let cursor_col = label_width + before_cursor.width() - skip;

    let line = Line::from(vec![
        Span::raw(indent),
        Span::styled(PROMPT, style::prompt_label_style()),
        Span::raw(visible),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if !model.should_quit {
        let x = area
            .x
            .saturating_add(u16::try_from(cursor_col).unwrap_or(u16::MAX))
            .min(area.right().saturating_sub(1));
        frame.set_cursor_position((x, area.y));
    }
}

/// Replace tab characters with spaces up to the next tab stop.
pub fn expand_tabs(row: &str) -> String {
    if !row.contains('\t') {
        return row.to_string();
    }
    let mut out = String::with_capacity(row.len() + TAB_WIDTH * 2);
    let mut col = 0;
    for ch in row.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', pad));
            col += pad;
        } else {
            out.push(ch);
            col += ch.width().unwrap_or(0);
        }
    }
    out
}

/// Drop the first `columns` display columns of `text`.
fn skip_columns(text: &str, columns: usize) -> &str {
    let mut skipped = 0;
    for (i, ch) in text.char_indices() {
        if skipped >= columns {
            return &text[i..];
        }
        skipped += ch.width().unwrap_or(0);
    }
    ""
}
