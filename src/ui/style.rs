//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette.

use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusLevel;
use crate::transcript::Row;

/// Style for one transcript row. Rows of a heading block stand out.
pub fn style_for_row(row: Row<'_>) -> Style {
    if row.is_heading {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

/// The `cnote: ` label in front of the typed line.
pub fn prompt_label_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn status_message_style(level: StatusLevel) -> Style {
    match level {
        StatusLevel::Info => Style::default().bg(Color::DarkGray).fg(Color::White),
        StatusLevel::Error => Style::default().bg(Color::Red).fg(Color::White),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(text: &str, is_heading: bool) -> Row<'_> {
        Row { text, is_heading }
    }

    #[test]
    fn test_heading_rows_are_styled() {
        let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        assert_eq!(style_for_row(row("=====", true)), heading);
        assert_eq!(style_for_row(row("-----", true)), heading);
        assert_eq!(style_for_row(row("Title", true)), heading);
    }

    #[test]
    fn test_typed_rule_text_is_plain() {
        assert_eq!(style_for_row(row("=====", false)), Style::default());
        assert_eq!(style_for_row(row("", false)), Style::default());
    }
}
