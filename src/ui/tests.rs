use super::*;
use crate::annotate::Annotator;
use crate::app::{Message, Model, StatusLevel, update};
use crate::note_file::NoteWriter;
use crate::session::Session;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::path::PathBuf;

fn create_test_session() -> Session<Vec<u8>> {
    Session::new(NoteWriter::new(Vec::new()), Annotator::default())
}

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn submit<'a>(mut model: Model<'a, Vec<u8>>, text: &str) -> Model<'a, Vec<u8>> {
    for ch in text.chars() {
        model = update(model, Message::InputChar(ch));
    }
    update(model, Message::Submit)
}

fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

#[test]
fn test_render_shows_all_lines_when_they_fit() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (40, 10));
    model = submit(model, "hello");
    model = submit(model, ">world");

    let mut terminal = create_test_terminal(40, 10);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);

    assert_eq!(rows[0], "hello");
    assert_eq!(rows[1], "    world");
    assert_eq!(rows[2], "");
    assert_eq!(rows[8], "    cnote:");
    assert!(rows[9].contains("notes.txt"));
    assert!(rows[9].contains("depth 1"));
}

#[test]
fn test_render_shows_most_recent_lines_when_overflowing() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (20, 5));
    for i in 0..6 {
        model = submit(model, &format!("l{i}"));
    }

    let mut terminal = create_test_terminal(20, 5);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);

    assert_eq!(&rows[..3], &["l3", "l4", "l5"]);
}

#[test]
fn test_render_heading_block() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (40, 10));
    model = submit(model, "^Title");

    let mut terminal = create_test_terminal(40, 10);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);

    assert_eq!(&rows[..5], &["", "=====", "Title", "=====", ""]);
}

#[test]
fn test_render_scrolled_view() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (60, 5));
    for i in 0..6 {
        model = submit(model, &format!("l{i}"));
    }
    model = update(model, Message::ScrollUp(2));

    let mut terminal = create_test_terminal(60, 5);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);

    assert_eq!(&rows[..3], &["l1", "l2", "l3"]);
    assert!(rows[4].contains("[scroll]"));
}

#[test]
fn test_render_prompt_shows_typed_text() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (40, 6));
    for ch in "draft".chars() {
        model = update(model, Message::InputChar(ch));
    }

    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);

    assert_eq!(rows[4], "cnote: draft");
}

#[test]
fn test_render_status_message() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (40, 6));
    model.show_status(StatusLevel::Error, "Write failed: disk full");

    let mut terminal = create_test_terminal(40, 6);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);

    assert_eq!(rows[5], " [error] Write failed: disk full");
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let mut session = create_test_session();
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (5, 2));
    model = submit(model, "a line longer than the screen");

    let mut terminal = create_test_terminal(5, 2);
    terminal.draw(|frame| render(&model, frame)).unwrap();
}

#[test]
fn test_typed_rule_text_is_not_styled_as_heading() {
    let mut session = Session::new(NoteWriter::new(Vec::new()), Annotator::new('-'));
    let mut model = Model::new(&mut session, PathBuf::from("notes.txt"), (40, 10));
    model = submit(model, "=====");
    model = submit(model, "^Hi");

    let mut terminal = create_test_terminal(40, 10);
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let rows = screen_rows(&terminal);
    assert_eq!(&rows[..5], &["=====", "", "--", "Hi", "--"]);

    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(0, 0)].fg, ratatui::style::Color::Reset);
    assert_eq!(buffer[(0, 2)].fg, ratatui::style::Color::Cyan);
    assert_eq!(buffer[(0, 3)].fg, ratatui::style::Color::Cyan);
}
