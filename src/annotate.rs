//! Line annotation: marker parsing and indentation/heading markup.
//!
//! Every line typed into a session passes through [`Annotator::annotate`]
//! together with the current indent depth. Leading markers change the depth
//! or the role of the line:
//!
//! | Marker | Effect                                   |
//! |--------|------------------------------------------|
//! | `>`    | indent one level                         |
//! | `<`    | outdent one level (never below zero)     |
//! | `<>`   | reset to the root level                  |
//! | `^`    | heading, always at the root level        |
//!
//! `>` and `<` stack, so `>>item` indents twice and `<<item` outdents twice.
//!
//! ```
//! use cnote::annotate::{annotate, Annotated};
//!
//! let Annotated::Line(line) = annotate(">world", 0) else {
//!     unreachable!()
//! };
//! assert_eq!(line.text, "\tworld");
//! assert_eq!(line.indent, 1);
//! ```

use unicode_width::UnicodeWidthStr;

/// Longest accepted input line, in characters. Longer input is truncated.
pub const MAX_LINE_INPUT_LENGTH: usize = 300;

/// Character repeated to build heading rules.
pub const DEFAULT_RULE_CHAR: char = '=';

/// Session commands that end the session instead of producing a line.
pub const QUIT_COMMANDS: [&str; 2] = ["exit", "quit"];

/// Role of a leading marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// `<>`: back to depth zero.
    Reset,
    /// `<`: one level shallower.
    Outdent,
    /// `>`: one level deeper.
    Indent,
    /// `^`: heading block.
    Heading,
    /// No marker.
    Literal,
}

impl Marker {
    /// Split the first marker off `line`.
    ///
    /// Returns the marker and the remaining text. [`Marker::Literal`] leaves
    /// the text untouched.
    pub fn classify(line: &str) -> (Self, &str) {
        if let Some(rest) = line.strip_prefix("<>") {
            (Self::Reset, rest)
        } else if let Some(rest) = line.strip_prefix('<') {
            (Self::Outdent, rest)
        } else if let Some(rest) = line.strip_prefix('>') {
            (Self::Indent, rest)
        } else if let Some(rest) = line.strip_prefix('^') {
            (Self::Heading, rest)
        } else {
            (Self::Literal, line)
        }
    }

    /// Apply this marker to an indent depth.
    pub const fn apply(self, depth: u16) -> u16 {
        match self {
            Self::Reset | Self::Heading => 0,
            Self::Outdent => depth.saturating_sub(1),
            Self::Indent => depth.saturating_add(1),
            Self::Literal => depth,
        }
    }

    const fn adjusts_indent(self) -> bool {
        matches!(self, Self::Reset | Self::Outdent | Self::Indent)
    }
}

/// The current indent depth of a session. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndentState(u16);

impl IndentState {
    pub const fn new(depth: u16) -> Self {
        Self(depth)
    }

    pub const fn depth(self) -> u16 {
        self.0
    }

    /// Tab prefix for a line at this depth.
    pub fn prefix(self) -> String {
        "\t".repeat(usize::from(self.0))
    }
}

/// A content line produced by the annotator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Normalized text. Headings span several display rows.
    pub text: String,
    pub is_heading: bool,
    /// Indent depth after this line.
    pub indent: u16,
}

/// Result of annotating one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotated {
    /// `exit` or `quit`: end the session.
    Quit,
    Line(Annotation),
}

/// Turns raw input lines into normalized transcript text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Annotator {
    rule_char: char,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(DEFAULT_RULE_CHAR)
    }
}

impl Annotator {
    /// Create an annotator that draws heading rules with `rule_char`.
    pub const fn new(rule_char: char) -> Self {
        Self { rule_char }
    }

    pub const fn rule_char(&self) -> char {
        self.rule_char
    }

    /// Annotate one raw input line at the given indent depth.
    ///
    /// Quit commands must match the whole trimmed line. Anything else is
    /// truncated to [`MAX_LINE_INPUT_LENGTH`] and becomes a line; this never
    /// fails.
    pub fn annotate(&self, raw: &str, indent: u16) -> Annotated {
        if QUIT_COMMANDS.contains(&raw.trim()) {
            return Annotated::Quit;
        }

        let line = trim_input(raw);
        let (first, rest) = Marker::classify(line);
        if first == Marker::Heading {
            return Annotated::Line(Annotation {
                text: heading_block(rest, self.rule_char),
                is_heading: true,
                indent: Marker::Heading.apply(indent),
            });
        }

        let mut depth = first.apply(indent);
        let mut text = rest;
        if first.adjusts_indent() {
            loop {
                let (marker, remaining) = Marker::classify(text);
                if !marker.adjusts_indent() {
                    break;
                }
                depth = marker.apply(depth);
                text = remaining;
            }
        }

        let state = IndentState::new(depth);
        Annotated::Line(Annotation {
            text: format!("{}{text}", state.prefix()),
            is_heading: false,
            indent: depth,
        })
    }
}

/// Annotate with the default heading rule character.
pub fn annotate(raw: &str, indent: u16) -> Annotated {
    Annotator::default().annotate(raw, indent)
}

/// Strip surrounding whitespace and cap the length at
/// [`MAX_LINE_INPUT_LENGTH`] characters.
pub fn trim_input(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.char_indices().nth(MAX_LINE_INPUT_LENGTH) {
        Some((cut, _)) => trimmed[..cut].trim_end(),
        None => trimmed,
    }
}

/// Build the decorated heading block for `content`.
///
/// The block is a blank separator, a rule, the content, a closing rule and a
/// trailing blank separator. Rules match the display width of the content.
pub fn heading_block(content: &str, rule_char: char) -> String {
    let rule = rule_char.to_string().repeat(content.width());
    format!("\n{rule}\n{content}\n{rule}\n")
}
