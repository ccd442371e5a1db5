//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Transcript scroll position and visible range
//! - [`style`]: Theming and colors

pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::{expand_tabs, render, split_rows};

/// Columns per tab stop when drawing indented lines.
pub const TAB_WIDTH: usize = 4;

#[cfg(test)]
mod tests;
