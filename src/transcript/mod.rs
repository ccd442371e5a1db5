//! In-memory transcript of a note session.
//!
//! Holds the normalized lines in the order they were typed and computes the
//! window shown in a viewport of limited height.

mod buffer;

pub use buffer::{Line, Row, TranscriptBuffer};
