//! Viewport management for the transcript pane.
//!
//! The [`Viewport`] tracks which transcript rows are visible. By default it
//! follows the tail, so every new line scrolls into view at the bottom.
//! Scrolling up detaches it until the user returns to the bottom.

use std::ops::Range;

/// Manages the visible portion of the transcript.
///
/// # Example
///
/// ```
/// use cnote::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 10, 25);
/// assert_eq!(vp.visible_range(), 15..25);
///
/// vp.scroll_up(5);
/// assert_eq!(vp.visible_range(), 10..20);
/// assert!(!vp.is_following());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_rows: usize,
    follow_tail: bool,
}

impl Viewport {
    /// Create a viewport following the tail of `total_rows` rows.
    ///
    /// # Arguments
    ///
    /// * `width` - Terminal width in columns
    /// * `height` - Rows available to the transcript pane
    /// * `total_rows` - Display rows in the transcript
    pub const fn new(width: u16, height: u16, total_rows: usize) -> Self {
        let mut vp = Self {
            width,
            height,
            offset: 0,
            total_rows,
            follow_tail: true,
        };
        vp.offset = vp.max_offset();
        vp
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Whether new rows keep the view pinned to the bottom.
    pub const fn is_following(&self) -> bool {
        self.follow_tail
    }

    /// Get the range of visible rows.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_rows);
        start..end
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll up by n rows. Stops following the tail if anything moved.
    pub const fn scroll_up(&mut self, n: usize) {
        let offset = self.offset.saturating_sub(n);
        if offset != self.offset {
            self.follow_tail = false;
        }
        self.offset = offset;
    }

    /// Scroll down by n rows. Reaching the bottom resumes following.
    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
        if self.offset == self.max_offset() {
            self.follow_tail = true;
        }
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    /// Jump to the bottom and follow the tail again.
    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
        self.follow_tail = true;
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.settle();
    }

    /// Update the row count after the transcript changed.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        self.settle();
    }

    fn settle(&mut self) {
        if self.follow_tail {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_shows_tail() {
        let vp = Viewport::new(80, 24, 100);
        assert_eq!(vp.offset(), 76);
        assert_eq!(vp.visible_range(), 76..100);
        assert!(vp.is_following());
    }

    #[test]
    fn test_short_transcript_starts_at_top() {
        let vp = Viewport::new(80, 24, 5);
        assert_eq!(vp.visible_range(), 0..5);
    }

    #[test]
    fn test_new_rows_keep_tail_visible() {
        let mut vp = Viewport::new(80, 10, 10);
        vp.set_total_rows(13);
        assert_eq!(vp.visible_range(), 3..13);
    }

    #[test]
    fn test_scrolled_view_stays_put_on_new_rows() {
        let mut vp = Viewport::new(80, 10, 30);
        vp.scroll_up(5);
        vp.set_total_rows(40);
        assert_eq!(vp.offset(), 15);
        assert!(!vp.is_following());
    }

    #[test]
    fn test_scroll_down_to_bottom_resumes_following() {
        let mut vp = Viewport::new(80, 10, 30);
        vp.page_up();
        assert!(!vp.is_following());
        vp.page_down();
        assert!(vp.is_following());
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_scroll_up_at_top_keeps_following() {
        let mut vp = Viewport::new(80, 10, 4);
        vp.scroll_up(3);
        assert!(vp.is_following());
        assert!(!vp.can_scroll_up());
    }

    #[test]
    fn test_go_to_bottom() {
        let mut vp = Viewport::new(80, 10, 50);
        vp.scroll_up(20);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 40);
        assert!(vp.is_following());
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_up(70);
        vp.resize(80, 60);
        assert_eq!(vp.offset(), 6);
        vp.resize(80, 200);
        assert_eq!(vp.offset(), 0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_rows in 0..10000usize,
                height in 1..100u16,
                up in 0..10000usize,
                down in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_rows);
                vp.scroll_up(up);
                vp.scroll_down(down);

                let max = total_rows.saturating_sub(height as usize);
                prop_assert!(vp.offset() <= max);
            }

            #[test]
            fn visible_range_within_bounds(
                total_rows in 0..10000usize,
                height in 1..100u16,
                up in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_rows);
                vp.scroll_up(up);

                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_rows);
                prop_assert!(range.len() <= height as usize);
            }

            #[test]
            fn following_view_ends_at_last_row(
                total_rows in 0..10000usize,
                height in 1..100u16,
                added in 0..100usize,
            ) {
                let mut vp = Viewport::new(80, height, total_rows);
                vp.set_total_rows(total_rows + added);
                prop_assert_eq!(vp.visible_range().end, total_rows + added);
            }
        }
    }
}
