//! Busy indicator widget for the status bar.
//!
//! A spinner shown while a scan or count for the current search text is in
//! flight, hidden otherwise.

use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Spinner animation frames.
const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Busy indicator that renders based on busy state and animation frame.
///
/// The widget is stateless. The frame counter is advanced by the event loop,
/// once per poll interval.
///
/// # Examples
///
/// ```rust
/// use redis_viewer::view::BusyIndicator;
///
/// let idle = BusyIndicator::new(false, 3);
/// assert_eq!(idle.render().content, "");
///
/// let busy = BusyIndicator::new(true, 1);
/// assert_eq!(busy.render().content, "/ ");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BusyIndicator {
    busy: bool,
    frame: usize,
}

impl BusyIndicator {
    /// Create an indicator for the given busy state and animation frame.
    pub fn new(busy: bool, frame: usize) -> Self {
        Self { busy, frame }
    }

    /// Render the indicator as a ratatui Span. Empty when idle.
    pub fn render(&self) -> Span<'static> {
        if !self.busy {
            return Span::raw("");
        }
        let glyph = SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()];
        Span::styled(format!("{glyph} "), Style::default().fg(Color::Yellow))
    }
}
