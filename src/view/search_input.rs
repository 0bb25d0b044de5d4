//! Search input widget for rendering the search bar.

use crate::state::SearchBox;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search input widget.
/// Shows a block cursor while the search box has focus.
pub struct SearchInput<'a> {
    search: &'a SearchBox,
    focused: bool,
    border_style: Style,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search: &'a SearchBox, focused: bool) -> Self {
        Self {
            search,
            focused,
            border_style: Style::default(),
        }
    }

    /// Style for the surrounding border.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.search.text();
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Search (glob pattern, empty = *)")
            .border_style(self.border_style);

        let line = if self.focused {
            // Split text into before/after cursor for rendering cursor
            let cursor = self.search.cursor();
            let before: String = text.chars().take(cursor).collect();
            let mut after = text.chars().skip(cursor);
            let cursor_char = after.next().map(String::from).unwrap_or_else(|| " ".to_string());
            let after_text: String = after.collect();

            Line::from(vec![
                Span::raw(before),
                Span::styled(
                    cursor_char,
                    Style::default()
                        .bg(Color::White)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(after_text),
            ])
        } else {
            Line::from(text.to_string())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}
