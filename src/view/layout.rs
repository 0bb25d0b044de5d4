//! Screen layout rendering.
//!
//! Pure layout logic: search box on top, key list and value pane side by
//! side, status bar at the bottom.

use crate::model::KeyItem;
use crate::state::{AppState, FocusPane};
use crate::view::constants::{KEY_LIST_WIDTH_PERCENT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::{BusyIndicator, SearchInput, ViewStyles};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScreenAreas {
    pub search: Rect,
    pub key_list: Rect,
    pub value: Rect,
    pub status: Rect,
}

impl ScreenAreas {
    /// Split `area` into search box, key list, value pane and status bar.
    pub(crate) fn for_frame(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_INPUT_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(KEY_LIST_WIDTH_PERCENT),
                Constraint::Percentage(100 - KEY_LIST_WIDTH_PERCENT),
            ])
            .split(vertical_chunks[1]);

        Self {
            search: vertical_chunks[0],
            key_list: horizontal_chunks[0],
            value: horizontal_chunks[1],
            status: vertical_chunks[2],
        }
    }
}

/// Render the full screen.
///
/// `spinner_frame` drives the busy indicator animation.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &ViewStyles, spinner_frame: usize) {
    let areas = ScreenAreas::for_frame(frame.area());

    let search_focused = state.focus == FocusPane::Search;
    frame.render_widget(
        SearchInput::new(state.search_box(), search_focused)
            .border_style(styles.border_for(search_focused)),
        areas.search,
    );

    render_key_list(frame, areas.key_list, state, styles);
    render_value_pane(frame, areas.value, state, styles);
    render_status_bar(frame, areas.status, state, styles, spinner_frame);
}

/// Render the key list with the selected row highlighted.
fn render_key_list(frame: &mut Frame, area: Rect, state: &AppState, styles: &ViewStyles) {
    let focused = state.focus == FocusPane::List;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Keys ({}/{})", state.items().len(), state.limit()))
        .border_style(styles.border_for(focused));

    // Inner width minus the highlight symbol column
    let row_width = usize::from(area.width.saturating_sub(2 + 2));
    let rows: Vec<ListItem> = state
        .items()
        .iter()
        .map(|item| ListItem::new(key_row(item, styles, row_width)))
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(styles.selected)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !state.items().is_empty() {
        list_state.select(Some(state.selected_index()));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// One list row: `[type] key`, truncated to `width` display columns.
fn key_row<'a>(item: &KeyItem, styles: &ViewStyles, width: usize) -> Line<'a> {
    let tag = format!("[{}] ", item.key_type());
    let key_width = width.saturating_sub(tag.width());
    let key = truncate_to_width(item.key(), key_width);

    let key_style = if item.is_error() {
        styles.error
    } else {
        ratatui::style::Style::default()
    };

    Line::from(vec![
        Span::styled(tag, styles.type_tag(item.key_type())),
        Span::styled(key, key_style),
    ])
}

/// Render the selected item's value, scrolled by `detail_scroll`.
fn render_value_pane(frame: &mut Frame, area: Rect, state: &AppState, styles: &ViewStyles) {
    let (title, body, style) = match state.selected_item() {
        Some(item) => {
            let style = if item.is_error() {
                styles.error
            } else {
                ratatui::style::Style::default()
            };
            (
                format!("{} ({})", item.key(), item.key_type()),
                item.rendered().to_string(),
                style,
            )
        }
        None if state.is_scanning() => ("Value".to_string(), "Scanning...".to_string(), styles.border),
        None => ("Value".to_string(), "No matching keys".to_string(), styles.border),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(truncate_to_width(&title, usize::from(area.width.saturating_sub(2))))
        .border_style(styles.border);

    let rows: Vec<Line> = wrap_to_width(&body, value_inner_width(area))
        .into_iter()
        .map(Line::from)
        .collect();
    let paragraph = Paragraph::new(rows)
        .style(style)
        .block(block)
        .scroll((state.detail_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Rows the selected value occupies in a value pane drawn at `area`.
///
/// Zero when nothing is selected.
pub(crate) fn value_rows(state: &AppState, area: Rect) -> usize {
    state
        .selected_item()
        .map(|item| wrap_to_width(item.rendered(), value_inner_width(area)).len())
        .unwrap_or(0)
}

fn value_inner_width(area: Rect) -> usize {
    usize::from(area.width.saturating_sub(2))
}

/// Break `text` into rows of at most `width` display columns.
///
/// Each logical line yields at least one row. A character wider than `width`
/// still takes a row of its own.
pub(crate) fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let mut row = String::new();
        let mut used = 0;
        for ch in line.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += w;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// Render the status bar: spinner, count, notice and clock.
fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    styles: &ViewStyles,
    spinner_frame: usize,
) {
    let clock = state.clock().unwrap_or_default();
    let clock_width = u16::try_from(clock.width()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(clock_width)])
        .split(area);

    let mut spans = vec![
        BusyIndicator::new(state.is_busy(), spinner_frame).render(),
        Span::raw(format!("{} keys match ", state.count())),
        Span::raw(crate::model::pattern_for(state.search_text())),
    ];
    if let Some(notice) = state.notice() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(notice, styles.notice));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(styles.status), chunks[0]);
    frame.render_widget(
        Paragraph::new(clock.to_string()).style(styles.status),
        chunks[1],
    );
}

/// Truncate `text` to at most `max_width` display columns, ending in `…` when cut.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
