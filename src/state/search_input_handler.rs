//! Search input handling (pure state transitions).
//!
//! Edits the search box text and cursor. All functions are pure - no side
//! effects, testable without TUI. Whether an edit starts a new search is
//! decided by [`AppState::edit_search`](crate::state::AppState::edit_search).

/// Search box contents. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    text: String,
    cursor: usize,
}

impl SearchBox {
    /// Box holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}

/// Insert `ch` at the cursor and advance the cursor.
pub fn handle_char_input(mut state: SearchBox, ch: char) -> SearchBox {
    let offset = state.byte_offset(state.cursor);
    state.text.insert(offset, ch);
    state.cursor += 1;
    state
}

/// Delete the character before the cursor. No-op at position 0.
pub fn handle_backspace(mut state: SearchBox) -> SearchBox {
    if state.cursor > 0 {
        let offset = state.byte_offset(state.cursor - 1);
        state.text.remove(offset);
        state.cursor -= 1;
    }
    state
}

/// Delete the character under the cursor. No-op at the end.
pub fn handle_delete(mut state: SearchBox) -> SearchBox {
    if state.cursor < state.text.chars().count() {
        let offset = state.byte_offset(state.cursor);
        state.text.remove(offset);
    }
    state
}

/// Move cursor left by one position. Saturates at 0.
pub fn handle_cursor_left(mut state: SearchBox) -> SearchBox {
    state.cursor = state.cursor.saturating_sub(1);
    state
}

/// Move cursor right by one position. Saturates at text length.
pub fn handle_cursor_right(mut state: SearchBox) -> SearchBox {
    state.cursor = (state.cursor + 1).min(state.text.chars().count());
    state
}

/// Move cursor to the start of the text.
pub fn handle_home(mut state: SearchBox) -> SearchBox {
    state.cursor = 0;
    state
}

/// Move cursor past the last character.
pub fn handle_end(mut state: SearchBox) -> SearchBox {
    state.cursor = state.text.chars().count();
    state
}

/// Clear the whole text (Ctrl+U in the search box).
pub fn handle_clear(_state: SearchBox) -> SearchBox {
    SearchBox::default()
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
