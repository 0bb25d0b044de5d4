//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
/// Bindings only apply while the key list has focus; the search box
/// consumes plain characters itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection
    /// Select the next key in the list. Default: j/↓
    SelectNext,
    /// Select the previous key in the list. Default: k/↑
    SelectPrev,
    /// Select the first key. Default: g/Home
    SelectFirst,
    /// Select the last key. Default: G/End
    SelectLast,

    // Detail pane
    /// Scroll the value pane down half a page. Default: Ctrl+d/Page Down
    DetailPageDown,
    /// Scroll the value pane up half a page. Default: Ctrl+u/Page Up
    DetailPageUp,

    // Search
    /// Move focus into the search box. Default: /
    FocusSearch,
    /// Toggle focus between search box and key list. Default: Tab
    ToggleFocus,
    /// Re-run scan and count for the current search text. Default: r
    Refresh,

    // Application
    /// Quit application. Default: q
    Quit,
}
