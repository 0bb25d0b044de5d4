//! Tests for the interaction controller.

use super::*;
use crate::model::{CountResult, KeyType, ScanBatch, StoreError};
use crate::state::search_input_handler::{handle_backspace, handle_char_input, handle_cursor_left};

fn item(key: &str) -> KeyItem {
    KeyItem::value(key, KeyType::String, format!("\"{key}\""))
}

fn batch(keys: &[&str]) -> ScanBatch {
    ScanBatch {
        items: keys.iter().map(|k| item(k)).collect(),
    }
}

fn scan_done(search_text: &str, keys: &[&str]) -> Message {
    Message::ScanCompleted {
        search_text: search_text.to_string(),
        result: Ok(batch(keys)),
    }
}

fn count_done(search_text: &str, count: usize) -> Message {
    Message::CountCompleted {
        search_text: search_text.to_string(),
        result: Ok(CountResult { count }),
    }
}

fn keys(state: &AppState) -> Vec<&str> {
    state.items().iter().map(|i| i.key()).collect()
}

// ===== startup =====

#[test]
fn startup_issues_match_all_scan_count_and_tick() {
    let (state, commands) = AppState::startup(20);

    assert_eq!(
        commands,
        vec![
            Command::Scan {
                search_text: String::new(),
                query: SearchQuery::new("", 20),
            },
            Command::Count {
                search_text: String::new(),
                pattern: "*".to_string(),
            },
            Command::Tick,
        ]
    );
    assert!(state.is_scanning());
    assert!(state.is_counting());
    assert!(state.items().is_empty());
    assert_eq!(state.count(), 0);
    assert_eq!(state.clock(), None);
}

#[test]
fn new_state_is_idle_with_search_focus() {
    let state = AppState::new(5);
    assert!(!state.is_busy());
    assert_eq!(state.focus, FocusPane::Search);
    assert_eq!(state.limit(), 5);
}

#[test]
fn zero_limit_is_raised_to_one() {
    assert_eq!(AppState::new(0).limit(), 1);
}

// ===== input changes =====

#[test]
fn changing_text_issues_scan_and_count_for_new_text() {
    let mut state = AppState::new(20);

    let commands = state.set_search_text("user:*");

    assert_eq!(
        commands,
        vec![
            Command::Scan {
                search_text: "user:*".to_string(),
                query: SearchQuery::new("user:*", 20),
            },
            Command::Count {
                search_text: "user:*".to_string(),
                pattern: "user:*".to_string(),
            },
        ]
    );
    assert!(state.is_busy());
}

#[test]
fn unchanged_text_issues_nothing() {
    let mut state = AppState::new(20);
    state.set_search_text("a");

    assert!(state.set_search_text("a").is_empty());
}

#[test]
fn cursor_movement_issues_nothing() {
    let mut state = AppState::new(20);
    state.set_search_text("abc");

    let commands = state.edit_search(handle_cursor_left);

    assert!(commands.is_empty());
    assert_eq!(state.search_box().cursor(), 2);
}

#[test]
fn typing_edits_issue_one_search_per_change() {
    let mut state = AppState::new(20);

    let first = state.edit_search(|s| handle_char_input(s, 'a'));
    let second = state.edit_search(|s| handle_char_input(s, 'b'));
    let third = state.edit_search(handle_backspace);

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(third.len(), 2);
    assert_eq!(state.search_text(), "a");
}

#[test]
fn clearing_text_searches_match_all() {
    let mut state = AppState::new(20);
    state.set_search_text("x");

    let commands = state.set_search_text("");

    assert!(commands.contains(&Command::Count {
        search_text: String::new(),
        pattern: "*".to_string(),
    }));
}

#[test]
fn input_change_keeps_previous_items_until_replaced() {
    let mut state = AppState::new(20);
    state.apply(scan_done("", &["a", "b"]));
    state.apply(count_done("", 2));

    state.set_search_text("a*");

    assert_eq!(keys(&state), vec!["a", "b"]);
    assert_eq!(state.count(), 2);
}

#[test]
fn refresh_reissues_current_text() {
    let mut state = AppState::new(20);
    state.set_search_text("k*");
    state.apply(scan_done("k*", &["k1"]));
    state.apply(count_done("k*", 1));
    assert!(!state.is_busy());

    let commands = state.refresh();

    assert_eq!(commands.len(), 2);
    assert!(state.is_busy());
}

// ===== staleness =====

#[test]
fn stale_scan_is_discarded_when_text_moved_on() {
    let mut state = AppState::new(20);
    state.set_search_text("a");
    state.set_search_text("ab");

    state.apply(scan_done("ab", &["ab1", "ab2"]));
    state.apply(scan_done("a", &["a1", "a2", "a3"]));

    assert_eq!(keys(&state), vec!["ab1", "ab2"]);
}

#[test]
fn final_state_does_not_depend_on_arrival_order() {
    let run = |messages: Vec<Message>| {
        let mut state = AppState::new(20);
        state.set_search_text("a");
        state.set_search_text("ab");
        for message in messages {
            state.apply(message);
        }
        (
            keys(&state).into_iter().map(String::from).collect::<Vec<_>>(),
            state.count(),
            state.is_busy(),
        )
    };

    let in_order = run(vec![
        scan_done("a", &["a1"]),
        count_done("a", 10),
        scan_done("ab", &["ab1"]),
        count_done("ab", 1),
    ]);
    let reversed = run(vec![
        count_done("ab", 1),
        scan_done("ab", &["ab1"]),
        count_done("a", 10),
        scan_done("a", &["a1"]),
    ]);

    assert_eq!(in_order, reversed);
    assert_eq!(in_order, (vec!["ab1".to_string()], 1, false));
}

#[test]
fn stale_count_does_not_clear_busy_flag() {
    let mut state = AppState::new(20);
    state.set_search_text("a");
    state.set_search_text("ab");

    state.apply(count_done("a", 7));

    assert!(state.is_counting());
    assert_eq!(state.count(), 0);
}

#[test]
fn stale_error_is_not_shown() {
    let mut state = AppState::new(20);
    state.set_search_text("a");
    state.set_search_text("ab");

    state.apply(Message::ScanCompleted {
        search_text: "a".to_string(),
        result: Err(StoreError::Connect("refused".to_string())),
    });

    assert_eq!(state.notice(), None);
}

// ===== results =====

#[test]
fn accepted_results_clear_busy_flags() {
    let (mut state, _) = AppState::startup(20);

    state.apply(scan_done("", &["a"]));
    assert!(!state.is_scanning());
    assert!(state.is_counting());

    state.apply(count_done("", 1));
    assert!(!state.is_busy());
}

#[test]
fn count_may_exceed_visible_items() {
    let (mut state, _) = AppState::startup(2);

    state.apply(scan_done("", &["a", "b"]));
    state.apply(count_done("", 5000));

    assert_eq!(state.items().len(), 2);
    assert_eq!(state.count(), 5000);
}

#[test]
fn scan_error_keeps_items_and_sets_notice() {
    let (mut state, _) = AppState::startup(20);
    state.apply(scan_done("", &["a"]));
    state.refresh();

    state.apply(Message::ScanCompleted {
        search_text: String::new(),
        result: Err(StoreError::command("SCAN", "connection reset")),
    });

    assert_eq!(keys(&state), vec!["a"]);
    assert!(!state.is_scanning());
    assert_eq!(
        state.notice().as_deref(),
        Some("scan failed: SCAN failed: connection reset")
    );
}

#[test]
fn count_error_keeps_previous_count() {
    let (mut state, _) = AppState::startup(20);
    state.apply(count_done("", 3));
    state.refresh();

    state.apply(Message::CountCompleted {
        search_text: String::new(),
        result: Err(StoreError::Connect("refused".to_string())),
    });

    assert_eq!(state.count(), 3);
    assert!(state.notice().unwrap().starts_with("count failed"));
}

#[test]
fn both_errors_are_reported_together() {
    let (mut state, _) = AppState::startup(20);
    state.apply(Message::ScanCompleted {
        search_text: String::new(),
        result: Err(StoreError::Connect("x".to_string())),
    });
    state.apply(Message::CountCompleted {
        search_text: String::new(),
        result: Err(StoreError::Connect("y".to_string())),
    });

    let notice = state.notice().unwrap();
    assert!(notice.contains("scan failed"));
    assert!(notice.contains("count failed"));
}

#[test]
fn next_search_clears_notice() {
    let (mut state, _) = AppState::startup(20);
    state.apply(Message::ScanCompleted {
        search_text: String::new(),
        result: Err(StoreError::Connect("refused".to_string())),
    });

    state.set_search_text("k");

    assert_eq!(state.notice(), None);
}

#[test]
fn tick_updates_clock_and_schedules_next_tick() {
    let mut state = AppState::new(20);

    let commands = state.apply(Message::Tick {
        clock: "2024-05-01 12:00:00".to_string(),
    });

    assert_eq!(commands, vec![Command::Tick]);
    assert_eq!(state.clock(), Some("2024-05-01 12:00:00"));
}

#[test]
fn tick_is_applied_regardless_of_search_text() {
    let mut state = AppState::new(20);
    state.set_search_text("zzz");

    state.apply(Message::Tick {
        clock: "c".to_string(),
    });

    assert_eq!(state.clock(), Some("c"));
}

// ===== selection =====

#[test]
fn selection_moves_and_saturates() {
    let (mut state, _) = AppState::startup(20);
    state.apply(scan_done("", &["a", "b", "c"]));

    state.select_next();
    state.select_next();
    state.select_next();
    assert_eq!(state.selected_item().unwrap().key(), "c");

    state.select_first();
    state.select_prev();
    assert_eq!(state.selected_index(), 0);

    state.select_last();
    assert_eq!(state.selected_index(), 2);
}

#[test]
fn empty_list_has_no_selection() {
    let mut state = AppState::new(20);
    state.select_next();
    state.select_last();
    assert_eq!(state.selected_item(), None);
    assert_eq!(state.selected_index(), 0);
}

#[test]
fn new_batch_keeps_selected_key_when_present() {
    let (mut state, _) = AppState::startup(20);
    state.apply(scan_done("", &["a", "b", "c"]));
    state.select_last();

    state.refresh();
    state.apply(scan_done("", &["c", "a"]));

    assert_eq!(state.selected_item().unwrap().key(), "c");
    assert_eq!(state.selected_index(), 0);
}

#[test]
fn new_batch_resets_selection_when_key_gone() {
    let (mut state, _) = AppState::startup(20);
    state.apply(scan_done("", &["a", "b", "c"]));
    state.select_last();

    state.set_search_text("x*");
    state.apply(scan_done("x*", &["x1", "x2"]));

    assert_eq!(state.selected_item().unwrap().key(), "x1");
}

#[test]
fn detail_scroll_is_bounded_by_content_rows() {
    let (mut state, _) = AppState::startup(20);
    state.apply(Message::ScanCompleted {
        search_text: String::new(),
        result: Ok(ScanBatch {
            items: vec![KeyItem::value("l", KeyType::List, "[\n  \"a\",\n  \"b\"\n]")],
        }),
    });

    state.scroll_detail_down(10, 4);
    assert_eq!(state.detail_scroll, 3);

    state.scroll_detail_up(2);
    assert_eq!(state.detail_scroll, 1);

    state.scroll_detail_up(5);
    assert_eq!(state.detail_scroll, 0);
}

#[test]
fn detail_scroll_reaches_wrapped_rows_of_a_single_line_value() {
    let (mut state, _) = AppState::startup(20);
    let long = format!("\"{}\"", "x".repeat(20_000));
    state.apply(Message::ScanCompleted {
        search_text: String::new(),
        result: Ok(ScanBatch {
            items: vec![KeyItem::value("big", KeyType::String, long)],
        }),
    });

    // One logical line that wraps to 435 rows in a 46-column pane.
    state.scroll_detail_down(15, 435);
    assert_eq!(state.detail_scroll, 15);

    state.scroll_detail_down(u16::MAX, 435);
    assert_eq!(state.detail_scroll, 434);
}

#[test]
fn detail_scroll_stays_put_without_content() {
    let mut state = AppState::new(20);
    state.scroll_detail_down(5, 0);
    assert_eq!(state.detail_scroll, 0);
}

#[test]
fn selection_change_resets_detail_scroll() {
    let (mut state, _) = AppState::startup(20);
    state.apply(Message::ScanCompleted {
        search_text: String::new(),
        result: Ok(ScanBatch {
            items: vec![
                KeyItem::value("a", KeyType::String, "1\n2\n3"),
                KeyItem::value("b", KeyType::String, "x"),
            ],
        }),
    });
    state.scroll_detail_down(2, 3);

    state.select_next();

    assert_eq!(state.detail_scroll, 0);
}

#[test]
fn toggle_focus_alternates_panes() {
    let mut state = AppState::new(20);
    state.toggle_focus();
    assert_eq!(state.focus, FocusPane::List);
    state.toggle_focus();
    assert_eq!(state.focus, FocusPane::Search);
}
