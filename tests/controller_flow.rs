//! End-to-end flow: controller commands run on the bus against a store.

mod support;

use redis_viewer::bus::{CommandBus, Message};
use redis_viewer::state::AppState;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Duration;
use support::test_harness::MemoryStore;

const WAIT: Duration = Duration::from_secs(5);

fn store() -> MemoryStore {
    let keys = (0..30)
        .map(|i| format!("user:{i:02}"))
        .chain((0..12).map(|i| format!("order:{i:02}")));
    MemoryStore::new().with_keys(keys).page_size(5)
}

/// Apply results until the current text has no pending task. Ticks are not
/// re-dispatched so the test ends.
fn settle(state: &mut AppState, bus: &CommandBus, rx: &Receiver<Message>) {
    while state.is_busy() {
        let message = rx.recv_timeout(WAIT).expect("task should report");
        let is_tick = matches!(message, Message::Tick { .. });
        let follow_up = state.apply(message);
        if !is_tick {
            bus.dispatch_all(follow_up);
        }
    }
}

#[test]
fn startup_loads_first_page_and_full_count() {
    let (tx, rx) = mpsc::channel();
    let bus = CommandBus::new(Arc::new(store()), tx).with_tick_period(Duration::from_millis(10));

    let (mut state, commands) = AppState::startup(20);
    bus.dispatch_all(commands);
    settle(&mut state, &bus, &rx);

    assert_eq!(state.items().len(), 20);
    assert_eq!(state.count(), 42);
    assert!(state.items().iter().all(|i| !i.is_error()));
}

#[test]
fn narrowing_search_replaces_results() {
    let (tx, rx) = mpsc::channel();
    let bus = CommandBus::new(Arc::new(store()), tx).with_tick_period(Duration::from_millis(10));
    let (mut state, commands) = AppState::startup(20);
    bus.dispatch_all(commands);
    settle(&mut state, &bus, &rx);

    for text in ["o", "or", "order:*"] {
        let commands = state.set_search_text(text);
        bus.dispatch_all(commands);
    }
    settle(&mut state, &bus, &rx);

    assert_eq!(state.search_text(), "order:*");
    assert_eq!(state.items().len(), 12);
    assert_eq!(state.count(), 12);
    assert_eq!(state.items()[0].rendered(), "\"value of order:00\"");
}

#[test]
fn tick_reaches_controller() {
    let (tx, rx) = mpsc::channel();
    let bus = CommandBus::new(Arc::new(store()), tx).with_tick_period(Duration::from_millis(10));
    let mut state = AppState::new(20);

    bus.dispatch(redis_viewer::bus::Command::Tick);
    let message = rx.recv_timeout(WAIT).expect("tick should arrive");
    let follow_up = state.apply(message);

    assert!(state.clock().is_some());
    assert_eq!(follow_up, vec![redis_viewer::bus::Command::Tick]);
}
