//! Background task scheduling.
//!
//! Every action that can block on the network runs as a one-shot task on its
//! own thread and reports back exactly one [`Message`] through an mpsc channel.
//! Tasks carry no identity beyond the parameters they captured; deciding whether
//! a result is still wanted is the controller's job.

use crate::model::{CountResult, ScanBatch, SearchQuery, StoreError};
use crate::scan;
use crate::store::StoreClient;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Period of the status bar clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Clock format shown in the status bar.
pub const CLOCK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Work requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scan and resolve keys for `query`, issued while the search box held `search_text`.
    Scan {
        /// Search text at issue time; the staleness tag.
        search_text: String,
        /// Pattern and limit, captured by value.
        query: SearchQuery,
    },
    /// Count keys matching `pattern`, issued while the search box held `search_text`.
    Count {
        /// Search text at issue time; the staleness tag.
        search_text: String,
        /// Glob pattern derived from `search_text`.
        pattern: String,
    },
    /// Fire one clock tick after [`TICK_PERIOD`].
    Tick,
}

/// The single result of a finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A scan task finished.
    ScanCompleted {
        /// Search text the task was issued for.
        search_text: String,
        /// The batch, or the enumeration error that ended the task.
        result: Result<ScanBatch, StoreError>,
    },
    /// A count task finished.
    CountCompleted {
        /// Search text the task was issued for.
        search_text: String,
        /// The estimate, or the enumeration error that ended the task.
        result: Result<CountResult, StoreError>,
    },
    /// The clock ticked.
    Tick {
        /// Formatted local time.
        clock: String,
    },
}

impl Command {
    fn thread_name(&self) -> &'static str {
        match self {
            Self::Scan { .. } => "scan",
            Self::Count { .. } => "count",
            Self::Tick => "tick",
        }
    }

    /// The message reporting that this command could not even start.
    ///
    /// A tick has none, so the clock stops.
    fn spawn_failure(self, reason: String) -> Option<Message> {
        match self {
            Self::Scan { search_text, .. } => Some(Message::ScanCompleted {
                search_text,
                result: Err(StoreError::Spawn(reason)),
            }),
            Self::Count { search_text, .. } => Some(Message::CountCompleted {
                search_text,
                result: Err(StoreError::Spawn(reason)),
            }),
            Self::Tick => None,
        }
    }
}

/// Runs [`Command`]s off the UI thread.
#[derive(Clone)]
pub struct CommandBus {
    store: Arc<dyn StoreClient>,
    tx: Sender<Message>,
    tick_period: Duration,
}

impl CommandBus {
    /// Bus that runs tasks against `store` and reports on `tx`.
    pub fn new(store: Arc<dyn StoreClient>, tx: Sender<Message>) -> Self {
        Self {
            store,
            tx,
            tick_period: TICK_PERIOD,
        }
    }

    /// Override the tick delay (tests use a short one).
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    /// Start one task per command. Returns immediately.
    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Start the task for `command` on a fresh thread. Returns immediately.
    pub fn dispatch(&self, command: Command) {
        debug!(?command, "Dispatching task");

        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        let tick_period = self.tick_period;
        let task = command.clone();

        let spawned = thread::Builder::new()
            .name(command.thread_name().to_string())
            .spawn(move || {
                let message = run(store.as_ref(), task, tick_period);
                // Receiver gone means the UI is shutting down.
                if tx.send(message).is_err() {
                    debug!("Result dropped: UI receiver closed");
                }
            });

        if let Err(e) = spawned {
            warn!(error = %e, ?command, "Failed to spawn task thread");
            match command.spawn_failure(e.to_string()) {
                Some(message) => {
                    let _ = self.tx.send(message);
                }
                None => warn!("Clock stopped"),
            }
        }
    }
}

/// Execute one command to completion on the current thread.
fn run(store: &dyn StoreClient, command: Command, tick_period: Duration) -> Message {
    match command {
        Command::Scan { search_text, query } => {
            let result = scan::scan(store, &query);
            if let Err(e) = &result {
                warn!(pattern = query.pattern(), error = %e, "Scan task failed");
            }
            Message::ScanCompleted {
                search_text,
                result,
            }
        }
        Command::Count {
            search_text,
            pattern,
        } => {
            let result = scan::count(store, &pattern);
            if let Err(e) = &result {
                warn!(pattern = %pattern, error = %e, "Count task failed");
            }
            Message::CountCompleted {
                search_text,
                result,
            }
        }
        Command::Tick => {
            thread::sleep(tick_period);
            Message::Tick {
                clock: current_clock(),
            }
        }
    }
}

/// Local wall-clock time formatted with [`CLOCK_FORMAT`].
pub fn current_clock() -> String {
    chrono::Local::now().format(CLOCK_FORMAT).to_string()
}
