//! Error types for redis-viewer.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all domain-specific failures
//!   - [`ConfigError`](crate::config::ConfigError) - Config file loading and validation
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing subscriber setup
//!   - [`StoreError`] - Store connection and command failures
//!   - `std::io::Error` - Terminal/TUI rendering failures
//!
//! # Error Recovery Strategy
//!
//! Store errors come in three granularities:
//!
//! - **Connection-fatal**: the store is unreachable at startup. Propagates out of `main`.
//! - **Task-fatal**: an enumeration round-trip fails inside a scan or count task. The task's
//!   single result message carries the error; the UI shows a notice and keeps its data.
//! - **Per-item**: a type lookup or value read fails for one key. Captured inside the
//!   [`KeyItem`](crate::model::KeyItem) and rendered inline; never escalates.

use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// Returned from startup code in `main`. Domain errors convert via `From`, so startup
/// reads as a straight line of `?` calls.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    ///
    /// **Recovery**: Fatal. The message names the offending file or field.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The tracing subscriber could not be installed.
    ///
    /// **Recovery**: Fatal. Usually a permissions problem with the log directory.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// The store could not be reached at startup.
    ///
    /// **Recovery**: Fatal, not retried. Errors from store commands issued after
    /// startup never reach this type.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Terminal or TUI rendering error.
    ///
    /// **Recovery**: Attempt terminal cleanup, then exit.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors reported by a [`StoreClient`](crate::store::StoreClient).
///
/// Carries rendered messages instead of the driver's error type so that results can be
/// cloned into the one-shot messages that background tasks send back to the UI thread.
///
/// # Examples
///
/// ```
/// use redis_viewer::model::StoreError;
///
/// let err = StoreError::command("SCAN", "connection reset by peer");
/// assert_eq!(err.to_string(), "SCAN failed: connection reset by peer");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A configured address is not of the form `host:port`.
    #[error("Invalid store address: {0:?}")]
    InvalidAddress(String),

    /// Establishing or verifying a connection failed.
    ///
    /// **When this occurs**: At startup (`PING`), or when a task needs a fresh
    /// connection because the pool is empty.
    #[error("Failed to connect to store: {0}")]
    Connect(String),

    /// A store command failed (I/O, timeout, wrong type, protocol error).
    #[error("{op} failed: {message}")]
    Command {
        /// The command name, e.g. `"SCAN"` or `"HGETALL"`.
        op: &'static str,
        /// Driver-provided error message.
        message: String,
    },

    /// The background thread for a task could not be started.
    #[error("Failed to start background task: {0}")]
    Spawn(String),
}

impl StoreError {
    /// Build a [`StoreError::Command`] from a command name and any displayable error.
    pub fn command(op: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Command {
            op,
            message: message.to_string(),
        }
    }
}
