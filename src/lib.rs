//! Redis Viewer
//!
//! TUI application for browsing the keys and values of a Redis deployment
//! (standalone, sentinel or cluster).
//!
//! Pure core: [`state`] holds the interaction controller, which never blocks.
//! Impure shell: [`store`] talks to the deployment, [`scan`] runs the
//! enumeration pipeline on background tasks scheduled by [`bus`], and [`view`]
//! owns the terminal.

pub mod bus;
pub mod config;
pub mod logging;
pub mod model;
pub mod scan;
pub mod state;
pub mod store;
pub mod view;

#[cfg(test)]
mod test_harness;
