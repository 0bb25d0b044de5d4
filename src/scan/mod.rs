//! The scan pipeline: enumeration, type dispatch and counting.
//!
//! These functions block on store round-trips and are meant to run on the
//! background tasks issued by [`crate::bus::CommandBus`], never on the UI thread.

pub mod counter;
pub mod dispatch;
pub mod scanner;

pub use counter::count;
pub use dispatch::resolve;
pub use scanner::scan;
