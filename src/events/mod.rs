//! Event plumbing.
//!
//! Two channels with different jobs:
//! - [`SignalQueue`]: the serialized intake queue. Every producer stream
//!   (organizer, focus, package broadcasts, user events, parent lifecycle)
//!   and every public command (`create_task`, `release`) enqueues a
//!   [`Signal`]; one consumer — the supervisor loop — owns all mutation.
//! - [`Bus`]: lossy broadcast of observability [`Event`]s for subscribers
//!   (logging, metrics, tests).

mod bus;
mod event;
mod signal;

pub use bus::Bus;
pub use event::{Event, EventKind};
pub use signal::{Signal, SignalQueue};
