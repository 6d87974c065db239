//! Supervision core.
//!
//! Internal modules:
//! - [`supervisor`]: public contract and the serialized event loop;
//! - [`registry`]: ordered collection of task handles;
//! - [`monitor`]: organizer-to-session forwarding and organizer-to-loop
//!   relay.

mod monitor;
mod registry;
mod supervisor;

pub use monitor::TaskMonitorBridge;
pub use supervisor::Supervisor;
