//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging custom event handlers
//! into the runtime. Each subscriber gets a dedicated worker task and a
//! per-subscriber bounded queue; panics inside a subscriber are caught and
//! reported without affecting the supervisor or other subscribers.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use panelvisor::{Event, EventKind, Subscribe};
//!
//! struct CrashCounter;
//!
//! #[async_trait]
//! impl Subscribe for CrashCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::TaskVanished) {
//!             // bump a metric
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "crash-counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for supervision observability.
///
/// Implementations should use async I/O, handle their own errors, and avoid
/// blocking the executor; slow processing only backs up this subscriber's
/// queue.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event, in FIFO order per subscriber.
    async fn on_event(&self, event: &Event);

    /// Name used when reporting overflow or panics for this subscriber.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred queue capacity; the runtime clamps it to at least 1.
    ///
    /// On overflow the new event is dropped for this subscriber only.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
