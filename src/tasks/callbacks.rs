//! # Per-task callback capability set.
//!
//! [`TaskCallbacks`] is the embedder's hook into one handle's lifecycle:
//! `on_created` fires once when the supervisor registers the handle,
//! `on_ready` fires once when the underlying task first appears. Both run on
//! freshly spawned tasks — never on the supervision loop — so slow user code
//! cannot stall event processing.
//!
//! ## Example
//! ```rust
//! use std::collections::HashSet;
//! use async_trait::async_trait;
//! use panelvisor::{HandleRef, TaskCallbacks};
//!
//! struct MapsPanel;
//!
//! #[async_trait]
//! impl TaskCallbacks for MapsPanel {
//!     async fn on_ready(&self) {
//!         // surface is live; reveal the panel chrome
//!     }
//!
//!     fn depending_packages(&self) -> HashSet<String> {
//!         HashSet::from(["com.example.maps".to_string()])
//!     }
//! }
//! ```

use std::collections::HashSet;

use async_trait::async_trait;

use super::handle::HandleRef;

/// Lifecycle callbacks for one embedded task.
///
/// Every method has a no-op default; implement what you need.
#[async_trait]
pub trait TaskCallbacks: Send + Sync + 'static {
    /// Called exactly once, after the supervisor registered the handle.
    async fn on_created(&self, handle: HandleRef) {
        let _ = handle;
    }

    /// Called exactly once, when the underlying task first appears.
    async fn on_ready(&self) {}

    /// Packages whose replacement should retry this task if it is down.
    ///
    /// Queried once, at handle creation; the set is fixed afterwards.
    fn depending_packages(&self) -> HashSet<String> {
        HashSet::new()
    }
}
