//! # Observability events published by the supervision runtime.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (task name, live task id, sweep trigger, reasons). Every event gets a
//! globally unique, monotonically increasing `seq` — use it to restore exact
//! order when events from different receivers are compared.
//!
//! ## Example
//! ```rust
//! use panelvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::LaunchSkipped)
//!     .with_task("com.example.maps/.MapsActivity")
//!     .with_reason("user_locked");
//!
//! assert_eq!(ev.kind, EventKind::LaunchSkipped);
//! assert_eq!(ev.reason.as_deref(), Some("user_locked"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::policies::SweepTrigger;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of supervision events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Handle lifecycle ===
    /// A handle was registered with the supervisor.
    ///
    /// Sets: `task`.
    TaskCreated,

    /// A launch was issued to the host launch primitive.
    ///
    /// Sets: `task`.
    LaunchIssued,

    /// A launch attempt was skipped or rejected (transient, will be retried
    /// on the next qualifying event).
    ///
    /// Sets: `task`, `reason` (a [`LaunchError`](crate::LaunchError) label).
    LaunchSkipped,

    /// A supervised task appeared and its handle recorded the live id.
    ///
    /// Sets: `task`, `task_id`.
    TaskLive,

    /// A task reported changed info (observability only).
    ///
    /// Sets: `task_id`.
    TaskChanged,

    /// A supervised task vanished; its handle is back to `INVALID`.
    ///
    /// Sets: `task`, `task_id`.
    TaskVanished,

    // === Restart sweeps ===
    /// A qualifying event swept the registry. Published after the restart
    /// attempts were issued.
    ///
    /// Sets: `trigger`, `count` (restart attempts issued), `package` (for
    /// package-replaced sweeps).
    SweepTriggered,

    /// A package-replaced broadcast was ignored because the parent activity
    /// is stopped.
    ///
    /// Sets: `package`.
    PackageIgnored,

    // === Host session ===
    /// The session service connection is ready and the task monitor is
    /// armed.
    HostConnected,

    /// The session service connection was lost; user-lifecycle restart
    /// sweeps are unavailable until reconnection.
    HostLost,

    // === Monitor bridge ===
    /// The bridge forwarded a task notification to the session observer.
    ///
    /// Sets: `task_id`, `reason` (`"appeared"` / `"changed"` / `"vanished"`).
    MonitorForwarded,

    /// The bridge dropped a task notification because no observer is bound.
    ///
    /// Sets: `task_id`, `reason`.
    ObserverAbsent,

    // === Startup / teardown ===
    /// A dangling multi-window task from a previous run was removed.
    ///
    /// Sets: `task_id`.
    DanglingRemoved,

    /// The supervisor released: registry cleared, listeners unregistered,
    /// session slot invalidated. Terminal.
    Released,
}

/// Supervision event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Handle name (its intent component), if applicable.
    pub task: Option<Arc<str>>,
    /// Live task identifier, if applicable.
    pub task_id: Option<i32>,
    /// Package name, for package-replaced events.
    pub package: Option<Arc<str>>,
    /// Short reason label (launch-skip cause, forwarded notification kind).
    pub reason: Option<Arc<str>>,
    /// What triggered a restart sweep.
    pub trigger: Option<SweepTrigger>,
    /// Number of restart attempts a sweep issued.
    pub count: Option<usize>,
}

impl Event {
    /// Creates an event of the given kind with the current timestamp and the
    /// next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            task_id: None,
            package: None,
            reason: None,
            trigger: None,
            count: None,
        }
    }

    /// Attaches the handle name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a live task identifier.
    #[inline]
    pub fn with_task_id(mut self, task_id: i32) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Attaches a package name.
    #[inline]
    pub fn with_package(mut self, package: impl Into<Arc<str>>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Attaches a short reason label.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the sweep trigger.
    #[inline]
    pub fn with_trigger(mut self, trigger: SweepTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Attaches a sweep restart count.
    #[inline]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::new(EventKind::TaskCreated);
        let b = Event::new(EventKind::TaskCreated);
        assert!(b.seq > a.seq, "seq must increase: {} then {}", a.seq, b.seq);
    }

    #[test]
    fn builders_set_fields() {
        let ev = Event::new(EventKind::SweepTriggered)
            .with_trigger(SweepTrigger::HostFocus)
            .with_count(3);
        assert_eq!(ev.trigger, Some(SweepTrigger::HostFocus));
        assert_eq!(ev.count, Some(3));
    }
}
