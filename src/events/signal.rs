//! # Serialized intake queue.
//!
//! Every external event stream and every public command is a tagged
//! [`Signal`] enqueued through a [`SignalQueue`]. One consumer — the
//! supervisor loop — receives signals strictly in arrival order, which makes
//! registry mutation lock-free: producers never touch shared state, they
//! only enqueue.
//!
//! ## Rules
//! - `publish()` never blocks and never fails: after the supervisor has
//!   released, the receiver is gone and signals are silently dropped (they
//!   are inert by contract).
//! - Two signals racing from different producers are serialized in some
//!   order; partial interleaving of registry mutation is impossible.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::platform::{LifecyclePhase, SessionService, TaskInfo, UserEventKind};
use crate::tasks::HandleRef;

/// One unit of work for the supervisor loop.
pub enum Signal {
    /// Register a freshly built handle and issue its first launch.
    CreateRequested {
        handle: HandleRef,
    },

    /// Tear the whole registry down. Terminal once processed.
    ReleaseRequested,

    /// The session-service connection reported ready.
    HostConnected {
        session: Arc<dyn SessionService>,
    },

    /// The session-service connection was lost.
    HostDisconnected,

    /// A task's focus changed.
    FocusChanged {
        task_id: i32,
        focused: bool,
    },

    /// The system observed an activity-restart attempt.
    RestartAttempt {
        task_id: i32,
        home_visible: bool,
    },

    /// A "package replaced" broadcast arrived.
    PackageReplaced {
        package: String,
    },

    /// A user-session lifecycle event arrived.
    User {
        kind: UserEventKind,
        user_id: i32,
        previous_user_id: i32,
    },

    /// The host/parent activity moved through a lifecycle phase.
    ParentLifecycle {
        phase: LifecyclePhase,
    },

    /// The organizer reported a task appearing.
    TaskAppeared {
        info: TaskInfo,
    },

    /// The organizer reported changed task info.
    TaskInfoChanged {
        info: TaskInfo,
    },

    /// The organizer reported a task vanishing.
    TaskVanished {
        info: TaskInfo,
    },
}

impl Signal {
    /// Short stable label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::CreateRequested { .. } => "create_requested",
            Signal::ReleaseRequested => "release_requested",
            Signal::HostConnected { .. } => "host_connected",
            Signal::HostDisconnected => "host_disconnected",
            Signal::FocusChanged { .. } => "focus_changed",
            Signal::RestartAttempt { .. } => "restart_attempt",
            Signal::PackageReplaced { .. } => "package_replaced",
            Signal::User { .. } => "user_event",
            Signal::ParentLifecycle { .. } => "parent_lifecycle",
            Signal::TaskAppeared { .. } => "task_appeared",
            Signal::TaskInfoChanged { .. } => "task_info_changed",
            Signal::TaskVanished { .. } => "task_vanished",
        }
    }
}

/// Multi-producer handle to the supervisor's intake queue.
///
/// Obtained from [`Supervisor::signals`](crate::Supervisor::signals); clone
/// it into every adapter that produces events (broadcast receivers,
/// lifecycle callbacks, session connection callbacks).
#[derive(Clone)]
pub struct SignalQueue {
    tx: mpsc::UnboundedSender<Signal>,
}

impl SignalQueue {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Signal>) -> Self {
        Self { tx }
    }

    /// Enqueues a signal. Never blocks; a signal enqueued after release is
    /// dropped.
    pub fn publish(&self, signal: Signal) {
        let _ = self.tx.send(signal);
    }
}
