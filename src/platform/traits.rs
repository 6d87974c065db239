//! Collaborator traits for the host platform.
//!
//! All traits are object-safe and `Send + Sync + 'static`; the supervisor
//! holds them behind `Arc<dyn …>`. Listener callbacks arrive on whatever
//! thread the host uses — implementations forward into the supervisor's
//! signal queue instead of touching shared state (see
//! [`SignalQueue`](crate::SignalQueue)).

use std::sync::Arc;

use crate::error::LaunchError;
use crate::events::SignalQueue;

use super::types::{Bounds, DisplayState, LaunchIntent, TaskInfo, UserEventFilter};

/// Receiver of task lifecycle notifications from the host organizer.
///
/// The organizer reports *all* tasks, not just supervised ones; listeners
/// filter for themselves.
pub trait OrganizerListener: Send + Sync + 'static {
    fn on_task_appeared(&self, info: &TaskInfo);
    fn on_task_info_changed(&self, info: &TaskInfo);
    fn on_task_vanished(&self, info: &TaskInfo);
}

/// The host task organizer.
pub trait TaskOrganizer: Send + Sync + 'static {
    /// Registers a listener and returns a snapshot of the tasks the
    /// organizer currently knows about.
    ///
    /// The snapshot is used once, at supervisor startup, to remove dangling
    /// multi-window tasks left over from a previous run.
    fn register_listener(&self, listener: Arc<dyn OrganizerListener>) -> Vec<TaskInfo>;

    /// Unregisters a previously registered listener (matched by identity).
    fn unregister_listener(&self, listener: &Arc<dyn OrganizerListener>);

    /// Removes a task from the system.
    fn remove_task(&self, task_id: i32);
}

/// The launch primitive: starts an activity inside the given on-screen
/// bounds.
///
/// Must not block; a rejected request is reported through the `Err` arm and
/// treated as a skipped launch, never a fault.
pub trait ActivityLauncher: Send + Sync + 'static {
    fn start_activity(&self, intent: &LaunchIntent, bounds: Bounds) -> Result<(), LaunchError>;
}

/// The rendered-surface capability backing one embedded task.
///
/// Panelvisor composes over this instead of extending a platform view type:
/// the handle asks for display state and bounds before launching, re-attaches
/// the surface when the host resumes, and detaches it on release.
pub trait EmbeddedSurface: Send + Sync + 'static {
    /// (Re-)attaches the surface to the given live task.
    fn attach(&self, task_id: i32);
    /// Detaches the surface from whatever task it shows.
    fn detach(&self);
    /// Current state of the display backing this surface.
    fn display_state(&self) -> DisplayState;
    /// On-screen bounds to launch the embedded activity into.
    fn bounds_on_screen(&self) -> Bounds;
}

/// Lock-state probe for the current user.
pub trait UserStateProbe: Send + Sync + 'static {
    fn is_unlocked(&self) -> bool;
}

/// Session-side observer of task lifecycle, fed by the
/// [`TaskMonitorBridge`](crate::TaskMonitorBridge).
pub trait SessionTaskObserver: Send + Sync + 'static {
    fn on_task_appeared(&self, info: &TaskInfo);
    fn on_task_info_changed(&self, info: &TaskInfo);
    fn on_task_vanished(&self, info: &TaskInfo);
}

/// The session/user service, available once the host connection reports
/// ready.
///
/// The connection itself is asynchronous and owned by the embedder: its
/// ready/crashed callback publishes
/// [`Signal::HostConnected`](crate::Signal::HostConnected) /
/// [`Signal::HostDisconnected`](crate::Signal::HostDisconnected) rather than
/// handing the service to the supervisor directly.
pub trait SessionService: Send + Sync + 'static {
    /// Registers a user-lifecycle listener; events matching `filter` are
    /// published as [`Signal::User`](crate::Signal::User) into `sink`.
    fn add_user_listener(&self, filter: UserEventFilter, sink: SignalQueue);

    /// Removes the previously registered user-lifecycle listener.
    fn remove_user_listener(&self);

    /// The session-side task monitor this service wants task notifications
    /// forwarded to.
    fn task_observer(&self) -> Arc<dyn SessionTaskObserver>;
}
