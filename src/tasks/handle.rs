//! # TaskHandle: per-task controller.
//!
//! A [`TaskHandle`] owns the supervision-side state of one embedded task:
//! its live task id (or [`INVALID_TASK_ID`] while down), its immutable
//! launch intent, its restart policy, and the packages that may retry it.
//!
//! ## State machine
//! ```text
//! UNLAUNCHED ──appeared──► LIVE ──vanished──► INVALID ──relaunch──► LIVE
//!                                                │
//!                                           release() ──► RELEASED (absorbing)
//! ```
//!
//! ## Rules
//! - `task_id == INVALID_TASK_ID` is the single source of truth for "needs
//!   restart"; no other flag contradicts it.
//! - State transitions happen only on the supervisor loop; the atomics exist
//!   so getters are safe from any thread.
//! - A skipped launch (locked user, detached/off display, launcher
//!   rejection) is logged to the bus and leaves the handle `INVALID`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering as AtomicOrdering};
use std::sync::Arc;

use crate::error::LaunchError;
use crate::events::{Bus, Event, EventKind};
use crate::platform::{
    ActivityLauncher, DisplayState, EmbeddedSurface, LaunchIntent, UserStateProbe,
    INVALID_TASK_ID,
};
use crate::policies::RestartPolicy;

use super::callbacks::TaskCallbacks;

/// Shared handle to one supervised embedded task.
pub type HandleRef = Arc<TaskHandle>;

/// Supervision-side controller for one embedded task.
pub struct TaskHandle {
    name: Arc<str>,
    intent: LaunchIntent,
    restart: RestartPolicy,
    depending_packages: HashSet<String>,
    callbacks: Arc<dyn TaskCallbacks>,
    surface: Arc<dyn EmbeddedSurface>,
    launcher: Arc<dyn ActivityLauncher>,
    users: Arc<dyn UserStateProbe>,
    bus: Bus,

    task_id: AtomicI32,
    ready_fired: AtomicBool,
    released: AtomicBool,
}

impl TaskHandle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        intent: LaunchIntent,
        restart: RestartPolicy,
        callbacks: Arc<dyn TaskCallbacks>,
        surface: Arc<dyn EmbeddedSurface>,
        launcher: Arc<dyn ActivityLauncher>,
        users: Arc<dyn UserStateProbe>,
        bus: Bus,
    ) -> HandleRef {
        let depending_packages = callbacks.depending_packages();
        Arc::new(Self {
            name: Arc::from(intent.component()),
            intent,
            restart,
            depending_packages,
            callbacks,
            surface,
            launcher,
            users,
            bus,
            task_id: AtomicI32::new(INVALID_TASK_ID),
            ready_fired: AtomicBool::new(false),
            released: AtomicBool::new(false),
        })
    }

    /// Handle name: the component of its launch intent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live task identifier, or [`INVALID_TASK_ID`] while the task is down.
    pub fn task_id(&self) -> i32 {
        self.task_id.load(AtomicOrdering::Acquire)
    }

    /// Restart policy fixed at creation.
    pub fn restart(&self) -> RestartPolicy {
        self.restart
    }

    /// Packages whose replacement may retry this task.
    pub fn depending_package_names(&self) -> &HashSet<String> {
        &self.depending_packages
    }

    /// True once the handle reached its terminal state.
    pub fn is_released(&self) -> bool {
        self.released.load(AtomicOrdering::Acquire)
    }

    /// Attempts to start the underlying activity.
    ///
    /// No-op (published as `LaunchSkipped`) while the user session is
    /// locked, the display is detached or off, or the launcher rejects the
    /// request. None of these are faults: the handle stays `INVALID` and is
    /// retried on the next qualifying event.
    pub fn launch(&self) {
        if self.is_released() {
            return;
        }
        match self.try_launch() {
            Ok(()) => {
                self.bus
                    .publish(Event::new(EventKind::LaunchIssued).with_task(self.name.clone()));
            }
            Err(err) => {
                self.bus.publish(
                    Event::new(EventKind::LaunchSkipped)
                        .with_task(self.name.clone())
                        .with_reason(err.as_label()),
                );
            }
        }
    }

    fn try_launch(&self) -> Result<(), LaunchError> {
        if !self.users.is_unlocked() {
            return Err(LaunchError::UserLocked);
        }
        match self.surface.display_state() {
            DisplayState::Detached => return Err(LaunchError::DisplayDetached),
            DisplayState::Off => return Err(LaunchError::DisplayOff),
            DisplayState::On => {}
        }
        let bounds = self.surface.bounds_on_screen();
        self.launcher.start_activity(&self.intent, bounds)
    }

    /// Terminal release: detaches the surface. Idempotent.
    pub fn release(&self) {
        if self.released.swap(true, AtomicOrdering::AcqRel) {
            return;
        }
        self.surface.detach();
    }

    /// Records the live task id; fires `on_ready` exactly once per handle.
    pub(crate) fn on_appeared(self: &Arc<Self>, task_id: i32) {
        if self.is_released() {
            return;
        }
        self.task_id.store(task_id, AtomicOrdering::Release);
        self.bus.publish(
            Event::new(EventKind::TaskLive)
                .with_task(self.name.clone())
                .with_task_id(task_id),
        );
        if !self.ready_fired.swap(true, AtomicOrdering::AcqRel) {
            let callbacks = Arc::clone(&self.callbacks);
            tokio::spawn(async move {
                callbacks.on_ready().await;
            });
        }
    }

    /// Marks the task as gone; an [`RestartPolicy::OnCrash`] handle
    /// relaunches immediately — the only non-event-gated restart path.
    pub(crate) fn on_vanished(self: &Arc<Self>) {
        if self.is_released() {
            return;
        }
        let gone = self.task_id.swap(INVALID_TASK_ID, AtomicOrdering::AcqRel);
        self.bus.publish(
            Event::new(EventKind::TaskVanished)
                .with_task(self.name.clone())
                .with_task_id(gone),
        );
        if self.restart == RestartPolicy::OnCrash {
            self.launch();
        }
    }

    /// Fires `on_created` on its own task.
    pub(crate) fn notify_created(self: &Arc<Self>) {
        let callbacks = Arc::clone(&self.callbacks);
        let handle = Arc::clone(self);
        tokio::spawn(async move {
            callbacks.on_created(handle).await;
        });
    }

    /// Re-attaches the embedded surface to the live task, if any. Used when
    /// the host activity resumes.
    pub(crate) fn show_embedded(&self) {
        if self.is_released() {
            return;
        }
        let task_id = self.task_id();
        if task_id != INVALID_TASK_ID {
            self.surface.attach(task_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::events::{Bus, EventKind};
    use crate::platform::{DisplayState, INVALID_TASK_ID};
    use crate::policies::RestartPolicy;
    use crate::testing::{handle_on, CountingCallbacks, FakeSurface, RecordingLauncher, UserProbe};

    #[tokio::test]
    async fn launch_skipped_while_user_locked() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let launcher = Arc::new(RecordingLauncher::default());
        let probe = Arc::new(UserProbe::locked());
        let h = handle_on(
            "app.a",
            RestartPolicy::EventGated,
            Arc::new(FakeSurface::on_screen()),
            launcher.clone(),
            probe,
            bus.clone(),
        );

        h.launch();

        let ev = rx.try_recv().expect("expected a LaunchSkipped event");
        assert_eq!(ev.kind, EventKind::LaunchSkipped);
        assert_eq!(ev.reason.as_deref(), Some("user_locked"));
        assert!(launcher.launched().is_empty());
        assert_eq!(h.task_id(), INVALID_TASK_ID);
    }

    #[tokio::test]
    async fn launch_skipped_while_display_off() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let launcher = Arc::new(RecordingLauncher::default());
        let surface = Arc::new(FakeSurface::on_screen());
        surface.set_display_state(DisplayState::Off);
        let h = handle_on(
            "app.a",
            RestartPolicy::EventGated,
            surface,
            launcher.clone(),
            Arc::new(UserProbe::unlocked()),
            bus.clone(),
        );

        h.launch();

        let ev = rx.try_recv().expect("expected a LaunchSkipped event");
        assert_eq!(ev.kind, EventKind::LaunchSkipped);
        assert_eq!(ev.reason.as_deref(), Some("display_off"));
        assert!(launcher.launched().is_empty());
    }

    #[tokio::test]
    async fn vanish_with_on_crash_relaunches_immediately() {
        let bus = Bus::new(16);
        let launcher = Arc::new(RecordingLauncher::default());
        let h = handle_on(
            "app.a",
            RestartPolicy::OnCrash,
            Arc::new(FakeSurface::on_screen()),
            launcher.clone(),
            Arc::new(UserProbe::unlocked()),
            bus,
        );

        h.on_appeared(7);
        assert_eq!(h.task_id(), 7);

        h.on_vanished();
        assert_eq!(h.task_id(), INVALID_TASK_ID);
        assert_eq!(launcher.launched(), vec!["app.a".to_string()]);
    }

    #[tokio::test]
    async fn vanish_with_event_gated_does_not_relaunch() {
        let bus = Bus::new(16);
        let launcher = Arc::new(RecordingLauncher::default());
        let h = handle_on(
            "app.a",
            RestartPolicy::EventGated,
            Arc::new(FakeSurface::on_screen()),
            launcher.clone(),
            Arc::new(UserProbe::unlocked()),
            bus,
        );

        h.on_appeared(7);
        h.on_vanished();
        assert!(launcher.launched().is_empty());
        assert_eq!(h.task_id(), INVALID_TASK_ID);
    }

    #[tokio::test]
    async fn on_ready_fires_once_across_reappearances() {
        let bus = Bus::new(16);
        let callbacks = Arc::new(CountingCallbacks::default());
        let launcher = Arc::new(RecordingLauncher::default());
        let h = crate::tasks::TaskHandle::new(
            crate::platform::LaunchIntent::new("app.a"),
            RestartPolicy::EventGated,
            callbacks.clone(),
            Arc::new(FakeSurface::on_screen()),
            launcher,
            Arc::new(UserProbe::unlocked()),
            bus,
        );

        h.on_appeared(1);
        h.on_vanished();
        h.on_appeared(2);
        tokio::task::yield_now().await;

        assert_eq!(callbacks.ready_count(), 1, "on_ready must fire exactly once");
    }

    #[tokio::test]
    async fn release_is_idempotent_and_absorbing() {
        let bus = Bus::new(16);
        let launcher = Arc::new(RecordingLauncher::default());
        let surface = Arc::new(FakeSurface::on_screen());
        let h = handle_on(
            "app.a",
            RestartPolicy::OnCrash,
            surface.clone(),
            launcher.clone(),
            Arc::new(UserProbe::unlocked()),
            bus,
        );

        h.release();
        h.release();
        assert_eq!(surface.detach_count(), 1, "detach must happen once");

        // No transition leaves RELEASED.
        h.launch();
        h.on_vanished();
        assert!(launcher.launched().is_empty());
    }
}
