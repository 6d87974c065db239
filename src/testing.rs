//! Shared test doubles for the platform seams.
//!
//! Everything here records what it was asked to do and answers from plain
//! atomics/mutexes, so tests assert on observable interactions instead of
//! poking internals.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::LaunchError;
use crate::events::{Bus, SignalQueue};
use crate::platform::{
    ActivityLauncher, Bounds, DisplayState, EmbeddedSurface, LaunchIntent, OrganizerListener,
    SessionService, SessionTaskObserver, TaskInfo, TaskOrganizer, UserEventFilter, UserStateProbe,
};
use crate::policies::RestartPolicy;
use crate::tasks::{HandleRef, TaskCallbacks, TaskHandle};

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Launcher that records every started component and always succeeds.
#[derive(Default)]
pub(crate) struct RecordingLauncher {
    launched: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub(crate) fn launched(&self) -> Vec<String> {
        lock(&self.launched).clone()
    }

    pub(crate) fn clear(&self) {
        lock(&self.launched).clear();
    }
}

impl ActivityLauncher for RecordingLauncher {
    fn start_activity(&self, intent: &LaunchIntent, _bounds: Bounds) -> Result<(), LaunchError> {
        lock(&self.launched).push(intent.component().to_owned());
        Ok(())
    }
}

/// Lock-state probe with a settable answer.
pub(crate) struct UserProbe {
    unlocked: AtomicBool,
}

impl UserProbe {
    pub(crate) fn unlocked() -> Self {
        Self {
            unlocked: AtomicBool::new(true),
        }
    }

    pub(crate) fn locked() -> Self {
        Self {
            unlocked: AtomicBool::new(false),
        }
    }

    pub(crate) fn set_unlocked(&self, unlocked: bool) {
        self.unlocked.store(unlocked, Ordering::Release);
    }
}

impl UserStateProbe for UserProbe {
    fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::Acquire)
    }
}

/// Surface double recording attaches and detaches.
pub(crate) struct FakeSurface {
    display: Mutex<DisplayState>,
    attached: Mutex<Vec<i32>>,
    detaches: AtomicUsize,
}

impl FakeSurface {
    /// A surface attached to a powered-on display.
    pub(crate) fn on_screen() -> Self {
        Self {
            display: Mutex::new(DisplayState::On),
            attached: Mutex::new(Vec::new()),
            detaches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn set_display_state(&self, state: DisplayState) {
        *lock(&self.display) = state;
    }

    pub(crate) fn attached(&self) -> Vec<i32> {
        lock(&self.attached).clone()
    }

    pub(crate) fn detach_count(&self) -> usize {
        self.detaches.load(Ordering::Acquire)
    }
}

impl EmbeddedSurface for FakeSurface {
    fn attach(&self, task_id: i32) {
        lock(&self.attached).push(task_id);
    }

    fn detach(&self) {
        self.detaches.fetch_add(1, Ordering::AcqRel);
    }

    fn display_state(&self) -> DisplayState {
        *lock(&self.display)
    }

    fn bounds_on_screen(&self) -> Bounds {
        Bounds::new(0, 0, 800, 600)
    }
}

/// Callbacks counting their invocations.
#[derive(Default)]
pub(crate) struct CountingCallbacks {
    created: AtomicUsize,
    ready: AtomicUsize,
}

impl CountingCallbacks {
    pub(crate) fn created_count(&self) -> usize {
        self.created.load(Ordering::Acquire)
    }

    pub(crate) fn ready_count(&self) -> usize {
        self.ready.load(Ordering::Acquire)
    }
}

#[async_trait]
impl TaskCallbacks for CountingCallbacks {
    async fn on_created(&self, _handle: HandleRef) {
        self.created.fetch_add(1, Ordering::AcqRel);
    }

    async fn on_ready(&self) {
        self.ready.fetch_add(1, Ordering::AcqRel);
    }
}

/// Callbacks declaring package dependencies.
pub(crate) struct DependingCallbacks {
    packages: HashSet<String>,
}

impl DependingCallbacks {
    pub(crate) fn new(packages: &[&str]) -> Self {
        Self {
            packages: packages.iter().map(|p| (*p).to_owned()).collect(),
        }
    }
}

#[async_trait]
impl TaskCallbacks for DependingCallbacks {
    fn depending_packages(&self) -> HashSet<String> {
        self.packages.clone()
    }
}

/// Session-side observer recording forwarded task ids.
#[derive(Default)]
pub(crate) struct RecordingObserver {
    appeared: Mutex<Vec<i32>>,
    changed: Mutex<Vec<i32>>,
    vanished: Mutex<Vec<i32>>,
}

impl RecordingObserver {
    pub(crate) fn appeared(&self) -> Vec<i32> {
        lock(&self.appeared).clone()
    }

    pub(crate) fn changed(&self) -> Vec<i32> {
        lock(&self.changed).clone()
    }

    pub(crate) fn vanished(&self) -> Vec<i32> {
        lock(&self.vanished).clone()
    }
}

impl SessionTaskObserver for RecordingObserver {
    fn on_task_appeared(&self, info: &TaskInfo) {
        lock(&self.appeared).push(info.task_id);
    }

    fn on_task_info_changed(&self, info: &TaskInfo) {
        lock(&self.changed).push(info.task_id);
    }

    fn on_task_vanished(&self, info: &TaskInfo) {
        lock(&self.vanished).push(info.task_id);
    }
}

/// Organizer double: fans notifications out to registered listeners and
/// records removals.
#[derive(Default)]
pub(crate) struct FakeOrganizer {
    listeners: Mutex<Vec<Arc<dyn OrganizerListener>>>,
    existing: Mutex<Vec<TaskInfo>>,
    removed: Mutex<Vec<i32>>,
}

impl FakeOrganizer {
    /// Tasks the organizer will report in registration snapshots.
    pub(crate) fn seed_existing(&self, tasks: Vec<TaskInfo>) {
        *lock(&self.existing) = tasks;
    }

    pub(crate) fn removed(&self) -> Vec<i32> {
        lock(&self.removed).clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    pub(crate) fn emit_appeared(&self, info: &TaskInfo) {
        for listener in lock(&self.listeners).iter() {
            listener.on_task_appeared(info);
        }
    }
}

impl TaskOrganizer for FakeOrganizer {
    fn register_listener(&self, listener: Arc<dyn OrganizerListener>) -> Vec<TaskInfo> {
        lock(&self.listeners).push(listener);
        lock(&self.existing).clone()
    }

    fn unregister_listener(&self, listener: &Arc<dyn OrganizerListener>) {
        let target = Arc::as_ptr(listener) as *const ();
        lock(&self.listeners).retain(|l| Arc::as_ptr(l) as *const () != target);
    }

    fn remove_task(&self, task_id: i32) {
        lock(&self.removed).push(task_id);
    }
}

/// Session service double exposing a [`RecordingObserver`] and tracking its
/// user listener.
#[derive(Default)]
pub(crate) struct FakeSession {
    observer: Arc<RecordingObserver>,
    user_listener: Mutex<Option<(UserEventFilter, SignalQueue)>>,
    listener_removed: AtomicBool,
}

impl FakeSession {
    pub(crate) fn observer(&self) -> Arc<RecordingObserver> {
        Arc::clone(&self.observer)
    }

    pub(crate) fn has_user_listener(&self) -> bool {
        lock(&self.user_listener).is_some()
    }

    pub(crate) fn listener_removed(&self) -> bool {
        self.listener_removed.load(Ordering::Acquire)
    }
}

impl SessionService for FakeSession {
    fn add_user_listener(&self, filter: UserEventFilter, sink: SignalQueue) {
        *lock(&self.user_listener) = Some((filter, sink));
    }

    fn remove_user_listener(&self) {
        *lock(&self.user_listener) = None;
        self.listener_removed.store(true, Ordering::Release);
    }

    fn task_observer(&self) -> Arc<dyn SessionTaskObserver> {
        self.observer()
    }
}

/// Handle wired to the given doubles.
pub(crate) fn handle_on(
    component: &str,
    restart: RestartPolicy,
    surface: Arc<FakeSurface>,
    launcher: Arc<RecordingLauncher>,
    users: Arc<UserProbe>,
    bus: Bus,
) -> HandleRef {
    TaskHandle::new(
        LaunchIntent::new(component),
        restart,
        Arc::new(CountingCallbacks::default()),
        surface,
        launcher,
        users,
        bus,
    )
}

/// Event-gated handle with inert doubles everywhere.
pub(crate) fn plain_handle(component: &str) -> HandleRef {
    handle_on(
        component,
        RestartPolicy::EventGated,
        Arc::new(FakeSurface::on_screen()),
        Arc::new(RecordingLauncher::default()),
        Arc::new(UserProbe::unlocked()),
        Bus::new(16),
    )
}

/// Like [`plain_handle`], with declared package dependencies.
pub(crate) fn handle_with_deps(component: &str, packages: &[&str]) -> HandleRef {
    TaskHandle::new(
        LaunchIntent::new(component),
        RestartPolicy::EventGated,
        Arc::new(DependingCallbacks::new(packages)),
        Arc::new(FakeSurface::on_screen()),
        Arc::new(RecordingLauncher::default()),
        Arc::new(UserProbe::unlocked()),
        Bus::new(16),
    )
}
