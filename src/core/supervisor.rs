//! # Supervisor: the serialized supervision core.
//!
//! The [`Supervisor`] owns the registry of [`TaskHandle`]s and is the single
//! consumer of the signal queue that all five producer streams feed:
//!
//! ```text
//!  organizer ──┐
//!  focus ──────┤
//!  packages ───┼──► SignalQueue ──► loop ──► policy ──► TaskHandle.launch()
//!  user events ┤    (mpsc)          (one     (sweep       │
//!  lifecycle ──┘                    task)    select)      ▼
//!                                                    Bus events
//! ```
//!
//! ## Restart paths
//! - Host task regains focus → reverse sweep of crashed handles.
//! - Activity-restart attempt with home visible over the host → sweep.
//! - Depending package replaced while the parent is visible → filtered
//!   sweep.
//! - Parent's user unlocked → sweep.
//! - `OnCrash` handles additionally self-heal on vanish (handled inside
//!   [`TaskHandle`], not here).
//!
//! ## Teardown
//! `release()` is terminal: user listener removed, organizer listeners
//! unregistered, handles released in reverse creation order, registry
//! cleared, session slot invalidated, `Released` published, loop token
//! cancelled. Further signals are inert. Release is also triggered by the
//! parent pausing and by the user switching away.
//!
//! ## Rules
//! - Signals are processed strictly in arrival order.
//! - Nothing here blocks; user callbacks run on spawned tasks.
//! - No lock guards the registry: only the loop mutates it.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::monitor::{OrganizerRelay, TaskMonitorBridge};
use crate::core::registry::Registry;
use crate::events::{Bus, Event, EventKind, Signal, SignalQueue};
use crate::platform::{
    EmbeddedSurface, LaunchIntent, LifecyclePhase, OrganizerListener, Platform, SessionService,
    TaskInfo, UserEventFilter, UserEventKind, WindowingMode,
};
use crate::policies::{
    package_restart_candidates, restart_candidates, RestartPolicy, SweepTrigger,
};
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::tasks::{HandleRef, TaskCallbacks, TaskHandle};

/// Two-state slot for the session service; written only inside the loop.
enum SessionSlot {
    Disconnected,
    Connected(Arc<dyn SessionService>),
}

/// Supervises a set of embedded tasks bound to one host activity.
pub struct Supervisor {
    /// Configuration pinning the host task and user.
    pub cfg: Config,
    /// Observability bus; subscribe for events or pass subscribers to
    /// [`Supervisor::new`].
    pub bus: Bus,
    signals: SignalQueue,
    platform: Platform,
    token: CancellationToken,
}

impl Supervisor {
    /// Creates the supervisor, registers its organizer listeners, removes
    /// dangling multi-window tasks left from a previous run, and starts the
    /// supervision loop.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(cfg: Config, platform: Platform, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        let bus = Bus::new(cfg.bus_capacity);
        Self::spawn_subscriber_listener(&bus, subscribers);

        let (tx, rx) = mpsc::unbounded_channel();
        let signals = SignalQueue::new(tx);

        let bridge = Arc::new(TaskMonitorBridge::new(bus.clone()));
        let bridge_listener: Arc<dyn OrganizerListener> = bridge.clone();
        let relay: Arc<dyn OrganizerListener> = Arc::new(OrganizerRelay::new(signals.clone()));

        let _ = platform.organizer.register_listener(bridge_listener.clone());
        let existing = platform.organizer.register_listener(relay.clone());
        Self::remove_dangling(&platform, &bus, existing);

        let token = CancellationToken::new();
        let core = Core {
            cfg: cfg.clone(),
            bus: bus.clone(),
            platform: platform.clone(),
            registry: Registry::new(),
            session: SessionSlot::Disconnected,
            parent_visible: true,
            released: false,
            bridge,
            bridge_listener,
            relay,
            signals: signals.clone(),
            token: token.clone(),
        };
        tokio::spawn(core.run(rx));

        Self {
            cfg,
            bus,
            signals,
            platform,
            token,
        }
    }

    /// Creates a new supervised embedded task.
    ///
    /// Fire-and-forget: the handle is returned immediately and registered,
    /// launched, and reported (`on_created`) asynchronously on the
    /// supervision loop. The host connection does not need to be ready.
    pub fn create_task(
        &self,
        surface: Arc<dyn EmbeddedSurface>,
        intent: LaunchIntent,
        restart: RestartPolicy,
        callbacks: Arc<dyn TaskCallbacks>,
    ) -> HandleRef {
        let handle = TaskHandle::new(
            intent,
            restart,
            callbacks,
            surface,
            Arc::clone(&self.platform.launcher),
            Arc::clone(&self.platform.users),
            self.bus.clone(),
        );
        self.signals.publish(Signal::CreateRequested {
            handle: Arc::clone(&handle),
        });
        handle
    }

    /// Enqueues terminal teardown. Safe to call any number of times; every
    /// call after the first effective release is a no-op.
    pub fn release(&self) {
        self.signals.publish(Signal::ReleaseRequested);
    }

    /// Producer handle to the serialized intake queue; clone it into every
    /// adapter that feeds the supervisor.
    pub fn signals(&self) -> SignalQueue {
        self.signals.clone()
    }

    /// Subscribes to the observability bus.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// True once release has run to completion.
    pub fn is_released(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once release has run to completion.
    pub async fn released(&self) {
        self.token.cancelled().await;
    }

    /// Forwards bus events to the subscriber set (fire-and-forget).
    fn spawn_subscriber_listener(bus: &Bus, subscribers: Vec<Arc<dyn Subscribe>>) {
        if subscribers.is_empty() {
            return;
        }
        let set = SubscriberSet::new(subscribers);
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => set.emit(&ev),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    /// Startup cleanup: only embedded-panel tasks run multi-window, so any
    /// multi-window task known to the organizer at registration time is a
    /// leftover from a previous run.
    fn remove_dangling(platform: &Platform, bus: &Bus, existing: Vec<TaskInfo>) {
        for info in existing {
            if info.windowing_mode == WindowingMode::MultiWindow {
                platform.organizer.remove_task(info.task_id);
                bus.publish(Event::new(EventKind::DanglingRemoved).with_task_id(info.task_id));
            }
        }
    }
}

/// Loop-owned state; lives on the spawned supervision task.
struct Core {
    cfg: Config,
    bus: Bus,
    platform: Platform,
    registry: Registry,
    session: SessionSlot,
    parent_visible: bool,
    released: bool,
    bridge: Arc<TaskMonitorBridge>,
    bridge_listener: Arc<dyn OrganizerListener>,
    relay: Arc<dyn OrganizerListener>,
    signals: SignalQueue,
    token: CancellationToken,
}

impl Core {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Signal>) {
        while let Some(signal) = rx.recv().await {
            self.dispatch(signal);
            if self.released {
                break;
            }
        }
        // Dropping rx closes the queue; signals enqueued from now on are
        // silently dropped, which is the post-release inertness contract.
        self.token.cancel();
    }

    fn dispatch(&mut self, signal: Signal) {
        match signal {
            Signal::CreateRequested { handle } => self.on_create(handle),
            Signal::ReleaseRequested => self.release(),
            Signal::HostConnected { session } => self.on_host_connected(session),
            Signal::HostDisconnected => self.on_host_disconnected(),
            Signal::FocusChanged { task_id, focused } => {
                if focused && task_id == self.cfg.host_task_id {
                    self.sweep(SweepTrigger::HostFocus);
                }
            }
            Signal::RestartAttempt {
                task_id,
                home_visible,
            } => {
                // Covers a "go home" issued while the host is foreground and
                // an embedded task has crashed.
                if home_visible && task_id == self.cfg.host_task_id {
                    self.sweep(SweepTrigger::HostRestart);
                }
            }
            Signal::PackageReplaced { package } => self.on_package_replaced(&package),
            Signal::User {
                kind,
                user_id,
                previous_user_id,
            } => self.on_user_event(kind, user_id, previous_user_id),
            Signal::ParentLifecycle { phase } => self.on_parent_lifecycle(phase),
            Signal::TaskAppeared { info } => {
                if let Some(handle) = self.registry.route_pending(&info.component) {
                    handle.on_appeared(info.task_id);
                }
            }
            Signal::TaskInfoChanged { info } => {
                self.bus
                    .publish(Event::new(EventKind::TaskChanged).with_task_id(info.task_id));
            }
            Signal::TaskVanished { info } => {
                if let Some(handle) = self.registry.find_live(info.task_id) {
                    handle.on_vanished();
                }
            }
        }
    }

    fn on_create(&mut self, handle: HandleRef) {
        handle.notify_created();
        handle.launch();
        self.registry.push(Arc::clone(&handle));
        self.bus
            .publish(Event::new(EventKind::TaskCreated).with_task(handle.name().to_owned()));
    }

    fn on_host_connected(&mut self, session: Arc<dyn SessionService>) {
        session.add_user_listener(UserEventFilter::unlock_and_switch(), self.signals.clone());
        self.bridge.bind(session.task_observer());
        self.session = SessionSlot::Connected(session);
        self.bus.publish(Event::new(EventKind::HostConnected));
    }

    fn on_host_disconnected(&mut self) {
        self.session = SessionSlot::Disconnected;
        self.bridge.clear();
        self.bus.publish(Event::new(EventKind::HostLost));
    }

    fn on_package_replaced(&mut self, package: &str) {
        if !self.parent_visible {
            // Restarting off-screen UI work is wasted.
            self.bus
                .publish(Event::new(EventKind::PackageIgnored).with_package(package.to_owned()));
            return;
        }
        let candidates = package_restart_candidates(self.registry.handles(), package);
        let count = candidates.len();
        for handle in candidates {
            handle.launch();
        }
        self.bus.publish(
            Event::new(EventKind::SweepTriggered)
                .with_trigger(SweepTrigger::PackageReplaced)
                .with_package(package.to_owned())
                .with_count(count),
        );
    }

    fn on_user_event(&mut self, kind: UserEventKind, user_id: i32, previous_user_id: i32) {
        match kind {
            // Unlocking may make previously blocked launches succeed.
            UserEventKind::Unlocked if user_id == self.cfg.user_id => {
                self.sweep(SweepTrigger::UserUnlocked);
            }
            // The previous user's host never gets torn down by the platform
            // on a switch; release explicitly.
            UserEventKind::Switching if previous_user_id == self.cfg.user_id => {
                self.release();
            }
            _ => {}
        }
    }

    fn on_parent_lifecycle(&mut self, phase: LifecyclePhase) {
        match phase {
            LifecyclePhase::Started => self.parent_visible = true,
            LifecyclePhase::Resumed => {
                self.parent_visible = true;
                for handle in self.registry.handles().iter().rev() {
                    handle.show_embedded();
                }
            }
            LifecyclePhase::Stopped => self.parent_visible = false,
            // The supervised session does not outlive parent visibility.
            LifecyclePhase::Paused => self.release(),
            LifecyclePhase::Created
            | LifecyclePhase::SaveState
            | LifecyclePhase::Destroyed => {}
        }
    }

    /// Restarts every crashed handle, most-recently-created first.
    fn sweep(&mut self, trigger: SweepTrigger) {
        let candidates = restart_candidates(self.registry.handles());
        let count = candidates.len();
        for handle in candidates {
            handle.launch();
        }
        self.bus.publish(
            Event::new(EventKind::SweepTriggered)
                .with_trigger(trigger)
                .with_count(count),
        );
    }

    /// Terminal teardown; every call after the first is a no-op.
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if let SessionSlot::Connected(session) = &self.session {
            session.remove_user_listener();
        }
        self.session = SessionSlot::Disconnected;
        self.bridge.clear();
        self.platform.organizer.unregister_listener(&self.relay);
        self.platform
            .organizer
            .unregister_listener(&self.bridge_listener);

        self.registry.release_all();
        self.bus.publish(Event::new(EventKind::Released));
    }
}
