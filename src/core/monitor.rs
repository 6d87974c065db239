//! # Organizer notification plumbing.
//!
//! Two listeners sit on the host task organizer:
//!
//! - [`TaskMonitorBridge`]: pure pass-through that republishes every task
//!   notification (for *all* tasks, supervised or not) to the session-side
//!   task observer, once one is bound. No state beyond the observer slot, no
//!   retry; a notification arriving with no observer bound is logged to the
//!   bus and dropped.
//! - [`OrganizerRelay`]: republishes the same notifications as [`Signal`]s
//!   into the supervisor's serialized queue, where handle routing happens.
//!
//! Both run on whatever thread the organizer calls from; neither touches
//! supervisor state directly.

use std::sync::{Arc, PoisonError, RwLock};

use crate::events::{Bus, Event, EventKind, Signal, SignalQueue};
use crate::platform::{OrganizerListener, SessionTaskObserver, TaskInfo};

/// Forwards organizer task notifications to the bound session observer.
pub struct TaskMonitorBridge {
    observer: RwLock<Option<Arc<dyn SessionTaskObserver>>>,
    bus: Bus,
}

impl TaskMonitorBridge {
    pub(crate) fn new(bus: Bus) -> Self {
        Self {
            observer: RwLock::new(None),
            bus,
        }
    }

    /// Arms the bridge with the session-side observer.
    pub(crate) fn bind(&self, observer: Arc<dyn SessionTaskObserver>) {
        *self
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(observer);
    }

    /// Disarms the bridge; notifications are dropped until re-bound.
    pub(crate) fn clear(&self) {
        *self
            .observer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn forward(
        &self,
        info: &TaskInfo,
        what: &'static str,
        deliver: impl FnOnce(&dyn SessionTaskObserver),
    ) {
        let guard = self.observer.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_deref() {
            Some(observer) => {
                deliver(observer);
                self.bus.publish(
                    Event::new(EventKind::MonitorForwarded)
                        .with_task_id(info.task_id)
                        .with_reason(what),
                );
            }
            None => {
                self.bus.publish(
                    Event::new(EventKind::ObserverAbsent)
                        .with_task_id(info.task_id)
                        .with_reason(what),
                );
            }
        }
    }
}

impl OrganizerListener for TaskMonitorBridge {
    fn on_task_appeared(&self, info: &TaskInfo) {
        self.forward(info, "appeared", |o| o.on_task_appeared(info));
    }

    fn on_task_info_changed(&self, info: &TaskInfo) {
        self.forward(info, "changed", |o| o.on_task_info_changed(info));
    }

    fn on_task_vanished(&self, info: &TaskInfo) {
        self.forward(info, "vanished", |o| o.on_task_vanished(info));
    }
}

/// Republishes organizer notifications into the supervisor's signal queue.
pub(crate) struct OrganizerRelay {
    signals: SignalQueue,
}

impl OrganizerRelay {
    pub(crate) fn new(signals: SignalQueue) -> Self {
        Self { signals }
    }
}

impl OrganizerListener for OrganizerRelay {
    fn on_task_appeared(&self, info: &TaskInfo) {
        self.signals.publish(Signal::TaskAppeared { info: info.clone() });
    }

    fn on_task_info_changed(&self, info: &TaskInfo) {
        self.signals
            .publish(Signal::TaskInfoChanged { info: info.clone() });
    }

    fn on_task_vanished(&self, info: &TaskInfo) {
        self.signals.publish(Signal::TaskVanished { info: info.clone() });
    }
}
