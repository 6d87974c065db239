//! # panelvisor
//!
//! **Panelvisor** supervises *embedded tasks*: child units of launchable work
//! hosted inside panels of a parent application. Each embedded task is
//! started, kept alive, restarted after a crash, and released in step with
//! the host activity's lifecycle and the multi-user session state.
//!
//! ## Architecture
//! ```text
//!  organizer    focus     package    user-session   parent
//!  callbacks   changes   broadcasts     events     lifecycle
//!      │          │          │            │            │
//!      └──────────┴──────────┴─────┬──────┴────────────┘
//!                                  ▼
//!                      SignalQueue (mpsc, serialized)
//!                                  │
//!                                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Supervisor loop (single consumer, owns all mutation)       │
//! │  - Registry (ordered TaskHandles, reverse-order sweeps)     │
//! │  - Session slot (Disconnected | Connected)                  │
//! │  - Restart sweep policy (crashed handles, reverse order)    │
//! └──────┬─────────────────────┬────────────────────────┬───────┘
//!        ▼                     ▼                        ▼
//!   TaskHandle.launch()   TaskMonitorBridge          Bus (broadcast)
//!   (guards: user lock,   (forward appeared/              │
//!    display state)        changed/vanished)              ▼
//!                                               SubscriberSet workers
//!                                               (LogWriter, metrics, …)
//! ```
//!
//! ## Lifecycle of one handle
//! ```text
//! create_task() ──► UNLAUNCHED ──appeared──► LIVE ──vanished──► INVALID
//!                        ▲                                        │
//!                        │        OnCrash: immediate relaunch     │
//!                        └──────── event-gated sweep ─────────────┘
//!
//! release() ──► RELEASED (absorbing; surface detached, registry cleared)
//! ```
//!
//! Restarts are driven by qualifying events only: host focus regained, host
//! activity-restart attempt, depending-package replacement (while the parent
//! is visible), and user unlock. A crash with [`RestartPolicy::OnCrash`] is
//! the single non-event-gated path and relaunches immediately.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use panelvisor::{
//!     Config, LaunchIntent, Platform, RestartPolicy, Supervisor, TaskCallbacks,
//! };
//!
//! struct Panel;
//! #[async_trait::async_trait]
//! impl TaskCallbacks for Panel {}
//!
//! # fn demo(platform: Platform, surface: Arc<dyn panelvisor::EmbeddedSurface>) {
//! # let _ = tokio::runtime::Runtime::new().unwrap().block_on(async move {
//! let sup = Supervisor::new(Config::new(7, 0), platform, Vec::new());
//! let handle = sup.create_task(
//!     surface,
//!     LaunchIntent::new("com.example.maps/.MapsActivity"),
//!     RestartPolicy::OnCrash,
//!     Arc::new(Panel),
//! );
//! // ... host shuts down:
//! sup.release();
//! sup.released().await;
//! # });
//! # }
//! ```

mod config;
mod core;
mod error;
mod events;
mod platform;
mod policies;
mod subscribers;
mod tasks;

#[cfg(test)]
pub(crate) mod testing;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{Supervisor, TaskMonitorBridge};
pub use error::LaunchError;
pub use events::{Bus, Event, EventKind, Signal, SignalQueue};
pub use platform::{
    ActivityLauncher, Bounds, DisplayState, EmbeddedSurface, LaunchIntent, LifecyclePhase,
    OrganizerListener, Platform, SessionService, SessionTaskObserver, TaskInfo, TaskOrganizer,
    UserEventFilter, UserEventKind, UserStateProbe, WindowingMode, INVALID_TASK_ID,
};
pub use policies::{RestartPolicy, SweepTrigger};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{HandleRef, TaskCallbacks, TaskHandle};

// Optional: simple built-in stdout subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
