//! Host-platform interfaces.
//!
//! Everything panelvisor needs from the windowing/compositing layer, the
//! launch primitive, and the session/user service is expressed as an
//! object-safe trait here; the supervisor never talks to the platform except
//! through these seams. Tests substitute recording fakes, embedders wrap the
//! real host services.
//!
//! - [`traits`]: the collaborator traits ([`TaskOrganizer`],
//!   [`ActivityLauncher`], [`EmbeddedSurface`], [`SessionService`], ...);
//! - [`types`]: the plain data carried across them ([`TaskInfo`],
//!   [`Bounds`], [`LaunchIntent`], ...).

mod traits;
mod types;

pub use traits::{
    ActivityLauncher, EmbeddedSurface, OrganizerListener, SessionService, SessionTaskObserver,
    TaskOrganizer, UserStateProbe,
};
pub use types::{
    Bounds, DisplayState, LaunchIntent, LifecyclePhase, TaskInfo, UserEventFilter, UserEventKind,
    WindowingMode, INVALID_TASK_ID,
};

use std::sync::Arc;

/// Bundle of the host services a [`Supervisor`](crate::Supervisor) needs.
///
/// Cheap to clone; every field is a shared trait object.
#[derive(Clone)]
pub struct Platform {
    /// Host task organizer (listener registration, dangling-task removal).
    pub organizer: Arc<dyn TaskOrganizer>,
    /// Launch primitive for embedded activities.
    pub launcher: Arc<dyn ActivityLauncher>,
    /// Probe for the current user's lock state.
    pub users: Arc<dyn UserStateProbe>,
}
