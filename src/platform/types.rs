//! Plain data types crossing the platform seams.

/// Sentinel task identifier: no underlying task is currently running.
///
/// A handle whose id equals this value is crashed or not yet started, and is
/// the single source of truth for "needs restart".
pub const INVALID_TASK_ID: i32 = -1;

/// On-screen bounds of an embedded surface, in display coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Power/attachment state of the display backing an embedded surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayState {
    /// The surface is not attached to any display.
    Detached,
    /// Attached, but the display is powered off.
    Off,
    /// Attached and on; launching is allowed.
    On,
}

/// Windowing mode of a task reported by the organizer.
///
/// Embedded-panel tasks run multi-window; the host itself runs fullscreen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowingMode {
    Fullscreen,
    MultiWindow,
}

/// Snapshot of one task known to the host organizer.
#[derive(Clone, Debug)]
pub struct TaskInfo {
    /// Live task identifier.
    pub task_id: i32,
    /// Component the task was launched from.
    pub component: String,
    /// Windowing mode the task runs in.
    pub windowing_mode: WindowingMode,
}

/// Immutable description of what to (re)launch in an embedded panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchIntent {
    component: String,
}

impl LaunchIntent {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Component identifier this intent resolves to.
    pub fn component(&self) -> &str {
        &self.component
    }
}

/// User-session lifecycle event classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserEventKind {
    /// The user's session finished unlocking.
    Unlocked,
    /// The foreground user is switching to another user.
    Switching,
}

/// Filter handed to [`SessionService::add_user_listener`](super::SessionService::add_user_listener).
///
/// The session service must only deliver events whose kind matches.
#[derive(Clone, Debug)]
pub struct UserEventFilter {
    kinds: Vec<UserEventKind>,
}

impl UserEventFilter {
    pub fn new(kinds: Vec<UserEventKind>) -> Self {
        Self { kinds }
    }

    /// The filter the supervisor registers: unlock and switch events only.
    pub fn unlock_and_switch() -> Self {
        Self::new(vec![UserEventKind::Unlocked, UserEventKind::Switching])
    }

    pub fn matches(&self, kind: UserEventKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Lifecycle phase of the host/parent activity.
///
/// Only `Resumed` and `Paused` drive core behavior; the rest are
/// observability-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    SaveState,
    Destroyed,
}

impl LifecyclePhase {
    /// Short stable label for events and logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecyclePhase::Created => "created",
            LifecyclePhase::Started => "started",
            LifecyclePhase::Resumed => "resumed",
            LifecyclePhase::Paused => "paused",
            LifecyclePhase::Stopped => "stopped",
            LifecyclePhase::SaveState => "save_state",
            LifecyclePhase::Destroyed => "destroyed",
        }
    }
}
