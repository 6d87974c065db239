//! Error types for launch attempts.
//!
//! A failed launch is not a fault in this runtime: every variant of
//! [`LaunchError`] leaves the handle in the `INVALID` state, is published to
//! the bus as a `LaunchSkipped` event, and is retried on the next qualifying
//! event. Nothing here propagates to the callers of
//! [`Supervisor::create_task`](crate::Supervisor::create_task) or
//! [`Supervisor::release`](crate::Supervisor::release).

use thiserror::Error;

/// Why a launch attempt was skipped or rejected.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The user session is still locked; launching would fail downstream.
    #[error("user session is locked")]
    UserLocked,

    /// The embedded surface is not attached to any display yet.
    #[error("display is not available for the embedded surface")]
    DisplayDetached,

    /// The display exists but is powered off.
    #[error("display is off")]
    DisplayOff,

    /// The launch primitive rejected the request.
    #[error("launch rejected: {reason}")]
    Rejected {
        /// Host-provided rejection detail.
        reason: String,
    },
}

impl LaunchError {
    /// Returns a short stable label (snake_case) for events and logs.
    ///
    /// # Example
    /// ```
    /// use panelvisor::LaunchError;
    ///
    /// assert_eq!(LaunchError::UserLocked.as_label(), "user_locked");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LaunchError::UserLocked => "user_locked",
            LaunchError::DisplayDetached => "display_detached",
            LaunchError::DisplayOff => "display_off",
            LaunchError::Rejected { .. } => "launch_rejected",
        }
    }

    /// True for conditions expected to clear on their own (lock state,
    /// display power); a later qualifying event retries them.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LaunchError::UserLocked | LaunchError::DisplayDetached | LaunchError::DisplayOff
        )
    }
}
