//! # Restart policy and sweep selection.
//!
//! [`RestartPolicy`] determines how a handle recovers from a vanished task:
//!
//! - [`RestartPolicy::OnCrash`] the handle relaunches immediately when its
//!   task vanishes — the only restart path that is not event-gated.
//! - [`RestartPolicy::EventGated`] the handle stays down until a qualifying
//!   sweep picks it up.
//!
//! The sweep selectors are pure: given the registry contents they return the
//! handles eligible for restart, in **reverse creation order** — the
//! most-recently-created panel is retried first. That ordering is a policy
//! choice, not an accident, and is pinned by tests here.
//!
//! ## Choosing a policy
//! ```text
//! RestartPolicy::OnCrash     → panel must be there forever; self-heals
//! RestartPolicy::EventGated  → restart only when focus/unlock/package
//!                              events make success plausible
//! ```
//!
//! Both paths coexist: an `OnCrash` handle whose immediate relaunch was
//! skipped (locked user, display off) is still eligible for later sweeps.

use std::sync::Arc;

use crate::platform::INVALID_TASK_ID;
use crate::tasks::TaskHandle;

/// Policy controlling how a handle recovers after its task vanishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Relaunch immediately on vanish (default for controlled panels).
    #[default]
    OnCrash,
    /// Wait for a qualifying sweep.
    EventGated,
}

/// What triggered a restart sweep. Carried on
/// [`EventKind::SweepTriggered`](crate::EventKind::SweepTriggered) events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepTrigger {
    /// The host task regained focus.
    HostFocus,
    /// A restart attempt surfaced the home task over the host.
    HostRestart,
    /// A depending package was replaced while the parent was visible.
    PackageReplaced,
    /// The parent's user finished unlocking.
    UserUnlocked,
}

impl SweepTrigger {
    /// Short stable label for logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SweepTrigger::HostFocus => "host_focus",
            SweepTrigger::HostRestart => "host_restart",
            SweepTrigger::PackageReplaced => "package_replaced",
            SweepTrigger::UserUnlocked => "user_unlocked",
        }
    }
}

fn is_crashed(handle: &TaskHandle) -> bool {
    !handle.is_released() && handle.task_id() == INVALID_TASK_ID
}

/// Returns the handles eligible for restart, in reverse creation order.
///
/// Eligible means not released and currently without a live task
/// (`task_id == INVALID_TASK_ID`).
pub fn restart_candidates(handles: &[Arc<TaskHandle>]) -> Vec<Arc<TaskHandle>> {
    handles
        .iter()
        .rev()
        .filter(|h| is_crashed(h))
        .cloned()
        .collect()
}

/// Like [`restart_candidates`], additionally requiring the handle to depend
/// on `package`.
pub fn package_restart_candidates(
    handles: &[Arc<TaskHandle>],
    package: &str,
) -> Vec<Arc<TaskHandle>> {
    handles
        .iter()
        .rev()
        .filter(|h| is_crashed(h) && h.depending_package_names().contains(package))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{handle_with_deps, plain_handle};

    #[test]
    fn candidates_come_in_reverse_creation_order() {
        let a = plain_handle("app.a");
        let b = plain_handle("app.b");
        let c = plain_handle("app.c");
        let registry = vec![a, b, c];

        let picked = restart_candidates(&registry);
        let names: Vec<&str> = picked.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["app.c", "app.b", "app.a"]);
    }

    #[tokio::test]
    async fn live_handles_are_not_candidates() {
        let a = plain_handle("app.a");
        let b = plain_handle("app.b");
        b.on_appeared(42);
        let registry = vec![a, b];

        let picked = restart_candidates(&registry);
        let names: Vec<&str> = picked.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["app.a"]);
    }

    #[test]
    fn released_handles_are_not_candidates() {
        let a = plain_handle("app.a");
        a.release();
        assert!(restart_candidates(&[a]).is_empty());
    }

    #[test]
    fn package_filter_requires_dependency() {
        let maps = handle_with_deps("app.maps", &["com.example.maps"]);
        let radio = handle_with_deps("app.radio", &["com.example.radio"]);
        let registry = vec![maps, radio];

        let picked = package_restart_candidates(&registry, "com.example.maps");
        let names: Vec<&str> = picked.iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["app.maps"]);
    }

    #[tokio::test]
    async fn package_filter_skips_live_dependents() {
        let maps = handle_with_deps("app.maps", &["com.example.maps"]);
        maps.on_appeared(7);
        assert!(package_restart_candidates(&[maps], "com.example.maps").is_empty());
    }
}
