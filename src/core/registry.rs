//! # Registry of task handles.
//!
//! Owned exclusively by the supervisor loop — no locks, because only one
//! consumer ever touches it.
//!
//! ## Rules
//! - Insertion order is creation order; restart sweeps and release walk it
//!   in reverse so the most-recently-created panel is handled first.
//! - Appeared notifications are routed to the first *pending* handle (in
//!   creation order) whose intent component matches; notifications matching
//!   no handle belong to unsupervised tasks and are ignored here.

use crate::platform::INVALID_TASK_ID;
use crate::tasks::HandleRef;

/// Ordered collection of supervised handles.
#[derive(Default)]
pub(crate) struct Registry {
    handles: Vec<HandleRef>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Appends a handle; creation order is preserved.
    pub(crate) fn push(&mut self, handle: HandleRef) {
        self.handles.push(handle);
    }

    /// All handles, in creation order.
    pub(crate) fn handles(&self) -> &[HandleRef] {
        &self.handles
    }

    /// Finds the handle currently running the given live task.
    pub(crate) fn find_live(&self, task_id: i32) -> Option<&HandleRef> {
        if task_id == INVALID_TASK_ID {
            return None;
        }
        self.handles.iter().find(|h| h.task_id() == task_id)
    }

    /// Finds the first pending handle (creation order) matching a component.
    pub(crate) fn route_pending(&self, component: &str) -> Option<&HandleRef> {
        self.handles
            .iter()
            .find(|h| h.task_id() == INVALID_TASK_ID && !h.is_released() && h.name() == component)
    }

    /// Releases every handle in reverse creation order and clears the
    /// collection.
    pub(crate) fn release_all(&mut self) {
        for handle in self.handles.iter().rev() {
            handle.release();
        }
        self.handles.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::plain_handle;

    #[test]
    fn route_pending_prefers_creation_order() {
        let mut reg = Registry::new();
        let first = plain_handle("app.a");
        let second = plain_handle("app.a");
        reg.push(first.clone());
        reg.push(second);

        let routed = reg.route_pending("app.a").expect("pending handle");
        assert!(
            std::sync::Arc::ptr_eq(routed, &first),
            "earliest pending handle must win"
        );
    }

    #[tokio::test]
    async fn route_pending_skips_live_handles() {
        let mut reg = Registry::new();
        let a = plain_handle("app.a");
        a.on_appeared(5);
        reg.push(a);
        assert!(reg.route_pending("app.a").is_none());
    }

    #[tokio::test]
    async fn find_live_matches_by_task_id() {
        let mut reg = Registry::new();
        let a = plain_handle("app.a");
        let b = plain_handle("app.b");
        a.on_appeared(5);
        b.on_appeared(6);
        reg.push(a);
        reg.push(b.clone());

        let found = reg.find_live(6).expect("live handle");
        assert!(std::sync::Arc::ptr_eq(found, &b));
        assert!(reg.find_live(INVALID_TASK_ID).is_none());
    }

    #[test]
    fn release_all_clears_in_reverse_order() {
        let mut reg = Registry::new();
        let a = plain_handle("app.a");
        let b = plain_handle("app.b");
        reg.push(a.clone());
        reg.push(b.clone());

        reg.release_all();
        assert!(reg.is_empty());
        assert!(a.is_released());
        assert!(b.is_released());
    }
}
