//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! [created] task=com.example.maps/.MapsActivity
//! [launch] task=com.example.maps/.MapsActivity
//! [launch-skipped] task=com.example.maps/.MapsActivity reason=user_locked
//! [live] task=com.example.maps/.MapsActivity id=101
//! [vanished] task=com.example.maps/.MapsActivity id=101
//! [sweep] trigger=host_focus restarted=2
//! [released]
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Stdout logging subscriber, enabled via the `logging` feature.
///
/// Intended for development and demos; implement your own [`Subscribe`] for
/// structured logging or metrics.
#[derive(Default)]
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::TaskCreated => {
                println!("[created] task={:?}", e.task);
            }
            EventKind::LaunchIssued => {
                println!("[launch] task={:?}", e.task);
            }
            EventKind::LaunchSkipped => {
                println!("[launch-skipped] task={:?} reason={:?}", e.task, e.reason);
            }
            EventKind::TaskLive => {
                println!("[live] task={:?} id={:?}", e.task, e.task_id);
            }
            EventKind::TaskChanged => {
                println!("[changed] id={:?}", e.task_id);
            }
            EventKind::TaskVanished => {
                println!("[vanished] task={:?} id={:?}", e.task, e.task_id);
            }
            EventKind::SweepTriggered => {
                println!(
                    "[sweep] trigger={:?} restarted={:?} package={:?}",
                    e.trigger.map(|t| t.as_label()),
                    e.count,
                    e.package
                );
            }
            EventKind::PackageIgnored => {
                println!("[package-ignored] package={:?}", e.package);
            }
            EventKind::HostConnected => {
                println!("[host-connected]");
            }
            EventKind::HostLost => {
                println!("[host-lost]");
            }
            EventKind::MonitorForwarded => {
                println!("[monitor] id={:?} what={:?}", e.task_id, e.reason);
            }
            EventKind::ObserverAbsent => {
                println!("[monitor-dropped] id={:?} what={:?}", e.task_id, e.reason);
            }
            EventKind::DanglingRemoved => {
                println!("[dangling-removed] id={:?}", e.task_id);
            }
            EventKind::Released => {
                println!("[released]");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
