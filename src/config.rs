//! # Supervisor configuration.
//!
//! [`Config`] pins the supervisor to one host activity instance: the host's
//! own task identifier (restart sweeps are gated on it regaining focus) and
//! the user the host runs as (user-lifecycle events for other users are
//! ignored or, for switches away, trigger release).
//!
//! # Example
//! ```
//! use panelvisor::Config;
//!
//! let mut cfg = Config::new(42, 10);
//! cfg.bus_capacity = 256;
//!
//! assert_eq!(cfg.host_task_id, 42);
//! assert_eq!(cfg.user_id, 10);
//! ```

/// Configuration for one [`Supervisor`](crate::Supervisor) instance.
///
/// There is no `Default`: the host task id and user id are identity, not
/// tuning, and must come from the embedding host.
#[derive(Clone, Debug)]
pub struct Config {
    /// Task identifier of the host/parent activity.
    ///
    /// Focus-change and activity-restart signals only trigger sweeps when
    /// they refer to this task.
    pub host_task_id: i32,
    /// Identifier of the user the host activity runs as.
    ///
    /// `Unlocked` events for this user trigger a sweep; `Switching` away
    /// from this user triggers release.
    pub user_id: i32,
    /// Capacity of the broadcast event bus.
    pub bus_capacity: usize,
}

impl Config {
    /// Creates a configuration with the default bus capacity (1024).
    pub fn new(host_task_id: i32, user_id: i32) -> Self {
        Self {
            host_task_id,
            user_id,
            bus_capacity: 1024,
        }
    }
}
