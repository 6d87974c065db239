//! Restart decision logic.

mod restart;

pub use restart::{package_restart_candidates, restart_candidates, RestartPolicy, SweepTrigger};
