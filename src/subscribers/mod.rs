//! Observability fan-out.
//!
//! Implement [`Subscribe`] to hook into supervision events (logging,
//! metrics, test probes); [`SubscriberSet`] gives each subscriber a bounded
//! queue and a dedicated worker so a slow subscriber only affects itself.

mod set;
mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use set::SubscriberSet;
pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
