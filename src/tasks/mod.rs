//! Task handles and their callbacks.

mod callbacks;
mod handle;

pub use callbacks::TaskCallbacks;
pub use handle::{HandleRef, TaskHandle};
