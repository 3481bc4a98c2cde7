//! Single-threaded cooperative runtime for Trellis.
//!
//! All widget mutation, layout and rendering happen on one thread. The only
//! asynchrony is work queued on the [`Runtime`]: tasks that run on the next
//! drain, and one-shot timers that fire once the host advances time past
//! their deadline.

mod platform;
mod runtime;
mod timer;

pub use platform::{Clock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle, TimerId};
pub use timer::CallbackTimer;
