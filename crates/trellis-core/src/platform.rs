//! Platform abstraction traits for Trellis runtime services.
//!
//! These traits allow the runtime to delegate wake-ups and time keeping to
//! the host event loop, enabling integration with different environments
//! without depending directly on `std` APIs.

/// Wakes the host event loop on behalf of the runtime.
///
/// Implementations may be shared with threads that wait on the event loop,
/// so they must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host run another iteration of the event loop.
    fn request_tick(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of milliseconds elapsed since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
