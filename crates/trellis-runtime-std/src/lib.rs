//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform
//! abstraction traits defined in `trellis-core`. Hosts construct a
//! [`StdRuntime`], hand its [`RuntimeHandle`] to the widget tree and call
//! [`StdRuntime::pump`] from their event loop.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use trellis_core::{Clock, Runtime, RuntimeHandle, RuntimeScheduler};

type HostWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Counts the wake-ups the runtime asked for since the host last pumped it.
///
/// Every queued task or armed timer asks for one. The host may poll
/// [`StdScheduler::take_tick_request`] from its loop, or install a waker to
/// be called from whichever thread is blocked on the event queue.
#[derive(Default)]
pub struct StdScheduler {
    pending: AtomicUsize,
    waker: Mutex<Option<HostWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake-ups requested since the last [`take_tick_request`](Self::take_tick_request).
    pub fn pending_ticks(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    /// Whether any wake-up was requested since the last call; resets the count.
    pub fn take_tick_request(&self) -> bool {
        self.pending.swap(0, Ordering::AcqRel) > 0
    }

    pub fn set_tick_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.replace_waker(Some(Arc::new(waker)));
    }

    pub fn clear_tick_waker(&self) {
        self.replace_waker(None);
    }

    fn replace_waker(&self, waker: Option<HostWaker>) {
        match self.waker.lock() {
            Ok(mut slot) => *slot = waker,
            Err(poisoned) => *poisoned.into_inner() = waker,
        }
    }

    fn host_waker(&self) -> Option<HostWaker> {
        match self.waker.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("pending_ticks", &self.pending_ticks())
            .field("has_waker", &self.host_waker().is_some())
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn request_tick(&self) {
        self.pending.fetch_add(1, Ordering::AcqRel);
        // The lock is released before the host runs.
        if let Some(waker) = self.host_waker() {
            waker();
        }
    }
}

/// Clock implementation backed by [`std::time`].
#[derive(Debug, Default, Clone)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Convenience container bundling the standard scheduler, clock and runtime.
///
/// Runtime time is measured in milliseconds since the runtime was created.
#[derive(Clone)]
pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: Arc<StdClock>,
    started: Instant,
    runtime: Runtime,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        let clock = Arc::new(StdClock);
        Self {
            scheduler,
            started: clock.now(),
            clock,
            runtime,
        }
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.clone()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn scheduler(&self) -> Arc<StdScheduler> {
        Arc::clone(&self.scheduler)
    }

    pub fn clock(&self) -> Arc<StdClock> {
        Arc::clone(&self.clock)
    }

    /// Milliseconds elapsed on the wall clock since this runtime was created.
    pub fn elapsed_millis(&self) -> u64 {
        self.clock.elapsed_millis(self.started)
    }

    /// Returns whether a tick was requested since the last poll.
    pub fn take_tick_request(&self) -> bool {
        self.scheduler.take_tick_request()
    }

    pub fn set_tick_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_tick_waker(waker);
    }

    pub fn clear_tick_waker(&self) {
        self.scheduler.clear_tick_waker();
    }

    /// Brings runtime time up to the wall clock, fires due timers and drains tasks.
    ///
    /// Returns the number of timers fired and tasks run.
    pub fn pump(&self) -> usize {
        let fired = self.runtime.advance_to(self.elapsed_millis());
        fired + self.runtime.drain_tasks()
    }

    /// How long the host may sleep before the next timer is due.
    ///
    /// `None` means no timer is pending.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        let deadline = self.runtime.next_deadline()?;
        Some(Duration::from_millis(
            deadline.saturating_sub(self.elapsed_millis()),
        ))
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}
