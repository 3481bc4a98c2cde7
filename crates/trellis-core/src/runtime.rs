use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::platform::RuntimeScheduler;

pub type TimerId = u64;

struct TimerEntry {
    deadline: u64,
    callback: Box<dyn FnOnce() + 'static>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_tick: Cell<bool>,
    now_millis: Cell<u64>,
    timers: RefCell<IndexMap<TimerId, TimerEntry>>,
    next_timer_id: Cell<TimerId>,
    pending_tasks: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_tick: Cell::new(false),
            now_millis: Cell::new(0),
            timers: RefCell::new(IndexMap::new()),
            next_timer_id: Cell::new(1),
            pending_tasks: RefCell::new(VecDeque::new()),
        }
    }

    fn request_tick(&self) {
        self.needs_tick.set(true);
        self.scheduler.request_tick();
    }

    fn refresh_needs_tick(&self) {
        if !self.has_tasks() && !self.has_timers() {
            self.needs_tick.set(false);
        }
    }

    fn enqueue_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.pending_tasks.borrow_mut().push_back(task);
        self.request_tick();
    }

    fn drain_tasks(&self) -> usize {
        let tasks: Vec<Box<dyn FnOnce() + 'static>> = {
            let mut pending = self.pending_tasks.borrow_mut();
            pending.drain(..).collect()
        };
        let count = tasks.len();
        for task in tasks {
            task();
        }
        self.refresh_needs_tick();
        count
    }

    fn has_tasks(&self) -> bool {
        !self.pending_tasks.borrow().is_empty()
    }

    fn has_timers(&self) -> bool {
        !self.timers.borrow().is_empty()
    }

    fn schedule_timer(&self, delay_millis: u64, callback: Box<dyn FnOnce() + 'static>) -> TimerId {
        let id = self.next_timer_id.get();
        self.next_timer_id.set(id + 1);
        let deadline = self.now_millis.get().saturating_add(delay_millis);
        self.timers
            .borrow_mut()
            .insert(id, TimerEntry { deadline, callback });
        self.request_tick();
        id
    }

    fn cancel_timer(&self, id: TimerId) -> bool {
        let removed = self
            .timers
            .try_borrow_mut()
            .ok()
            .and_then(|mut timers| timers.shift_remove(&id));
        let was_pending = removed.is_some();
        // Captured state may cancel further timers as it drops.
        drop(removed);
        self.refresh_needs_tick();
        was_pending
    }

    fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timers.borrow().contains_key(&id)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.timers.borrow().values().map(|entry| entry.deadline).min()
    }

    fn advance_to(&self, now_millis: u64) -> usize {
        if now_millis > self.now_millis.get() {
            self.now_millis.set(now_millis);
        }
        let now = self.now_millis.get();
        let mut due: Vec<(u64, TimerId)> = self
            .timers
            .borrow()
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .map(|(id, entry)| (entry.deadline, *id))
            .collect();
        due.sort_unstable();

        let mut fired = 0;
        for (_, id) in due {
            // An earlier callback may have cancelled this one.
            let entry = self.timers.borrow_mut().shift_remove(&id);
            if let Some(entry) = entry {
                (entry.callback)();
                fired += 1;
            }
        }
        self.refresh_needs_tick();
        fired
    }
}

/// Owner of the pending work queue for one UI thread.
///
/// Time is supplied by the host through [`Runtime::advance_to`]; the runtime
/// itself never reads a clock, which keeps timer behaviour deterministic.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn needs_tick(&self) -> bool {
        self.inner.needs_tick.get()
    }

    pub fn now_millis(&self) -> u64 {
        self.inner.now_millis.get()
    }

    /// Moves the runtime clock forward and fires every timer now due.
    ///
    /// Due timers fire in deadline order, ties broken by creation order.
    /// Timers scheduled by a firing callback wait for the next call even when
    /// their deadline has already passed. Returns the number of timers fired.
    pub fn advance_to(&self, now_millis: u64) -> usize {
        self.inner.advance_to(now_millis)
    }

    /// Runs every queued task. Tasks queued while draining wait for the next drain.
    pub fn drain_tasks(&self) -> usize {
        self.inner.drain_tasks()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.inner.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.inner.has_timers()
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.inner.has_tasks()
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn request_tick(&self) {}
}

/// Non-owning reference to a [`Runtime`].
///
/// Every operation degrades gracefully once the runtime is gone: queries
/// report nothing pending and scheduling calls return `None`.
#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    pub fn now_millis(&self) -> u64 {
        self.0
            .upgrade()
            .map(|inner| inner.now_millis.get())
            .unwrap_or(0)
    }

    pub fn request_tick(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.request_tick();
        }
    }

    /// Queues `task` for the next drain, or runs it immediately without a runtime.
    pub fn spawn_task(&self, task: Box<dyn FnOnce() + 'static>) {
        if let Some(inner) = self.0.upgrade() {
            inner.enqueue_task(task);
        } else {
            task();
        }
    }

    pub fn drain_tasks(&self) -> usize {
        self.0
            .upgrade()
            .map(|inner| inner.drain_tasks())
            .unwrap_or(0)
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_tasks())
            .unwrap_or(false)
    }

    pub fn schedule_timer(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<TimerId> {
        self.0
            .upgrade()
            .map(|inner| inner.schedule_timer(delay_millis, Box::new(callback)))
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel_timer(&self, id: TimerId) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.cancel_timer(id))
            .unwrap_or(false)
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn has_pending_timers(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_timers())
            .unwrap_or(false)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.0.upgrade().and_then(|inner| inner.next_deadline())
    }

    pub fn advance_to(&self, now_millis: u64) -> usize {
        self.0
            .upgrade()
            .map(|inner| inner.advance_to(now_millis))
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
