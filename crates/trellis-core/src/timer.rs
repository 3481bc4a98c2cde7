use crate::runtime::{RuntimeHandle, TimerId};

/// One-shot timer that cancels itself when dropped.
///
/// Dropping the owner of a pending timer therefore guarantees its callback
/// never runs against state that no longer exists.
pub struct CallbackTimer {
    runtime: RuntimeHandle,
    id: Option<TimerId>,
}

impl CallbackTimer {
    /// Schedules `callback` to fire `delay_millis` after the runtime's current time.
    ///
    /// Returns `None` when the runtime is gone.
    pub fn start(
        runtime: &RuntimeHandle,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> Option<Self> {
        let id = runtime.schedule_timer(delay_millis, callback)?;
        Some(Self {
            runtime: runtime.clone(),
            id: Some(id),
        })
    }

    pub fn id(&self) -> Option<TimerId> {
        self.id
    }

    pub fn is_pending(&self) -> bool {
        self.id
            .map(|id| self.runtime.is_timer_pending(id))
            .unwrap_or(false)
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

impl Drop for CallbackTimer {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_timer(id);
        }
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
