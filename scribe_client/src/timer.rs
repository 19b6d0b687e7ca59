use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Default)]
struct Slot {
    closed: bool,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A single-shot delayed callback that can be re-armed. Arming cancels
/// whatever was pending, so at most one callback is ever outstanding.
/// Dropping the timer cancels it.
pub struct ResettableTimer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl ResettableTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Run `callback` after the delay unless the timer is re-armed or
    /// cancelled first. Does nothing once the timer is closed. Must be
    /// called within a tokio runtime.
    pub fn arm<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = lock(&self.slot);
        if slot.closed {
            return;
        }
        if let Some(task) = slot.task.take() {
            task.abort();
        }
        slot.generation = slot.generation.wrapping_add(1);

        // The generation check runs under the slot lock, so a task that was
        // already waking when it got superseded still does nothing.
        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let delay = self.delay;
        slot.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.task = None;
                callback();
            }
        }));
    }

    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        if let Some(task) = slot.task.take() {
            task.abort();
        }
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Cancel the pending callback and refuse any later `arm`.
    pub fn close(&self) {
        lock(&self.slot).closed = true;
        self.cancel();
    }

    pub fn is_armed(&self) -> bool {
        lock(&self.slot).task.is_some()
    }
}

impl Drop for ResettableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
