use crate::sync::{Condvar, Mutex, lock, wait};

/// One-shot wakeup flag shared between a blocked select and the channels it
/// watches.
///
/// A notification that arrives before [`Signal::wait`] is remembered, so a
/// watcher registered before polling can never miss a handoff.
#[derive(Debug)]
pub(crate) struct Signal {
    fired: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            fired: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    pub(crate) fn notify(&self) {
        *lock(&self.fired) = true;
        self.cond.notify_one();
    }

    /// Blocks until notified, then re-arms the flag.
    pub(crate) fn wait(&self) {
        let mut fired = lock(&self.fired);
        while !*fired {
            fired = wait(&self.cond, fired);
        }
        *fired = false;
    }
}
