mod signal;

pub(crate) use signal::Signal;

use crate::{
    sync::{Arc, Condvar, Mutex, lock, wait},
    types::{HashMap, WatcherId},
};
use core::fmt;
use thiserror::Error;
use tracing::trace;

/// Creates a zero-capacity channel.
///
/// Every value is handed over directly: [`Sender::send`] returns only after a
/// receiver has taken that very value, and [`Receiver::recv`] blocks until a
/// sender shows up. Both halves can be cloned; the channel disconnects when
/// every handle of one side is dropped.
#[must_use]
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let chan = Arc::new(Chan {
        state: Mutex::new(State {
            slot: None,
            sent: 0,
            taken: 0,
            senders: 1,
            receivers: 1,
            watchers: HashMap::default(),
        }),
        item_ready: Condvar::new(),
        space_ready: Condvar::new(),
    });
    let sender = Sender { chan: chan.clone() };
    (sender, Receiver { chan })
}

/// Returned by [`Sender::send`] when every receiver is gone.
///
/// Carries the value that could not be delivered.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SendError<T>(pub T);

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendError").finish_non_exhaustive()
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sending on a disconnected channel")
    }
}

impl<T> std::error::Error for SendError<T> {}

/// Returned by [`Receiver::recv`] when every sender is gone.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("receiving on a disconnected channel")]
pub struct RecvError;

/// Error kind for [`Receiver::try_recv`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryRecvError {
    /// No sender is currently offering a value.
    #[error("no value is ready to be received")]
    Empty,
    /// No value is pending and every sender is gone.
    #[error("receiving on a disconnected channel")]
    Disconnected,
}

/// What a receiver would observe right now, without taking anything.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Readiness {
    Ready,
    Pending,
    Disconnected,
}

struct State<T> {
    /// The value currently offered by a blocked sender.
    slot: Option<T>,
    /// Number of values ever placed into `slot`. A sender's ticket is the
    /// value of this counter right after its own placement.
    sent: u64,
    /// Number of values ever taken out of `slot` by receivers.
    taken: u64,
    senders: usize,
    receivers: usize,
    /// Blocked selects to wake on every handoff offer or disconnection.
    watchers: HashMap<WatcherId, Arc<Signal>>,
}

impl<T> State<T> {
    fn wake_watchers(&self) {
        for signal in self.watchers.values() {
            signal.notify();
        }
    }

    fn readiness(&self) -> Readiness {
        if self.slot.is_some() {
            Readiness::Ready
        } else if self.senders == 0 {
            Readiness::Disconnected
        } else {
            Readiness::Pending
        }
    }
}

struct Chan<T> {
    state: Mutex<State<T>>,
    /// Signalled when a value is placed into the slot or the last sender
    /// leaves.
    item_ready: Condvar,
    /// Signalled when the slot is emptied or the last receiver leaves. Both
    /// senders waiting for room and the sender waiting for its pickup listen
    /// here.
    space_ready: Condvar,
}

impl<T> Chan<T> {
    fn take(&self, state: &mut State<T>) -> Option<T> {
        let value = state.slot.take()?;
        state.taken = state.taken.checked_add(1).expect("Chan::take: [1]");
        debug_assert_eq!(state.taken, state.sent, "Chan::take: [2]");
        self.space_ready.notify_all();
        Some(value)
    }
}

/// Sending half of a rendezvous [`channel`].
pub struct Sender<T> {
    chan: Arc<Chan<T>>,
}

impl<T> Sender<T> {
    /// Hands `value` over to a receiver, blocking until one has taken it.
    ///
    /// Blocks forever if receivers exist but none ever receives.
    ///
    /// # Errors
    /// Returns the value back if every receiver is dropped before it was
    /// taken, including while this call is waiting for the pickup.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let chan = &*self.chan;
        let mut state = lock(&chan.state);
        while state.slot.is_some() && state.receivers != 0 {
            state = wait(&chan.space_ready, state);
        }
        if state.receivers == 0 {
            trace!("send on a channel without receivers");
            return Err(SendError(value));
        }

        state.slot = Some(value);
        state.sent = state.sent.checked_add(1).expect("Sender::send: [1]");
        let ticket = state.sent;
        chan.item_ready.notify_one();
        state.wake_watchers();

        // The slot holds our value until `taken` reaches our ticket: nobody
        // else can place a value into an occupied slot.
        while state.taken < ticket {
            if state.receivers == 0 {
                let value = state.slot.take().expect("Sender::send: [2]");
                state.sent -= 1;
                chan.space_ready.notify_all();
                trace!("receivers left before pickup");
                return Err(SendError(value));
            }
            state = wait(&chan.space_ready, state);
        }
        trace!(ticket, "value handed over");
        Ok(())
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        lock(&self.chan.state).senders += 1;
        Self {
            chan: self.chan.clone(),
        }
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        let mut state = lock(&self.chan.state);
        state.senders -= 1;
        if state.senders == 0 {
            self.chan.item_ready.notify_all();
            state.wake_watchers();
        }
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender").finish_non_exhaustive()
    }
}

/// Receiving half of a rendezvous [`channel`].
pub struct Receiver<T> {
    chan: Arc<Chan<T>>,
}

impl<T> Receiver<T> {
    /// Takes the next value, blocking until a sender offers one.
    ///
    /// Blocks forever if senders exist but none ever sends.
    ///
    /// # Errors
    /// If no value is pending and every sender is dropped.
    pub fn recv(&self) -> Result<T, RecvError> {
        let chan = &*self.chan;
        let mut state = lock(&chan.state);
        loop {
            if let Some(value) = chan.take(&mut state) {
                return Ok(value);
            }
            if state.senders == 0 {
                return Err(RecvError);
            }
            state = wait(&chan.item_ready, state);
        }
    }

    /// Takes a value only if a sender is offering one right now.
    ///
    /// # Errors
    /// [`TryRecvError::Empty`] if nothing is offered,
    /// [`TryRecvError::Disconnected`] if nothing is offered and every sender
    /// is dropped.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        let chan = &*self.chan;
        let mut state = lock(&chan.state);
        if let Some(value) = chan.take(&mut state) {
            return Ok(value);
        }
        if state.senders == 0 {
            Err(TryRecvError::Disconnected)
        } else {
            Err(TryRecvError::Empty)
        }
    }

    /// Blocking iterator over received values, ending at disconnection.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { receiver: self }
    }

    pub(crate) fn readiness(&self) -> Readiness {
        lock(&self.chan.state).readiness()
    }

    pub(crate) fn watch(&self, id: WatcherId, signal: Arc<Signal>) {
        lock(&self.chan.state).watchers.insert(id, signal);
    }

    pub(crate) fn unwatch(&self, id: WatcherId) {
        lock(&self.chan.state).watchers.remove(&id);
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        lock(&self.chan.state).receivers += 1;
        Self {
            chan: self.chan.clone(),
        }
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        let mut state = lock(&self.chan.state);
        state.receivers -= 1;
        if state.receivers == 0 {
            self.chan.space_ready.notify_all();
        }
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver").finish_non_exhaustive()
    }
}

/// Iterator returned by [`Receiver::iter`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    receiver: &'a Receiver<T>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.receiver.recv().ok()
    }
}

impl<'a, T> IntoIterator for &'a Receiver<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
