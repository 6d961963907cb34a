use crate::{
    channel::{Readiness, Receiver, Signal, TryRecvError},
    defer::defer,
    sync::Arc,
    types::WatcherId,
};
use derive_more::Debug;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::trace;

/// Waits on several receivers at once and takes a value from whichever is
/// ready.
///
/// When more than one receiver is ready, the winner is drawn uniformly at
/// random from the ready subset, so a busy channel cannot starve the others.
///
/// ```
/// use rdv::{channel::channel, select::Select};
/// use std::thread;
///
/// let (tx_a, rx_a) = channel::<&str>();
/// let (_tx_b, rx_b) = channel::<&str>();
/// let sender = thread::spawn(move || tx_a.send("a").unwrap());
///
/// let mut select = Select::new();
/// let a = select.recv(&rx_a);
/// select.recv(&rx_b);
/// let selected = select.select().unwrap();
/// assert_eq!((selected.index, selected.value), (a, "a"));
/// sender.join().unwrap();
/// ```
#[must_use]
#[derive(Debug)]
pub struct Select<'a, T, R = SmallRng> {
    receivers: Vec<&'a Receiver<T>>,
    #[debug(skip)]
    rng: R,
}

/// A value taken by [`Select`], with the index of the receiver it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected<T> {
    /// Index returned by [`Select::recv`] when the receiver was added.
    pub index: usize,
    /// The value taken from that receiver.
    pub value: T,
}

/// Error kind for [`Select::try_select`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrySelectError {
    /// None of the receivers is ready right now.
    #[error("no selected channel is ready")]
    Empty,
    /// Every receiver is disconnected, or there are no receivers at all.
    #[error("every selected channel is disconnected")]
    Disconnected,
}

/// Returned by [`Select::select`] when no receiver can ever become ready.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("every selected channel is disconnected")]
pub struct SelectError;

impl<T> Select<'_, T> {
    /// Creates an empty select seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl<T> Default for Select<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, R: Rng> Select<'a, T, R> {
    /// Creates an empty select drawing its choices from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            receivers: Vec::new(),
            rng,
        }
    }

    /// Adds a receiver and returns its index.
    pub fn recv(&mut self, receiver: &'a Receiver<T>) -> usize {
        self.receivers.push(receiver);
        self.receivers.len() - 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    /// Takes a value from a receiver that is ready right now, without
    /// blocking.
    ///
    /// # Errors
    /// [`TrySelectError::Empty`] if nothing is ready,
    /// [`TrySelectError::Disconnected`] if nothing can ever be ready.
    pub fn try_select(&mut self) -> Result<Selected<T>, TrySelectError> {
        let Self { receivers, rng } = self;
        let mut ready = Vec::with_capacity(receivers.len());
        let mut disconnected = 0usize;
        for (index, receiver) in receivers.iter().enumerate() {
            match receiver.readiness() {
                Readiness::Ready => ready.push(index),
                Readiness::Pending => {}
                Readiness::Disconnected => disconnected += 1,
            }
        }

        while !ready.is_empty() {
            let index = ready.swap_remove(rng.gen_range(0..ready.len()));
            match receivers[index].try_recv() {
                Ok(value) => return Ok(Selected { index, value }),
                // Another receiver of the same channel took the value first.
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => disconnected += 1,
            }
        }

        if disconnected == receivers.len() {
            Err(TrySelectError::Disconnected)
        } else {
            Err(TrySelectError::Empty)
        }
    }

    /// Blocks until some receiver is ready and takes its value.
    ///
    /// Exactly one receiver is resolved per call. There is no timeout: if
    /// senders stay alive but never send, this blocks forever.
    ///
    /// # Errors
    /// If every receiver is disconnected, or none was added.
    pub fn select(&mut self) -> Result<Selected<T>, SelectError> {
        match self.try_select() {
            Ok(selected) => return Ok(selected),
            Err(TrySelectError::Disconnected) => return Err(SelectError),
            Err(TrySelectError::Empty) => {}
        }

        // Register before polling again so that an offer made after the poll
        // still fires the signal.
        let id = WatcherId::next();
        let signal = Arc::new(Signal::new());
        let watched = self.receivers.clone();
        for receiver in &watched {
            receiver.watch(id, signal.clone());
        }
        let _unwatch = defer(move || {
            for receiver in watched {
                receiver.unwatch(id);
            }
        });

        loop {
            match self.try_select() {
                Ok(selected) => return Ok(selected),
                Err(TrySelectError::Disconnected) => return Err(SelectError),
                Err(TrySelectError::Empty) => {
                    trace!(?id, "nothing ready, parking select");
                    signal.wait();
                }
            }
        }
    }
}
