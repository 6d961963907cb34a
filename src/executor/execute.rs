use crate::{
    channel::{Receiver, RecvError, Sender},
    sync::{Arc, Pool},
    task::Task,
};
use thiserror::Error;
use tracing::{trace, warn};

/// Error kind for [`Executor::execute`](super::Executor::execute).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExecuteError {
    /// Some units of work exited without sending their result, which happens
    /// when a task panics.
    #[error("collected {received} of {expected} results; the other units of work exited without sending")]
    Lost {
        /// Number of units of work launched.
        expected: usize,
        /// Number of results the collector got before every sender was gone.
        received: usize,
    },
}

/// Launches one unit of work per input, each owning a clone of `sender`, and
/// returns how many were launched.
///
/// `sender` itself is dropped on return, so the channel disconnects as soon
/// as the last unit of work is done with it.
pub(super) fn spawn_all<T: Task>(
    pool: &Pool,
    task: &Arc<T>,
    inputs: impl IntoIterator<Item = T::Input>,
    sender: Sender<T::Output>,
) -> usize {
    let mut launched = 0usize;
    for input in inputs {
        let task = task.clone();
        let sender = sender.clone();
        let unit = launched;
        pool.spawn(move || {
            let output = task.exec(input);
            if sender.send(output).is_err() {
                warn!(unit, "collector left before taking the result");
            }
        });
        launched += 1;
    }
    launched
}

/// Performs `expected` blocking receives, handing every value to
/// `on_result` in arrival order.
pub(super) fn collect<O>(
    receiver: &Receiver<O>,
    expected: usize,
    mut on_result: impl FnMut(O),
) -> Result<usize, ExecuteError> {
    let mut received = 0usize;
    while received < expected {
        match receiver.recv() {
            Ok(output) => {
                received += 1;
                trace!(received, expected, "result collected");
                on_result(output);
            }
            Err(RecvError) => {
                warn!(received, expected, "units of work exited without a result");
                return Err(ExecuteError::Lost { expected, received });
            }
        }
    }
    Ok(received)
}
