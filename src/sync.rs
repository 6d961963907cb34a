#[cfg(feature = "loom")]
mod imp {
    use crate::config::ExecutorConfig;
    pub(crate) use loom::sync::{Arc, Condvar, Mutex, MutexGuard};

    /// Under `loom` every unit of work gets its own model-checked thread.
    #[derive(Debug)]
    pub(crate) struct Pool;

    impl Pool {
        pub(crate) fn build(_config: &ExecutorConfig) -> Result<Self, rayon::ThreadPoolBuildError> {
            Ok(Self)
        }

        pub(crate) fn spawn(&self, work: impl FnOnce() + Send + 'static) {
            drop(loom::thread::spawn(work));
        }
    }
}

#[cfg(not(feature = "loom"))]
mod imp {
    use crate::config::ExecutorConfig;
    pub(crate) use std::sync::{Arc, Condvar, Mutex, MutexGuard};
    use tracing::error;

    /// Rayon pool multiplexing units of work onto a fixed set of threads.
    #[derive(Debug)]
    pub(crate) struct Pool(rayon::ThreadPool);

    impl Pool {
        pub(crate) fn build(config: &ExecutorConfig) -> Result<Self, rayon::ThreadPoolBuildError> {
            let prefix = config.thread_name.clone();
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.num_threads)
                .thread_name(move |idx| format!("{prefix}-{idx}"))
                // A panicking unit of work drops its sender; the collector
                // reports the loss, so the pool only has to log it.
                .panic_handler(|payload| {
                    let message = payload
                        .downcast_ref::<&str>()
                        .copied()
                        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                        .unwrap_or("<non-string panic payload>");
                    error!(%message, "unit of work panicked");
                })
                .build()
                .map(Self)
        }

        pub(crate) fn spawn(&self, work: impl FnOnce() + Send + 'static) {
            self.0.spawn(work);
        }
    }
}

pub(crate) use imp::*;
use std::sync::PoisonError;

/// Locks `mutex`, recovering the guard if a previous holder panicked.
///
/// Every critical section in this crate leaves the guarded state consistent
/// before it can unwind, so poisoning carries no information here.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Blocks on `condvar`, recovering the guard on poisoning like [`lock`].
pub(crate) fn wait<'a, T>(condvar: &Condvar, guard: MutexGuard<'a, T>) -> MutexGuard<'a, T> {
    condvar.wait(guard).unwrap_or_else(PoisonError::into_inner)
}
