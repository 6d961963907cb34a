/// Tuning knobs for the worker pool behind
/// [`Executor`](crate::executor::Executor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    /// Number of pool threads. `0` lets rayon decide (one per logical CPU
    /// unless `RAYON_NUM_THREADS` says otherwise).
    pub num_threads: usize,
    /// Prefix of the pool threads' names; the thread index is appended.
    pub thread_name: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            thread_name: "rdv-worker".to_string(),
        }
    }
}
