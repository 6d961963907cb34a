use thiserror::Error;

/// Error kind for executor setup failures.
///
/// Currently indicates that the worker pool could not be built, e.g. because
/// the operating system refused to spawn its threads.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecutorSetupError {
    /// The rayon thread pool failed to start.
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
