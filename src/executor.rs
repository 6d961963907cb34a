mod execute;
mod setup;

/// Error returned by `Executor::execute` when results went missing.
pub use crate::executor::execute::ExecuteError;
/// Error returned by `Executor::setup` when the worker pool cannot start.
pub use crate::executor::setup::ExecutorSetupError;
use crate::{
    channel::channel,
    config::ExecutorConfig,
    executor::execute::{collect, spawn_all},
    sync::{Arc, Pool},
    task::Task,
};
use derive_more::Debug;
use tracing::debug;

/// Fan-out/fan-in executor: one unit of work per input, one collector.
///
/// Every unit of work runs `Task::exec` on its own input on the worker pool
/// and hands the output over a shared rendezvous channel. The calling thread
/// is the collector: it performs exactly one blocking receive per launched
/// unit, so results come back in whatever order the units finish.
///
/// ```
/// use rdv::{config::ExecutorConfig, executor::Executor, task::Increment};
///
/// let executor = Executor::setup(Increment, &ExecutorConfig::default()).unwrap();
/// let mut results = executor.execute([0, 10, -805]).unwrap();
/// results.sort_unstable();
/// assert_eq!(results, [-804, 1, 11]);
/// ```
#[must_use]
#[derive(Debug)]
pub struct Executor<T: Task> {
    task: Arc<T>,
    #[debug(skip)]
    pool: Pool,
}

impl<T: Task> Executor<T> {
    /// Build the worker pool described by `config` and bind `task` to it.
    ///
    /// # Errors
    /// If the pool threads cannot be started.
    pub fn setup(task: T, config: &ExecutorConfig) -> Result<Self, ExecutorSetupError> {
        let pool = Pool::build(config)?;
        debug!(
            num_threads = config.num_threads,
            thread_name = %config.thread_name,
            "executor ready"
        );
        Ok(Self {
            task: Arc::new(task),
            pool,
        })
    }

    /// The task every unit of work runs.
    #[must_use]
    pub fn task(&self) -> &T {
        &self.task
    }

    /// Run one unit of work per input and return the outputs in arrival
    /// order.
    ///
    /// # Errors
    /// If a unit of work exits without delivering its output.
    pub fn execute<I>(&self, inputs: I) -> Result<Vec<T::Output>, ExecuteError>
    where
        I: IntoIterator<Item = T::Input>,
    {
        let mut outputs = Vec::new();
        self.execute_with(inputs, |output| outputs.push(output))?;
        Ok(outputs)
    }

    /// Like [`Executor::execute`], but streams each output to `on_result`
    /// the moment it is received. Returns the number of outputs.
    ///
    /// # Errors
    /// If a unit of work exits without delivering its output. `on_result`
    /// has already seen every output that did arrive.
    pub fn execute_with<I>(
        &self,
        inputs: I,
        on_result: impl FnMut(T::Output),
    ) -> Result<usize, ExecuteError>
    where
        I: IntoIterator<Item = T::Input>,
    {
        let (sender, receiver) = channel();
        let expected = spawn_all(&self.pool, &self.task, inputs, sender);
        debug!(expected, "units of work launched");
        let received = collect(&receiver, expected, on_result)?;
        debug!(received, "all results collected");
        Ok(received)
    }
}
