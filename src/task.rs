use core::fmt::Debug;

/// A single unit of computation run by the [`Executor`](crate::executor::Executor).
///
/// One task value is shared by every unit of work of a run; each unit calls
/// `exec` once with its own input and hands the output to the collector.
pub trait Task: Debug + Send + Sync + 'static {
    /// Task input type.
    type Input: Send + 'static;
    /// Task output type.
    type Output: Send + 'static;
    /// Compute the output for one input.
    fn exec(&self, input: Self::Input) -> Self::Output;
}

/// Computes `input + 1`, wrapping around at `i64::MAX`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Increment;

impl Task for Increment {
    type Input = i64;
    type Output = i64;

    fn exec(&self, input: i64) -> i64 {
        input.wrapping_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_adds_one() {
        assert_eq!(Increment.exec(-805), -804);
        assert_eq!(Increment.exec(i64::MAX), i64::MIN);
    }
}
