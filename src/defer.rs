use derive_more::Debug;

/// Runs `action` when the returned guard goes out of scope, whether the scope
/// is left normally, early through `?`/`return`, or by unwinding.
///
/// ```
/// use rdv::defer::defer;
/// use std::cell::Cell;
///
/// let closed = Cell::new(false);
/// {
///     let _close = defer(|| closed.set(true));
///     assert!(!closed.get());
/// }
/// assert!(closed.get());
/// ```
pub fn defer<F: FnOnce()>(action: F) -> Deferred<F> {
    Deferred {
        action: Some(action),
    }
}

/// Guard returned by [`defer`].
#[must_use = "the action runs as soon as the guard is dropped"]
#[derive(Debug)]
pub struct Deferred<F: FnOnce()> {
    #[debug(skip)]
    action: Option<F>,
}

impl<F: FnOnce()> Deferred<F> {
    /// Disarms the guard; the action never runs.
    pub fn cancel(mut self) {
        self.action = None;
    }
}

impl<F: FnOnce()> Drop for Deferred<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// A stack of cleanup actions released in reverse order of registration.
///
/// Mirrors acquiring several resources one after another: the last one
/// acquired is the first one released.
#[must_use = "registered actions run as soon as the stack is dropped"]
#[derive(Debug, Default)]
pub struct DeferStack<'a> {
    #[debug(skip)]
    actions: Vec<Box<dyn FnOnce() + 'a>>,
}

impl<'a> DeferStack<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `action` to run when the stack is released.
    pub fn push(&mut self, action: impl FnOnce() + 'a) {
        self.actions.push(Box::new(action));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs every registered action now, newest first, leaving the stack
    /// empty and reusable.
    pub fn run_now(&mut self) {
        while let Some(action) = self.actions.pop() {
            action();
        }
    }
}

impl Drop for DeferStack<'_> {
    fn drop(&mut self) {
        self.run_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn stack_releases_in_reverse_order() {
        let log = RefCell::new(Vec::new());
        {
            let mut stack = DeferStack::new();
            for step in 1..=4 {
                let log = &log;
                stack.push(move || log.borrow_mut().push(step));
            }
            assert_eq!(stack.len(), 4);
            log.borrow_mut().push(0);
        }
        assert_eq!(*log.borrow(), vec![0, 4, 3, 2, 1]);
    }

    #[test]
    fn cancelled_guard_does_not_run() {
        let ran = RefCell::new(false);
        defer(|| *ran.borrow_mut() = true).cancel();
        assert!(!*ran.borrow());
    }

    #[test]
    fn guard_runs_on_early_return() {
        fn open(log: &RefCell<Vec<&'static str>>, fail: bool) -> Result<(), &'static str> {
            log.borrow_mut().push("open");
            let _close = defer(|| log.borrow_mut().push("close"));
            if fail {
                return Err("read failed");
            }
            log.borrow_mut().push("read");
            Ok(())
        }

        let log = RefCell::new(Vec::new());
        assert_eq!(open(&log, true), Err("read failed"));
        assert_eq!(*log.borrow(), vec!["open", "close"]);
    }

    #[test]
    fn guard_runs_while_unwinding() {
        let ran = std::sync::atomic::AtomicBool::new(false);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _flag = defer(|| ran.store(true, std::sync::atomic::Ordering::SeqCst));
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(ran.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn run_now_empties_and_stack_is_reusable() {
        let count = RefCell::new(0);
        let mut stack = DeferStack::new();
        stack.push(|| *count.borrow_mut() += 1);
        stack.run_now();
        assert!(stack.is_empty());
        assert_eq!(*count.borrow(), 1);
        stack.push(|| *count.borrow_mut() += 10);
        drop(stack);
        assert_eq!(*count.borrow(), 11);
    }
}
