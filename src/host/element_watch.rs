use std::cell::{OnceCell, RefCell};
use std::fmt;

type Waiter<T> = Box<dyn FnOnce(&T)>;

/// Single-resolution slot for something the page produces later (typically
/// the chart container element).
///
/// The first `resolve` wins; continuations registered with `when_ready` run
/// exactly once, either immediately or at resolution time.
pub struct ElementWatch<T> {
    value: OnceCell<T>,
    waiters: RefCell<Vec<Waiter<T>>>,
}

impl<T> Default for ElementWatch<T> {
    fn default() -> Self {
        Self {
            value: OnceCell::new(),
            waiters: RefCell::new(Vec::new()),
        }
    }
}

impl<T> ElementWatch<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` and runs pending continuations.
    ///
    /// Returns `false` (and drops `value`) when already resolved.
    pub fn resolve(&self, value: T) -> bool {
        if self.value.set(value).is_err() {
            return false;
        }
        let waiters = std::mem::take(&mut *self.waiters.borrow_mut());
        if let Some(resolved) = self.value.get() {
            for waiter in waiters {
                waiter(resolved);
            }
        }
        true
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.value.get()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.value.get().is_some()
    }

    pub fn when_ready(&self, waiter: impl FnOnce(&T) + 'static) {
        match self.value.get() {
            Some(resolved) => waiter(resolved),
            None => self.waiters.borrow_mut().push(Box::new(waiter)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ElementWatch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementWatch")
            .field("value", &self.value.get())
            .field("pending", &self.waiters.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::ElementWatch;

    #[test]
    fn first_resolution_wins() {
        let watch = ElementWatch::new();
        assert!(watch.resolve("container"));
        assert!(!watch.resolve("other"));
        assert_eq!(watch.get(), Some(&"container"));
    }

    #[test]
    fn pending_waiters_run_once_on_resolve() {
        let watch = ElementWatch::new();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        watch.when_ready(move |value: &u32| {
            assert_eq!(*value, 7);
            seen.set(seen.get() + 1);
        });
        assert_eq!(calls.get(), 0);
        watch.resolve(7);
        watch.resolve(8);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn waiter_registered_after_resolution_runs_immediately() {
        let watch = ElementWatch::new();
        watch.resolve(3);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        watch.when_ready(move |_| seen.set(seen.get() + 1));
        assert_eq!(calls.get(), 1);
    }
}
