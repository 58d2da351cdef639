//! Synchronized state abstraction.
//!
//! Process-wide mutable state (such as the shutdown counters) is reached
//! from independent execution contexts. [`SharedState`] keeps every access a
//! short closure so critical sections cannot accidentally span a callback
//! into another subsystem.

use core::cell::RefCell;

/// Platform-agnostic synchronized state access.
///
/// Implementations must not be re-entered from inside the closure: the
/// closure should compute, mutate and return, never call out.
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

/// State guarded by a critical section.
///
/// On the device the critical section masks interrupts on the current core
/// and takes the cross-core spinlock. Host builds link the `std`
/// implementation of `critical-section`, which is a global reentrant mutex,
/// so the same type works in multi-threaded tests.
pub struct CriticalState<T> {
    inner: critical_section::Mutex<RefCell<T>>,
}

impl<T> CriticalState<T> {
    /// Const constructor, usable for statics.
    pub const fn new(value: T) -> Self {
        Self {
            inner: critical_section::Mutex::new(RefCell::new(value)),
        }
    }
}

impl<T> SharedState<T> for CriticalState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }
}
