use crate::class::Class;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::Waker;

// Waiter state constants
const WAITING: usize = 0;
const GRANTED: usize = 1;
const CANCELLED: usize = 2;

/// State information for an actor parked on a class queue.
///
/// Transitions out of `WAITING` happen only under the pool gate. The waiter
/// itself reads the state without the gate, so it is kept in an atomic.
pub(crate) struct WaiterState {
    state: AtomicUsize,
    pub(crate) class: Class,
    waker: Mutex<Option<Waker>>,
}

/// A handle to a waiter in a class queue, held by the parked future.
pub(crate) struct WaiterHandle {
    pub(crate) state: Arc<WaiterState>,
}

impl WaiterState {
    pub(crate) fn new(class: Class, waker: &Waker) -> Self {
        Self {
            state: AtomicUsize::new(WAITING),
            class,
            waker: Mutex::new(Some(waker.clone())),
        }
    }

    /// Mark the waiter as admitted. Must be called under the gate.
    pub(crate) fn try_grant(&self) -> bool {
        self.state
            .compare_exchange(WAITING, GRANTED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Withdraw a waiter that has not been granted yet. Must be called under
    /// the gate. Returns `false` if the waiter was already granted.
    pub(crate) fn try_cancel(&self) -> bool {
        self.state
            .compare_exchange(WAITING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn is_granted(&self) -> bool {
        self.state.load(Ordering::Acquire) == GRANTED
    }

    #[cfg(test)]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.state.load(Ordering::Acquire) == CANCELLED
    }

    /// Store the waker to use when this waiter is granted.
    ///
    /// Callers must re-check [`is_granted`](Self::is_granted) afterwards: a
    /// grant that took the previous waker has already fired it.
    pub(crate) fn register(&self, waker: &Waker) {
        let mut slot = self.waker.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(current) if current.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        }
    }

    pub(crate) fn take_waker(&self) -> Option<Waker> {
        self.waker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl WaiterHandle {
    pub(crate) fn new(class: Class, waker: &Waker) -> Self {
        Self {
            state: Arc::new(WaiterState::new(class, waker)),
        }
    }
}

impl fmt::Debug for WaiterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaiterState")
            .field("class", &self.class)
            .field("state", &self.state.load(Ordering::Relaxed))
            .finish()
    }
}

impl fmt::Debug for WaiterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state.fmt(f)
    }
}
