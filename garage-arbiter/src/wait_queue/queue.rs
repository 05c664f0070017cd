use crate::config::QueueStrategy;
use crate::wait_queue::waiter::{WaiterHandle, WaiterState};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::task::Waker;

/// Wait queue for one class
pub(crate) struct ClassQueue {
    waiters: VecDeque<Arc<WaiterState>>,
    strategy: QueueStrategy,
}

impl ClassQueue {
    pub(crate) fn new(strategy: QueueStrategy) -> Self {
        Self {
            waiters: VecDeque::with_capacity(4),
            strategy,
        }
    }

    /// Park a new waiter; the next one to be granted is always at the front.
    pub(crate) fn push_waiter(&mut self, handle: &WaiterHandle) {
        let waiter = Arc::clone(&handle.state);
        match self.strategy {
            QueueStrategy::Fifo => self.waiters.push_back(waiter),
            QueueStrategy::Lifo => self.waiters.push_front(waiter),
        }
    }

    /// Number of parked, not yet granted waiters.
    pub(crate) fn len(&self) -> usize {
        self.waiters.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.waiters.is_empty()
    }

    /// Grant the waiter at the front of the queue and return its waker.
    ///
    /// The outer `Option` is `None` when the queue is empty.
    pub(crate) fn grant_next(&mut self) -> Option<Option<Waker>> {
        while let Some(waiter) = self.waiters.pop_front() {
            // Cancelled waiters remove themselves under the gate, so this
            // only skips entries left behind by a panicking drop.
            if waiter.try_grant() {
                return Some(waiter.take_waker());
            }
        }
        None
    }

    pub(crate) fn remove_waiter(&mut self, waiter: &Arc<WaiterState>) -> bool {
        match self.waiters.iter().position(|w| Arc::ptr_eq(w, waiter)) {
            Some(pos) => {
                self.waiters.remove(pos);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ClassQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassQueue")
            .field("waiters", &self.waiters.len())
            .field("strategy", &self.strategy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use futures::task::noop_waker_ref;

    fn handles(n: usize) -> Vec<WaiterHandle> {
        (0..n)
            .map(|_| WaiterHandle::new(Class::Car, noop_waker_ref()))
            .collect()
    }

    #[test]
    fn test_fifo_grants_in_arrival_order() {
        let mut queue = ClassQueue::new(QueueStrategy::Fifo);
        let handles = handles(3);
        for h in &handles {
            queue.push_waiter(h);
        }

        assert!(queue.grant_next().is_some());
        assert!(handles[0].state.is_granted());
        assert!(!handles[1].state.is_granted());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_lifo_grants_latest_first() {
        let mut queue = ClassQueue::new(QueueStrategy::Lifo);
        let handles = handles(3);
        for h in &handles {
            queue.push_waiter(h);
        }

        assert!(queue.grant_next().is_some());
        assert!(handles[2].state.is_granted());
        assert!(!handles[0].state.is_granted());
    }

    #[test]
    fn test_remove_waiter() {
        let mut queue = ClassQueue::new(QueueStrategy::Fifo);
        let handles = handles(2);
        for h in &handles {
            queue.push_waiter(h);
        }

        assert!(queue.remove_waiter(&handles[0].state));
        assert!(!queue.remove_waiter(&handles[0].state));
        assert_eq!(queue.len(), 1);

        assert!(queue.grant_next().is_some());
        assert!(handles[1].state.is_granted());
        assert!(queue.grant_next().is_none());
        assert!(queue.is_empty());
    }
}
