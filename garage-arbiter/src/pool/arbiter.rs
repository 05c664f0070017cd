//! Admission and hand-off decisions.
//!
//! Everything here runs with the pool gate held. Granting a waiter performs
//! its admission on its behalf (dequeue, set class, bump occupancy) so the
//! state is exact the moment the gate is released; the woken task only has
//! to notice that it was granted.

use crate::class::{Class, ClassMap};
use crate::config::{AdmissionPolicy, PoolConfig};
use crate::error::TryEnterError;
use crate::wait_queue::{ClassQueue, WaiterHandle, WakeList};
use std::task::Waker;
use tracing::{debug, trace};

/// The shared state block guarded by the pool gate.
#[derive(Debug)]
pub(crate) struct PoolState {
    pub(crate) capacity: usize,
    pub(crate) occupied: usize,
    pub(crate) current: Option<Class>,
    pub(crate) last_admitted: Class,
    pub(crate) queues: ClassMap<ClassQueue>,
    policy: AdmissionPolicy,
}

impl PoolState {
    pub(crate) fn new(config: &PoolConfig) -> Self {
        Self {
            capacity: config.capacity,
            occupied: 0,
            current: None,
            // Trucks count as last admitted so an initial tie favours cars.
            last_admitted: Class::Truck,
            queues: ClassMap::from_fn(|class| ClassQueue::new(config.resolve_strategy(class))),
            policy: config.admission,
        }
    }

    pub(crate) fn waiting(&self, class: Class) -> usize {
        self.queues[class].len()
    }

    /// Whether `class` may enter right now without queueing.
    pub(crate) fn check_admission(&self, class: Class) -> Result<(), TryEnterError> {
        if self.current.is_some_and(|current| current != class) {
            return Err(TryEnterError::Occupied);
        }
        if self.occupied >= self.capacity {
            return Err(TryEnterError::Full);
        }
        if !self.queues[class].is_empty() || self.yields_to(class.other()) {
            return Err(TryEnterError::Queued);
        }
        Ok(())
    }

    pub(crate) fn try_admit(&mut self, class: Class) -> Result<(), TryEnterError> {
        self.check_admission(class)?;
        self.admit(class);
        trace!(class = %class, occupied = self.occupied, capacity = self.capacity, "admitted");
        Ok(())
    }

    /// Park a waiter of `class`; it is granted later by [`release`](Self::release).
    pub(crate) fn enqueue(&mut self, class: Class, waker: &Waker) -> WaiterHandle {
        let handle = WaiterHandle::new(class, waker);
        self.queues[class].push_waiter(&handle);
        debug!(
            class = %class,
            waiting = self.waiting(class),
            current = ?self.current,
            occupied = self.occupied,
            "queued"
        );
        handle
    }

    /// Give back one slot held by `class`.
    pub(crate) fn release(&mut self, class: Class, wake: &mut WakeList) {
        debug_assert!(self.occupied > 0, "leave without a matching enter");
        debug_assert_eq!(self.current, Some(class), "leave by a class that is not inside");

        self.occupied -= 1;
        trace!(class = %class, occupied = self.occupied, "left");
        self.hand_off(wake);
    }

    /// Withdraw a parked waiter whose future was dropped.
    ///
    /// Returns `true` if the waiter had already been granted, in which case
    /// its slot is released here.
    pub(crate) fn cancel(&mut self, handle: &WaiterHandle, wake: &mut WakeList) -> bool {
        let class = handle.state.class;
        if handle.state.try_cancel() {
            self.queues[class].remove_waiter(&handle.state);
            debug!(class = %class, waiting = self.waiting(class), "waiter withdrawn");
            // A withdrawn waiter may have been what the occupying class was
            // yielding to.
            self.hand_off(wake);
            false
        } else {
            debug!(class = %class, "granted waiter dropped, releasing its slot");
            self.release(class, wake);
            true
        }
    }

    fn admit(&mut self, class: Class) {
        if self.current.is_none() {
            self.current = Some(class);
            self.last_admitted = class;
        }
        self.occupied += 1;
    }

    fn yields_to(&self, waiting: Class) -> bool {
        self.policy == AdmissionPolicy::YieldToWaiting && !self.queues[waiting].is_empty()
    }

    fn hand_off(&mut self, wake: &mut WakeList) {
        match self.current {
            Some(current) if self.occupied > 0 => self.refill(current, wake),
            _ => self.drain(wake),
        }
    }

    /// The pool is still occupied: top it up with waiters of the same class.
    fn refill(&mut self, current: Class, wake: &mut WakeList) {
        if self.yields_to(current.other()) {
            return;
        }
        let free = self.capacity - self.occupied;
        let granted = self.grant(current, free, wake);
        if granted > 0 {
            trace!(class = %current, granted, occupied = self.occupied, "refilled");
        }
    }

    /// Drain event: choose the next class and admit a batch of it.
    fn drain(&mut self, wake: &mut WakeList) {
        self.current = None;

        let next = match (
            self.queues[Class::Car].is_empty(),
            self.queues[Class::Truck].is_empty(),
        ) {
            (true, true) => {
                trace!("drained with no waiters");
                return;
            }
            (false, true) => Class::Car,
            (true, false) => Class::Truck,
            (false, false) => self.last_admitted.other(),
        };

        self.current = Some(next);
        self.last_admitted = next;
        let granted = self.grant(next, self.capacity, wake);
        debug!(
            class = %next,
            granted,
            still_waiting = self.waiting(next),
            other_waiting = self.waiting(next.other()),
            "hand-off"
        );
    }

    /// Grant up to `limit` waiters of `class`, admitting each one.
    fn grant(&mut self, class: Class, limit: usize, wake: &mut WakeList) -> usize {
        let mut granted = 0;
        while granted < limit {
            let Some(waker) = self.queues[class].grant_next() else {
                break;
            };
            self.admit(class);
            if let Some(waker) = waker {
                wake.push(waker);
            }
            granted += 1;
        }
        debug_assert!(self.occupied <= self.capacity);
        granted
    }
}
