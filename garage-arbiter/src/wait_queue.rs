//! Per-class wait queues.
//!
//! Each class owns one [`ClassQueue`] of parked waiters. Queues are only
//! touched under the pool gate; a waiter's own `granted` flag and waker slot
//! are the only pieces read from outside it.

pub(crate) mod queue;
pub(crate) mod waiter;
pub(crate) mod waker;

pub(crate) use queue::ClassQueue;
pub(crate) use waiter::{WaiterHandle, WaiterState};
pub(crate) use waker::WakeList;
