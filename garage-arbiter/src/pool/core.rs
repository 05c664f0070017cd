use crate::class::{Class, ClassMap};
use crate::config::PoolConfig;
use crate::error::InvalidConfig;
use crate::pool::arbiter::PoolState;
use crate::wait_queue::{WaiterHandle, WakeList};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// A capacity-bounded pool shared by two mutually exclusive classes.
///
/// At most `capacity` actors occupy the pool at once, and they all belong to
/// the same [`Class`]. Actors that cannot enter are parked on a per-class
/// queue. When the last occupant leaves (a *drain event*), the pool picks
/// the next class: if both are waiting, the one that was not admitted last
/// time goes next, so neither class can be skipped twice in a row.
///
/// All state lives behind a single mutex, the *gate*. It is never held
/// across a suspension point.
///
/// # Examples
///
/// ```rust
/// use garage_arbiter::{Class, ResourcePool};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let pool = Arc::new(ResourcePool::new(2).unwrap());
///
/// let car = pool.enter(Class::Car).await;
/// assert!(pool.try_enter(Class::Truck).is_err());
///
/// drop(car);
/// let _truck = pool.enter(Class::Truck).await;
/// # }
/// ```
#[derive(Debug)]
pub struct ResourcePool {
    capacity: usize,
    /// The gate: every read or write of pool state happens under it
    gate: Mutex<PoolState>,
}

/// A consistent view of a [`ResourcePool`], taken under its gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Total number of slots.
    pub capacity: usize,
    /// Slots currently held, including waiters already granted but not yet resumed.
    pub occupied: usize,
    /// The class inside the pool, or `None` when it is empty.
    pub current_class: Option<Class>,
    /// The class most recently let into an empty pool.
    pub last_admitted: Class,
    waiting: ClassMap<usize>,
}

impl PoolSnapshot {
    /// Number of parked actors of `class` that have not been granted yet.
    pub fn waiting(&self, class: Class) -> usize {
        self.waiting[class]
    }

    /// Returns `true` if nobody occupies the pool.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}

impl ResourcePool {
    /// Maximum capacity (same headroom as a tokio semaphore).
    pub const MAX_CAPACITY: usize = usize::MAX >> 3;

    /// Creates a pool with `capacity` slots, FIFO queues and greedy admission.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidConfig::ZeroCapacity`] if `capacity` is zero and
    /// [`InvalidConfig::CapacityTooLarge`] above [`MAX_CAPACITY`](Self::MAX_CAPACITY).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{InvalidConfig, ResourcePool};
    ///
    /// let pool = ResourcePool::new(3).unwrap();
    /// assert_eq!(pool.capacity(), 3);
    ///
    /// assert_eq!(ResourcePool::new(0).unwrap_err(), InvalidConfig::ZeroCapacity);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, InvalidConfig> {
        Self::with_config(PoolConfig::new(capacity))
    }

    /// Creates a pool from a [`PoolConfig`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{AdmissionPolicy, PoolConfig, ResourcePool};
    ///
    /// let config = PoolConfig::new(2).admission_policy(AdmissionPolicy::YieldToWaiting);
    /// let pool = ResourcePool::with_config(config).unwrap();
    /// assert_eq!(pool.capacity(), 2);
    /// ```
    pub fn with_config(config: PoolConfig) -> Result<Self, InvalidConfig> {
        config.validate()?;
        debug!(capacity = config.capacity, policy = ?config.admission, "resource pool created");
        Ok(Self {
            capacity: config.capacity,
            gate: Mutex::new(PoolState::new(&config)),
        })
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of occupied slots.
    ///
    /// Like every reader here, the value may be stale as soon as it returns.
    pub fn occupied(&self) -> usize {
        self.lock().occupied
    }

    /// Returns the class currently inside, or `None` if the pool is empty.
    pub fn current_class(&self) -> Option<Class> {
        self.lock().current
    }

    /// Returns the number of parked actors of `class`.
    pub fn waiting(&self, class: Class) -> usize {
        self.lock().waiting(class)
    }

    /// Takes a consistent snapshot of the whole pool state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool};
    ///
    /// let pool = ResourcePool::new(2).unwrap();
    /// let _car = pool.try_enter(Class::Car).unwrap();
    ///
    /// let snapshot = pool.snapshot();
    /// assert_eq!(snapshot.occupied, 1);
    /// assert_eq!(snapshot.current_class, Some(Class::Car));
    /// assert_eq!(snapshot.waiting(Class::Truck), 0);
    /// ```
    pub fn snapshot(&self) -> PoolSnapshot {
        let state = self.lock();
        PoolSnapshot {
            capacity: state.capacity,
            occupied: state.occupied,
            current_class: state.current,
            last_admitted: state.last_admitted,
            waiting: ClassMap::from_fn(|class| state.waiting(class)),
        }
    }

    /// Acquire the gate.
    ///
    /// A poisoned gate means a panic interrupted a state transition; the
    /// counters can no longer be trusted, so this is fatal.
    pub(crate) fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.gate.lock().expect("resource pool gate poisoned")
    }

    /// Leave path shared by every occupancy guard.
    pub(crate) fn release(&self, class: Class) {
        let mut wake = WakeList::new();
        self.lock().release(class, &mut wake);
        // Wake outside the gate so granted tasks don't immediately contend on it.
        wake.wake_all();
    }

    /// Cancellation path for a dropped, still-parked enter future.
    pub(crate) fn cancel(&self, handle: &WaiterHandle) {
        let mut wake = WakeList::new();
        self.lock().cancel(handle, &mut wake);
        wake.wake_all();
    }
}
