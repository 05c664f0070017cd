use crate::blocking;
use crate::class::Class;
use crate::error::{EnterTimeoutError, TryEnterError};
use crate::pool::futures::{Enter, EnterOwned, Stage};
use crate::pool::occupancy::{OwnedOccupancy, Occupancy};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

impl super::ResourcePool {
    // === Async enter methods ===

    /// Enters the pool as an actor of `class`.
    ///
    /// If the pool is empty, or holds the same class with a free slot and
    /// nobody of that class queued ahead, the actor is admitted on the
    /// first poll. Otherwise it parks on its class queue until a leave
    /// hands it a slot.
    ///
    /// # Returns
    ///
    /// A future that resolves to an [`Occupancy`]; entering never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let pool = ResourcePool::new(2).unwrap();
    /// let a = pool.enter(Class::Car).await;
    /// let b = pool.enter(Class::Car).await;
    /// assert_eq!(pool.occupied(), 2);
    /// # drop((a, b));
    /// # }
    /// ```
    pub fn enter(&self, class: Class) -> Enter<'_> {
        Enter {
            pool: self,
            class,
            stage: Stage::Arriving,
        }
    }

    /// Enters a shared pool, returning an occupancy that owns an `Arc` to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool};
    /// use std::sync::Arc;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let pool = Arc::new(ResourcePool::new(1).unwrap());
    ///
    /// let handle = tokio::spawn(Arc::clone(&pool).enter_owned(Class::Truck));
    /// let truck = handle.await.unwrap();
    /// assert_eq!(truck.class(), Class::Truck);
    /// # }
    /// ```
    pub fn enter_owned(self: Arc<Self>, class: Class) -> EnterOwned {
        EnterOwned {
            pool: self,
            class,
            stage: Stage::Arriving,
        }
    }

    // === Non-blocking enter methods ===

    /// Attempts to enter without waiting.
    ///
    /// # Returns
    ///
    /// * `Ok(Occupancy)` - Admitted immediately
    /// * `Err(TryEnterError::Occupied)` - The other class is inside
    /// * `Err(TryEnterError::Full)` - No free slot
    /// * `Err(TryEnterError::Queued)` - Earlier waiters must go first
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool, TryEnterError};
    ///
    /// let pool = ResourcePool::new(1).unwrap();
    /// let _car = pool.try_enter(Class::Car).unwrap();
    ///
    /// assert_eq!(pool.try_enter(Class::Car).unwrap_err(), TryEnterError::Full);
    /// assert_eq!(pool.try_enter(Class::Truck).unwrap_err(), TryEnterError::Occupied);
    /// ```
    pub fn try_enter(&self, class: Class) -> Result<Occupancy<'_>, TryEnterError> {
        self.lock().try_admit(class)?;
        Ok(Occupancy { pool: self, class })
    }

    /// Attempts to enter a shared pool without waiting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool};
    /// use std::sync::Arc;
    ///
    /// let pool = Arc::new(ResourcePool::new(1).unwrap());
    /// let truck = Arc::clone(&pool).try_enter_owned(Class::Truck).unwrap();
    /// assert!(Arc::clone(&pool).try_enter_owned(Class::Car).is_err());
    /// drop(truck);
    /// ```
    pub fn try_enter_owned(self: Arc<Self>, class: Class) -> Result<OwnedOccupancy, TryEnterError> {
        self.lock().try_admit(class)?;
        Ok(OwnedOccupancy { pool: self, class })
    }

    // === Blocking enter methods ===

    /// Enters the pool, parking the current thread until admitted.
    ///
    /// Do not call this from inside an async runtime worker.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool};
    /// use std::sync::Arc;
    /// use std::thread;
    ///
    /// let pool = Arc::new(ResourcePool::new(1).unwrap());
    /// let car = pool.enter_blocking(Class::Car);
    ///
    /// let pool_clone = Arc::clone(&pool);
    /// let truck = thread::spawn(move || {
    ///     let truck = pool_clone.enter_blocking(Class::Truck);
    ///     truck.class()
    /// });
    ///
    /// drop(car);
    /// assert_eq!(truck.join().unwrap(), Class::Truck);
    /// ```
    pub fn enter_blocking(&self, class: Class) -> Occupancy<'_> {
        blocking::block_on(self.enter(class))
    }

    /// Enters the pool, parking the current thread for at most `timeout`.
    ///
    /// On expiry the caller is withdrawn from its class queue and the pool
    /// is left exactly as if it had never arrived.
    ///
    /// # Errors
    ///
    /// Returns [`EnterTimeoutError`] if the actor was not admitted in time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use garage_arbiter::{Class, ResourcePool};
    /// use std::time::Duration;
    ///
    /// let pool = ResourcePool::new(1).unwrap();
    /// let _car = pool.enter_blocking(Class::Car);
    ///
    /// let result = pool.enter_blocking_timeout(Class::Truck, Duration::from_millis(10));
    /// assert!(result.is_err());
    /// assert_eq!(pool.waiting(Class::Truck), 0);
    /// ```
    pub fn enter_blocking_timeout(
        &self,
        class: Class,
        timeout: Duration,
    ) -> Result<Occupancy<'_>, EnterTimeoutError> {
        blocking::block_on_timeout(self.enter(class), timeout).ok_or_else(|| {
            debug!(class = %class, ?timeout, "enter timed out");
            EnterTimeoutError(timeout)
        })
    }
}
