use crate::class::Class;
use crate::pool::ResourcePool;
use std::future::Future;
use tracing::{debug, debug_span, Instrument};

/// An actor that visits a [`ResourcePool`] exactly once.
///
/// The label is only used for diagnostics; admission depends on the class
/// alone.
///
/// # Examples
///
/// ```rust
/// use garage_arbiter::{ResourcePool, Vehicle};
///
/// let pool = ResourcePool::new(2).unwrap();
/// let van = Vehicle::car("van-7");
///
/// let seen = van.visit_blocking(&pool, || pool.occupied());
/// assert_eq!(seen, 1);
/// assert_eq!(pool.occupied(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    class: Class,
    label: String,
}

impl Vehicle {
    /// Creates a vehicle of the given class.
    pub fn new(class: Class, label: impl Into<String>) -> Self {
        Self {
            class,
            label: label.into(),
        }
    }

    /// Creates a car.
    pub fn car(label: impl Into<String>) -> Self {
        Self::new(Class::Car, label)
    }

    /// Creates a truck.
    pub fn truck(label: impl Into<String>) -> Self {
        Self::new(Class::Truck, label)
    }

    /// The vehicle's class.
    pub fn class(&self) -> Class {
        self.class
    }

    /// The vehicle's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Arrive, park, run `hold` while parked, then leave.
    ///
    /// The slot is released even if `hold` is cancelled midway.
    pub async fn visit<F, Fut, T>(&self, pool: &ResourcePool, hold: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let span = debug_span!("vehicle", label = %self.label, class = %self.class);
        async move {
            debug!("arrives");
            let spot = pool.enter(self.class).await;
            debug!(occupied = pool.occupied(), capacity = pool.capacity(), "parks");

            let output = hold().await;

            spot.leave();
            debug!(remaining = pool.occupied(), "leaves");
            output
        }
        .instrument(span)
        .await
    }

    /// Blocking variant of [`visit`](Self::visit) for OS threads.
    pub fn visit_blocking<T>(&self, pool: &ResourcePool, hold: impl FnOnce() -> T) -> T {
        let span = debug_span!("vehicle", label = %self.label, class = %self.class);
        let _entered = span.enter();

        debug!("arrives");
        let spot = pool.enter_blocking(self.class);
        debug!(occupied = pool.occupied(), capacity = pool.capacity(), "parks");

        let output = hold();

        spot.leave();
        debug!(remaining = pool.occupied(), "leaves");
        output
    }
}
