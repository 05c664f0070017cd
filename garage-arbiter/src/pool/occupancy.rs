use crate::class::Class;
use crate::pool::core::ResourcePool;
use std::fmt;
use std::sync::Arc;

/// Proof that an actor occupies a slot of a [`ResourcePool`].
///
/// Dropping it (or calling [`leave`](Self::leave)) performs the leave
/// step: the slot is freed and, if the pool drains, the next class is
/// handed the pool. Leaving without having entered, or leaving twice, cannot
/// be expressed.
///
/// # Examples
///
/// ```rust
/// use garage_arbiter::{Class, ResourcePool};
///
/// # #[tokio::main]
/// # async fn main() {
/// let pool = ResourcePool::new(3).unwrap();
/// let car = pool.enter(Class::Car).await;
/// assert_eq!(car.class(), Class::Car);
/// assert_eq!(pool.occupied(), 1);
///
/// car.leave();
/// assert_eq!(pool.occupied(), 0);
/// # }
/// ```
#[must_use = "the slot is released as soon as the occupancy is dropped"]
pub struct Occupancy<'a> {
    pub(crate) pool: &'a ResourcePool,
    pub(crate) class: Class,
}

/// An owned version of [`Occupancy`], holding the pool through an `Arc`.
///
/// # Examples
///
/// ```rust
/// use garage_arbiter::{Class, ResourcePool};
/// use std::sync::Arc;
///
/// let pool = Arc::new(ResourcePool::new(1).unwrap());
/// let truck = Arc::clone(&pool).try_enter_owned(Class::Truck).unwrap();
///
/// std::thread::spawn(move || truck.leave()).join().unwrap();
/// assert_eq!(pool.current_class(), None);
/// ```
#[must_use = "the slot is released as soon as the occupancy is dropped"]
pub struct OwnedOccupancy {
    pub(crate) pool: Arc<ResourcePool>,
    pub(crate) class: Class,
}

impl<'a> Occupancy<'a> {
    /// The class this slot was granted to.
    pub fn class(&self) -> Class {
        self.class
    }

    /// The pool this slot belongs to.
    pub fn pool(&self) -> &'a ResourcePool {
        self.pool
    }

    /// Leave the pool now. Equivalent to dropping the occupancy.
    pub fn leave(self) {
        drop(self);
    }
}

impl OwnedOccupancy {
    /// The class this slot was granted to.
    pub fn class(&self) -> Class {
        self.class
    }

    /// The pool this slot belongs to.
    pub fn pool(&self) -> &Arc<ResourcePool> {
        &self.pool
    }

    /// Leave the pool now. Equivalent to dropping the occupancy.
    pub fn leave(self) {
        drop(self);
    }
}

impl<'a> Drop for Occupancy<'a> {
    fn drop(&mut self) {
        self.pool.release(self.class);
    }
}

impl Drop for OwnedOccupancy {
    fn drop(&mut self) {
        self.pool.release(self.class);
    }
}

impl<'a> fmt::Debug for Occupancy<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Occupancy")
            .field("class", &self.class)
            .field("capacity", &self.pool.capacity())
            .finish()
    }
}

impl fmt::Debug for OwnedOccupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedOccupancy")
            .field("class", &self.class)
            .field("capacity", &self.pool.capacity())
            .finish()
    }
}
