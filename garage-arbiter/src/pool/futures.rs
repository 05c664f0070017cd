use crate::class::Class;
use crate::pool::core::ResourcePool;
use crate::pool::occupancy::{OwnedOccupancy, Occupancy};
use crate::wait_queue::WaiterHandle;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::debug;

/// A future representing an actor waiting to enter a [`ResourcePool`].
///
/// Returned by [`ResourcePool::enter`]. Resolves once the actor is admitted;
/// it never fails. Dropping it while parked withdraws the actor from its
/// class queue, or gives the slot back if it had already been granted.
///
/// # Examples
///
/// ```rust
/// use garage_arbiter::{Class, ResourcePool};
///
/// # #[tokio::main]
/// # async fn main() {
/// let pool = ResourcePool::new(1).unwrap();
/// let enter = pool.enter(Class::Truck);
/// let truck = enter.await;
/// assert_eq!(truck.class(), Class::Truck);
/// # }
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Enter<'a> {
    pub(crate) pool: &'a ResourcePool,
    pub(crate) class: Class,
    pub(crate) stage: Stage,
}

/// A future representing an actor waiting to enter a shared [`ResourcePool`].
///
/// Returned by [`ResourcePool::enter_owned`]; behaves like [`Enter`] but
/// resolves to an [`OwnedOccupancy`] that can move across tasks.
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
/// let car = Arc::clone(&pool).enter_owned(Class::Car).await;
/// tokio::spawn(async move { drop(car) }).await.unwrap();
/// assert_eq!(pool.occupied(), 0);
/// # }
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct EnterOwned {
    pub(crate) pool: Arc<ResourcePool>,
    pub(crate) class: Class,
    pub(crate) stage: Stage,
}

#[derive(Debug)]
pub(crate) enum Stage {
    /// Not polled yet.
    Arriving,
    /// Parked on the class queue.
    Parked(WaiterHandle),
    /// Admitted and handed out.
    Done,
}

impl Stage {
    /// Drive one admission attempt.
    ///
    /// First poll: try to admit under the gate, otherwise park. Later polls:
    /// only the waiter's own flag is read; the grant already did the
    /// bookkeeping.
    fn poll_admission(&mut self, pool: &ResourcePool, class: Class, cx: &mut Context<'_>) -> Poll<()> {
        match self {
            Stage::Arriving => {
                let mut state = pool.lock();
                if state.try_admit(class).is_ok() {
                    drop(state);
                    *self = Stage::Done;
                    return Poll::Ready(());
                }
                let handle = state.enqueue(class, cx.waker());
                drop(state);
                *self = Stage::Parked(handle);
                Poll::Pending
            }
            Stage::Parked(handle) => {
                if !handle.state.is_granted() {
                    handle.state.register(cx.waker());
                    // A grant that raced with the registration already
                    // consumed the old waker.
                    if !handle.state.is_granted() {
                        return Poll::Pending;
                    }
                }
                *self = Stage::Done;
                Poll::Ready(())
            }
            Stage::Done => panic!("`Enter` polled after completion"),
        }
    }

    fn cancel(&mut self, pool: &ResourcePool, class: Class) {
        if let Stage::Parked(handle) = std::mem::replace(self, Stage::Done) {
            debug!(class = %class, "enter cancelled while parked");
            pool.cancel(&handle);
        }
    }
}

impl<'a> Future for Enter<'a> {
    type Output = Occupancy<'a>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match this.stage.poll_admission(this.pool, this.class, cx) {
            Poll::Ready(()) => Poll::Ready(Occupancy {
                pool: this.pool,
                class: this.class,
            }),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<'a> Drop for Enter<'a> {
    fn drop(&mut self) {
        self.stage.cancel(self.pool, self.class);
    }
}

impl Future for EnterOwned {
    type Output = OwnedOccupancy;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        match this.stage.poll_admission(&this.pool, this.class, cx) {
            Poll::Ready(()) => Poll::Ready(OwnedOccupancy {
                pool: Arc::clone(&this.pool),
                class: this.class,
            }),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for EnterOwned {
    fn drop(&mut self) {
        self.stage.cancel(&self.pool, self.class);
    }
}

impl<'a> fmt::Debug for Enter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enter")
            .field("class", &self.class)
            .field("queued", &matches!(self.stage, Stage::Parked(_)))
            .finish()
    }
}

impl fmt::Debug for EnterOwned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnterOwned")
            .field("class", &self.class)
            .field("queued", &matches!(self.stage, Stage::Parked(_)))
            .finish()
    }
}
