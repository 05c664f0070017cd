use std::fmt;
use std::time::Duration;

/// Error returned when a pool is created with an unusable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidConfig {
    /// The capacity is zero, so the pool could never admit anyone.
    ZeroCapacity,
    /// The capacity exceeds [`ResourcePool::MAX_CAPACITY`](crate::ResourcePool::MAX_CAPACITY).
    CapacityTooLarge(usize),
}

impl fmt::Display for InvalidConfig {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidConfig::ZeroCapacity => write!(fmt, "pool capacity must be positive"),
            InvalidConfig::CapacityTooLarge(capacity) => write!(
                fmt,
                "pool capacity {} exceeds MAX_CAPACITY ({})",
                capacity,
                crate::ResourcePool::MAX_CAPACITY
            ),
        }
    }
}

impl std::error::Error for InvalidConfig {}

/// Error returned from `try_enter` operations.
#[derive(Debug, PartialEq, Eq)]
pub enum TryEnterError {
    /// The other class currently occupies the pool.
    Occupied,
    /// Every slot is taken by the caller's own class.
    Full,
    /// Waiters are queued ahead of the caller and must be served first.
    Queued,
}

impl TryEnterError {
    /// Returns `true` if the other class occupies the pool.
    pub fn is_occupied(&self) -> bool {
        matches!(self, TryEnterError::Occupied)
    }

    /// Returns `true` if the pool is at capacity.
    pub fn is_full(&self) -> bool {
        matches!(self, TryEnterError::Full)
    }

    /// Returns `true` if earlier waiters have to be served first.
    pub fn is_queued(&self) -> bool {
        matches!(self, TryEnterError::Queued)
    }
}

impl fmt::Display for TryEnterError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TryEnterError::Occupied => write!(fmt, "pool occupied by the other class"),
            TryEnterError::Full => write!(fmt, "no free slots"),
            TryEnterError::Queued => write!(fmt, "waiters are queued ahead"),
        }
    }
}

impl std::error::Error for TryEnterError {}

/// Error returned from `enter_blocking_timeout` when the deadline passes
/// before the caller is admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnterTimeoutError(pub(crate) Duration);

impl EnterTimeoutError {
    /// The timeout that elapsed.
    pub fn timeout(&self) -> Duration {
        self.0
    }
}

impl fmt::Display for EnterTimeoutError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "not admitted within {:?}", self.0)
    }
}

impl std::error::Error for EnterTimeoutError {}
