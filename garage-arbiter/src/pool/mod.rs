pub(crate) mod arbiter;
pub(crate) mod core;
pub(crate) mod futures;
pub(crate) mod methods;
pub(crate) mod occupancy;

// Re-export main types
pub use self::core::{PoolSnapshot, ResourcePool};
pub use self::futures::{Enter, EnterOwned};
pub use self::occupancy::{OwnedOccupancy, Occupancy};
