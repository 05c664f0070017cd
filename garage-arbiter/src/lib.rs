//! # garage-arbiter
//!
//! **A capacity-bounded, class-exclusive resource arbiter for Rust.**
//!
//! Two classes of actors (cars and trucks) share a pool of slots. At most one
//! class may occupy the pool at a time, occupancy never exceeds the capacity,
//! and when the pool drains while both classes are waiting, the class that was
//! not admitted last time goes next.
//!
//! ## Features
//! - Class exclusivity: cars and trucks never share the pool
//! - Starvation freedom: strict alternation between classes at drain events
//! - No runtime dependency: works with any async runtime, or plain OS threads
//! - Per-class queue strategies: FIFO/LIFO ordering of same-class waiters
//!
//! ## Quick Start
//! ```rust
//! use garage_arbiter::{Class, ResourcePool};
//!
//! #[tokio::main]
//! async fn main() {
//!     // A garage with 2 spots
//!     let pool = ResourcePool::new(2).unwrap();
//!
//!     // Park a car
//!     let car = pool.enter(Class::Car).await;
//!     assert_eq!(pool.current_class(), Some(Class::Car));
//!
//!     // Leave on drop, or explicitly
//!     car.leave();
//!     assert_eq!(pool.current_class(), None);
//! }
//! ```
//!
//! ## Threads
//!
//! ```rust
//! use garage_arbiter::{Class, ResourcePool};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let pool = Arc::new(ResourcePool::new(1).unwrap());
//!
//! let handles: Vec<_> = [Class::Car, Class::Truck, Class::Car]
//!     .into_iter()
//!     .map(|class| {
//!         let pool = Arc::clone(&pool);
//!         thread::spawn(move || {
//!             let _spot = pool.enter_blocking(class);
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(pool.occupied(), 0);
//! ```
//!
//! ## Advanced Usage
//!
//! Use [`PoolConfig`], [`QueueStrategy`] and [`AdmissionPolicy`] for
//! fine-grained control:
//!
//! ```rust
//! use garage_arbiter::{AdmissionPolicy, Class, PoolConfig, QueueStrategy, ResourcePool};
//!
//! let config = PoolConfig::new(4)
//!     .default_strategy(QueueStrategy::Fifo)
//!     .strategy(Class::Truck, QueueStrategy::Lifo)
//!     .admission_policy(AdmissionPolicy::YieldToWaiting);
//!
//! let pool = ResourcePool::with_config(config).unwrap();
//! assert_eq!(pool.capacity(), 4);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs, unreachable_pub, missing_debug_implementations)]
#![deny(rust_2018_idioms)]

mod blocking;
mod class;
mod config;
mod error;
mod pool;
mod vehicle;
mod wait_queue;

pub use class::{Class, ParseClassError};
pub use config::{AdmissionPolicy, PoolConfig, QueueStrategy};
pub use error::{EnterTimeoutError, InvalidConfig, TryEnterError};
pub use pool::{OwnedOccupancy, Occupancy, PoolSnapshot, ResourcePool};
pub use vehicle::Vehicle;

pub use pool::{Enter, EnterOwned};
