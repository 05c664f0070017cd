use garage_arbiter::{
    AdmissionPolicy, Class, InvalidConfig, PoolConfig, QueueStrategy, ResourcePool, TryEnterError,
};
use std::sync::Arc;

#[test]
fn test_pool_creation() {
    let pool = ResourcePool::new(5).unwrap();
    assert_eq!(pool.capacity(), 5);
    assert_eq!(pool.occupied(), 0);
    assert_eq!(pool.current_class(), None);
    assert_eq!(pool.waiting(Class::Car), 0);
    assert_eq!(pool.waiting(Class::Truck), 0);
}

#[test]
fn test_pool_creation_with_config() {
    let config = PoolConfig::new(7)
        .default_strategy(QueueStrategy::Fifo)
        .strategy(Class::Truck, QueueStrategy::Lifo)
        .admission_policy(AdmissionPolicy::YieldToWaiting);

    let pool = ResourcePool::with_config(config).unwrap();
    assert_eq!(pool.capacity(), 7);
    assert!(pool.snapshot().is_empty());
}

#[test]
fn test_zero_capacity_is_rejected() {
    let err = ResourcePool::new(0).unwrap_err();
    assert_eq!(err, InvalidConfig::ZeroCapacity);
    assert_eq!(err.to_string(), "pool capacity must be positive");
}

#[test]
fn test_capacity_above_max_is_rejected() {
    let err = ResourcePool::new(ResourcePool::MAX_CAPACITY + 1).unwrap_err();
    assert!(matches!(err, InvalidConfig::CapacityTooLarge(_)));
}

#[test]
fn test_max_capacity_is_accepted() {
    let pool = ResourcePool::new(ResourcePool::MAX_CAPACITY).unwrap();
    let _car = pool.try_enter(Class::Car).unwrap();
    assert_eq!(pool.occupied(), 1);
}

#[test]
fn test_try_enter_success() {
    let pool = ResourcePool::new(3).unwrap();

    let car1 = pool.try_enter(Class::Car).unwrap();
    assert_eq!(pool.occupied(), 1);
    assert_eq!(pool.current_class(), Some(Class::Car));

    let car2 = pool.try_enter(Class::Car).unwrap();
    let car3 = pool.try_enter(Class::Car).unwrap();
    assert_eq!(pool.occupied(), 3);

    drop(car1);
    drop(car2);
    assert_eq!(pool.occupied(), 1);
    assert_eq!(pool.current_class(), Some(Class::Car));

    drop(car3);
    assert_eq!(pool.occupied(), 0);
    assert_eq!(pool.current_class(), None);
}

#[test]
fn test_try_enter_errors() {
    let pool = ResourcePool::new(1).unwrap();
    let _truck = pool.try_enter(Class::Truck).unwrap();

    let err = pool.try_enter(Class::Car).unwrap_err();
    assert!(err.is_occupied());
    assert_eq!(err.to_string(), "pool occupied by the other class");

    let err = pool.try_enter(Class::Truck).unwrap_err();
    assert!(err.is_full());
    assert!(!err.is_queued());
}

#[tokio::test]
async fn test_try_enter_respects_queued_waiters() {
    let pool = ResourcePool::new(1).unwrap();
    let car = pool.enter(Class::Car).await;

    let mut truck = pool.enter(Class::Truck);
    assert!(futures::poll!(&mut truck).is_pending());

    drop(car);
    // The truck was handed the pool at the drain.
    assert_eq!(pool.current_class(), Some(Class::Truck));
    assert_eq!(pool.try_enter(Class::Car).unwrap_err(), TryEnterError::Occupied);

    let truck = truck.await;
    assert_eq!(truck.class(), Class::Truck);
}

#[test]
fn test_owned_occupancy_outlives_local_handle() {
    let pool = Arc::new(ResourcePool::new(2).unwrap());
    let car = Arc::clone(&pool).try_enter_owned(Class::Car).unwrap();
    assert!(Arc::ptr_eq(car.pool(), &pool));

    drop(pool);
    let pool = Arc::clone(car.pool());
    assert_eq!(pool.occupied(), 1);
    car.leave();
    assert_eq!(pool.occupied(), 0);
}

#[test]
fn test_snapshot_reports_every_field() {
    let pool = ResourcePool::new(2).unwrap();
    let before = pool.snapshot();
    assert_eq!(before.capacity, 2);
    assert_eq!(before.occupied, 0);
    assert_eq!(before.current_class, None);
    assert_eq!(before.last_admitted, Class::Truck);

    let _truck = pool.try_enter(Class::Truck).unwrap();
    let after = pool.snapshot();
    assert_eq!(after.occupied, 1);
    assert_eq!(after.current_class, Some(Class::Truck));
    assert_eq!(after.last_admitted, Class::Truck);
    assert_eq!(after.waiting(Class::Car), 0);
}

#[test]
fn test_error_display() {
    assert_eq!(TryEnterError::Full.to_string(), "no free slots");
    assert_eq!(TryEnterError::Queued.to_string(), "waiters are queued ahead");
    assert!(InvalidConfig::CapacityTooLarge(usize::MAX)
        .to_string()
        .contains("exceeds MAX_CAPACITY"));
}

#[test]
fn test_occupancy_debug() {
    let pool = ResourcePool::new(4).unwrap();
    let car = pool.try_enter(Class::Car).unwrap();
    let debug = format!("{:?}", car);
    assert!(debug.contains("Occupancy"));
    assert!(debug.contains("Car"));
}
