//! The enter futures carry no runtime dependency; these tests drive them on
//! the `futures`, `async-std` and `smol` executors.

use futures::executor::block_on;
use futures::future::join_all;
use garage_arbiter::{Class, ResourcePool, Vehicle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_futures_runtime_basic_usage() {
    block_on(async {
        let pool = ResourcePool::new(2).unwrap();

        let truck = pool.enter(Class::Truck).await;
        assert_eq!(pool.current_class(), Some(Class::Truck));
        assert!(pool.try_enter(Class::Car).is_err());

        drop(truck);
        let car = pool.enter(Class::Car).await;
        assert_eq!(pool.current_class(), Some(Class::Car));
        drop(car);
        assert!(pool.snapshot().is_empty());
    });
}

#[test]
fn test_futures_runtime_join_all() {
    block_on(async {
        let pool = ResourcePool::new(2).unwrap();
        let visits = AtomicUsize::new(0);

        let vehicles: Vec<_> = (0..8)
            .map(|i| {
                if i % 4 == 0 {
                    Vehicle::truck(format!("truck-{}", i))
                } else {
                    Vehicle::car(format!("car-{}", i))
                }
            })
            .collect();

        let visits_ref = &visits;
        let pool_ref = &pool;
        join_all(vehicles.iter().map(|vehicle| {
            vehicle.visit(pool_ref, move || async move {
                assert_eq!(pool_ref.current_class(), Some(vehicle.class()));
                visits_ref.fetch_add(1, Ordering::SeqCst);
            })
        }))
        .await;

        assert_eq!(visits.load(Ordering::SeqCst), 8);
        assert!(pool.snapshot().is_empty());
    });
}

#[test]
fn test_futures_runtime_wakes_from_other_thread() {
    let pool = Arc::new(ResourcePool::new(1).unwrap());
    let car = Arc::clone(&pool).try_enter_owned(Class::Car).unwrap();

    let releaser = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(10));
        drop(car);
    });

    let truck = block_on(Arc::clone(&pool).enter_owned(Class::Truck));
    assert_eq!(truck.class(), Class::Truck);
    releaser.join().unwrap();
}

#[async_std::test]
async fn test_async_std_runtime_handoff() {
    let pool = Arc::new(ResourcePool::new(2).unwrap());
    let car = Arc::clone(&pool).enter_owned(Class::Car).await;

    let trucks: Vec<_> = (0..2)
        .map(|_| async_std::task::spawn(Arc::clone(&pool).enter_owned(Class::Truck)))
        .collect();
    while pool.waiting(Class::Truck) < 2 {
        async_std::task::sleep(Duration::from_millis(1)).await;
    }

    drop(car);
    let trucks = join_all(trucks).await;
    assert!(trucks.iter().all(|t| t.class() == Class::Truck));
    assert_eq!(pool.occupied(), 2);
    drop(trucks);
    assert!(pool.snapshot().is_empty());
}

#[test]
fn test_smol_runtime_handoff() {
    smol::block_on(async {
        let pool = Arc::new(ResourcePool::new(1).unwrap());
        let truck = Arc::clone(&pool).enter_owned(Class::Truck).await;

        let car = smol::spawn(Arc::clone(&pool).enter_owned(Class::Car));
        while pool.waiting(Class::Car) == 0 {
            smol::Timer::after(Duration::from_millis(1)).await;
        }

        drop(truck);
        let car = car.await;
        assert_eq!(car.class(), Class::Car);
        assert_eq!(pool.current_class(), Some(Class::Car));
    });
}
