use garage_arbiter::{Class, PoolConfig, QueueStrategy, ResourcePool, Vehicle};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_tokio_runtime_basic_usage() {
    let pool = ResourcePool::new(3).unwrap();

    let car1 = pool.enter(Class::Car).await;
    let car2 = pool.enter(Class::Car).await;
    assert_eq!(pool.occupied(), 2);

    // Should fail while cars are inside
    assert!(pool.try_enter(Class::Truck).is_err());

    drop(car1);
    assert_eq!(pool.occupied(), 1);

    drop(car2);
    assert_eq!(pool.occupied(), 0);
    assert_eq!(pool.current_class(), None);
}

#[tokio::test]
async fn test_tokio_runtime_queue_strategy() {
    let config = PoolConfig::new(1)
        .default_strategy(QueueStrategy::Fifo)
        .strategy(Class::Truck, QueueStrategy::Lifo);
    let pool = Arc::new(ResourcePool::with_config(config).unwrap());

    // Hold the slot with a car so every truck has to queue
    let hold = Arc::clone(&pool).enter_owned(Class::Car).await;

    let results = Arc::new(tokio::sync::Mutex::new(Vec::new()));
    let mut handles = vec![];
    for id in 0..3 {
        let pool_clone = Arc::clone(&pool);
        let results_clone = Arc::clone(&results);
        handles.push(tokio::spawn(async move {
            let _truck = pool_clone.enter(Class::Truck).await;
            results_clone.lock().await.push(id);
        }));
        while pool.waiting(Class::Truck) <= id {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }

    drop(hold);
    for handle in handles {
        handle.await.unwrap();
    }

    // Latest arrival first
    assert_eq!(*results.lock().await, vec![2, 1, 0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_runtime_mixed_traffic() {
    let pool = Arc::new(ResourcePool::new(2).unwrap());
    let mut handles = vec![];

    for i in 0..12 {
        let pool_clone = Arc::clone(&pool);
        let vehicle = if i % 2 == 0 {
            Vehicle::car(format!("car-{}", i))
        } else {
            Vehicle::truck(format!("truck-{}", i))
        };
        handles.push(tokio::spawn(async move {
            let pool_ref = &*pool_clone;
            let class = vehicle.class();
            vehicle
                .visit(pool_ref, move || async move {
                    assert!(pool_ref.occupied() <= 2);
                    assert_eq!(pool_ref.current_class(), Some(class));
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    class
                })
                .await
        }));
    }

    let mut cars = 0;
    for handle in handles {
        if handle.await.unwrap() == Class::Car {
            cars += 1;
        }
    }
    assert_eq!(cars, 6);
    assert!(pool.snapshot().is_empty());
}

#[tokio::test]
async fn test_tokio_spawn_blocking_interop() {
    let pool = Arc::new(ResourcePool::new(1).unwrap());
    let truck = Arc::clone(&pool).enter_owned(Class::Truck).await;

    let pool_clone = Arc::clone(&pool);
    let blocking = tokio::task::spawn_blocking(move || {
        let car = pool_clone.enter_blocking(Class::Car);
        car.class()
    });

    while pool.waiting(Class::Car) == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    drop(truck);

    assert_eq!(blocking.await.unwrap(), Class::Car);
    assert!(pool.snapshot().is_empty());
}
