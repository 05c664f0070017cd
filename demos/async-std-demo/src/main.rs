use garage_arbiter::{Class, ResourcePool, TryEnterError, Vehicle};
use std::sync::Arc;
use std::time::Duration;

#[async_std::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    println!("=== Garage Arbiter with Async-std Runtime ===\n");

    // Example 1: Basic usage
    basic_usage().await?;

    // Example 2: Drain hand-off
    drain_handoff().await?;

    Ok(())
}

async fn basic_usage() -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Basic Usage");
    println!("--------------");

    let pool = ResourcePool::new(2)?;
    println!("Created garage with 2 spots");

    let car = pool.enter(Class::Car).await;
    println!("Car parked, occupied: {}", pool.occupied());

    match pool.try_enter(Class::Truck) {
        Err(TryEnterError::Occupied) => println!("Truck refused: cars are inside"),
        other => println!("Unexpected: {:?}", other.map(|o| o.class())),
    }

    car.leave();
    println!("Car left, current class: {:?}\n", pool.current_class());
    Ok(())
}

async fn drain_handoff() -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Drain Hand-off");
    println!("-----------------");

    let pool = Arc::new(ResourcePool::new(2)?);
    let cars = [
        Arc::clone(&pool).enter_owned(Class::Car).await,
        Arc::clone(&pool).enter_owned(Class::Car).await,
    ];
    println!("Two cars parked, garage full");

    let mut handles = Vec::new();
    for i in 0..3 {
        let pool = Arc::clone(&pool);
        handles.push(async_std::task::spawn(async move {
            let truck = Vehicle::truck(format!("truck-{}", i));
            truck
                .visit(&pool, || async_std::task::sleep(Duration::from_millis(20)))
                .await;
            println!("  {} done", truck.label());
        }));
    }

    async_std::task::sleep(Duration::from_millis(10)).await;
    println!("Trucks waiting: {}", pool.waiting(Class::Truck));

    for (i, car) in cars.into_iter().enumerate() {
        drop(car);
        println!(
            "Car {} left, current class: {:?}, occupied: {}",
            i,
            pool.current_class(),
            pool.occupied()
        );
    }

    for handle in handles {
        handle.await;
    }
    println!("All trucks served\n");
    Ok(())
}
