use garage_arbiter::{Class, PoolConfig, QueueStrategy, ResourcePool};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    smol::block_on(async {
        println!("=== Garage Arbiter with Smol Runtime ===\n");

        // Example 1: Basic usage
        basic_usage().await?;

        // Example 2: Configuration-based queuing
        configuration_example().await?;

        Ok(())
    })
}

async fn basic_usage() -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Basic Usage");
    println!("--------------");

    let pool = Arc::new(ResourcePool::new(1)?);
    let truck = Arc::clone(&pool).try_enter_owned(Class::Truck)?;
    println!("Truck parked immediately, occupied: {}", pool.occupied());

    let pool_clone = Arc::clone(&pool);
    let task = smol::spawn(async move {
        let car = pool_clone.enter(Class::Car).await;
        println!("Car parked after the truck left");
        car.class()
    });

    smol::Timer::after(Duration::from_millis(10)).await;
    println!("Cars waiting: {}", pool.waiting(Class::Car));
    drop(truck);

    let class = task.await;
    println!("Task finished with class {:#}\n", class);
    Ok(())
}

async fn configuration_example() -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Configuration-based Queuing");
    println!("------------------------------");

    // Trucks are served newest first, cars in arrival order
    let config = PoolConfig::new(1)
        .default_strategy(QueueStrategy::Fifo)
        .strategy(Class::Truck, QueueStrategy::Lifo);
    let pool = Arc::new(ResourcePool::with_config(config)?);

    let blocker = Arc::clone(&pool).enter_owned(Class::Car).await;

    let mut tasks = Vec::new();
    for id in 0..3 {
        let pool = Arc::clone(&pool);
        tasks.push(smol::spawn(async move {
            let _truck = pool.enter(Class::Truck).await;
            println!("  truck {} parked", id);
            smol::Timer::after(Duration::from_millis(5)).await;
        }));
        smol::Timer::after(Duration::from_millis(5)).await;
    }

    println!("Releasing the blocking car...");
    drop(blocker);

    for task in tasks {
        task.await;
    }
    println!("All trucks served\n");
    Ok(())
}
