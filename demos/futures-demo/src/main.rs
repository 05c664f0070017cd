//! Runtime-agnostic demo for garage-arbiter.
//! The enter futures work on any executor that drives `std::future::Future`.

use futures::executor::block_on;
use futures::future::join_all;
use garage_arbiter::{Class, ResourcePool, Vehicle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    println!("=== Garage Arbiter with Generic Futures ===\n");

    block_on(async {
        // Example 1: Non-blocking entry
        try_enter_usage()?;

        // Example 2: Many vehicles on one executor
        joined_visits().await?;

        Ok(())
    })
}

fn try_enter_usage() -> Result<(), Box<dyn std::error::Error>> {
    println!("1. Non-blocking Entry");
    println!("---------------------");

    let pool = ResourcePool::new(2)?;
    let first = pool.try_enter(Class::Truck)?;
    let second = pool.try_enter(Class::Truck)?;
    println!("Two trucks parked, occupied: {}", pool.occupied());

    for class in Class::ALL {
        match pool.try_enter(class) {
            Ok(_) => println!("Unexpected success for {:#}", class),
            Err(e) => println!("{:#} refused: {}", class, e),
        }
    }

    drop((first, second));
    println!("Garage empty: {}\n", pool.snapshot().is_empty());
    Ok(())
}

async fn joined_visits() -> Result<(), Box<dyn std::error::Error>> {
    println!("2. Joined Visits");
    println!("----------------");

    let pool = ResourcePool::new(2)?;
    let vehicles: Vec<_> = "CTCCTTC"
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let class: Class = ch.to_string().parse()?;
            Ok(Vehicle::new(class, format!("{:#}-{}", class, i)))
        })
        .collect::<Result<_, garage_arbiter::ParseClassError>>()?;

    let pool_ref = &pool;
    let order = join_all(vehicles.iter().map(|vehicle| {
        vehicle.visit(pool_ref, move || async move {
            println!(
                "  {} parked, occupancy {}/{}",
                vehicle.label(),
                pool_ref.occupied(),
                pool_ref.capacity()
            );
            vehicle.class()
        })
    }))
    .await;

    println!("Visited classes: {:?}", order);
    println!("Final snapshot: {:?}\n", pool.snapshot());
    Ok(())
}
