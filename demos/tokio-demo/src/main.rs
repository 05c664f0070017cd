use garage_arbiter::{AdmissionPolicy, Class, PoolConfig, ResourcePool, Vehicle};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,garage_arbiter=debug")),
        )
        .init();

    // Example 1: A garage with mixed traffic
    mixed_traffic().await?;

    // Example 2: Single slot, strict alternation
    single_slot().await?;

    // Example 3: Yielding to the waiting class
    yielding_policy().await?;

    Ok(())
}

async fn mixed_traffic() -> Result<(), Box<dyn std::error::Error>> {
    info!("1. Mixed traffic");

    let pool = Arc::new(ResourcePool::new(3)?);
    let arrivals = "CCTCTTCCT";

    let mut handles = Vec::new();
    for (i, ch) in arrivals.chars().enumerate() {
        let class: Class = ch.to_string().parse()?;
        let vehicle = Vehicle::new(class, format!("{:#}-{}", class, i));
        let pool = Arc::clone(&pool);

        handles.push(tokio::spawn(async move {
            vehicle
                .visit(&pool, || tokio::time::sleep(Duration::from_millis(40)))
                .await;
        }));

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    for handle in handles {
        handle.await?;
    }

    let snapshot = pool.snapshot();
    info!(?snapshot, "all vehicles have been processed");
    Ok(())
}

async fn single_slot() -> Result<(), Box<dyn std::error::Error>> {
    info!("2. Single slot");

    let pool = Arc::new(ResourcePool::new(1)?);
    let order = Arc::new(tokio::sync::Mutex::new(Vec::new()));

    let blocker = Arc::clone(&pool).enter_owned(Class::Car).await;

    let mut handles = Vec::new();
    for (i, class) in [Class::Car, Class::Car, Class::Truck, Class::Truck]
        .into_iter()
        .enumerate()
    {
        let pool = Arc::clone(&pool);
        let order = Arc::clone(&order);
        handles.push(tokio::spawn(async move {
            let _spot = pool.enter(class).await;
            order.lock().await.push(format!("{}{}", class, i));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }));
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    info!(
        cars = pool.waiting(Class::Car),
        trucks = pool.waiting(Class::Truck),
        "releasing the blocking car"
    );
    drop(blocker);

    for handle in handles {
        handle.await?;
    }

    info!(order = ?*order.lock().await, "admission order");
    Ok(())
}

async fn yielding_policy() -> Result<(), Box<dyn std::error::Error>> {
    info!("3. Yield to waiting");

    let config = PoolConfig::new(2).admission_policy(AdmissionPolicy::YieldToWaiting);
    let pool = Arc::new(ResourcePool::with_config(config)?);

    let mut handles = Vec::new();
    for i in 0..4 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move {
            for round in 0..3 {
                let car = pool.enter(Class::Car).await;
                info!(car = i, round, occupied = pool.occupied(), "car parked");
                tokio::time::sleep(Duration::from_millis(15)).await;
                car.leave();
            }
        }));
    }

    tokio::time::sleep(Duration::from_millis(20)).await;
    let truck = Vehicle::truck("late-truck");
    let started = tokio::time::Instant::now();
    truck
        .visit(&pool, || tokio::time::sleep(Duration::from_millis(15)))
        .await;
    info!(waited = ?started.elapsed(), "truck got in despite the stream of cars");

    for handle in handles {
        handle.await?;
    }
    Ok(())
}
