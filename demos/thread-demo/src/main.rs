//! Parking garage simulation with one OS thread per vehicle.
//!
//! ```text
//! garage-threads --spots 2 CCTTCT
//! ```

use clap::Parser;
use garage_arbiter::{Class, ResourcePool, Vehicle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "garage-threads", about = "Run a car/truck garage on OS threads")]
struct Args {
    /// Number of parking spots
    #[arg(short, long, default_value_t = 2)]
    spots: usize,

    /// Arrival order, one letter per vehicle (C = car, T = truck)
    #[arg(default_value = "CCTCTTCT")]
    arrivals: String,

    /// Milliseconds each vehicle stays parked
    #[arg(long, default_value_t = 50)]
    hold_ms: u64,

    /// Milliseconds between consecutive arrivals
    #[arg(long, default_value_t = 10)]
    gap_ms: u64,

    /// Give up on vehicles that wait longer than this many milliseconds
    #[arg(long)]
    patience_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,garage_arbiter=debug")),
        )
        .with_thread_names(true)
        .init();

    let args = Args::parse();
    let pool = Arc::new(ResourcePool::new(args.spots)?);

    let vehicles = args
        .arrivals
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .enumerate()
        .map(|(i, ch)| {
            let class: Class = ch.to_string().parse()?;
            Ok(Vehicle::new(class, format!("{:#}-{}", class, i)))
        })
        .collect::<Result<Vec<_>, garage_arbiter::ParseClassError>>()?;

    info!(spots = args.spots, vehicles = vehicles.len(), "garage open");

    let hold = Duration::from_millis(args.hold_ms);
    let patience = args.patience_ms.map(Duration::from_millis);

    let mut handles = Vec::with_capacity(vehicles.len());
    for vehicle in vehicles {
        let pool = Arc::clone(&pool);
        let handle = thread::Builder::new()
            .name(vehicle.label().to_owned())
            .spawn(move || match patience {
                None => vehicle.visit_blocking(&pool, || thread::sleep(hold)),
                Some(patience) => match pool.enter_blocking_timeout(vehicle.class(), patience) {
                    Ok(spot) => {
                        thread::sleep(hold);
                        spot.leave();
                    }
                    Err(e) => warn!(vehicle = vehicle.label(), "drives away: {}", e),
                },
            })?;
        handles.push(handle);
        thread::sleep(Duration::from_millis(args.gap_ms));
    }

    for handle in handles {
        if handle.join().is_err() {
            return Err("vehicle thread panicked".into());
        }
    }

    info!(snapshot = ?pool.snapshot(), "all vehicles have been processed");
    Ok(())
}
