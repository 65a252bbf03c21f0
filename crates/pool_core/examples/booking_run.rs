//! Seed a small fleet, stream a batch of bookings through the pool, cancel
//! a few, and print the resulting groups.
//!
//! Run with: cargo run -p pool_core --example booking_run
//!
//! Set RUST_LOG=debug to watch individual matching decisions.

use pool_core::entities::Direction;
use pool_core::error::DomainError;
use pool_core::params::PoolingParams;
use pool_core::service::PoolService;
use pool_core::store::MemoryStore;
use pool_core::test_helpers::random_booking;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    const NUM_CABS: usize = 5;
    const NUM_BOOKINGS: usize = 40;

    let service = PoolService::new(MemoryStore::new(), PoolingParams::default());
    service.seed_cabs(NUM_CABS).expect("seed cabs");

    let mut rng = StdRng::seed_from_u64(123);
    let mut confirmed = Vec::new();

    for i in 0..NUM_BOOKINGS {
        let direction = if i % 2 == 0 {
            Direction::FromHub
        } else {
            Direction::ToHub
        };
        match service.book(random_booking(&mut rng, direction)) {
            Ok(outcome) => {
                println!(
                    "booked request {} into group {} for fare {}",
                    outcome.request.id, outcome.request.group_id, outcome.fare
                );
                confirmed.push(outcome.request);
            }
            Err(DomainError::SeatConflict(group)) => {
                println!("seat conflict on group {group}, caller would retry");
            }
            Err(err) => {
                println!("booking failed: {err}");
            }
        }
    }

    // Cancel every fifth confirmed request.
    for request in confirmed.iter().step_by(5) {
        match service.cancel(request.id) {
            Ok(_) => println!("cancelled request {}", request.id),
            Err(err) => println!("cancel failed: {err}"),
        }
    }

    println!("\n--- Forming groups ({NUM_CABS} cabs, seed 123) ---");
    for group in service.list_forming_groups().expect("groups") {
        let details = service.get_group(group.id).expect("group details");
        println!(
            "  group {}  cab={} {:?}  seats {}/{}  luggage {}/{}  passengers {}",
            group.id,
            details.cab.id,
            group.direction,
            group.seats_used,
            details.cab.seat_capacity,
            group.luggage_used,
            details.cab.luggage_capacity,
            details.passengers.len(),
        );
    }

    let counts = service.telemetry().counts();
    println!(
        "\nconfirmed={} pooled={} groups_created={} conflicts={} cancelled={} groups_cancelled={}",
        counts.bookings_confirmed,
        counts.passengers_pooled,
        counts.groups_created,
        counts.seat_conflicts,
        counts.requests_cancelled,
        counts.groups_cancelled,
    );
}
