//! Test helpers for common fixtures across test files.

use rand::Rng;

use crate::entities::{BookingRequest, Direction};
use crate::params::PoolingParams;
use crate::service::PoolService;
use crate::spatial::LatLng;
use crate::store::MemoryStore;

/// Hub used across test files: Hyderabad airport.
pub fn test_hub() -> LatLng {
    LatLng::new(17.2403, 78.4294)
}

/// A drop point roughly 10 km north-east of the test hub.
pub fn nearby_drop() -> LatLng {
    LatLng::new(17.3, 78.5)
}

/// A second drop about 1.5 km from [`nearby_drop`].
pub fn adjacent_drop() -> LatLng {
    LatLng::new(17.31, 78.51)
}

/// A `FROM_HUB` booking with pickup at the hub itself.
pub fn booking_from_hub(drop: LatLng) -> BookingRequest {
    BookingRequest {
        pickup: test_hub(),
        drop,
        seats_required: 1,
        luggage_count: 1,
        detour_tolerance_km: 5.0,
        direction: Direction::FromHub,
    }
}

/// A `TO_HUB` booking with drop at the hub itself.
pub fn booking_to_hub(pickup: LatLng) -> BookingRequest {
    BookingRequest {
        pickup,
        drop: test_hub(),
        seats_required: 1,
        luggage_count: 1,
        detour_tolerance_km: 5.0,
        direction: Direction::ToHub,
    }
}

/// A service over a fresh in-memory store with `cabs` active cabs.
///
/// # Panics
///
/// Panics if seeding fails (cannot happen on a fresh [`MemoryStore`]).
pub fn test_service(cabs: usize) -> PoolService<MemoryStore> {
    let service = PoolService::new(MemoryStore::new(), PoolingParams::default());
    service.seed_cabs(cabs).expect("seed cabs");
    service
}

/// A random booking within a small box around the test hub, for load tests
/// and benchmarks. `FROM_HUB` bookings pick up at the hub; `TO_HUB` bookings
/// pick up close enough to stay inside the default pickup radius.
pub fn random_booking<R: Rng>(rng: &mut R, direction: Direction) -> BookingRequest {
    let hub = test_hub();
    let spread = LatLng::new(
        hub.lat + rng.gen_range(-0.15..0.15),
        hub.lng + rng.gen_range(-0.15..0.15),
    );
    let near_hub = LatLng::new(
        hub.lat + rng.gen_range(-0.03..0.03),
        hub.lng + rng.gen_range(-0.03..0.03),
    );
    let (pickup, drop) = match direction {
        Direction::FromHub => (hub, spread),
        Direction::ToHub => (near_hub, hub),
    };
    BookingRequest {
        pickup,
        drop,
        seats_required: rng.gen_range(1..=2),
        luggage_count: rng.gen_range(0..=2),
        detour_tolerance_km: rng.gen_range(2.0..10.0),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_to_hub_pickup_stays_inside_the_default_radius() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let booking = random_booking(&mut rng, Direction::ToHub);
            let d = crate::spatial::distance_km(booking.pickup, test_hub());
            assert!(d <= 5.0, "pickup {d} km from hub escapes the radius");
        }
    }

    #[test]
    fn fixture_drops_are_within_tolerance_of_each_other() {
        let d = crate::spatial::distance_km(nearby_drop(), adjacent_drop());
        assert!(d < 2.0, "fixture drops should be poolable, got {d} km");
    }
}
