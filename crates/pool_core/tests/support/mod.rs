//! Shared setup for the integration suites.
#![allow(dead_code)]

use pool_core::entities::RideRequest;
use pool_core::service::{BookingOutcome, PoolService};
use pool_core::store::MemoryStore;
use pool_core::test_helpers::{booking_from_hub, nearby_drop, test_service};

/// A service with the standard five-cab roster.
pub fn seeded_service() -> PoolService<MemoryStore> {
    test_service(5)
}

/// A seeded service with one confirmed passenger already in a forming
/// group: two seats, one luggage item, 3 km tolerance, drop at
/// [`nearby_drop`].
pub fn service_with_first_passenger() -> (PoolService<MemoryStore>, RideRequest) {
    let service = seeded_service();
    let mut booking = booking_from_hub(nearby_drop());
    booking.seats_required = 2;
    booking.detour_tolerance_km = 3.0;
    let BookingOutcome { request, .. } = service.book(booking).expect("first booking");
    (service, request)
}
