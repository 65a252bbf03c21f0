//! Domain documents: cabs, ride groups and ride requests.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spatial::LatLng;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a cab in the fleet roster.
    CabId
);
id_type!(
    /// Identifier of a ride group.
    GroupId
);
id_type!(
    /// Identifier of a ride request.
    RequestId
);

/// Travel direction relative to the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "TO_HUB")]
    ToHub,
    #[serde(rename = "FROM_HUB")]
    FromHub,
}

/// Lifecycle of a ride group. Transitions happen only inside service
/// transactions: `Forming -> {Active, Cancelled}`, `Active -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GroupStatus {
    Forming,
    Active,
    Completed,
    Cancelled,
}

/// Lifecycle of a ride request:
/// `Pending -> Confirmed -> {Cancelled, Completed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// A vehicle profile in the fleet roster. Capacities are fixed at creation;
/// only the activity flag changes afterwards. Read-only to the matching core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cab {
    pub id: CabId,
    pub seat_capacity: u32,
    pub luggage_capacity: u32,
    pub is_active: bool,
}

/// A forming or active pool bound to one cab and one travel direction.
///
/// Invariant: `0 <= seats_used <= cab.seat_capacity` and
/// `0 <= luggage_used <= cab.luggage_capacity` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RideGroup {
    pub id: GroupId,
    pub cab_id: CabId,
    pub direction: Direction,
    pub seats_used: u32,
    pub luggage_used: u32,
    pub status: GroupStatus,
}

impl RideGroup {
    /// True while the group still accepts passengers.
    pub fn is_forming(&self) -> bool {
        self.status == GroupStatus::Forming
    }
}

/// One passenger's booking. Fare and group reference are fixed at
/// confirmation time and never recomputed when later passengers join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub id: RequestId,
    pub pickup: LatLng,
    pub drop: LatLng,
    pub seats_required: u32,
    pub luggage_count: u32,
    pub detour_tolerance_km: f64,
    pub direction: Direction,
    pub group_id: GroupId,
    pub fare: i64,
    pub status: RequestStatus,
}

impl RideRequest {
    /// The stop this passenger contributes to the shared route: the drop
    /// point when leaving the hub, the pickup point when heading to it.
    pub fn route_stop(&self) -> LatLng {
        match self.direction {
            Direction::FromHub => self.drop,
            Direction::ToHub => self.pickup,
        }
    }
}

/// Booking input as received from the API collaborator. All fields are
/// mandatory; field presence is the API layer's problem, but the service
/// re-checks the invariants the core arithmetic depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub pickup: LatLng,
    pub drop: LatLng,
    pub seats_required: u32,
    pub luggage_count: u32,
    pub detour_tolerance_km: f64,
    pub direction: Direction,
}

impl BookingRequest {
    /// See [`RideRequest::route_stop`].
    pub fn route_stop(&self) -> LatLng {
        match self.direction {
            Direction::FromHub => self.drop,
            Direction::ToHub => self.pickup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_stop_follows_direction() {
        let pickup = LatLng::new(17.25, 78.43);
        let drop = LatLng::new(17.3, 78.5);
        let mut booking = BookingRequest {
            pickup,
            drop,
            seats_required: 1,
            luggage_count: 0,
            detour_tolerance_km: 3.0,
            direction: Direction::FromHub,
        };
        assert_eq!(booking.route_stop(), drop);
        booking.direction = Direction::ToHub;
        assert_eq!(booking.route_stop(), pickup);
    }

    #[test]
    fn direction_uses_wire_names() {
        let json = serde_json::to_string(&Direction::FromHub).expect("serialize");
        assert_eq!(json, "\"FROM_HUB\"");
        let back: Direction = serde_json::from_str("\"TO_HUB\"").expect("deserialize");
        assert_eq!(back, Direction::ToHub);
    }

    #[test]
    fn statuses_use_wire_names() {
        let json = serde_json::to_string(&GroupStatus::Forming).expect("serialize");
        assert_eq!(json, "\"FORMING\"");
        let json = serde_json::to_string(&RequestStatus::Confirmed).expect("serialize");
        assert_eq!(json, "\"CONFIRMED\"");
    }
}
