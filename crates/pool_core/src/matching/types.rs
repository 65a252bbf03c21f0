use crate::entities::GroupId;
use crate::spatial::LatLng;

/// One confirmed passenger's contribution to a candidate group's route.
#[derive(Debug, Clone, Copy)]
pub struct PassengerStop {
    /// This passenger's route stop (drop for `FROM_HUB`, pickup for
    /// `TO_HUB`).
    pub stop: LatLng,
    /// The maximum extra route distance this passenger accepted.
    pub detour_tolerance_km: f64,
}

/// A forming group as the matcher sees it: counters, the cab's capacities
/// and the confirmed passengers already routed through it.
#[derive(Debug, Clone)]
pub struct GroupCandidate {
    pub group_id: GroupId,
    pub seats_used: u32,
    pub luggage_used: u32,
    pub seat_capacity: u32,
    pub luggage_capacity: u32,
    pub passengers: Vec<PassengerStop>,
}

/// The matcher's view of the incoming request. Candidates are already
/// filtered to the request's direction, so the direction itself is not
/// carried here.
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest {
    pub pickup: LatLng,
    /// The stop the request would add to the shared route.
    pub stop: LatLng,
    pub seats_required: u32,
    pub luggage_count: u32,
    pub detour_tolerance_km: f64,
}

/// A successful match: the chosen group and the marginal route cost of
/// adding the new passenger to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchDecision {
    pub group_id: GroupId,
    pub extra_km: f64,
}
