use crate::params::PoolingParams;
use crate::routing::route_distance_km;
use crate::spatial::{distance_km, LatLng};

use super::types::{GroupCandidate, MatchDecision, MatchRequest};

/// Trait for policies that place a new request into a forming group.
///
/// The caller pre-filters candidates to the request's direction and
/// `FORMING` status; the policy enforces seat, luggage, pickup-proximity and
/// detour-tolerance constraints and picks among the groups that survive.
/// Returning `None` means no candidate qualifies and the lifecycle manager
/// must open a new group.
///
/// Implementations must be deterministic for a fixed candidate order: a
/// caller retrying a conflicted booking re-runs the policy against a fresh
/// snapshot and expects reproducible decisions.
pub trait GroupMatching: Send + Sync {
    /// Select a group for `request`, or `None` when no candidate qualifies.
    fn select_group(
        &self,
        request: &MatchRequest,
        candidates: &[GroupCandidate],
        params: &PoolingParams,
    ) -> Option<MatchDecision>;
}

/// Marginal route cost of adding `request` to `candidate`, or `None` when a
/// capacity or tolerance constraint rejects the pairing.
pub(crate) fn evaluate_candidate(
    request: &MatchRequest,
    candidate: &GroupCandidate,
    hub: LatLng,
) -> Option<f64> {
    if candidate.seats_used + request.seats_required > candidate.seat_capacity {
        return None;
    }
    if candidate.luggage_used + request.luggage_count > candidate.luggage_capacity {
        return None;
    }

    let existing: Vec<LatLng> = candidate.passengers.iter().map(|p| p.stop).collect();
    let old_route = route_distance_km(hub, &existing);

    let mut extended = existing;
    extended.push(request.stop);
    let new_route = route_distance_km(hub, &extended);

    let extra = new_route - old_route;

    if candidate.passengers.iter().any(|p| extra > p.detour_tolerance_km) {
        return None;
    }
    if extra > request.detour_tolerance_km {
        return None;
    }

    Some(extra)
}

/// Group-independent pickup bound: a pickup farther than the configured
/// radius from the hub is never pooled, whatever the group.
pub(crate) fn pickup_within_radius(request: &MatchRequest, params: &PoolingParams) -> bool {
    distance_km(request.pickup, params.hub) <= params.pickup_radius_km
}
