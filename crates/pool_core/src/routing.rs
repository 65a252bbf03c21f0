//! Route-cost model: a cheap, deterministic estimate of shared-route length.

use crate::spatial::{distance_km, LatLng};

/// Estimate the length of a shared route that serves `stops` from `hub`.
///
/// Stops are visited in ascending hub-distance order (the sort is stable, so
/// equal distances keep their original order), summing the hub-to-first leg
/// plus every consecutive leg. An empty stop set costs nothing.
///
/// This is a heuristic estimate, not a shortest path. It is O(n log n) and
/// deterministic for a fixed stop set, which matters because the matcher
/// differences two calls per candidate group and that difference must be
/// reproducible.
pub fn route_distance_km(hub: LatLng, stops: &[LatLng]) -> f64 {
    if stops.is_empty() {
        return 0.0;
    }

    let mut ordered: Vec<LatLng> = stops.to_vec();
    ordered.sort_by(|a, b| {
        distance_km(hub, *a)
            .partial_cmp(&distance_km(hub, *b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut total = distance_km(hub, ordered[0]);
    for leg in ordered.windows(2) {
        total += distance_km(leg[0], leg[1]);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> LatLng {
        LatLng::new(17.2403, 78.4294)
    }

    #[test]
    fn empty_route_costs_nothing() {
        assert_eq!(route_distance_km(hub(), &[]), 0.0);
    }

    #[test]
    fn single_stop_equals_hub_distance() {
        let stop = LatLng::new(17.3, 78.5);
        assert_eq!(route_distance_km(hub(), &[stop]), distance_km(hub(), stop));
    }

    #[test]
    fn stops_are_visited_nearest_first() {
        let near = LatLng::new(17.28, 78.47);
        let far = LatLng::new(17.35, 78.55);
        let expected = distance_km(hub(), near) + distance_km(near, far);
        assert_eq!(route_distance_km(hub(), &[far, near]), expected);
        assert_eq!(route_distance_km(hub(), &[near, far]), expected);
    }

    #[test]
    fn adding_a_stop_never_shortens_the_route() {
        let stops = [
            LatLng::new(17.30, 78.50),
            LatLng::new(17.27, 78.46),
            LatLng::new(17.33, 78.52),
        ];
        let base = route_distance_km(hub(), &stops[..2]);
        let extended = route_distance_km(hub(), &stops);
        assert!(extended >= base, "extended {extended} < base {base}");
    }
}
