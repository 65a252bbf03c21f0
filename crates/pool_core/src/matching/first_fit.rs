use crate::params::PoolingParams;

use super::algorithm::{evaluate_candidate, pickup_within_radius, GroupMatching};
use super::types::{GroupCandidate, MatchDecision, MatchRequest};

/// First-fit policy: the first candidate satisfying every constraint wins.
///
/// Deterministic and O(first feasible candidate); useful as a baseline
/// against [`super::BestFitMatching`] and in benchmarks where matching speed
/// matters more than route quality.
#[derive(Debug, Default)]
pub struct FirstFitMatching;

impl GroupMatching for FirstFitMatching {
    fn select_group(
        &self,
        request: &MatchRequest,
        candidates: &[GroupCandidate],
        params: &PoolingParams,
    ) -> Option<MatchDecision> {
        if !pickup_within_radius(request, params) {
            return None;
        }

        candidates.iter().find_map(|candidate| {
            evaluate_candidate(request, candidate, params.hub).map(|extra_km| MatchDecision {
                group_id: candidate.group_id,
                extra_km,
            })
        })
    }
}
