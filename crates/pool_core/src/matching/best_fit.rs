use crate::params::PoolingParams;

use super::algorithm::{evaluate_candidate, pickup_within_radius, GroupMatching};
use super::types::{GroupCandidate, MatchDecision, MatchRequest};

/// Greedy best-fit policy: among all feasible groups, pick the one whose
/// route grows the least.
///
/// This is a single pass over the live candidate set, not a global
/// optimisation across future requests; the stream has no visibility into
/// later arrivals. Ties go to the first-seen candidate, which together with
/// the store's stable candidate order keeps decisions reproducible.
#[derive(Debug, Default)]
pub struct BestFitMatching;

impl GroupMatching for BestFitMatching {
    fn select_group(
        &self,
        request: &MatchRequest,
        candidates: &[GroupCandidate],
        params: &PoolingParams,
    ) -> Option<MatchDecision> {
        if !pickup_within_radius(request, params) {
            return None;
        }

        let mut best: Option<MatchDecision> = None;

        for candidate in candidates {
            let Some(extra_km) = evaluate_candidate(request, candidate, params.hub) else {
                continue;
            };

            match best {
                None => {
                    best = Some(MatchDecision {
                        group_id: candidate.group_id,
                        extra_km,
                    })
                }
                Some(current) if extra_km < current.extra_km => {
                    best = Some(MatchDecision {
                        group_id: candidate.group_id,
                        extra_km,
                    })
                }
                _ => {}
            }
        }

        best
    }
}
