//! The booking transaction: match, occupy or create, price, confirm.

use log::debug;

use crate::entities::{BookingRequest, RequestStatus};
use crate::error::DomainError;
use crate::matching::{GroupCandidate, MatchRequest, PassengerStop};
use crate::pricing::{calculate_fare, FareInputs};
use crate::spatial::distance_km;
use crate::store::{NewRequest, Store, StoreTxn};

use super::{BookingOutcome, PoolService};

impl<S: Store> PoolService<S> {
    /// Book one passenger inside one store transaction: join the cheapest
    /// feasible forming group or open a new one, price the outcome, and
    /// insert the request as `CONFIRMED`.
    ///
    /// # Errors
    ///
    /// * [`DomainError::Validation`] when the payload breaks a core
    ///   invariant (checked before any store access).
    /// * [`DomainError::SeatConflict`] when the chosen group lost its
    ///   headroom to a concurrent booking; the caller may retry.
    /// * [`DomainError::NoAvailableCab`] when a new group is needed but no
    ///   active cab exists.
    pub fn book(&self, booking: BookingRequest) -> Result<BookingOutcome, DomainError> {
        self.validate(&booking)?;

        let mut txn = self.store.begin()?;

        // Snapshot every forming group in this direction together with the
        // confirmed passengers whose tolerances constrain the detour.
        let groups = txn.forming_groups(booking.direction)?;
        let mut candidates = Vec::with_capacity(groups.len());
        for group in &groups {
            let cab = txn
                .cab(group.cab_id)?
                .ok_or(DomainError::CabNotFound(group.cab_id))?;
            let passengers = txn
                .confirmed_requests(group.id)?
                .iter()
                .map(|passenger| PassengerStop {
                    stop: passenger.route_stop(),
                    detour_tolerance_km: passenger.detour_tolerance_km,
                })
                .collect();
            candidates.push(GroupCandidate {
                group_id: group.id,
                seats_used: group.seats_used,
                luggage_used: group.luggage_used,
                seat_capacity: cab.seat_capacity,
                luggage_capacity: cab.luggage_capacity,
                passengers,
            });
        }

        let match_request = MatchRequest {
            pickup: booking.pickup,
            stop: booking.route_stop(),
            seats_required: booking.seats_required,
            luggage_count: booking.luggage_count,
            detour_tolerance_km: booking.detour_tolerance_km,
        };
        let decision = self
            .matcher
            .select_group(&match_request, &candidates, &self.params);

        let (group, extra_km, joined) = match decision {
            Some(decision) => {
                let candidate = candidates
                    .iter()
                    .find(|candidate| candidate.group_id == decision.group_id)
                    .ok_or(DomainError::GroupNotFound(decision.group_id))?;
                let Some(group) = txn.try_occupy(
                    decision.group_id,
                    booking.seats_required,
                    booking.luggage_count,
                    candidate.seat_capacity,
                    candidate.luggage_capacity,
                )?
                else {
                    self.telemetry.record_seat_conflict();
                    return Err(DomainError::SeatConflict(decision.group_id));
                };
                debug!(
                    "booking joins group {} (extra {:.3} km)",
                    group.id, decision.extra_km
                );
                (group, decision.extra_km, true)
            }
            None => {
                let cab = txn.first_active_cab()?.ok_or(DomainError::NoAvailableCab)?;
                let group = txn.insert_group(
                    cab.id,
                    booking.direction,
                    booking.seats_required,
                    booking.luggage_count,
                )?;
                debug!("booking opens group {} on cab {}", group.id, cab.id);
                (group, 0.0, false)
            }
        };

        // Demand counts read in the same transaction, after the group
        // update, so surge sees the state this booking created.
        let forming_groups = txn.count_forming_groups()?;
        let active_cabs = txn.count_active_cabs()?;
        let fare = calculate_fare(
            &self.params.pricing,
            &FareInputs {
                hub_distance_km: distance_km(self.params.hub, booking.route_stop()),
                extra_km,
                passenger_count: group.seats_used,
                forming_groups,
                active_cabs,
            },
        );

        let request = txn.insert_request(NewRequest {
            booking,
            group_id: group.id,
            fare,
            status: RequestStatus::Confirmed,
        })?;
        txn.commit()?;

        if joined {
            self.telemetry.record_join();
        } else {
            self.telemetry.record_new_group();
        }
        Ok(BookingOutcome { request, fare })
    }

    /// The cheap invariants the core arithmetic depends on. Full field
    /// validation belongs to the API collaborator; this guard only keeps
    /// `NaN` and impossible demands out of the matching and pricing paths.
    fn validate(&self, booking: &BookingRequest) -> Result<(), DomainError> {
        if !booking.pickup.is_finite() || !booking.drop.is_finite() {
            return Err(DomainError::Validation(
                "pickup and drop coordinates must be finite".to_string(),
            ));
        }
        if booking.seats_required == 0 || booking.seats_required > self.params.seat_capacity {
            return Err(DomainError::Validation(format!(
                "seats_required must be between 1 and {}",
                self.params.seat_capacity
            )));
        }
        if booking.luggage_count > self.params.luggage_capacity {
            return Err(DomainError::Validation(format!(
                "luggage_count must be at most {}",
                self.params.luggage_capacity
            )));
        }
        if !booking.detour_tolerance_km.is_finite() || booking.detour_tolerance_km < 0.0 {
            return Err(DomainError::Validation(
                "detour_tolerance_km must be a non-negative finite number".to_string(),
            ));
        }
        Ok(())
    }
}
