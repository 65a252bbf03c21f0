//! Group/request lifecycle manager.
//!
//! [`PoolService`] orchestrates bookings and cancellations against the
//! transactional store: the matching snapshot, the counter updates, the
//! demand counts used for surge and the request insert commit or abort as
//! one unit. Matching itself is delegated to a [`GroupMatching`] policy.

pub mod booking;
pub mod cancel;

use log::debug;

use crate::entities::{Cab, GroupId, RequestId, RideGroup, RideRequest};
use crate::error::DomainError;
use crate::matching::{BestFitMatching, GroupMatching};
use crate::params::PoolingParams;
use crate::store::{Store, StoreTxn};
use crate::telemetry::PoolTelemetry;

/// A group together with its cab and every passenger booked into it.
#[derive(Debug, Clone)]
pub struct GroupDetails {
    pub group: RideGroup,
    pub cab: Cab,
    pub passengers: Vec<RideRequest>,
}

/// Outcome of a successful booking.
#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub request: RideRequest,
    pub fare: i64,
}

/// The lifecycle manager. One instance serves concurrent callers; all
/// shared state lives in the store.
pub struct PoolService<S: Store> {
    store: S,
    matcher: Box<dyn GroupMatching>,
    params: PoolingParams,
    telemetry: PoolTelemetry,
}

impl<S: Store> PoolService<S> {
    /// Create a service with the default [`BestFitMatching`] policy.
    pub fn new(store: S, params: PoolingParams) -> Self {
        Self {
            store,
            matcher: Box::new(BestFitMatching),
            params,
            telemetry: PoolTelemetry::default(),
        }
    }

    /// Replace the matching policy.
    pub fn with_matcher(mut self, matcher: Box<dyn GroupMatching>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn params(&self) -> &PoolingParams {
        &self.params
    }

    pub fn telemetry(&self) -> &PoolTelemetry {
        &self.telemetry
    }

    /// Register `count` active cabs with the configured capacities.
    pub fn seed_cabs(&self, count: usize) -> Result<Vec<Cab>, DomainError> {
        let mut txn = self.store.begin()?;
        let mut cabs = Vec::with_capacity(count);
        for _ in 0..count {
            cabs.push(txn.insert_cab(
                self.params.seat_capacity,
                self.params.luggage_capacity,
                true,
            )?);
        }
        txn.commit()?;
        debug!("seeded {} active cabs", cabs.len());
        Ok(cabs)
    }

    /// Fetch one ride request.
    pub fn get_request(&self, id: RequestId) -> Result<RideRequest, DomainError> {
        let txn = self.store.begin()?;
        txn.request(id)?.ok_or(DomainError::RequestNotFound(id))
    }

    /// Fetch a group with its cab and all its passengers.
    pub fn get_group(&self, id: GroupId) -> Result<GroupDetails, DomainError> {
        let txn = self.store.begin()?;
        let group = txn.group(id)?.ok_or(DomainError::GroupNotFound(id))?;
        let cab = txn
            .cab(group.cab_id)?
            .ok_or(DomainError::CabNotFound(group.cab_id))?;
        let passengers = txn.requests_for_group(id)?;
        Ok(GroupDetails {
            group,
            cab,
            passengers,
        })
    }

    /// Every group still accepting passengers, across both directions.
    pub fn list_forming_groups(&self) -> Result<Vec<RideGroup>, DomainError> {
        use crate::entities::Direction;

        let txn = self.store.begin()?;
        let mut groups = txn.forming_groups(Direction::ToHub)?;
        groups.extend(txn.forming_groups(Direction::FromHub)?);
        groups.sort_by_key(|group| group.id);
        Ok(groups)
    }
}
