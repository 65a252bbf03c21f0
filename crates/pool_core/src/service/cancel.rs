//! The cancel transaction: release capacity, mark the request, retire the
//! group when it empties.

use log::debug;

use crate::entities::{GroupStatus, RequestId, RequestStatus, RideRequest};
use crate::error::DomainError;
use crate::store::{Store, StoreTxn};

use super::PoolService;

impl<S: Store> PoolService<S> {
    /// Cancel a confirmed request inside one store transaction: give its
    /// seats and luggage back to the owning group, mark the request
    /// `CANCELLED`, and cancel the group too when its last passenger leaves.
    ///
    /// # Errors
    ///
    /// * [`DomainError::RequestNotFound`] for an unknown id.
    /// * [`DomainError::InvalidState`] when the request is not `CONFIRMED`.
    pub fn cancel(&self, id: RequestId) -> Result<RideRequest, DomainError> {
        let mut txn = self.store.begin()?;

        let request = txn.request(id)?.ok_or(DomainError::RequestNotFound(id))?;
        if request.status != RequestStatus::Confirmed {
            return Err(DomainError::InvalidState {
                request: id,
                status: request.status,
            });
        }

        let group = txn
            .release_seats(request.group_id, request.seats_required, request.luggage_count)?
            .ok_or(DomainError::GroupNotFound(request.group_id))?;
        let request = txn
            .set_request_status(id, RequestStatus::Cancelled)?
            .ok_or(DomainError::RequestNotFound(id))?;

        let group_emptied = group.seats_used == 0;
        if group_emptied {
            txn.set_group_status(group.id, GroupStatus::Cancelled)?;
        }
        txn.commit()?;

        self.telemetry.record_cancellation(group_emptied);
        debug!(
            "cancelled request {} (group {} seats now {})",
            id, group.id, group.seats_used
        );
        Ok(request)
    }
}
