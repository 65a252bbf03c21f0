//! Domain errors surfaced by the lifecycle manager.
//!
//! All variants are raised synchronously from `book`/`cancel` and the read
//! accessors; the core never retries on its own. `SeatConflict` in
//! particular is meant to be retried by the caller with the same payload,
//! since the matching decision may differ on the next attempt.

use thiserror::Error;

use crate::entities::{CabId, GroupId, RequestId, RequestStatus};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum DomainError {
    /// The booking payload violates an invariant the core arithmetic
    /// depends on.
    #[error("invalid booking request: {0}")]
    Validation(String),

    /// The optimistic seat increment lost a race against a concurrent
    /// booking.
    #[error("group {0} ran out of headroom during booking")]
    SeatConflict(GroupId),

    /// A new group was needed but the roster has no active cab.
    #[error("no active cab available")]
    NoAvailableCab,

    #[error("ride request {0} not found")]
    RequestNotFound(RequestId),

    #[error("ride group {0} not found")]
    GroupNotFound(GroupId),

    #[error("cab {0} not found")]
    CabNotFound(CabId),

    /// Cancellation requires a `CONFIRMED` request.
    #[error("ride request {request} is {status:?} and cannot be cancelled")]
    InvalidState {
        request: RequestId,
        status: RequestStatus,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
