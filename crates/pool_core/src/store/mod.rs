//! Transactional document store: the persistence seam the lifecycle runs on.
//!
//! The core never talks to a concrete database. It drives a [`Store`] whose
//! transactions make multi-document read-modify-write sequences atomic: a
//! handle commits explicitly and rolls back when dropped, so every early
//! return and error path aborts cleanly without partial effects.

pub mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::entities::{
    BookingRequest, Cab, CabId, Direction, GroupId, GroupStatus, RequestId, RequestStatus,
    RideGroup, RideRequest,
};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot serve requests (poisoned lock, lost
    /// connection, ...).
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

/// Fields for a new ride-request document; the store allocates the id.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub booking: BookingRequest,
    pub group_id: GroupId,
    pub fare: i64,
    pub status: RequestStatus,
}

/// Transactional access to the cab, group and request collections.
pub trait Store {
    type Txn<'a>: StoreTxn
    where
        Self: 'a;

    /// Open a transaction. Every read and write made through the handle
    /// belongs to one atomic, isolated unit.
    fn begin(&self) -> Result<Self::Txn<'_>, StoreError>;
}

/// One atomic unit of work. Dropping the handle without calling
/// [`StoreTxn::commit`] aborts it and discards every write.
pub trait StoreTxn {
    fn insert_cab(
        &mut self,
        seat_capacity: u32,
        luggage_capacity: u32,
        is_active: bool,
    ) -> Result<Cab, StoreError>;
    fn cab(&self, id: CabId) -> Result<Option<Cab>, StoreError>;
    fn first_active_cab(&self) -> Result<Option<Cab>, StoreError>;
    fn count_active_cabs(&self) -> Result<u64, StoreError>;

    fn insert_group(
        &mut self,
        cab_id: CabId,
        direction: Direction,
        seats_used: u32,
        luggage_used: u32,
    ) -> Result<RideGroup, StoreError>;
    fn group(&self, id: GroupId) -> Result<Option<RideGroup>, StoreError>;
    /// Forming groups for one direction, in stable first-seen (id) order.
    fn forming_groups(&self, direction: Direction) -> Result<Vec<RideGroup>, StoreError>;
    /// Forming groups across both directions (demand pressure input).
    fn count_forming_groups(&self) -> Result<u64, StoreError>;

    /// Conditionally add `seats`/`luggage` to a group's counters.
    ///
    /// The increment applies only when the group still exists, is still
    /// `FORMING`, and the post-increment counters stay within the supplied
    /// capacities. Returns the updated document, or `None` when the
    /// precondition no longer holds (a concurrent booking consumed the
    /// headroom). This is the single conditional atomic update the booking
    /// path relies on instead of a read-check-write sequence.
    fn try_occupy(
        &mut self,
        id: GroupId,
        seats: u32,
        luggage: u32,
        seat_capacity: u32,
        luggage_capacity: u32,
    ) -> Result<Option<RideGroup>, StoreError>;

    /// Subtract a cancelled passenger's demand from a group's counters,
    /// flooring at zero. Returns the updated document, `None` when the
    /// group is unknown.
    fn release_seats(
        &mut self,
        id: GroupId,
        seats: u32,
        luggage: u32,
    ) -> Result<Option<RideGroup>, StoreError>;

    fn set_group_status(
        &mut self,
        id: GroupId,
        status: GroupStatus,
    ) -> Result<Option<RideGroup>, StoreError>;

    fn insert_request(&mut self, request: NewRequest) -> Result<RideRequest, StoreError>;
    fn request(&self, id: RequestId) -> Result<Option<RideRequest>, StoreError>;
    /// Confirmed passengers of a group, in stable first-seen (id) order.
    fn confirmed_requests(&self, group: GroupId) -> Result<Vec<RideRequest>, StoreError>;
    /// Every passenger ever booked into a group, whatever their status.
    fn requests_for_group(&self, group: GroupId) -> Result<Vec<RideRequest>, StoreError>;
    fn set_request_status(
        &mut self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<Option<RideRequest>, StoreError>;

    /// Publish every write in this transaction.
    fn commit(self) -> Result<(), StoreError>;
}
