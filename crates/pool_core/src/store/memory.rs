//! In-memory reference store: mutex-guarded collections with
//! snapshot-rollback transactions.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::entities::{
    Cab, CabId, Direction, GroupId, GroupStatus, RequestId, RequestStatus, RideGroup, RideRequest,
};

use super::{NewRequest, Store, StoreError, StoreTxn};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    cabs: BTreeMap<CabId, Cab>,
    groups: BTreeMap<GroupId, RideGroup>,
    requests: BTreeMap<RequestId, RideRequest>,
    next_cab_id: u64,
    next_group_id: u64,
    next_request_id: u64,
}

/// Transactional in-memory document store.
///
/// Transactions serialise on the store mutex: the guard is held from
/// [`Store::begin`] until commit or drop, giving each transaction an
/// isolated view of all three collections. A snapshot taken at `begin` is
/// restored when the handle drops without committing, so aborts are
/// all-or-nothing.
///
/// `BTreeMap` collections make every query iterate in ascending id order,
/// which is the stable first-seen candidate order the matcher's tie-break
/// depends on.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    type Txn<'a>
        = MemoryTxn<'a>
    where
        Self: 'a;

    fn begin(&self) -> Result<MemoryTxn<'_>, StoreError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        let snapshot = guard.clone();
        Ok(MemoryTxn {
            guard,
            snapshot: Some(snapshot),
        })
    }
}

/// A transaction over [`MemoryStore`].
pub struct MemoryTxn<'a> {
    guard: MutexGuard<'a, MemoryState>,
    /// Present until commit; restored on drop to abort.
    snapshot: Option<MemoryState>,
}

impl Drop for MemoryTxn<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}

impl StoreTxn for MemoryTxn<'_> {
    fn insert_cab(
        &mut self,
        seat_capacity: u32,
        luggage_capacity: u32,
        is_active: bool,
    ) -> Result<Cab, StoreError> {
        let state = &mut *self.guard;
        state.next_cab_id += 1;
        let cab = Cab {
            id: CabId(state.next_cab_id),
            seat_capacity,
            luggage_capacity,
            is_active,
        };
        state.cabs.insert(cab.id, cab);
        Ok(cab)
    }

    fn cab(&self, id: CabId) -> Result<Option<Cab>, StoreError> {
        Ok(self.guard.cabs.get(&id).copied())
    }

    fn first_active_cab(&self) -> Result<Option<Cab>, StoreError> {
        Ok(self.guard.cabs.values().find(|cab| cab.is_active).copied())
    }

    fn count_active_cabs(&self) -> Result<u64, StoreError> {
        Ok(self.guard.cabs.values().filter(|cab| cab.is_active).count() as u64)
    }

    fn insert_group(
        &mut self,
        cab_id: CabId,
        direction: Direction,
        seats_used: u32,
        luggage_used: u32,
    ) -> Result<RideGroup, StoreError> {
        let state = &mut *self.guard;
        state.next_group_id += 1;
        let group = RideGroup {
            id: GroupId(state.next_group_id),
            cab_id,
            direction,
            seats_used,
            luggage_used,
            status: GroupStatus::Forming,
        };
        state.groups.insert(group.id, group);
        Ok(group)
    }

    fn group(&self, id: GroupId) -> Result<Option<RideGroup>, StoreError> {
        Ok(self.guard.groups.get(&id).copied())
    }

    fn forming_groups(&self, direction: Direction) -> Result<Vec<RideGroup>, StoreError> {
        Ok(self
            .guard
            .groups
            .values()
            .filter(|group| group.is_forming() && group.direction == direction)
            .copied()
            .collect())
    }

    fn count_forming_groups(&self) -> Result<u64, StoreError> {
        Ok(self.guard.groups.values().filter(|g| g.is_forming()).count() as u64)
    }

    fn try_occupy(
        &mut self,
        id: GroupId,
        seats: u32,
        luggage: u32,
        seat_capacity: u32,
        luggage_capacity: u32,
    ) -> Result<Option<RideGroup>, StoreError> {
        let Some(group) = self.guard.groups.get_mut(&id) else {
            return Ok(None);
        };
        if !group.is_forming()
            || group.seats_used + seats > seat_capacity
            || group.luggage_used + luggage > luggage_capacity
        {
            return Ok(None);
        }
        group.seats_used += seats;
        group.luggage_used += luggage;
        Ok(Some(*group))
    }

    fn release_seats(
        &mut self,
        id: GroupId,
        seats: u32,
        luggage: u32,
    ) -> Result<Option<RideGroup>, StoreError> {
        let Some(group) = self.guard.groups.get_mut(&id) else {
            return Ok(None);
        };
        group.seats_used = group.seats_used.saturating_sub(seats);
        group.luggage_used = group.luggage_used.saturating_sub(luggage);
        Ok(Some(*group))
    }

    fn set_group_status(
        &mut self,
        id: GroupId,
        status: GroupStatus,
    ) -> Result<Option<RideGroup>, StoreError> {
        let Some(group) = self.guard.groups.get_mut(&id) else {
            return Ok(None);
        };
        group.status = status;
        Ok(Some(*group))
    }

    fn insert_request(&mut self, request: NewRequest) -> Result<RideRequest, StoreError> {
        let state = &mut *self.guard;
        state.next_request_id += 1;
        let NewRequest {
            booking,
            group_id,
            fare,
            status,
        } = request;
        let document = RideRequest {
            id: RequestId(state.next_request_id),
            pickup: booking.pickup,
            drop: booking.drop,
            seats_required: booking.seats_required,
            luggage_count: booking.luggage_count,
            detour_tolerance_km: booking.detour_tolerance_km,
            direction: booking.direction,
            group_id,
            fare,
            status,
        };
        state.requests.insert(document.id, document.clone());
        Ok(document)
    }

    fn request(&self, id: RequestId) -> Result<Option<RideRequest>, StoreError> {
        Ok(self.guard.requests.get(&id).cloned())
    }

    fn confirmed_requests(&self, group: GroupId) -> Result<Vec<RideRequest>, StoreError> {
        Ok(self
            .guard
            .requests
            .values()
            .filter(|r| r.group_id == group && r.status == RequestStatus::Confirmed)
            .cloned()
            .collect())
    }

    fn requests_for_group(&self, group: GroupId) -> Result<Vec<RideRequest>, StoreError> {
        Ok(self
            .guard
            .requests
            .values()
            .filter(|r| r.group_id == group)
            .cloned()
            .collect())
    }

    fn set_request_status(
        &mut self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<Option<RideRequest>, StoreError> {
        let Some(request) = self.guard.requests.get_mut(&id) else {
            return Ok(None);
        };
        request.status = status;
        Ok(Some(request.clone()))
    }

    fn commit(mut self) -> Result<(), StoreError> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BookingRequest;
    use crate::spatial::LatLng;

    fn booking() -> BookingRequest {
        BookingRequest {
            pickup: LatLng::new(17.2403, 78.4294),
            drop: LatLng::new(17.3, 78.5),
            seats_required: 2,
            luggage_count: 1,
            detour_tolerance_km: 3.0,
            direction: Direction::FromHub,
        }
    }

    #[test]
    fn commit_publishes_writes() {
        let store = MemoryStore::new();
        {
            let mut txn = store.begin().expect("begin");
            txn.insert_cab(4, 4, true).expect("insert cab");
            txn.commit().expect("commit");
        }
        let txn = store.begin().expect("begin");
        assert_eq!(txn.count_active_cabs().expect("count"), 1);
    }

    #[test]
    fn dropping_an_uncommitted_txn_rolls_back() {
        let store = MemoryStore::new();
        {
            let mut txn = store.begin().expect("begin");
            txn.insert_cab(4, 4, true).expect("insert cab");
            let cab = txn.first_active_cab().expect("query").expect("cab visible in txn");
            txn.insert_group(cab.id, Direction::FromHub, 1, 0)
                .expect("insert group");
            // no commit
        }
        let txn = store.begin().expect("begin");
        assert_eq!(txn.count_active_cabs().expect("count"), 0);
        assert_eq!(txn.count_forming_groups().expect("count"), 0);
    }

    #[test]
    fn rollback_reuses_ids() {
        let store = MemoryStore::new();
        {
            let mut txn = store.begin().expect("begin");
            txn.insert_cab(4, 4, true).expect("insert cab");
        }
        let mut txn = store.begin().expect("begin");
        let cab = txn.insert_cab(4, 4, true).expect("insert cab");
        assert_eq!(cab.id, CabId(1), "aborted inserts must not burn ids");
    }

    #[test]
    fn try_occupy_respects_headroom() {
        let store = MemoryStore::new();
        let mut txn = store.begin().expect("begin");
        let cab = txn.insert_cab(4, 4, true).expect("insert cab");
        let group = txn
            .insert_group(cab.id, Direction::FromHub, 3, 3)
            .expect("insert group");

        // 3 + 2 > 4: refused, counters untouched.
        assert!(txn.try_occupy(group.id, 2, 0, 4, 4).expect("occupy").is_none());
        let unchanged = txn.group(group.id).expect("get").expect("group");
        assert_eq!(unchanged.seats_used, 3);

        // 3 + 1 == 4: applies.
        let updated = txn
            .try_occupy(group.id, 1, 1, 4, 4)
            .expect("occupy")
            .expect("headroom");
        assert_eq!(updated.seats_used, 4);
        assert_eq!(updated.luggage_used, 4);

        // Full group refuses everything.
        assert!(txn.try_occupy(group.id, 1, 0, 4, 4).expect("occupy").is_none());
    }

    #[test]
    fn try_occupy_refuses_non_forming_groups() {
        let store = MemoryStore::new();
        let mut txn = store.begin().expect("begin");
        let cab = txn.insert_cab(4, 4, true).expect("insert cab");
        let group = txn
            .insert_group(cab.id, Direction::FromHub, 1, 0)
            .expect("insert group");
        txn.set_group_status(group.id, GroupStatus::Cancelled)
            .expect("set status");
        assert!(txn.try_occupy(group.id, 1, 0, 4, 4).expect("occupy").is_none());
    }

    #[test]
    fn release_seats_floors_at_zero() {
        let store = MemoryStore::new();
        let mut txn = store.begin().expect("begin");
        let cab = txn.insert_cab(4, 4, true).expect("insert cab");
        let group = txn
            .insert_group(cab.id, Direction::FromHub, 1, 0)
            .expect("insert group");
        let updated = txn
            .release_seats(group.id, 3, 2)
            .expect("release")
            .expect("group");
        assert_eq!(updated.seats_used, 0);
        assert_eq!(updated.luggage_used, 0);
    }

    #[test]
    fn forming_groups_filters_by_direction_and_status() {
        let store = MemoryStore::new();
        let mut txn = store.begin().expect("begin");
        let cab = txn.insert_cab(4, 4, true).expect("insert cab");
        let from_hub = txn
            .insert_group(cab.id, Direction::FromHub, 1, 0)
            .expect("insert group");
        let to_hub = txn
            .insert_group(cab.id, Direction::ToHub, 1, 0)
            .expect("insert group");
        let cancelled = txn
            .insert_group(cab.id, Direction::FromHub, 1, 0)
            .expect("insert group");
        txn.set_group_status(cancelled.id, GroupStatus::Cancelled)
            .expect("set status");

        let forming = txn.forming_groups(Direction::FromHub).expect("query");
        assert_eq!(forming.len(), 1);
        assert_eq!(forming[0].id, from_hub.id);
        assert_eq!(txn.count_forming_groups().expect("count"), 2);
        let _ = to_hub;
    }

    #[test]
    fn confirmed_requests_excludes_other_statuses_and_groups() {
        let store = MemoryStore::new();
        let mut txn = store.begin().expect("begin");
        let cab = txn.insert_cab(4, 4, true).expect("insert cab");
        let group_a = txn
            .insert_group(cab.id, Direction::FromHub, 2, 1)
            .expect("insert group");
        let group_b = txn
            .insert_group(cab.id, Direction::FromHub, 2, 1)
            .expect("insert group");

        let confirmed = txn
            .insert_request(NewRequest {
                booking: booking(),
                group_id: group_a.id,
                fare: 100,
                status: RequestStatus::Confirmed,
            })
            .expect("insert request");
        let cancelled = txn
            .insert_request(NewRequest {
                booking: booking(),
                group_id: group_a.id,
                fare: 100,
                status: RequestStatus::Cancelled,
            })
            .expect("insert request");
        let elsewhere = txn
            .insert_request(NewRequest {
                booking: booking(),
                group_id: group_b.id,
                fare: 100,
                status: RequestStatus::Confirmed,
            })
            .expect("insert request");

        let found = txn.confirmed_requests(group_a.id).expect("query");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, confirmed.id);

        let all = txn.requests_for_group(group_a.id).expect("query");
        assert_eq!(all.len(), 2);
        let _ = (cancelled, elsewhere);
    }
}
