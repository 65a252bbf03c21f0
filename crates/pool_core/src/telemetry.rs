//! Service counters: cheap aggregate KPIs for pooling outcomes.

use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters kept by the lifecycle manager. The service is shared by
/// reference, so the counters are atomics; read them with
/// [`PoolTelemetry::counts`].
#[derive(Debug, Default)]
pub struct PoolTelemetry {
    bookings_confirmed: AtomicU64,
    passengers_pooled: AtomicU64,
    groups_created: AtomicU64,
    seat_conflicts: AtomicU64,
    requests_cancelled: AtomicU64,
    groups_cancelled: AtomicU64,
}

impl PoolTelemetry {
    pub(crate) fn record_join(&self) {
        self.bookings_confirmed.fetch_add(1, Ordering::Relaxed);
        self.passengers_pooled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_new_group(&self) {
        self.bookings_confirmed.fetch_add(1, Ordering::Relaxed);
        self.groups_created.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_seat_conflict(&self) {
        self.seat_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cancellation(&self, group_cancelled: bool) {
        self.requests_cancelled.fetch_add(1, Ordering::Relaxed);
        if group_cancelled {
            self.groups_cancelled.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of all counters.
    pub fn counts(&self) -> TelemetryCounts {
        TelemetryCounts {
            bookings_confirmed: self.bookings_confirmed.load(Ordering::Relaxed),
            passengers_pooled: self.passengers_pooled.load(Ordering::Relaxed),
            groups_created: self.groups_created.load(Ordering::Relaxed),
            seat_conflicts: self.seat_conflicts.load(Ordering::Relaxed),
            requests_cancelled: self.requests_cancelled.load(Ordering::Relaxed),
            groups_cancelled: self.groups_cancelled.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of [`PoolTelemetry`] counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryCounts {
    pub bookings_confirmed: u64,
    pub passengers_pooled: u64,
    pub groups_created: u64,
    pub seat_conflicts: u64,
    pub requests_cancelled: u64,
    pub groups_cancelled: u64,
}
