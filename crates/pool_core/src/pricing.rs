//! Fare model: distance-based fare with demand surge and detour penalty.

use serde::{Deserialize, Serialize};

/// Default rate per kilometre for the hub-to-stop distance.
pub const DEFAULT_RATE_PER_KM: f64 = 20.0;

/// Default penalty per extra kilometre of detour.
pub const DEFAULT_DETOUR_RATE_PER_KM: f64 = 5.0;

/// Pricing tunables. Part of [`crate::params::PoolingParams`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub rate_per_km: f64,
    pub detour_rate_per_km: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rate_per_km: DEFAULT_RATE_PER_KM,
            detour_rate_per_km: DEFAULT_DETOUR_RATE_PER_KM,
        }
    }
}

/// Fare inputs, all observed inside the booking transaction.
#[derive(Debug, Clone, Copy)]
pub struct FareInputs {
    /// Great-circle distance from the hub to this passenger's stop (km).
    pub hub_distance_km: f64,
    /// Marginal route increase caused by adding this passenger (km).
    pub extra_km: f64,
    /// Seats occupied in the group after this booking's increment.
    pub passenger_count: u32,
    /// Forming groups across both directions at fare time.
    pub forming_groups: u64,
    /// Active cabs in the roster at fare time.
    pub active_cabs: u64,
}

/// Calculate one passenger's fare, rounded to the nearest currency unit.
///
/// Formula: `round(base / passengers * surge + extra * detour_rate)` where
/// `base = hub_distance * rate_per_km` and
/// `surge = 1 + forming_groups / active_cabs` (1 when no cab is active).
///
/// The fare is fixed at confirmation time; the group growing later never
/// re-prices already-confirmed passengers.
pub fn calculate_fare(config: &PricingConfig, inputs: &FareInputs) -> i64 {
    let base = inputs.hub_distance_km * config.rate_per_km;
    let surge = if inputs.active_cabs == 0 {
        1.0
    } else {
        1.0 + inputs.forming_groups as f64 / inputs.active_cabs as f64
    };
    let shared = base / f64::from(inputs.passenger_count.max(1));
    let detour = inputs.extra_km * config.detour_rate_per_km;
    (shared * surge + detour).round() as i64
}
