//! Pooling parameters: every tunable used by the matcher, the fare model and
//! the fleet seeder.

use serde::{Deserialize, Serialize};

use crate::pricing::PricingConfig;
use crate::spatial::LatLng;

/// Default hub: Rajiv Gandhi International Airport, Hyderabad (approx).
const DEFAULT_HUB_LAT: f64 = 17.2403;
const DEFAULT_HUB_LNG: f64 = 78.4294;

/// Default cab profile: 4 seats, 4 luggage slots.
const DEFAULT_SEAT_CAPACITY: u32 = 4;
const DEFAULT_LUGGAGE_CAPACITY: u32 = 4;

/// Default pickup radius (km): pickups farther than this from the hub are
/// never pooled into an existing group.
const DEFAULT_PICKUP_RADIUS_KM: f64 = 5.0;

/// Parameters for one pooling deployment (a single hub and a single cab
/// profile).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingParams {
    /// The fixed reference location all routes originate from or end at.
    pub hub: LatLng,
    pub seat_capacity: u32,
    pub luggage_capacity: u32,
    /// How far from the hub a pickup may sit before the request is excluded
    /// from shared groups (km).
    pub pickup_radius_km: f64,
    pub pricing: PricingConfig,
}

impl Default for PoolingParams {
    fn default() -> Self {
        Self {
            hub: LatLng::new(DEFAULT_HUB_LAT, DEFAULT_HUB_LNG),
            seat_capacity: DEFAULT_SEAT_CAPACITY,
            luggage_capacity: DEFAULT_LUGGAGE_CAPACITY,
            pickup_radius_km: DEFAULT_PICKUP_RADIUS_KM,
            pricing: PricingConfig::default(),
        }
    }
}

impl PoolingParams {
    pub fn with_hub(mut self, hub: LatLng) -> Self {
        self.hub = hub;
        self
    }

    pub fn with_capacities(mut self, seats: u32, luggage: u32) -> Self {
        self.seat_capacity = seats;
        self.luggage_capacity = luggage;
        self
    }

    pub fn with_pickup_radius_km(mut self, radius_km: f64) -> Self {
        self.pickup_radius_km = radius_km;
        self
    }

    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_profile() {
        let params = PoolingParams::default();
        assert_eq!(params.seat_capacity, 4);
        assert_eq!(params.luggage_capacity, 4);
        assert_eq!(params.pickup_radius_km, 5.0);
        assert_eq!(params.pricing.rate_per_km, 20.0);
        assert_eq!(params.pricing.detour_rate_per_km, 5.0);
    }

    #[test]
    fn builders_override_defaults() {
        let params = PoolingParams::default()
            .with_capacities(6, 8)
            .with_pickup_radius_km(12.0);
        assert_eq!(params.seat_capacity, 6);
        assert_eq!(params.luggage_capacity, 8);
        assert_eq!(params.pickup_radius_km, 12.0);
    }
}
