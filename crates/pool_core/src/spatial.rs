//! Spatial primitives: coordinates and great-circle distances.
//!
//! Distances use the haversine formula with Earth radius 6371 km and are
//! memoised in a bounded LRU cache keyed by coordinate bit patterns, since
//! the route estimator re-evaluates the same hub and stop legs on every
//! booking.

use std::num::NonZeroUsize;
use std::sync::{Mutex, OnceLock};

use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite. Non-finite coordinates make
    /// [`distance_km`] return `NaN`, which callers must reject as invalid
    /// input rather than treat as a zero-length leg.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    fn bits(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}

/// Uncached haversine distance (internal use).
fn distance_km_uncached(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

type PairKey = ((u64, u64), (u64, u64));

/// Global distance cache (50,000 entries).
fn get_distance_cache() -> &'static Mutex<LruCache<PairKey, f64>> {
    static CACHE: OnceLock<Mutex<LruCache<PairKey, f64>>> = OnceLock::new();
    CACHE.get_or_init(|| {
        Mutex::new(LruCache::new(
            NonZeroUsize::new(50_000).expect("cache size must be non-zero"),
        ))
    })
}

/// Haversine distance in kilometres between two coordinates, with LRU
/// caching.
///
/// Returns `NaN` when either coordinate is non-finite.
pub fn distance_km(a: LatLng, b: LatLng) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        return f64::NAN;
    }

    // Symmetric key (smaller bit pattern first) to maximize cache hits
    let (ka, kb) = (a.bits(), b.bits());
    let key = if ka <= kb { (ka, kb) } else { (kb, ka) };

    let mut cache = match get_distance_cache().lock() {
        Ok(guard) => guard,
        Err(_) => return distance_km_uncached(a, b), // Fallback: compute without cache if mutex poisoned
    };
    *cache.get_or_insert(key, || distance_km_uncached(a, b))
}
