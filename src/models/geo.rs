//! Geographic coordinates and camera positions.

use crate::constants::{MAX_ZOOM, MIN_ZOOM, WORLD_CENTER, WORLD_ZOOM};
use serde::{Deserialize, Serialize};

/// A point on the map in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    /// Longitude, -180..=180
    pub lon: f64,
    /// Latitude, -90..=90
    pub lat: f64,
}

impl LngLat {
    /// Creates a new point.
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Linear interpolation towards `other` by `t` in 0..=1.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            lon: (other.lon - self.lon).mul_add(t, self.lon),
            lat: (other.lat - self.lat).mul_add(t, self.lat),
        }
    }
}

/// Camera target: center point and zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Map center
    pub center: LngLat,
    /// Zoom level (1 = whole world)
    pub zoom: f64,
}

impl Camera {
    /// Creates a camera, clamping zoom to the supported range.
    #[must_use]
    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// The global default view.
    #[must_use]
    pub fn world() -> Self {
        Self::new(LngLat::new(WORLD_CENTER.0, WORLD_CENTER.1), WORLD_ZOOM)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::world()
    }
}
