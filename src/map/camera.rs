//! Camera animation and screen projection.
//!
//! Animations are evaluated against caller-supplied instants so the map
//! controller can be driven deterministically in tests.

use crate::constants::WORLD_ZOOM;
use crate::models::{Camera, LngLat};
use std::time::{Duration, Instant};

/// A timed camera move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    from: Camera,
    to: Camera,
    start: Instant,
    duration: Duration,
}

impl CameraAnimation {
    /// Starts an animation at `start`.
    #[must_use]
    pub const fn new(from: Camera, to: Camera, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Final camera.
    #[must_use]
    pub const fn target(&self) -> Camera {
        self.to
    }

    /// Progress in 0..=1 at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Returns true once the camera has reached its target.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Interpolated camera at `now`.
    #[must_use]
    pub fn camera_at(&self, now: Instant) -> Camera {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let t = ease_in_out(progress);
        Camera::new(
            self.from.center.lerp(self.to.center, t),
            (self.to.zoom - self.from.zoom).mul_add(t, self.from.zoom),
        )
    }
}

fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
    }
}

/// Longitude span visible at `zoom`; the whole world fits at the world zoom.
#[must_use]
pub fn lon_span(zoom: f64) -> f64 {
    (360.0 / 2f64.powf(zoom - WORLD_ZOOM)).min(360.0)
}

/// Geographic bounds of a terminal area for a given camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Western edge (min longitude)
    pub west: f64,
    /// Eastern edge (max longitude)
    pub east: f64,
    /// Southern edge (min latitude)
    pub south: f64,
    /// Northern edge (max latitude)
    pub north: f64,
    width: u16,
    height: u16,
}

impl Viewport {
    /// Computes the bounds of a `width` x `height` cell area.
    ///
    /// Terminal cells are roughly twice as tall as they are wide, which the
    /// latitude span accounts for.
    #[must_use]
    pub fn from_camera(camera: Camera, width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let lon_span = lon_span(camera.zoom);
        let lat_span = (lon_span * 2.0 * f64::from(height) / f64::from(width)).min(180.0);

        Self {
            west: camera.center.lon - lon_span / 2.0,
            east: camera.center.lon + lon_span / 2.0,
            south: camera.center.lat - lat_span / 2.0,
            north: camera.center.lat + lat_span / 2.0,
            width,
            height,
        }
    }

    /// Canvas x bounds.
    #[must_use]
    pub const fn x_bounds(&self) -> [f64; 2] {
        [self.west, self.east]
    }

    /// Canvas y bounds.
    #[must_use]
    pub const fn y_bounds(&self) -> [f64; 2] {
        [self.south, self.north]
    }

    /// Maps a cell (relative to the area's top-left) to the coordinate at its center.
    #[must_use]
    pub fn unproject(&self, col: u16, row: u16) -> LngLat {
        let fx = (f64::from(col) + 0.5) / f64::from(self.width);
        let fy = (f64::from(row) + 0.5) / f64::from(self.height);
        LngLat::new(
            (self.east - self.west).mul_add(fx, self.west),
            (self.south - self.north).mul_add(fy, self.north),
        )
    }

    /// Returns true if the box [min, max] overlaps the viewport.
    #[must_use]
    pub fn intersects(&self, min: LngLat, max: LngLat) -> bool {
        max.lon >= self.west && min.lon <= self.east && max.lat >= self.south && min.lat <= self.north
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn germany() -> Camera {
        Camera::new(LngLat::new(10.4515, 51.1657), 5.0)
    }

    #[test]
    fn test_animation_endpoints() {
        let start = Instant::now();
        let anim = CameraAnimation::new(Camera::world(), germany(), start, Duration::from_millis(1500));

        assert_eq!(anim.camera_at(start), Camera::world());
        assert_eq!(anim.camera_at(start + Duration::from_millis(1500)), germany());
        assert_eq!(anim.camera_at(start + Duration::from_secs(10)), germany());
        assert!(!anim.is_finished(start + Duration::from_millis(1499)));
        assert!(anim.is_finished(start + Duration::from_millis(1500)));
    }

    #[test]
    fn test_animation_midpoint_is_between() {
        let start = Instant::now();
        let anim = CameraAnimation::new(Camera::world(), germany(), start, Duration::from_millis(1000));
        let mid = anim.camera_at(start + Duration::from_millis(500));
        assert!(mid.zoom > 1.5 && mid.zoom < 5.0);
        assert!(mid.center.lon > 0.0 && mid.center.lon < 10.4515);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let start = Instant::now();
        let anim = CameraAnimation::new(Camera::world(), germany(), start, Duration::ZERO);
        assert!(anim.is_finished(start));
        assert_eq!(anim.camera_at(start), germany());
    }

    #[test]
    fn test_world_viewport_spans_globe() {
        let viewport = Viewport::from_camera(Camera::world(), 200, 50);
        assert!((viewport.east - viewport.west - 360.0).abs() < 1e-9);
        assert!(viewport.north - viewport.south <= 180.0);
    }

    #[test]
    fn test_unproject_center_cell() {
        let camera = germany();
        let viewport = Viewport::from_camera(camera, 101, 51);
        let center = viewport.unproject(50, 25);
        assert!((center.lon - camera.center.lon).abs() < 1e-9);
        assert!((center.lat - camera.center.lat).abs() < 1e-9);
    }

    #[test]
    fn test_unproject_top_left_is_north_west() {
        let viewport = Viewport::from_camera(Camera::world(), 100, 40);
        let corner = viewport.unproject(0, 0);
        assert!(corner.lon < 0.0);
        assert!(corner.lat > 20.0);
    }

    #[test]
    fn test_intersects() {
        let viewport = Viewport::from_camera(germany(), 100, 40);
        assert!(viewport.intersects(LngLat::new(5.0, 47.0), LngLat::new(15.0, 55.0)));
        assert!(!viewport.intersects(LngLat::new(-80.0, 20.0), LngLat::new(-70.0, 30.0)));
    }
}
