use crate::constants::{OBSTACLE_RADIUS, TRACK_BAND_WIDTH, TRACK_MARGIN, VEHICLE_RADIUS};

/// A circular blocker on the drivable band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// The annular track: immutable ring geometry plus a mutable obstacle set.
///
/// Geometry fields are private by design; the radii are derived from the
/// canvas size at construction and never change afterwards.
#[derive(Clone, Debug)]
pub struct Track {
    width: f64,
    height: f64,
    cx: f64,
    cy: f64,
    band_width: f64,
    outer_radius: f64,
    inner_radius: f64,
    obstacles: Vec<Obstacle>,
}

impl Track {
    pub fn new(width: f64, height: f64) -> Self {
        let outer_radius = width.min(height) / 2.0 - TRACK_MARGIN;
        Self {
            width,
            height,
            cx: width / 2.0,
            cy: height / 2.0,
            band_width: TRACK_BAND_WIDTH,
            outer_radius,
            inner_radius: outer_radius - TRACK_BAND_WIDTH,
            obstacles: Vec::new(),
        }
    }

    /// True iff the point lies on the drivable band and clear of every
    /// obstacle by at least the combined obstacle + vehicle radius.
    /// Pure; repeated calls on an unchanged track give identical results.
    pub fn is_on_track(&self, x: f64, y: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < self.inner_radius || distance > self.outer_radius {
            return false;
        }
        for obstacle in &self.obstacles {
            let ox = x - obstacle.x;
            let oy = y - obstacle.y;
            let clearance = (ox * ox + oy * oy).sqrt();
            if clearance <= obstacle.radius + VEHICLE_RADIUS {
                return false;
            }
        }
        true
    }

    /// Append an obstacle with the default radius. The track is a dumb data
    /// sink: placement is not validated, callers check `is_on_track` first.
    pub fn add_obstacle(&mut self, x: f64, y: f64) {
        self.add_obstacle_with_radius(x, y, OBSTACLE_RADIUS);
    }

    pub fn add_obstacle_with_radius(&mut self, x: f64, y: f64, radius: f64) {
        self.obstacles.push(Obstacle { x, y, radius });
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles.clear();
    }

    /// Point on the mid-band circle at the given angle, where vehicles spawn.
    pub fn spawn_pose(&self, angle: f64) -> (f64, f64) {
        let radius = self.mid_radius();
        (
            self.cx + radius * angle.cos(),
            self.cy + radius * angle.sin(),
        )
    }

    pub fn mid_radius(&self) -> f64 {
        (self.outer_radius + self.inner_radius) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_derive_from_smallest_canvas_dimension() {
        let track = Track::new(800.0, 600.0);
        assert_eq!(track.outer_radius(), 250.0);
        assert_eq!(track.inner_radius(), 150.0);
        assert_eq!(track.center(), (400.0, 300.0));
    }

    #[test]
    fn center_region_is_off_track() {
        let track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        assert!(!track.is_on_track(cx, cy));
        assert!(!track.is_on_track(cx + 10.0, cy));
        assert!(!track.is_on_track(cx, cy - 10.0));
    }

    #[test]
    fn mid_band_points_are_on_track() {
        let track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        for angle in [0.0, 1.0, 2.5, 4.0, 6.0f64] {
            let x = cx + 200.0 * angle.cos();
            let y = cy + 200.0 * angle.sin();
            assert!(track.is_on_track(x, y), "angle {angle}");
        }
    }

    #[test]
    fn boundary_radii_are_inclusive() {
        let track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        assert!(track.is_on_track(cx + 150.0, cy));
        assert!(track.is_on_track(cx + 250.0, cy));
        assert!(!track.is_on_track(cx + 149.9, cy));
        assert!(!track.is_on_track(cx + 250.1, cy));
    }

    #[test]
    fn obstacle_excludes_its_own_center() {
        let mut track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        let (x, y) = (cx + 200.0, cy);
        assert!(track.is_on_track(x, y));
        track.add_obstacle(x, y);
        assert!(!track.is_on_track(x, y));
    }

    #[test]
    fn obstacle_clearance_uses_combined_radius() {
        let mut track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        track.add_obstacle(cx + 200.0, cy);
        // Exactly at combined radius (10 + 10) still collides.
        assert!(!track.is_on_track(cx + 220.0, cy));
        assert!(track.is_on_track(cx + 220.1, cy));
    }

    #[test]
    fn clear_obstacles_restores_the_band() {
        let mut track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        track.add_obstacle(cx + 200.0, cy);
        track.add_obstacle(cx - 200.0, cy);
        assert_eq!(track.obstacles().len(), 2);
        track.clear_obstacles();
        assert!(track.obstacles().is_empty());
        assert!(track.is_on_track(cx + 200.0, cy));
    }

    #[test]
    fn is_on_track_is_idempotent() {
        let mut track = Track::new(800.0, 600.0);
        let (cx, cy) = track.center();
        track.add_obstacle(cx + 180.0, cy);
        let first = track.is_on_track(cx + 200.0, cy);
        for _ in 0..10 {
            assert_eq!(track.is_on_track(cx + 200.0, cy), first);
        }
    }

    #[test]
    fn spawn_pose_lies_on_the_mid_band() {
        let track = Track::new(800.0, 600.0);
        for angle in [0.0, 1.3, 3.1, 5.9f64] {
            let (x, y) = track.spawn_pose(angle);
            assert!(track.is_on_track(x, y), "angle {angle}");
            let (cx, cy) = track.center();
            let r = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            assert!((r - track.mid_radius()).abs() < 1e-9);
        }
    }
}
