//! Map projection and coordinate transformation.
//!
//! Converts between geographic coordinates (lon/lat) and screen
//! coordinates for painting overlay shapes on the canvas.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

/// Equirectangular map projection centred on a geographic point.
#[derive(Debug, Clone)]
pub struct MapProjection {
    /// Center latitude of the view
    pub center_lat: f64,
    /// Center longitude of the view
    pub center_lon: f64,
    /// Half-span of the view in degrees at zoom 1.0
    pub range_deg: f64,
    /// Current zoom level
    pub zoom: f32,
    /// Pan offset in screen pixels
    pub pan_offset: Vec2,
    /// Screen rectangle for the canvas
    pub screen_rect: Rect,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            // Continental US
            center_lat: 39.0,
            center_lon: -98.0,
            range_deg: 30.0,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
            screen_rect: Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        }
    }
}

impl MapProjection {
    pub fn new(center_lat: f64, center_lon: f64) -> Self {
        Self {
            center_lat,
            center_lon,
            ..Default::default()
        }
    }

    /// Updates the projection with current view state.
    pub fn update(&mut self, zoom: f32, pan_offset: Vec2, screen_rect: Rect) {
        self.zoom = zoom;
        self.pan_offset = pan_offset;
        self.screen_rect = screen_rect;
    }

    fn effective_range(&self) -> f64 {
        self.range_deg / self.zoom as f64
    }

    fn lat_correction(&self) -> f64 {
        self.center_lat.to_radians().cos()
    }

    /// Converts geographic coordinates (lon, lat) to a screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let effective_range = self.effective_range();

        let rel_lon = (coord.x - self.center_lon) * self.lat_correction();
        let rel_lat = coord.y - self.center_lat;

        let norm_x = rel_lon / effective_range;
        // Screen Y grows downward
        let norm_y = -rel_lat / effective_range;

        let center = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        Pos2::new(
            center.x + (norm_x as f32) * half_size,
            center.y + (norm_y as f32) * half_size,
        )
    }

    /// Converts a screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let effective_range = self.effective_range();

        let center = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        let norm_x = (pos.x - center.x) / half_size;
        let norm_y = (pos.y - center.y) / half_size;

        let rel_lon = (norm_x as f64) * effective_range / self.lat_correction();
        let rel_lat = -(norm_y as f64) * effective_range;

        Coord {
            x: self.center_lon + rel_lon,
            y: self.center_lat + rel_lat,
        }
    }

    /// Returns the visible geographic bounds as (min_lon, min_lat, max_lon, max_lat).
    pub fn visible_bounds(&self) -> (f64, f64, f64, f64) {
        let top_left = self.screen_to_geo(self.screen_rect.left_top());
        let bottom_right = self.screen_to_geo(self.screen_rect.right_bottom());

        (
            top_left.x.min(bottom_right.x),
            top_left.y.min(bottom_right.y),
            top_left.x.max(bottom_right.x),
            top_left.y.max(bottom_right.y),
        )
    }

    /// Checks if a coordinate is within the visible bounds (with margin).
    pub fn is_visible(&self, coord: Coord<f64>, margin_deg: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.visible_bounds();
        coord.x >= min_lon - margin_deg
            && coord.x <= max_lon + margin_deg
            && coord.y >= min_lat - margin_deg
            && coord.y <= max_lat + margin_deg
    }

    /// Checks if a bounding box intersects the visible bounds.
    pub fn bbox_visible(&self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> bool {
        let (vis_min_lon, vis_min_lat, vis_max_lon, vis_max_lat) = self.visible_bounds();

        let margin = 1.0;
        !(max_lon < vis_min_lon - margin
            || min_lon > vis_max_lon + margin
            || max_lat < vis_min_lat - margin
            || min_lat > vis_max_lat + margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> MapProjection {
        let mut projection = MapProjection::new(39.0, -98.0);
        projection.update(
            1.0,
            Vec2::ZERO,
            Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)),
        );
        projection
    }

    #[test]
    fn test_center_maps_to_screen_center() {
        let projection = projection();
        let pos = projection.geo_to_screen(Coord { x: -98.0, y: 39.0 });
        assert!((pos.x - 400.0).abs() < 1e-3);
        assert!((pos.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_screen_to_geo_inverts_geo_to_screen() {
        let projection = projection();
        let coord = Coord { x: -105.0, y: 40.0 };
        let back = projection.screen_to_geo(projection.geo_to_screen(coord));
        assert!((back.x - coord.x).abs() < 1e-3);
        assert!((back.y - coord.y).abs() < 1e-3);
    }

    #[test]
    fn test_far_away_bbox_is_culled() {
        let projection = projection();
        assert!(projection.bbox_visible(-110.0, 35.0, -100.0, 42.0));
        // Somewhere over the Indian Ocean
        assert!(!projection.bbox_visible(70.0, -30.0, 80.0, -20.0));
    }
}
