//! Overlay shape rendering.
//!
//! Paints the shapes of a layer group onto the egui canvas.

use super::{GeoFeature, MapProjection};
use crate::zone::{LayerGroup, ZoneShape};
use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Stroke};
use geo_types::Coord;

/// Paints every shape in `group` if the group is visible at `zoom`.
pub fn render_zone_layer(
    painter: &Painter,
    group: &LayerGroup,
    projection: &MapProjection,
    zoom: f32,
) {
    if !group.is_visible_at(zoom) {
        return;
    }

    // Back to front in insertion order
    for shape in group.shapes() {
        render_shape(painter, shape, projection);
    }
}

fn render_shape(painter: &Painter, shape: &ZoneShape, projection: &MapProjection) {
    render_feature(painter, &shape.feature, projection, shape.stroke);
}

fn render_feature(
    painter: &Painter,
    feature: &GeoFeature,
    projection: &MapProjection,
    stroke: Stroke,
) {
    match feature {
        GeoFeature::Point(coord, label) => {
            render_point(painter, coord, projection, stroke.color, label.as_deref());
        }
        GeoFeature::MultiPoint(coords, label) => {
            // Label only the first point
            for (i, coord) in coords.iter().enumerate() {
                let label = if i == 0 { label.as_deref() } else { None };
                render_point(painter, coord, projection, stroke.color, label);
            }
        }
        GeoFeature::LineString(coords) => {
            render_line_string(painter, coords, projection, stroke);
        }
        GeoFeature::MultiLineString(lines) => {
            for coords in lines {
                render_line_string(painter, coords, projection, stroke);
            }
        }
        GeoFeature::Polygon {
            exterior, holes, ..
        } => {
            render_line_string(painter, exterior, projection, stroke);
            for hole in holes {
                render_line_string(painter, hole, projection, stroke);
            }
        }
        GeoFeature::MultiPolygon { polygons, .. } => {
            for (exterior, holes) in polygons {
                render_line_string(painter, exterior, projection, stroke);
                for hole in holes {
                    render_line_string(painter, hole, projection, stroke);
                }
            }
        }
        GeoFeature::Collection { members, .. } => {
            for member in members {
                render_feature(painter, member, projection, stroke);
            }
        }
        GeoFeature::Empty { .. } => {}
    }
}

fn render_point(
    painter: &Painter,
    coord: &Coord<f64>,
    projection: &MapProjection,
    color: Color32,
    label: Option<&str>,
) {
    if !projection.is_visible(*coord, 0.5) {
        return;
    }

    let pos = projection.geo_to_screen(*coord);
    painter.circle_filled(pos, 3.0, color);

    if let Some(text) = label {
        painter.text(
            Pos2::new(pos.x + 5.0, pos.y - 5.0),
            Align2::LEFT_BOTTOM,
            text,
            FontId::proportional(10.0),
            color,
        );
    }
}

/// Projects a line to screen space, or None if it is off screen or degenerate.
fn project_line(coords: &[Coord<f64>], projection: &MapProjection) -> Option<Vec<Pos2>> {
    if coords.len() < 2 {
        return None;
    }

    let (min_lon, max_lon, min_lat, max_lat) = coords.iter().fold(
        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
        |(min_x, max_x, min_y, max_y), c| {
            (
                min_x.min(c.x),
                max_x.max(c.x),
                min_y.min(c.y),
                max_y.max(c.y),
            )
        },
    );

    if !projection.bbox_visible(min_lon, min_lat, max_lon, max_lat) {
        return None;
    }

    Some(
        coords
            .iter()
            .map(|c| projection.geo_to_screen(*c))
            .collect(),
    )
}

fn render_line_string(
    painter: &Painter,
    coords: &[Coord<f64>],
    projection: &MapProjection,
    stroke: Stroke,
) {
    let Some(screen_points) = project_line(coords, projection) else {
        return;
    };

    for window in screen_points.windows(2) {
        if let [p1, p2] = window {
            // Skip sub-pixel segments
            let dist_sq = (p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2);
            if dist_sq > 0.5 {
                painter.line_segment([*p1, *p2], stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_line_culls_offscreen_and_degenerate() {
        let projection = MapProjection::default();

        let single = [Coord { x: -98.0, y: 39.0 }];
        assert!(project_line(&single, &projection).is_none());

        let far = [Coord { x: 100.0, y: -40.0 }, Coord { x: 101.0, y: -41.0 }];
        assert!(project_line(&far, &projection).is_none());

        let near = [Coord { x: -98.0, y: 39.0 }, Coord { x: -97.0, y: 40.0 }];
        let points = project_line(&near, &projection).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[1].x > points[0].x);
        assert!(points[1].y < points[0].y);
    }
}
