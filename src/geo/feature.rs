//! Geographic feature data structures and GeoJSON decoding.

use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, Value};
use serde::Deserialize;

/// A ring or line of geographic coordinates (x = longitude, y = latitude).
pub type CoordRing = Vec<Coord<f64>>;

/// A geographic feature that can be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoFeature {
    /// A series of connected line segments (for boundaries, rivers, etc.)
    LineString(CoordRing),
    /// Multiple line strings (for complex boundaries)
    MultiLineString(Vec<CoordRing>),
    /// A closed polygon with optional label
    Polygon {
        exterior: CoordRing,
        holes: Vec<CoordRing>,
        label: Option<String>,
    },
    /// Multiple polygons with optional label
    MultiPolygon {
        polygons: Vec<(CoordRing, Vec<CoordRing>)>,
        label: Option<String>,
    },
    /// A single point with optional label
    Point(Coord<f64>, Option<String>),
    /// Several points sharing one label
    MultiPoint(Vec<Coord<f64>>, Option<String>),
    /// Mixed geometries from a GeometryCollection, in document order
    Collection {
        members: Vec<GeoFeature>,
        label: Option<String>,
    },
    /// A feature with no drawable geometry (null, or missing coordinates)
    Empty { label: Option<String> },
}

impl GeoFeature {
    /// Returns the feature's label, if it carried a name property.
    pub fn label(&self) -> Option<&str> {
        match self {
            GeoFeature::Polygon { label, .. }
            | GeoFeature::MultiPolygon { label, .. }
            | GeoFeature::Collection { label, .. }
            | GeoFeature::Empty { label } => label.as_deref(),
            GeoFeature::Point(_, label) | GeoFeature::MultiPoint(_, label) => label.as_deref(),
            GeoFeature::LineString(_) | GeoFeature::MultiLineString(_) => None,
        }
    }
}

/// Bare `{ "features": [...] }` document without a top-level `type`.
#[derive(Deserialize)]
struct FeatureList {
    features: Vec<Feature>,
}

/// An immutable, ordered collection of features loaded from a static resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoDataset {
    features: Vec<GeoFeature>,
}

impl GeoDataset {
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }

    /// Parses a dataset from GeoJSON text.
    ///
    /// Every input feature yields exactly one [`GeoFeature`], in document
    /// order; features without drawable geometry become
    /// [`GeoFeature::Empty`]. A lone Feature or Geometry yields a
    /// one-feature dataset. An object that only carries a `features` list
    /// is accepted as well.
    pub fn from_geojson_str(geojson_str: &str) -> Result<Self, String> {
        let features = match geojson_str.parse::<GeoJson>() {
            Ok(GeoJson::FeatureCollection(fc)) => fc.features.iter().map(convert_feature).collect(),
            Ok(GeoJson::Feature(f)) => vec![convert_feature(&f)],
            Ok(GeoJson::Geometry(g)) => vec![convert_geometry(&g, None)],
            Err(e) => {
                let list: FeatureList = serde_json::from_str(geojson_str)
                    .map_err(|_| format!("Failed to parse GeoJSON: {}", e))?;
                list.features.iter().map(convert_feature).collect()
            }
        };

        Ok(Self { features })
    }

    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn convert_feature(feature: &Feature) -> GeoFeature {
    let label = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name").or_else(|| p.get("NAME")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    match &feature.geometry {
        Some(geometry) => convert_geometry(geometry, label),
        None => GeoFeature::Empty { label },
    }
}

fn to_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn to_ring(positions: &[Vec<f64>]) -> CoordRing {
    positions.iter().filter_map(|p| to_coord(p)).collect()
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<(CoordRing, Vec<CoordRing>)> {
    let (exterior, holes) = rings.split_first()?;
    Some((
        to_ring(exterior),
        holes.iter().map(|ring| to_ring(ring)).collect(),
    ))
}

fn convert_geometry(geometry: &Geometry, label: Option<String>) -> GeoFeature {
    match &geometry.value {
        Value::Point(position) => match to_coord(position) {
            Some(c) => GeoFeature::Point(c, label),
            None => GeoFeature::Empty { label },
        },
        Value::MultiPoint(points) => GeoFeature::MultiPoint(to_ring(points), label),
        Value::LineString(coords) => GeoFeature::LineString(to_ring(coords)),
        Value::MultiLineString(lines) => {
            GeoFeature::MultiLineString(lines.iter().map(|line| to_ring(line)).collect())
        }
        Value::Polygon(rings) => match to_polygon(rings) {
            Some((exterior, holes)) => GeoFeature::Polygon {
                exterior,
                holes,
                label,
            },
            None => GeoFeature::Empty { label },
        },
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .filter_map(|rings| to_polygon(rings))
                .collect();
            GeoFeature::MultiPolygon { polygons, label }
        }
        Value::GeometryCollection(geometries) => GeoFeature::Collection {
            members: geometries
                .iter()
                .map(|g| convert_geometry(g, None))
                .collect(),
            label,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STATES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Colorado" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-109.05, 41.0], [-102.05, 41.0], [-102.05, 37.0], [-109.05, 37.0], [-109.05, 41.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "NAME": "Hawaii" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[-155.9, 20.2], [-155.0, 19.1], [-154.8, 19.5], [-155.9, 20.2]]],
                        [[[-156.1, 20.6], [-156.0, 20.9], [-156.7, 20.9], [-156.1, 20.6]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn test_feature_collection_preserves_order_and_labels() {
        let dataset = GeoDataset::from_geojson_str(TWO_STATES).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.features()[0].label(), Some("Colorado"));
        assert_eq!(dataset.features()[1].label(), Some("Hawaii"));

        match &dataset.features()[1] {
            GeoFeature::MultiPolygon { polygons, .. } => assert_eq!(polygons.len(), 2),
            other => panic!("expected multipolygon, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_holes_are_kept() {
        let json = r#"{
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]],
                [[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]
            ]
        }"#;
        let dataset = GeoDataset::from_geojson_str(json).unwrap();
        match &dataset.features()[0] {
            GeoFeature::Polygon {
                exterior, holes, ..
            } => {
                assert_eq!(exterior.len(), 4);
                assert_eq!(holes.len(), 1);
                assert_eq!(holes[0][0], Coord { x: 2.0, y: 2.0 });
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_without_geometry_is_kept_as_empty() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": null, "geometry": null },
                { "type": "Feature", "properties": null, "geometry": { "type": "Point", "coordinates": [1.0, 2.0] } }
            ]
        }"#;
        let dataset = GeoDataset::from_geojson_str(json).unwrap();
        assert_eq!(
            dataset.features(),
            &[
                GeoFeature::Empty { label: None },
                GeoFeature::Point(Coord { x: 1.0, y: 2.0 }, None)
            ]
        );
    }

    #[test]
    fn test_one_entry_per_feature_with_collections() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "A" },
                  "geometry": { "type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]] } },
                { "type": "Feature", "properties": { "name": "B" }, "geometry": null },
                { "type": "Feature", "properties": { "name": "C" },
                  "geometry": { "type": "GeometryCollection", "geometries": [
                      { "type": "Polygon", "coordinates": [[[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 0.0]]] },
                      { "type": "Polygon", "coordinates": [[[4.0, 0.0], [5.0, 0.0], [5.0, 1.0], [4.0, 0.0]]] }
                  ] } },
                { "type": "Feature", "properties": { "name": "D" },
                  "geometry": { "type": "MultiPoint", "coordinates": [[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]] } }
            ]
        }"#;
        let dataset = GeoDataset::from_geojson_str(json).unwrap();
        assert_eq!(dataset.len(), 4);

        let labels: Vec<_> = dataset.features().iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec![Some("A"), Some("B"), Some("C"), Some("D")]);

        assert_eq!(
            dataset.features()[1],
            GeoFeature::Empty {
                label: Some("B".to_string())
            }
        );
        match &dataset.features()[2] {
            GeoFeature::Collection { members, .. } => assert_eq!(members.len(), 2),
            other => panic!("expected collection, got {:?}", other),
        }
        match &dataset.features()[3] {
            GeoFeature::MultiPoint(points, _) => assert_eq!(points.len(), 3),
            other => panic!("expected multipoint, got {:?}", other),
        }
    }

    #[test]
    fn test_untyped_feature_list_is_accepted() {
        let empty = GeoDataset::from_geojson_str(r#"{ "features": [] }"#).unwrap();
        assert!(empty.is_empty());

        let json = r#"{ "features": [
            { "type": "Feature", "properties": { "name": "Utah" },
              "geometry": { "type": "Point", "coordinates": [-111.9, 40.8] } }
        ] }"#;
        let dataset = GeoDataset::from_geojson_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.features()[0].label(), Some("Utah"));
    }

    #[test]
    fn test_malformed_geojson_is_an_error() {
        assert!(GeoDataset::from_geojson_str("{\"features\": 3}").is_err());
        assert!(GeoDataset::from_geojson_str("not json").is_err());
    }
}
