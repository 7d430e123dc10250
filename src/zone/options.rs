//! Zone layer construction options.
//!
//! Options are forwarded unchanged to the layer's shape group. They can be
//! built in code or read from a JSON settings document.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// Fixed path of the state boundary dataset.
pub const DEFAULT_RESOURCE_PATH: &str = "/static/js/us_states.json";

/// Options for a zone layer and its shape group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneLayerOptions {
    /// Path of the GeoJSON resource fetched at construction.
    pub resource_path: String,
    /// Directory the resource path is resolved against on native builds.
    pub static_root: String,
    /// Stroke color as RGB.
    pub color: [u8; 3],
    /// Stroke width in points.
    pub line_width: f32,
    /// Whether the layer is painted at all.
    pub visible: bool,
    /// Minimum zoom level at which the layer is painted.
    pub min_zoom: f32,
}

impl Default for ZoneLayerOptions {
    fn default() -> Self {
        Self {
            resource_path: DEFAULT_RESOURCE_PATH.to_string(),
            static_root: ".".to_string(),
            color: [100, 100, 120],
            line_width: 1.5,
            visible: true,
            min_zoom: 0.0,
        }
    }
}

impl ZoneLayerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    pub fn with_static_root(mut self, root: impl Into<String>) -> Self {
        self.static_root = root.into();
        self
    }

    pub fn stroke_color(&self) -> Color32 {
        let [r, g, b] = self.color;
        Color32::from_rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_states_dataset() {
        let options = ZoneLayerOptions::default();
        assert_eq!(options.resource_path, "/static/js/us_states.json");
        assert!(options.visible);
        assert_eq!(options.stroke_color(), Color32::from_rgb(100, 100, 120));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let options = ZoneLayerOptions::from_json(r#"{ "color": [255, 0, 0], "visible": false }"#)
            .unwrap();
        assert_eq!(options.color, [255, 0, 0]);
        assert!(!options.visible);
        assert_eq!(options.line_width, 1.5);
        assert_eq!(options.resource_path, DEFAULT_RESOURCE_PATH);
    }

    #[test]
    fn test_builder_overrides_paths() {
        let options = ZoneLayerOptions::new()
            .with_resource_path("/data/zones.json")
            .with_static_root("/srv/www");
        assert_eq!(options.resource_path, "/data/zones.json");
        assert_eq!(options.static_root, "/srv/www");
    }
}
