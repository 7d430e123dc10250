//! Overlay shape group.
//!
//! A `LayerGroup` owns the shapes a layer has drawn. Shapes can be added one
//! at a time and cleared all at once; painting is done by
//! [`crate::geo::render_zone_layer`].

use super::ZoneLayerOptions;
use crate::geo::GeoFeature;
use eframe::egui::Stroke;

/// One rendered shape: a feature plus the stroke it was added with.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneShape {
    pub feature: GeoFeature,
    pub stroke: Stroke,
}

impl ZoneShape {
    /// Builds a shape for `feature` styled from the group options.
    pub fn from_feature(feature: &GeoFeature, options: &ZoneLayerOptions) -> Self {
        Self {
            feature: feature.clone(),
            stroke: Stroke::new(options.line_width, options.stroke_color()),
        }
    }
}

/// A composable group of shapes drawn on the map.
#[derive(Debug, Clone)]
pub struct LayerGroup {
    options: ZoneLayerOptions,
    shapes: Vec<ZoneShape>,
}

impl LayerGroup {
    pub fn new(options: ZoneLayerOptions) -> Self {
        Self {
            options,
            shapes: Vec::new(),
        }
    }

    pub fn options(&self) -> &ZoneLayerOptions {
        &self.options
    }

    /// Appends a shape on top of those already drawn.
    pub fn add_shape(&mut self, shape: ZoneShape) {
        self.shapes.push(shape);
    }

    /// Removes every shape from the group.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
    }

    /// Shapes in the order they were added.
    pub fn shapes(&self) -> &[ZoneShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Whether the group should be painted at `zoom`.
    pub fn is_visible_at(&self, zoom: f32) -> bool {
        self.options.visible && zoom >= self.options.min_zoom
    }
}
