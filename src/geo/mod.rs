//! Geographic data for map overlays.
//!
//! This module provides GeoJSON decoding into typed features, the map
//! projection, and painting of overlay shapes onto the egui canvas.

mod feature;
mod projection;
mod renderer;

pub use feature::{CoordRing, GeoDataset, GeoFeature};
pub use projection::MapProjection;
pub use renderer::render_zone_layer;
