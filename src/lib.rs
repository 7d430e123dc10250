#![warn(clippy::all)]

//! State boundary ("zone") overlay layer for egui map canvases.
//!
//! The [`zone::ZoneLayer`] loads a static GeoJSON dataset of boundaries in
//! the background and redraws one shape per boundary on every
//! [`zone::ZoneLayer::update`]. The [`geo`] module decodes the dataset and
//! paints the resulting shapes.

pub mod geo;
pub mod logging;
pub mod zone;

pub use zone::{zone_layer, ZoneLayer, ZoneLayerOptions};
