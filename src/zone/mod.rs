//! Zone overlay layer.
//!
//! A zone layer loads a static dataset of state boundaries in the background
//! and redraws one shape per boundary into its shape group each time the
//! host application publishes a new context.

mod cache;
mod context;
mod group;
mod layer;
mod loader;
mod options;

pub use cache::IdentityCache;
pub use context::{Context, ParamRecord, SysParam};
pub use group::{LayerGroup, ZoneShape};
pub use layer::{zone_layer, ZoneLayer};
pub use loader::{DatasetChannel, LoadError, LoadResult, LoadState};
pub use options::{ZoneLayerOptions, DEFAULT_RESOURCE_PATH};
