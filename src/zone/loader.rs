//! Background loading of the zone dataset.
//!
//! Uses channel-based communication to bridge the async resource fetch
//! with the synchronous `update` calls of the layer.

use crate::geo::GeoDataset;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Errors that can occur while loading the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The HTTP request could not be made or returned a failure status.
    Fetch(String),
    /// The resource could not be read from disk.
    Io(String),
    /// The body was not a GeoJSON document.
    Parse(String),
    /// An unexpected error occurred.
    Other(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(msg) => write!(f, "Fetch failed: {}", msg),
            LoadError::Io(msg) => write!(f, "Read failed: {}", msg),
            LoadError::Parse(msg) => write!(f, "Parse failed: {}", msg),
            LoadError::Other(msg) => write!(f, "Load error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

pub type LoadResult = Result<GeoDataset, LoadError>;

/// Progress of the one-shot dataset load.
///
/// `Loading` moves to exactly one of the terminal states and never back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded(GeoDataset),
    LoadFailed(LoadError),
}

impl LoadState {
    pub fn dataset(&self) -> Option<&GeoDataset> {
        match self {
            LoadState::Loaded(dataset) => Some(dataset),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }
}

/// Channel carrying the result of a background dataset load.
pub struct DatasetChannel {
    sender: Sender<LoadResult>,
    receiver: Receiver<LoadResult>,
}

impl Default for DatasetChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetChannel {
    /// Creates a channel with no load in flight.
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Creates a channel and starts loading `resource_path` into it.
    pub fn load(resource_path: &str, static_root: &str) -> Self {
        let channel = Self::new();
        channel.spawn_load(resource_path.to_string(), static_root.to_string());
        channel
    }

    /// Sender half, for hosts that complete the load themselves.
    pub fn sender(&self) -> Sender<LoadResult> {
        self.sender.clone()
    }

    /// Fetches the resource over HTTP from the page origin.
    #[cfg(target_arch = "wasm32")]
    fn spawn_load(&self, resource_path: String, _static_root: String) {
        let sender = self.sender.clone();
        log::info!("Loading zone dataset from {}", resource_path);

        wasm_bindgen_futures::spawn_local(async move {
            let result = fetch_dataset(&resource_path).await;
            let _ = sender.send(result);
        });
    }

    /// Reads the resource from the static directory on a worker thread.
    #[cfg(not(target_arch = "wasm32"))]
    fn spawn_load(&self, resource_path: String, static_root: String) {
        let sender = self.sender.clone();
        log::info!(
            "Loading zone dataset from {} (root {})",
            resource_path,
            static_root
        );

        std::thread::spawn(move || {
            let result = read_dataset(&static_root, &resource_path);
            let _ = sender.send(result);
        });
    }

    /// Non-blocking check for a completed load.
    ///
    /// Returns None while the load is still in flight.
    pub fn try_recv(&self) -> Option<LoadResult> {
        self.receiver.try_recv().ok()
    }
}

fn parse_dataset(body: &str) -> LoadResult {
    GeoDataset::from_geojson_str(body).map_err(LoadError::Parse)
}

/// Resolves a site-absolute resource path against a filesystem root.
#[cfg(not(target_arch = "wasm32"))]
pub fn resolve_static_path(static_root: &str, resource_path: &str) -> std::path::PathBuf {
    std::path::Path::new(static_root).join(resource_path.trim_start_matches('/'))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_dataset(static_root: &str, resource_path: &str) -> LoadResult {
    let path = resolve_static_path(static_root, resource_path);
    let body = std::fs::read_to_string(&path)
        .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
    parse_dataset(&body)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_dataset(resource_path: &str) -> LoadResult {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window =
        web_sys::window().ok_or_else(|| LoadError::Other("No window available".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(resource_path))
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| LoadError::Fetch("Response was not a Response object".to_string()))?;

    if !response.ok() {
        return Err(LoadError::Fetch(format!(
            "{} returned status {}",
            resource_path,
            response.status()
        )));
    }

    let text = response
        .text()
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| LoadError::Fetch(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| LoadError::Parse("Response body was not text".to_string()))?;

    parse_dataset(&body)
}
