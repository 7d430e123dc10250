#![warn(clippy::all)]

//! Zone Overlay - a state boundary map overlay.
//!
//! Hosts one zone layer on a pannable, zoomable canvas. The boundary dataset
//! is fetched from the page origin on the web and read from a static
//! directory on native builds.

mod app;

use app::ZoneApp;
use zone_overlay::logging;
use zone_overlay::zone::ZoneLayerOptions;

/// Environment variable naming a JSON file of layer options.
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "ZONE_OVERLAY_CONFIG";

/// Environment variable overriding the static directory.
#[cfg(not(target_arch = "wasm32"))]
const STATIC_ROOT_ENV: &str = "ZONE_OVERLAY_STATIC_ROOT";

/// Builds layer options from the optional config file and environment.
#[cfg(not(target_arch = "wasm32"))]
fn load_options() -> ZoneLayerOptions {
    let mut options = match std::env::var(CONFIG_ENV) {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match ZoneLayerOptions::from_json(&json) {
                Ok(options) => {
                    log::info!("Loaded layer options from {}", path);
                    options
                }
                Err(e) => {
                    log::warn!("Invalid layer options in {}: {}", path, e);
                    ZoneLayerOptions::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path, e);
                ZoneLayerOptions::default()
            }
        },
        Err(_) => ZoneLayerOptions::default(),
    };

    if let Ok(root) = std::env::var(STATIC_ROOT_ENV) {
        options = options.with_static_root(root);
    }

    options
}

// Native entry point
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    let verbosity = std::env::var(logging::VERBOSE_ENV).ok();
    let level = verbosity.as_deref().and_then(logging::parse_verbosity);

    // RUST_LOG, when set, refines the verbosity level
    env_logger::Builder::new()
        .filter_level(level.unwrap_or(logging::DEFAULT_LEVEL))
        .parse_default_env()
        .init();

    if let (Some(value), None) = (&verbosity, level) {
        log::warn!(
            "Ignoring {}={}; expected 1, 10, 20, 30 or 40",
            logging::VERBOSE_ENV,
            value
        );
    }
    logging::preamble();

    let options = load_options();
    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Zone Overlay",
        native_options,
        Box::new(|cc| Ok(Box::new(ZoneApp::new(cc, options)))),
    )
}

// WASM entry point - main is not called on wasm32
#[cfg(target_arch = "wasm32")]
fn main() {}

/// Entry point for the WASM application.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn start() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` messages to `console.log`:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    logging::preamble();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        let canvas = match document
            .get_element_by_id("app_canvas")
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("app_canvas is missing or not a canvas");
                return;
            }
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(ZoneApp::new(cc, ZoneLayerOptions::default())))),
            )
            .await;

        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(_) => loading_text.remove(),
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p>The app has crashed. See the developer console for details.</p>",
                    );
                    log::error!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
