//! Application context passed to overlay layers.

use serde::Deserialize;
use std::rc::Rc;

/// System parameters published by the host application.
///
/// Layers treat this opaquely and use the `Rc` instance only as a cache key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysParam {
    /// Bus table from the workspace payload. Not used by the zone layer.
    #[serde(rename = "Bus", default)]
    pub bus: Option<serde_json::Value>,
}

impl SysParam {
    /// Decodes a SysParam object from the host's JSON payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Per-SysParam record kept by the zone layer.
///
/// Reserved for data derived from a parameter set, such as resolved zone
/// coordinates. Currently carries nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamRecord {}

/// Application state handed to `update` whenever it changes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub sys_param: Option<Rc<SysParam>>,
}

impl Context {
    /// A context with no system parameters.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_sys_param(sys_param: Rc<SysParam>) -> Self {
        Self {
            sys_param: Some(sys_param),
        }
    }
}
