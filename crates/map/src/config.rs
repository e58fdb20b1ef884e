use std::path::Path;

use geotree_core::map::TileLayerConfig;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

pub const DEFAULT_INITIAL_ZOOM: u8 = 19;
pub const DEFAULT_POPUP_MIN_WIDTH: u32 = 256;
pub const DEFAULT_TOKEN_ELEMENT_ID: &str = "mapbox_token";
pub const DEFAULT_MARKERS_ELEMENT_ID: &str = "marker_data";

/// Everything the initializer treats as fixed. Every field falls back to
/// its default when missing from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub base_layer: TileLayerConfig,
    /// The access token is read from the page, not from here.
    pub satellite_layer: TileLayerConfig,
    pub base_layer_name: String,
    pub satellite_layer_name: String,
    pub initial_zoom: u8,
    pub popup_min_width: u32,
    pub token_element_id: String,
    pub markers_element_id: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            base_layer: TileLayerConfig::openstreetmap(),
            satellite_layer: TileLayerConfig::mapbox_satellite(),
            base_layer_name: "Base".into(),
            satellite_layer_name: "Satellite".into(),
            initial_zoom: DEFAULT_INITIAL_ZOOM,
            popup_min_width: DEFAULT_POPUP_MIN_WIDTH,
            token_element_id: DEFAULT_TOKEN_ELEMENT_ID.into(),
            markers_element_id: DEFAULT_MARKERS_ELEMENT_ID.into(),
        }
    }
}

impl MapConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path).map_err(|e| MapError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| MapError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
