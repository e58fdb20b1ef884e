//! Tile layer configuration and URL template expansion.
//!
//! Templates use the `{name}` placeholder syntax of browser slippy-map
//! libraries: `{s}` subdomain, `{z}/{x}/{y}` tile address, `{-y}` TMS row,
//! `{r}` retina suffix, `{id}` style id, `{accessToken}` and any custom
//! option.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::map::Tile;

pub const OPENSTREETMAP_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const MAPBOX_URL_TEMPLATE: &str =
    "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";
pub const MAPBOX_ATTRIBUTION: &str = r#"Imagery © <a href="https://www.mapbox.com/">Mapbox</a>"#;
pub const MAPBOX_SATELLITE_STYLE: &str = "mapbox/satellite-v9";
pub const DEFAULT_MAX_ZOOM: u8 = 19;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{ *([\w -]+) *\}").expect("placeholder pattern is valid"));

fn default_max_zoom() -> u8 {
    DEFAULT_MAX_ZOOM
}

fn default_subdomains() -> Vec<String> {
    vec!["a".into(), "b".into(), "c".into()]
}

/// Options of a raster tile layer. Immutable once handed to a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerConfig {
    pub url_template: String,
    #[serde(default)]
    pub attribution: String,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_offset: Option<i8>,
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
    #[serde(default = "default_subdomains")]
    pub subdomains: Vec<String>,
    /// Values for custom `{name}` placeholders.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl TileLayerConfig {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            attribution: String::new(),
            max_zoom: DEFAULT_MAX_ZOOM,
            tile_size: None,
            zoom_offset: None,
            style_id: None,
            access_token: None,
            subdomains: default_subdomains(),
            options: BTreeMap::new(),
        }
    }

    /// Public OpenStreetMap raster tiles.
    pub fn openstreetmap() -> Self {
        Self::new(OPENSTREETMAP_URL_TEMPLATE)
    }

    /// Mapbox satellite imagery. Needs an access token before tiles resolve.
    ///
    /// Mapbox serves 512px tiles, so the zoom is shifted down by one to keep
    /// the same ground resolution as 256px layers.
    pub fn mapbox_satellite() -> Self {
        Self {
            attribution: MAPBOX_ATTRIBUTION.into(),
            tile_size: Some(512),
            zoom_offset: Some(-1),
            style_id: Some(MAPBOX_SATELLITE_STYLE.into()),
            ..Self::new(MAPBOX_URL_TEMPLATE)
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Expand the URL template for `tile`.
    ///
    /// Fails if the tile is deeper than `max_zoom` or outside the grid at its
    /// zoom, if the zoom offset pushes the requested zoom below zero, or if a
    /// placeholder has no value.
    pub fn tile_url(&self, tile: &Tile) -> Result<String> {
        if tile.zoom > self.max_zoom {
            return Err(CoreError::ZoomOutOfRange {
                zoom: i32::from(tile.zoom),
                max_zoom: self.max_zoom,
            });
        }

        if !tile.is_valid() {
            return Err(CoreError::TileOutOfRange {
                zoom: tile.zoom,
                x: tile.tile_x,
                y: tile.tile_y,
            });
        }

        let zoom = i32::from(tile.zoom) + i32::from(self.zoom_offset.unwrap_or(0));
        if zoom < 0 {
            return Err(CoreError::ZoomOutOfRange {
                zoom,
                max_zoom: self.max_zoom,
            });
        }

        let mut unresolved = None;
        let url = PLACEHOLDER.replace_all(&self.url_template, |caps: &Captures| {
            let key = &caps[1];
            self.placeholder_value(key, tile, zoom).unwrap_or_else(|| {
                unresolved.get_or_insert_with(|| key.to_string());
                String::new()
            })
        });

        match unresolved {
            Some(key) => Err(CoreError::UnresolvedPlaceholder(key)),
            None => Ok(url.into_owned()),
        }
    }

    fn placeholder_value(&self, key: &str, tile: &Tile, zoom: i32) -> Option<String> {
        match key {
            "s" => self.subdomain(tile).map(str::to_owned),
            "z" => Some(zoom.to_string()),
            "x" => Some(tile.tile_x.to_string()),
            "y" => Some(tile.tile_y.to_string()),
            "-y" => tile.inverted_y().map(|y| y.to_string()),
            "r" => Some(String::new()),
            "id" => self.style_id.clone(),
            "accessToken" => self.access_token.clone(),
            other => self.options.get(other).cloned(),
        }
    }

    fn subdomain(&self, tile: &Tile) -> Option<&str> {
        if self.subdomains.is_empty() {
            return None;
        }
        let index =
            (u64::from(tile.tile_x) + u64::from(tile.tile_y)) % self.subdomains.len() as u64;
        Some(self.subdomains[index as usize].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openstreetmap_url() {
        let layer = TileLayerConfig::openstreetmap();
        assert_eq!(layer.max_zoom, 19);
        assert_eq!(layer.attribution, "");

        let url = layer.tile_url(&Tile::new(3, 4, 2)).unwrap();
        // (4 + 2) % 3 == 0
        assert_eq!(url, "https://a.tile.openstreetmap.org/3/4/2.png");

        let url = layer.tile_url(&Tile::new(3, 4, 3)).unwrap();
        assert_eq!(url, "https://b.tile.openstreetmap.org/3/4/3.png");
    }

    #[test]
    fn test_mapbox_satellite_url() {
        let layer = TileLayerConfig::mapbox_satellite().with_access_token("pk.test");
        assert_eq!(layer.tile_size, Some(512));
        assert_eq!(layer.zoom_offset, Some(-1));

        let url = layer.tile_url(&Tile::new(19, 280339, 194886)).unwrap();
        assert_eq!(
            url,
            "https://api.mapbox.com/styles/v1/mapbox/satellite-v9/tiles/18/280339/194886?access_token=pk.test"
        );
    }

    #[test]
    fn test_missing_token_is_unresolved() {
        let layer = TileLayerConfig::mapbox_satellite();
        let err = layer.tile_url(&Tile::new(5, 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::UnresolvedPlaceholder(ref key) if key == "accessToken"));
    }

    #[test]
    fn test_zoom_range() {
        let layer = TileLayerConfig::openstreetmap();
        assert!(matches!(
            layer.tile_url(&Tile::new(20, 0, 0)),
            Err(CoreError::ZoomOutOfRange { zoom: 20, max_zoom: 19 })
        ));

        // Offset below zero at the world tile
        let satellite = TileLayerConfig::mapbox_satellite().with_access_token("pk");
        assert!(matches!(
            satellite.tile_url(&Tile::WORLD),
            Err(CoreError::ZoomOutOfRange { zoom: -1, .. })
        ));
    }

    #[test]
    fn test_tms_retina_and_custom_options() {
        let layer = TileLayerConfig::new("https://tiles.example/{layer}/{z}/{x}/{-y}{r}.png")
            .with_option("layer", "terrain");

        let url = layer.tile_url(&Tile::new(2, 1, 0)).unwrap();
        assert_eq!(url, "https://tiles.example/terrain/2/1/3.png");
    }

    #[test]
    fn test_config_from_json() {
        let layer: TileLayerConfig = serde_json::from_str(
            r#"{"urlTemplate": "https://{s}.example/{z}/{x}/{y}.png", "maxZoom": 17, "subdomains": ["t1"]}"#,
        )
        .unwrap();

        assert_eq!(layer.max_zoom, 17);
        assert_eq!(layer.tile_size, None);
        assert_eq!(layer.tile_url(&Tile::new(1, 1, 1)).unwrap(), "https://t1.example/1/1/1.png");
    }

    #[test]
    fn test_token_is_not_serialized() {
        let layer = TileLayerConfig::mapbox_satellite().with_access_token("pk.secret");
        let json = serde_json::to_string(&layer).unwrap();
        assert!(!json.contains("pk.secret"));
        assert!(json.contains("\"id\":\"mapbox/satellite-v9\""));
    }

    #[test]
    fn test_tile_outside_zoom_grid() {
        let layer = TileLayerConfig::new("https://t/{z}/{x}/{-y}.png");

        assert!(matches!(
            layer.tile_url(&Tile::new(1, 0, 5)),
            Err(CoreError::TileOutOfRange { zoom: 1, x: 0, y: 5 })
        ));
        assert!(matches!(
            TileLayerConfig::openstreetmap().tile_url(&Tile::new(2, 4, 0)),
            Err(CoreError::TileOutOfRange { .. })
        ));
        assert_eq!(layer.tile_url(&Tile::new(1, 0, 1)).unwrap(), "https://t/1/0/0.png");
    }
}
