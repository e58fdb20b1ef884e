//! Serializable view of a headless map.

use geotree_core::map::{Tile, Viewport};
use geotree_core::{LayerName, MarkerCollection};
use serde::Serialize;

use crate::layers::{GeoJsonLayer, LayerControl, TileLayer};
use crate::surface::HeadlessMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSnapshot {
    pub tile_layers: Vec<TileLayerSnapshot>,
    pub controls: Vec<ControlSnapshot>,
    pub geojson_layers: Vec<GeoJsonSnapshot>,
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayerSnapshot {
    pub name: LayerName,
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    /// Tile under the viewport center, at the viewport zoom capped to the
    /// layer's max zoom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_tile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSnapshot {
    pub base_layers: Vec<LayerName>,
    /// The control's layer currently shown, if any.
    pub active: Option<LayerName>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonSnapshot {
    pub feature_count: usize,
    pub popups: Vec<PopupSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupSnapshot {
    pub feature_index: usize,
    pub content: String,
    pub min_width: u32,
}

impl MapSnapshot {
    pub fn capture(map: &HeadlessMap) -> Self {
        let viewport = map.viewport();

        Self {
            tile_layers: map
                .tile_layers()
                .iter()
                .map(|layer| tile_layer_snapshot(layer, viewport))
                .collect(),
            controls: map
                .controls()
                .iter()
                .map(|control| control_snapshot(control, map.tile_layers()))
                .collect(),
            geojson_layers: map.geojson_layers().iter().map(geojson_snapshot).collect(),
            viewport,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Features of every marker layer on the map, in order.
pub fn markers_of(map: &HeadlessMap) -> Option<MarkerCollection> {
    let mut layers = map.geojson_layers().iter();
    let mut collection = layers.next()?.to_feature_collection();
    for layer in layers {
        collection.features.extend(layer.to_feature_collection().features);
    }
    Some(MarkerCollection::new(collection))
}

fn tile_layer_snapshot(layer: &TileLayer, viewport: Option<Viewport>) -> TileLayerSnapshot {
    let config = layer.config();
    let center_tile_url = viewport.and_then(|viewport| {
        let tile = Tile::containing(viewport.center, viewport.zoom.min(config.max_zoom));
        layer.tile_url(&tile).ok()
    });

    TileLayerSnapshot {
        name: layer.name().clone(),
        url_template: config.url_template.clone(),
        attribution: config.attribution.clone(),
        max_zoom: config.max_zoom,
        tile_size: config.tile_size,
        center_tile_url,
    }
}

fn control_snapshot(control: &LayerControl, shown: &[TileLayer]) -> ControlSnapshot {
    ControlSnapshot {
        base_layers: control
            .base_layers()
            .iter()
            .map(|layer| layer.name().clone())
            .collect(),
        active: shown
            .iter()
            .find(|layer| control.contains(layer))
            .map(|layer| layer.name().clone()),
    }
}

fn geojson_snapshot(layer: &GeoJsonLayer) -> GeoJsonSnapshot {
    GeoJsonSnapshot {
        feature_count: layer.layers().len(),
        popups: layer
            .layers()
            .iter()
            .enumerate()
            .filter_map(|(index, feature_layer)| {
                feature_layer.popup().map(|popup| PopupSnapshot {
                    feature_index: index,
                    content: popup.content.clone(),
                    min_width: popup.options.min_width,
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::{MapInitializer, MapOptions};
    use crate::page::PageData;
    use serde_json::json;

    fn initialized() -> HeadlessMap {
        let page = PageData::new()
            .with_element("mapbox_token", r#""pk.abc""#)
            .with_element(
                "marker_data",
                r#"{"type": "FeatureCollection", "features": [
                    {"type": "Feature", "properties": {"popupContent": {"content": "<b>X</b>"}},
                     "geometry": {"type": "Point", "coordinates": [12.493652, 41.866288]}}
                ]}"#,
            );

        let mut map = HeadlessMap::new();
        MapInitializer::default()
            .initialize(&mut map, &MapOptions::new(), &page)
            .unwrap();
        map
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = initialized().snapshot();
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(
            value["viewport"],
            json!({"center": {"lat": 41.866288, "lng": 12.493652}, "zoom": 19})
        );
        assert_eq!(
            value["controls"][0],
            json!({"base_layers": ["Base", "Satellite"], "active": "Base"})
        );
        assert_eq!(
            value["geojson_layers"][0],
            json!({
                "feature_count": 1,
                "popups": [{"feature_index": 0, "content": "<b>X</b>", "min_width": 256}]
            })
        );
        assert_eq!(
            value["tile_layers"][0]["center_tile_url"],
            "https://b.tile.openstreetmap.org/19/280339/194886.png"
        );
    }

    #[test]
    fn test_snapshot_after_switching_layers() {
        let mut map = initialized();
        map.select_base_layer("Satellite").unwrap();

        let snapshot = map.snapshot();
        assert_eq!(snapshot.controls[0].active, Some(LayerName::new("Satellite")));

        let satellite = &snapshot.tile_layers[0];
        assert_eq!(satellite.tile_size, Some(512));
        assert_eq!(
            satellite.center_tile_url.as_deref(),
            Some("https://api.mapbox.com/styles/v1/mapbox/satellite-v9/tiles/18/280339/194886?access_token=pk.abc")
        );
    }

    #[test]
    fn test_snapshot_of_empty_map() {
        let snapshot = HeadlessMap::new().snapshot();
        assert!(snapshot.tile_layers.is_empty());
        assert!(snapshot.viewport.is_none());
        assert!(markers_of(&HeadlessMap::new()).is_none());
    }

    #[test]
    fn test_markers_of() {
        let markers = markers_of(&initialized()).unwrap();
        assert_eq!(markers.len(), 1);
    }
}
