use geojson::Feature;
use geotree_core::MarkerCollection;
use geotree_core::map::Viewport;
use geotree_core::markers::popup_content;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MapConfig;
use crate::error::MapError;
use crate::layers::{FeatureLayer, GeoJsonLayer, LayerControl, PopupOptions, TileLayer};
use crate::page::PageData;
use crate::surface::MapSurface;

/// Caller options. Accepted and logged, not interpreted yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapOptions(serde_json::Map<String, serde_json::Value>);

impl MapOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapInitializer {
    config: MapConfig,
}

impl MapInitializer {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Initialize `surface`, binding a popup to every feature that carries
    /// `popupContent.content`.
    pub fn initialize<S>(
        &self,
        surface: &mut S,
        options: &MapOptions,
        page: &PageData,
    ) -> Result<(), MapError>
    where
        S: MapSurface + ?Sized,
    {
        let popup_options = PopupOptions {
            min_width: self.config.popup_min_width,
        };

        self.initialize_with(surface, options, page, |feature, layer| {
            if let Some(content) = popup_content(feature) {
                layer.bind_popup(content, popup_options.clone());
            }
        })
    }

    /// Initialize `surface` with a custom per-feature hook.
    ///
    /// Steps run in order and stop at the first error. Whatever was applied
    /// before the error stays on the surface:
    /// 1. base tile layer, shown
    /// 2. satellite tile layer built from the page token, not shown
    /// 3. layer control with both layers
    /// 4. marker layer, `on_each_feature` called per feature
    /// 5. viewport on the first feature at the configured zoom
    pub fn initialize_with<S, F>(
        &self,
        surface: &mut S,
        options: &MapOptions,
        page: &PageData,
        on_each_feature: F,
    ) -> Result<(), MapError>
    where
        S: MapSurface + ?Sized,
        F: FnMut(&Feature, &mut FeatureLayer),
    {
        debug!(?options, "Initializing map");

        let base = TileLayer::new(
            self.config.base_layer_name.as_str(),
            self.config.base_layer.clone(),
        );
        surface.add_tile_layer(base.clone());
        info!(layer = %base.name(), "Added base tile layer");

        let token: String = page.parse_json(&self.config.token_element_id)?;
        let satellite = TileLayer::new(
            self.config.satellite_layer_name.as_str(),
            self.config.satellite_layer.clone().with_access_token(token),
        );

        surface.add_control(LayerControl::new().with_base_layer(base).with_base_layer(satellite));
        info!("Added layer control");

        let markers_id = &self.config.markers_element_id;
        let collection = MarkerCollection::parse(page.element(markers_id)?).map_err(|source| {
            MapError::InvalidCollection {
                id: markers_id.clone(),
                source,
            }
        })?;
        debug!(collection = %collection.to_json(), "Parsed marker collection");

        let markers = GeoJsonLayer::new(&collection, on_each_feature);
        info!(
            features = markers.layers().len(),
            popups = markers.popup_count(),
            "Added marker layer"
        );
        surface.add_geojson_layer(markers);

        let center = collection.first_position().map_err(MapError::Viewport)?;
        let viewport = Viewport::new(center, self.config.initial_zoom);
        surface.set_view(viewport);
        info!(lat = center.lat, lng = center.lng, zoom = viewport.zoom, "Set initial view");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessMap;
    use geotree_core::CoreError;
    use geotree_core::map::LatLng;

    const MARKERS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [12.493652, 41.866288]},
                "properties": {"popupContent": {"content": "<b>X</b>"}}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [12.5, 41.9]},
                "properties": {}
            }
        ]
    }"#;

    fn page(token: &str, markers: &str) -> PageData {
        PageData::new()
            .with_element("mapbox_token", token)
            .with_element("marker_data", markers)
    }

    fn initialize(page: &PageData) -> (HeadlessMap, Result<(), MapError>) {
        let mut map = HeadlessMap::new();
        let result = MapInitializer::default().initialize(&mut map, &MapOptions::new(), page);
        (map, result)
    }

    #[test]
    fn test_viewport_on_first_feature() {
        let (map, result) = initialize(&page(r#""pk.abc""#, MARKERS));
        result.unwrap();

        let viewport = map.viewport().unwrap();
        assert_eq!(viewport.center, LatLng::new(41.866288, 12.493652));
        assert_eq!(viewport.zoom, 19);
    }

    #[test]
    fn test_popups_bound_only_with_content() {
        let (map, result) = initialize(&page(r#""pk.abc""#, MARKERS));
        result.unwrap();

        let markers = &map.geojson_layers()[0];
        let popup = markers.layers()[0].popup().unwrap();
        assert_eq!(popup.content, "<b>X</b>");
        assert_eq!(popup.options.min_width, 256);

        assert!(markers.layers()[1].popup().is_none());
    }

    #[test]
    fn test_base_shown_satellite_registered() {
        let (map, result) = initialize(&page(r#""pk.abc""#, MARKERS));
        result.unwrap();

        assert_eq!(map.tile_layers().len(), 1);
        assert!(map.has_tile_layer("Base"));
        assert!(!map.has_tile_layer("Satellite"));

        let control = &map.controls()[0];
        let names: Vec<&str> = control.base_layers().iter().map(|l| l.name().as_str()).collect();
        assert_eq!(names, vec!["Base", "Satellite"]);

        let satellite = control.find("Satellite").unwrap();
        assert_eq!(satellite.config().access_token.as_deref(), Some("pk.abc"));
        assert_eq!(satellite.config().tile_size, Some(512));
    }

    #[test]
    fn test_empty_collection_leaves_view_unset() {
        let (map, result) = initialize(&page(
            r#""pk.abc""#,
            r#"{"type": "FeatureCollection", "features": []}"#,
        ));

        assert!(matches!(result, Err(MapError::Viewport(CoreError::EmptyCollection))));
        assert!(map.viewport().is_none());
        // Earlier steps stay applied
        assert!(map.has_tile_layer("Base"));
        assert_eq!(map.controls().len(), 1);
        assert_eq!(map.geojson_layers().len(), 1);
    }

    #[test]
    fn test_malformed_token_stops_before_markers() {
        let (map, result) = initialize(&page("pk.not-json", MARKERS));

        assert!(matches!(
            result,
            Err(MapError::MalformedElement { ref id, .. }) if id == "mapbox_token"
        ));
        assert!(map.has_tile_layer("Base"));
        assert!(map.controls().is_empty());
        assert!(map.geojson_layers().is_empty());
        assert!(map.viewport().is_none());
    }

    #[test]
    fn test_missing_markers_element() {
        let page = PageData::new().with_element("mapbox_token", r#""pk.abc""#);
        let (map, result) = initialize(&page);

        assert!(matches!(result, Err(MapError::MissingElement(ref id)) if id == "marker_data"));
        assert_eq!(map.controls().len(), 1);
        assert!(map.geojson_layers().is_empty());
    }

    #[test]
    fn test_malformed_markers() {
        let (map, result) = initialize(&page(r#""pk.abc""#, "{not json"));

        assert!(matches!(result, Err(MapError::InvalidCollection { .. })));
        assert!(map.geojson_layers().is_empty());
        assert!(map.viewport().is_none());
    }

    #[test]
    fn test_custom_hook_and_config() {
        let config = MapConfig {
            initial_zoom: 12,
            ..MapConfig::default()
        };
        let mut map = HeadlessMap::new();
        let page = page(r#""pk.abc""#, MARKERS);
        let mut visited = 0;

        MapInitializer::new(config)
            .initialize_with(&mut map, &MapOptions::new(), &page, |_, layer| {
                visited += 1;
                layer.bind_popup("same", PopupOptions { min_width: 10 });
            })
            .unwrap();

        assert_eq!(visited, 2);
        assert_eq!(map.geojson_layers()[0].popup_count(), 2);
        assert_eq!(map.viewport().map(|v| v.zoom), Some(12));
    }

    #[test]
    fn test_dyn_surface() {
        let mut map = HeadlessMap::new();
        let surface: &mut dyn MapSurface = &mut map;

        MapInitializer::default()
            .initialize(surface, &MapOptions::new(), &page(r#""pk.abc""#, MARKERS))
            .unwrap();

        assert!(map.viewport().is_some());
    }
}
