use geotree_core::map::Viewport;

use crate::error::MapError;
use crate::layers::{GeoJsonLayer, LayerControl, TileLayer};
use crate::snapshot::MapSnapshot;

/// A live map that layers, controls and a viewport can be applied to.
pub trait MapSurface {
    /// Show a tile layer immediately.
    fn add_tile_layer(&mut self, layer: TileLayer);

    fn add_control(&mut self, control: LayerControl);

    fn add_geojson_layer(&mut self, layer: GeoJsonLayer);

    fn set_view(&mut self, viewport: Viewport);
}

/// A map surface without rendering. It keeps everything applied to it so
/// the result of initialization can be inspected.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    tile_layers: Vec<TileLayer>,
    controls: Vec<LayerControl>,
    geojson_layers: Vec<GeoJsonLayer>,
    viewport: Option<Viewport>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile layers currently shown, in the order they were added.
    pub fn tile_layers(&self) -> &[TileLayer] {
        &self.tile_layers
    }

    pub fn has_tile_layer(&self, name: &str) -> bool {
        self.tile_layers.iter().any(|layer| layer.name().as_str() == name)
    }

    pub fn controls(&self) -> &[LayerControl] {
        &self.controls
    }

    pub fn geojson_layers(&self) -> &[GeoJsonLayer] {
        &self.geojson_layers
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Switch to another base layer, as a user would through the layer
    /// control: every shown layer belonging to the same control is removed
    /// and `name` is shown instead.
    pub fn select_base_layer(&mut self, name: &str) -> Result<(), MapError> {
        let control = self
            .controls
            .iter()
            .find(|control| control.find(name).is_some())
            .ok_or_else(|| MapError::UnknownLayer(name.to_string()))?;

        let selected = control.find(name).cloned();
        let control = control.clone();

        self.tile_layers.retain(|layer| !control.contains(layer));
        if let Some(layer) = selected {
            tracing::debug!(layer = %layer.name(), "Selected base layer");
            self.tile_layers.push(layer);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot::capture(self)
    }
}

impl MapSurface for HeadlessMap {
    fn add_tile_layer(&mut self, layer: TileLayer) {
        self.tile_layers.push(layer);
    }

    fn add_control(&mut self, control: LayerControl) {
        self.controls.push(control);
    }

    fn add_geojson_layer(&mut self, layer: GeoJsonLayer) {
        self.geojson_layers.push(layer);
    }

    fn set_view(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}
