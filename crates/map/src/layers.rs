//! Layers and controls a map surface can hold.

use std::sync::Arc;

use geojson::{Feature, FeatureCollection};
use geotree_core::map::{Tile, TileLayerConfig};
use geotree_core::{LayerName, MarkerCollection};

/// A named raster tile layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    name: LayerName,
    config: Arc<TileLayerConfig>,
}

impl TileLayer {
    pub fn new(name: impl Into<LayerName>, config: TileLayerConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
        }
    }

    pub fn name(&self) -> &LayerName {
        &self.name
    }

    pub fn config(&self) -> &TileLayerConfig {
        &self.config
    }

    pub fn tile_url(&self, tile: &Tile) -> geotree_core::Result<String> {
        self.config.tile_url(tile)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupOptions {
    pub min_width: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: String,
    pub options: PopupOptions,
}

/// The rendered shape of one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayer {
    feature: Feature,
    popup: Option<Popup>,
}

impl FeatureLayer {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            popup: None,
        }
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn bind_popup(&mut self, content: impl Into<String>, options: PopupOptions) {
        self.popup = Some(Popup {
            content: content.into(),
            options,
        });
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }
}

/// Markers and shapes rendered from a feature collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonLayer {
    layers: Vec<FeatureLayer>,
}

impl GeoJsonLayer {
    /// Render every feature that has a geometry, calling `on_each_feature`
    /// once per rendered feature in collection order.
    pub fn new<F>(collection: &MarkerCollection, mut on_each_feature: F) -> Self
    where
        F: FnMut(&Feature, &mut FeatureLayer),
    {
        let mut layers = Vec::with_capacity(collection.len());

        for feature in collection.features() {
            if feature.geometry.is_none() {
                tracing::debug!(id = ?feature.id, "Skipping feature without geometry");
                continue;
            }

            let mut layer = FeatureLayer::new(feature.clone());
            on_each_feature(feature, &mut layer);
            layers.push(layer);
        }

        Self { layers }
    }

    pub fn layers(&self) -> &[FeatureLayer] {
        &self.layers
    }

    pub fn popup_count(&self) -> usize {
        self.layers.iter().filter(|layer| layer.popup.is_some()).count()
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.layers.iter().map(|layer| layer.feature.clone()).collect(),
            foreign_members: None,
        }
    }
}

/// Layer switcher listing mutually exclusive base layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerControl {
    base_layers: Vec<TileLayer>,
}

impl LayerControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_layer(mut self, layer: TileLayer) -> Self {
        self.base_layers.push(layer);
        self
    }

    pub fn base_layers(&self) -> &[TileLayer] {
        &self.base_layers
    }

    pub fn find(&self, name: &str) -> Option<&TileLayer> {
        self.base_layers.iter().find(|layer| layer.name().as_str() == name)
    }

    pub fn contains(&self, layer: &TileLayer) -> bool {
        self.base_layers.iter().any(|candidate| candidate.name() == layer.name())
    }
}
