//! The marker feature collection embedded in element pages.

use std::str::FromStr;

use geojson::{Feature, FeatureCollection, GeoJson, Value};

use crate::element::Element;
use crate::error::{CoreError, Result};
use crate::map::LatLng;

/// Property holding the popup object of a marker.
pub const POPUP_PROPERTY: &str = "popupContent";

/// Key inside the popup object holding the HTML to display.
pub const POPUP_CONTENT_KEY: &str = "content";

/// An ordered GeoJSON feature collection of map markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCollection {
    inner: FeatureCollection,
}

impl MarkerCollection {
    pub fn new(inner: FeatureCollection) -> Self {
        Self { inner }
    }

    /// Parse a GeoJSON document that must be a FeatureCollection.
    pub fn parse(text: &str) -> Result<Self> {
        let geojson = GeoJson::from_str(text)?;
        let inner = FeatureCollection::try_from(geojson)?;
        tracing::trace!(features = inner.features.len(), "Parsed feature collection");
        Ok(Self { inner })
    }

    /// Build the collection for a set of elements, one point per element.
    ///
    /// `detail_url` resolves the link shown in each popup title.
    pub fn from_elements<'a, I, F>(elements: I, media_url: &str, detail_url: F) -> Self
    where
        I: IntoIterator<Item = &'a Element>,
        F: Fn(&Element) -> String,
    {
        let features = elements
            .into_iter()
            .map(|element| element.to_feature(&detail_url(element), media_url))
            .collect();

        Self::new(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }

    pub fn features(&self) -> &[Feature] {
        &self.inner.features
    }

    pub fn len(&self) -> usize {
        self.inner.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.features.is_empty()
    }

    /// Coordinates of the first feature, which must be a point.
    pub fn first_position(&self) -> Result<LatLng> {
        let first = self.inner.features.first().ok_or(CoreError::EmptyCollection)?;
        point_position(first).ok_or(CoreError::MissingPointGeometry { index: 0 })
    }

    pub fn to_json(&self) -> String {
        GeoJson::from(self.inner.clone()).to_string()
    }
}

/// Position of a point feature.
pub fn point_position(feature: &Feature) -> Option<LatLng> {
    match feature.geometry.as_ref().map(|geometry| &geometry.value) {
        Some(Value::Point(position)) => LatLng::from_position(position),
        _ => None,
    }
}

/// HTML of a feature's popup, from `properties.popupContent.content`.
///
/// Only string content counts; anything else means the feature has no popup.
pub fn popup_content(feature: &Feature) -> Option<&str> {
    feature
        .property(POPUP_PROPERTY)
        .and_then(|popup| popup.get(POPUP_CONTENT_KEY))
        .and_then(serde_json::Value::as_str)
}
