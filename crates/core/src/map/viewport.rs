use geo::Point;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in latitude/longitude order.
///
/// GeoJSON positions are `[longitude, latitude]`; use [`LatLng::from_position`]
/// rather than indexing by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Read a GeoJSON position. Returns `None` when fewer than two
    /// coordinates are present.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] => Some(Self::new(*lat, *lng)),
            _ => None,
        }
    }
}

impl From<LatLng> for Point<f64> {
    fn from(value: LatLng) -> Self {
        Point::new(value.lng, value.lat)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(value: Point<f64>) -> Self {
        Self::new(value.y(), value.x())
    }
}

/// Visible center and zoom level of a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}
