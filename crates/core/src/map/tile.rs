use std::f64::consts::PI;

use geo::{Rect, coord};

use crate::map::LatLng;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

/// A slippy-map tile and its normalized Web Mercator extent.
///
/// `x0..x1` runs west to east and `y0..y1` north to south, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub zoom: u8,
    pub tile_x: u32,
    pub tile_y: u32,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Tile {
    pub const WORLD: Tile = Tile {
        zoom: 0,
        tile_x: 0,
        tile_y: 0,
        x0: 0.0,
        y0: 0.0,
        x1: 1.0,
        y1: 1.0,
    };

    pub fn new(zoom: u8, tile_x: u32, tile_y: u32) -> Self {
        let n = Self::tiles_per_side(zoom);

        Tile {
            zoom,
            tile_x,
            tile_y,
            x0: f64::from(tile_x) / n,
            y0: f64::from(tile_y) / n,
            x1: f64::from(tile_x + 1) / n,
            y1: f64::from(tile_y + 1) / n,
        }
    }

    /// The tile at `zoom` that covers `point`.
    ///
    /// Latitudes beyond the Mercator limit are clamped onto the edge row.
    pub fn containing(point: LatLng, zoom: u8) -> Self {
        let n = Self::tiles_per_side(zoom);
        let last = n - 1.0;

        let lat_rad = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = (point.lng + 180.0) / 360.0;
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;

        let tile_x = (x * n).floor().clamp(0.0, last) as u32;
        let tile_y = (y * n).floor().clamp(0.0, last) as u32;

        Self::new(zoom, tile_x, tile_y)
    }

    /// Whether the column and row exist at this zoom.
    pub fn is_valid(&self) -> bool {
        let n = Self::tiles_per_side(self.zoom);
        f64::from(self.tile_x) < n && f64::from(self.tile_y) < n
    }

    /// Row index counted from the south edge, as TMS servers expect.
    /// `None` when the row does not exist at this zoom.
    pub fn inverted_y(&self) -> Option<u32> {
        (Self::tiles_per_side(self.zoom) as u32)
            .checked_sub(1)?
            .checked_sub(self.tile_y)
    }

    /// Geographic extent of the tile, with x as longitude and y as latitude.
    pub fn bounds(&self) -> Rect<f64> {
        // Linear in longitude
        let min_lng = self.x0 * 360.0 - 180.0;
        let max_lng = self.x1 * 360.0 - 180.0;

        // Inverse Mercator: y=0 is north (max latitude), y=1 is south
        let max_lat = (PI - 2.0 * PI * self.y0).sinh().atan().to_degrees();
        let min_lat = (PI - 2.0 * PI * self.y1).sinh().atan().to_degrees();

        Rect::new(
            coord! { x: min_lng, y: min_lat },
            coord! { x: max_lng, y: max_lat },
        )
    }

    fn tiles_per_side(zoom: u8) -> f64 {
        2f64.powi(i32::from(zoom))
    }
}
