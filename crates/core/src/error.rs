#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("No value provided for tile URL placeholder {{{0}}}")]
    UnresolvedPlaceholder(String),

    #[error("Zoom {zoom} is outside the layer range 0..={max_zoom}")]
    ZoomOutOfRange { zoom: i32, max_zoom: u8 },

    #[error("Tile {x}/{y} does not exist at zoom {zoom}")]
    TileOutOfRange { zoom: u8, x: u32, y: u32 },

    #[error("Feature collection has no features")]
    EmptyCollection,

    #[error("Feature {index} has no point geometry")]
    MissingPointGeometry { index: usize },

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
