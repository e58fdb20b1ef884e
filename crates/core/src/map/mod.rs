pub mod layer;
pub mod tile;
pub mod viewport;

pub use layer::TileLayerConfig;
pub use tile::Tile;
pub use viewport::{LatLng, Viewport};
