//! # geotree-map
//!
//! Map initialization for geotree pages. [`MapInitializer`] wires tile
//! layers, the layer switcher, marker popups and the initial viewport onto
//! any [`MapSurface`]; [`HeadlessMap`] records the result so it can be
//! inspected, exported as a [`MapSnapshot`] or served for preview.

pub mod config;
pub mod error;
pub mod init;
pub mod layers;
pub mod page;
pub mod preview_server;
pub mod snapshot;
pub mod surface;

pub use config::MapConfig;
pub use error::MapError;
pub use init::{MapInitializer, MapOptions};
pub use layers::{FeatureLayer, GeoJsonLayer, LayerControl, Popup, PopupOptions, TileLayer};
pub use page::PageData;
pub use snapshot::MapSnapshot;
pub use surface::{HeadlessMap, MapSurface};
