//! # geotree-core
//!
//! Data model behind the geotree element map: tile addressing and tile layer
//! configuration, the marker feature collection embedded in pages, and the
//! element/family records that produce it.

pub mod color;
pub mod element;
pub mod error;
pub mod identifiers;
pub mod map;
pub mod markers;

pub use error::{CoreError, Result};
pub use identifiers::*;
pub use markers::MarkerCollection;
