use std::path::PathBuf;

use geotree_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Embedded element #{0} not found in page")]
    MissingElement(String),

    #[error("Embedded element #{id} does not hold valid JSON: {source}")]
    MalformedElement {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Embedded element #{id} does not hold a feature collection: {source}")]
    InvalidCollection {
        id: String,
        #[source]
        source: CoreError,
    },

    #[error("Cannot compute the initial viewport: {0}")]
    Viewport(#[source] CoreError),

    #[error("Layer {0} is not registered with a layer control")]
    UnknownLayer(String),

    #[error("Invalid map config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Preview server error: {0}")]
    Server(#[from] std::io::Error),
}
