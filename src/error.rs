use std::path::PathBuf;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Every failure the pipeline can surface. None of them is recovered from:
/// a stage that receives an error from a lower stage propagates it as is.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("no hydrography dataset found under {}", .0.display())]
    MissingInput(PathBuf),

    #[error("river dataset has none of the name fields {candidates:?}")]
    SchemaMismatch { candidates: Vec<String> },

    #[error("boundary data unavailable: {0}")]
    UpstreamData(String),

    #[error("failed to write map to {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Shapefile error: {0}")]
    Shapefile(#[from] shapefile::Error),

    #[error("Unsupported coordinate system: {0}")]
    UnsupportedCrs(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
