//! Error types for boundary data loading

use thiserror::Error;

/// Failure while reading or decoding the world boundary dataset.
/// Never fatal: the loader logs it and runs without a boundary layer.
#[derive(Error, Debug)]
pub enum GeoDataError {
    /// The dataset could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON, or JSON that does not match the TopoJSON shape
    #[error("JSON error: {0}")]
    Json(#[from] simd_json::Error),

    /// Malformed GeoJSON
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The dataset is not valid UTF-8
    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Structurally invalid topology (bad arc reference, missing object)
    #[error("Topology error: {0}")]
    Topology(String),
}

pub type Result<T> = std::result::Result<T, GeoDataError>;
