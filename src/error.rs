use thiserror::Error;

/// Top-level error type for the globe core.
#[derive(Debug, Error)]
pub enum QuakeGlobeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    DataRange(#[from] DataRangeError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Invalid construction parameters. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("mesh resolution {rows}x{cols} is invalid: rows and cols must be positive")]
    InvalidResolution { rows: usize, cols: usize },

    #[error("parameter {parameter} = {value} is invalid: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// A single record outside the valid geographic or magnitude domain.
///
/// Recoverable: the record is rejected and ingestion continues.
#[derive(Debug, Error)]
pub enum DataRangeError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("magnitude {0} is not a finite non-negative value")]
    InvalidMagnitude(f64),

    #[error("timestamp {0} is not finite")]
    InvalidTimestamp(f64),

    #[error("event at {timestamp} has already expired at playback time {current_time}")]
    Expired { timestamp: f64, current_time: f64 },
}

/// Internal invariant violations. These indicate a builder bug.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("vertex buffers disagree: {flat} flat, {sphere} sphere, {normals} normals, {uvs} uvs")]
    VertexCountMismatch {
        flat: usize,
        sphere: usize,
        normals: usize,
        uvs: usize,
    },

    #[error("triangle index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// Convenience type alias for results using [`QuakeGlobeError`].
pub type Result<T> = std::result::Result<T, QuakeGlobeError>;
