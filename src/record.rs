use crate::error::{DataRangeError, Result};

/// One earthquake event as delivered by the data-ingestion layer.
///
/// `timestamp` is in playback seconds, the same clock the markers age on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthquakeRecord {
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude: f64,
    /// Moment magnitude.
    pub magnitude: f64,
    /// Event time in playback seconds.
    pub timestamp: f64,
}

impl EarthquakeRecord {
    /// Creates a new record. No validation is performed here.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, magnitude: f64, timestamp: f64) -> Self {
        Self {
            latitude,
            longitude,
            magnitude,
            timestamp,
        }
    }

    /// Checks that the record lies within the renderable domain.
    ///
    /// # Errors
    ///
    /// Returns a [`DataRangeError`] for out-of-range or non-finite latitude
    /// or longitude, a negative or non-finite magnitude, or a non-finite
    /// timestamp.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DataRangeError::LatitudeOutOfRange(self.latitude).into());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(DataRangeError::LongitudeOutOfRange(self.longitude).into());
        }
        if !self.magnitude.is_finite() || self.magnitude < 0.0 {
            return Err(DataRangeError::InvalidMagnitude(self.magnitude).into());
        }
        if !self.timestamp.is_finite() {
            return Err(DataRangeError::InvalidTimestamp(self.timestamp).into());
        }
        Ok(())
    }
}
