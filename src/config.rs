use crate::error::{ConfigurationError, Result};
use crate::markers::{MagnitudeRange, DEFAULT_MARKER_LIFESPAN};
use crate::morph::DEFAULT_MORPH_SPEED;
use crate::tessellation::MeshResolution;

/// Playback seconds per real second by default (one 28-day month).
pub const DEFAULT_PLAYBACK_SPEED: f64 = 28.0 * 24.0 * 60.0 * 60.0;

/// Earth's axial tilt in degrees.
pub const DEFAULT_AXIAL_TILT_DEGREES: f64 = 23.4;

/// Construction parameters for a [`Globe`](crate::Globe).
///
/// Fields are checked by [`validate`](Self::validate) when the globe is
/// built, so an invalid configuration never yields a partial globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeConfig {
    /// Latitude rows of the mesh grid.
    pub rows: usize,
    /// Longitude columns of the mesh grid.
    pub cols: usize,
    /// Blend units per second.
    pub morph_speed: f64,
    /// Marker lifespan in playback seconds.
    pub marker_lifespan: f64,
    /// Lower bound of the colour/footprint magnitude range.
    pub magnitude_min: f64,
    /// Upper bound of the colour/footprint magnitude range.
    pub magnitude_max: f64,
    /// Playback seconds per real second.
    pub playback_speed: f64,
    /// Playback time at construction.
    pub playback_start: f64,
    /// Tilt of the globe about the view axis, in degrees.
    pub axial_tilt_degrees: f64,
    /// Opaque texture path handed to the renderer.
    pub texture_path: String,
    /// Initial wireframe state.
    pub wireframe: bool,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        let resolution = MeshResolution::default();
        let magnitudes = MagnitudeRange::default();
        Self {
            rows: resolution.rows(),
            cols: resolution.cols(),
            morph_speed: DEFAULT_MORPH_SPEED,
            marker_lifespan: DEFAULT_MARKER_LIFESPAN,
            magnitude_min: magnitudes.min(),
            magnitude_max: magnitudes.max(),
            playback_speed: DEFAULT_PLAYBACK_SPEED,
            playback_start: 0.0,
            axial_tilt_degrees: DEFAULT_AXIAL_TILT_DEGREES,
            texture_path: "./assets/earth-2k.png".to_owned(),
            wireframe: false,
        }
    }
}

impl GlobeConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the mesh grid resolution.
    #[must_use]
    pub fn with_resolution(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Sets the morph speed.
    #[must_use]
    pub fn with_morph_speed(mut self, speed: f64) -> Self {
        self.morph_speed = speed;
        self
    }

    /// Sets the marker lifespan.
    #[must_use]
    pub fn with_marker_lifespan(mut self, lifespan: f64) -> Self {
        self.marker_lifespan = lifespan;
        self
    }

    /// Sets the magnitude range.
    #[must_use]
    pub fn with_magnitude_range(mut self, min: f64, max: f64) -> Self {
        self.magnitude_min = min;
        self.magnitude_max = max;
        self
    }

    /// Sets the playback speed and start time.
    #[must_use]
    pub fn with_playback(mut self, start: f64, speed: f64) -> Self {
        self.playback_start = start;
        self.playback_speed = speed;
        self
    }

    /// Sets the axial tilt.
    #[must_use]
    pub fn with_axial_tilt(mut self, degrees: f64) -> Self {
        self.axial_tilt_degrees = degrees;
        self
    }

    /// Sets the texture path.
    #[must_use]
    pub fn with_texture_path(mut self, path: impl Into<String>) -> Self {
        self.texture_path = path.into();
        self
    }

    /// Sets the initial wireframe state.
    #[must_use]
    pub fn with_wireframe(mut self, enabled: bool) -> Self {
        self.wireframe = enabled;
        self
    }

    /// Returns the validated mesh resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if `rows` or `cols` is zero or too large.
    pub fn resolution(&self) -> Result<MeshResolution> {
        MeshResolution::new(self.rows, self.cols)
    }

    /// Returns the validated magnitude range.
    ///
    /// # Errors
    ///
    /// Returns an error unless the bounds are finite with min < max.
    pub fn magnitude_range(&self) -> Result<MagnitudeRange> {
        MagnitudeRange::new(self.magnitude_min, self.magnitude_max)
    }

    /// Validates every parameter that is not checked by a component
    /// constructor.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        self.resolution()?;
        self.magnitude_range()?;
        if !self.axial_tilt_degrees.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "axial_tilt_degrees",
                value: self.axial_tilt_degrees,
                reason: "must be finite",
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuakeGlobeError;

    #[test]
    fn default_is_valid() {
        assert!(GlobeConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_resolution_is_configuration_error() {
        let err = GlobeConfig::new().with_resolution(0, 10).validate();
        assert!(matches!(
            err,
            Err(QuakeGlobeError::Configuration(
                ConfigurationError::InvalidResolution { rows: 0, cols: 10 }
            ))
        ));
    }

    #[test]
    fn inverted_magnitude_range_fails() {
        assert!(GlobeConfig::new()
            .with_magnitude_range(8.0, 7.0)
            .validate()
            .is_err());
    }

    #[test]
    fn non_finite_tilt_fails() {
        assert!(GlobeConfig::new()
            .with_axial_tilt(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn builders_chain() {
        let config = GlobeConfig::new()
            .with_resolution(20, 40)
            .with_texture_path("earth-8k.png")
            .with_wireframe(true);
        assert_eq!((config.rows, config.cols), (20, 40));
        assert_eq!(config.texture_path, "earth-8k.png");
        assert!(config.wireframe);
    }
}
