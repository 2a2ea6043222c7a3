use crate::math::projection::{geo_to_radians, to_flat_plane, to_sphere};
use crate::math::{lerp_point, Point3, Vector3};
use crate::record::EarthquakeRecord;

use super::Color;

slotmap::new_key_type! {
    /// Unique identifier for a marker in a [`MarkerSet`](super::MarkerSet).
    pub struct MarkerId;
}

/// Horizontal footprint per unit of normalized magnitude.
const FOOTPRINT_SCALE: f64 = 0.8;

/// Marker height, independent of magnitude.
const HEIGHT_SCALE: f64 = 0.5;

/// An animated marker for one earthquake.
///
/// The map and globe positions are projected once at creation and are
/// read-only afterwards; every frame blends between the two cached points
/// instead of re-projecting.
#[derive(Debug, Clone)]
pub struct EarthquakeMarker {
    record: EarthquakeRecord,
    map_position: Point3,
    globe_position: Point3,
    normalized_magnitude: f64,
    creation_time: f64,
    lifespan: f64,
    color: Color,
    display_position: Point3,
    display_scale: Vector3,
}

impl EarthquakeMarker {
    /// Projects a validated record onto both targets.
    pub(crate) fn new(
        record: EarthquakeRecord,
        normalized_magnitude: f64,
        lifespan: f64,
        color: Color,
    ) -> Self {
        let map_position = to_flat_plane(record.latitude, record.longitude);
        let (lat, lon) = geo_to_radians(record.latitude, record.longitude);
        let globe_position = to_sphere(lat, lon);
        Self {
            record,
            map_position,
            globe_position,
            normalized_magnitude,
            creation_time: record.timestamp,
            lifespan,
            color,
            display_position: map_position,
            display_scale: base_scale(normalized_magnitude),
        }
    }

    /// Normalized age: 0 at creation, 1 at expiry. Never negative.
    #[must_use]
    pub fn playback_age(&self, current_time: f64) -> f64 {
        ((current_time - self.creation_time) / self.lifespan).max(0.0)
    }

    /// Whether the marker has outlived its lifespan at `current_time`.
    #[must_use]
    pub fn is_expired(&self, current_time: f64) -> bool {
        self.playback_age(current_time) >= 1.0
    }

    /// Recomputes the display transform. Returns `false` if expired, in
    /// which case the transform is left as it was.
    pub(crate) fn refresh(&mut self, current_time: f64, blend: f64) -> bool {
        let age = self.playback_age(current_time);
        if age >= 1.0 {
            return false;
        }
        self.display_position = lerp_point(&self.map_position, &self.globe_position, blend);
        self.display_scale = base_scale(self.normalized_magnitude) * (1.0 - age);
        true
    }

    /// Returns the source record.
    #[must_use]
    pub fn record(&self) -> &EarthquakeRecord {
        &self.record
    }

    /// Returns the cached position on the flat map.
    #[must_use]
    pub fn map_position(&self) -> &Point3 {
        &self.map_position
    }

    /// Returns the cached position on the unit sphere.
    #[must_use]
    pub fn globe_position(&self) -> &Point3 {
        &self.globe_position
    }

    /// Returns the magnitude normalized into `[0, 1]`.
    #[must_use]
    pub fn normalized_magnitude(&self) -> f64 {
        self.normalized_magnitude
    }

    /// Returns the playback time the marker was created at.
    #[must_use]
    pub fn creation_time(&self) -> f64 {
        self.creation_time
    }

    /// Returns the lifespan in playback seconds.
    #[must_use]
    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }

    /// Returns the colour fixed at creation.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the position from the last refresh.
    #[must_use]
    pub fn display_position(&self) -> &Point3 {
        &self.display_position
    }

    /// Returns the scale from the last refresh.
    #[must_use]
    pub fn display_scale(&self) -> &Vector3 {
        &self.display_scale
    }
}

fn base_scale(normalized_magnitude: f64) -> Vector3 {
    let footprint = FOOTPRINT_SCALE * normalized_magnitude;
    Vector3::new(footprint, footprint, HEIGHT_SCALE)
}
