//! Earthquake marker lifecycle: creation, per-frame animation and expiry.

mod color;
mod marker;

pub use color::Color;
pub use marker::{EarthquakeMarker, MarkerId};

use slotmap::SlotMap;

use crate::error::{ConfigurationError, DataRangeError, Result};
use crate::math::rescale;
use crate::record::EarthquakeRecord;

/// Default marker lifespan in playback seconds (twelve 28-day months).
pub const DEFAULT_MARKER_LIFESPAN: f64 = 12.0 * 28.0 * 24.0 * 60.0 * 60.0;

/// Magnitude interval mapped onto `[0, 1]` for colour and footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeRange {
    min: f64,
    max: f64,
}

impl MagnitudeRange {
    /// Creates a magnitude range.
    ///
    /// # Errors
    ///
    /// Returns an error unless both bounds are finite and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "magnitude_range",
                value: max - min,
                reason: "bounds must be finite with min < max",
            }
            .into());
        }
        Ok(Self { min, max })
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Maps `magnitude` onto `[0, 1]`, saturating outside the range.
    #[must_use]
    pub fn normalize(&self, magnitude: f64) -> f64 {
        rescale(magnitude, self.min, self.max, 0.0, 1.0).clamp(0.0, 1.0)
    }
}

impl Default for MagnitudeRange {
    fn default() -> Self {
        Self { min: 6.0, max: 9.0 }
    }
}

/// Arena owning every live marker.
///
/// Keys are generational, so a [`MarkerId`] handed to a renderer never
/// aliases a later marker after its own has expired.
#[derive(Debug)]
pub struct MarkerSet {
    markers: SlotMap<MarkerId, EarthquakeMarker>,
    lifespan: f64,
    magnitude_range: MagnitudeRange,
}

impl MarkerSet {
    /// Creates an empty set whose markers live for `lifespan` playback
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if `lifespan` is not finite and positive.
    pub fn new(lifespan: f64, magnitude_range: MagnitudeRange) -> Result<Self> {
        if !lifespan.is_finite() || lifespan <= 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "marker_lifespan",
                value: lifespan,
                reason: "must be finite and positive",
            }
            .into());
        }
        Ok(Self {
            markers: SlotMap::with_key(),
            lifespan,
            magnitude_range,
        })
    }

    /// Creates a marker for `record`, caching both projected positions.
    ///
    /// # Errors
    ///
    /// Returns a data-range error if the record fails validation or if
    /// `normalized_magnitude` is negative or not finite. The set is left
    /// unchanged.
    pub fn create(
        &mut self,
        record: &EarthquakeRecord,
        normalized_magnitude: f64,
    ) -> Result<MarkerId> {
        record.validate()?;
        if !normalized_magnitude.is_finite() || normalized_magnitude < 0.0 {
            return Err(DataRangeError::InvalidMagnitude(normalized_magnitude).into());
        }
        let color = Color::from_magnitude(record.magnitude, self.magnitude_range);
        Ok(self.markers.insert(EarthquakeMarker::new(
            *record,
            normalized_magnitude,
            self.lifespan,
            color,
        )))
    }

    /// Animates every live marker and removes the expired ones.
    ///
    /// Expired keys are collected during the pass and removed afterwards;
    /// they are returned so the caller can drop matching scene nodes.
    pub fn tick(&mut self, current_time: f64, blend: f64) -> Vec<MarkerId> {
        let expired: Vec<MarkerId> = self
            .markers
            .iter_mut()
            .filter_map(|(id, marker)| (!marker.refresh(current_time, blend)).then_some(id))
            .collect();
        for &id in &expired {
            self.markers.remove(id);
        }
        if !expired.is_empty() {
            tracing::trace!(expired = expired.len(), live = self.markers.len(), "markers expired");
        }
        expired
    }

    /// Creates a marker and applies its display transform for the current
    /// frame, so it is render-ready before the next [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// Returns the errors of [`create`](Self::create), or
    /// [`DataRangeError::Expired`] if the event's lifespan has already run
    /// out at `current_time`. Nothing is inserted on error.
    pub fn spawn(
        &mut self,
        record: &EarthquakeRecord,
        normalized_magnitude: f64,
        current_time: f64,
        blend: f64,
    ) -> Result<MarkerId> {
        let id = self.create(record, normalized_magnitude)?;
        let alive = self
            .markers
            .get_mut(id)
            .is_some_and(|marker| marker.refresh(current_time, blend));
        if !alive {
            self.markers.remove(id);
            return Err(DataRangeError::Expired {
                timestamp: record.timestamp,
                current_time,
            }
            .into());
        }
        Ok(id)
    }

    /// Returns the marker with the given id, if it is still alive.
    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&EarthquakeMarker> {
        self.markers.get(id)
    }

    /// Returns whether the marker with the given id is still alive.
    #[must_use]
    pub fn contains(&self, id: MarkerId) -> bool {
        self.markers.contains_key(id)
    }

    /// Iterates over live markers.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &EarthquakeMarker)> {
        self.markers.iter()
    }

    /// Number of live markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns `true` if no markers are alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Removes every marker, returning their ids.
    pub fn clear(&mut self) -> Vec<MarkerId> {
        let ids = self.markers.keys().collect();
        self.markers.clear();
        ids
    }

    /// Returns the lifespan given to new markers.
    #[must_use]
    pub fn lifespan(&self) -> f64 {
        self.lifespan
    }

    /// Returns the magnitude range used for colouring.
    #[must_use]
    pub fn magnitude_range(&self) -> MagnitudeRange {
        self.magnitude_range
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::QuakeGlobeError;
    use crate::math::{lerp_point, Point3};
    use approx::assert_abs_diff_eq;

    fn set(lifespan: f64) -> MarkerSet {
        MarkerSet::new(lifespan, MagnitudeRange::default()).unwrap()
    }

    #[test]
    fn invalid_lifespan_fails() {
        assert!(MarkerSet::new(0.0, MagnitudeRange::default()).is_err());
        assert!(MarkerSet::new(f64::INFINITY, MagnitudeRange::default()).is_err());
    }

    #[test]
    fn invalid_magnitude_range_fails() {
        assert!(MagnitudeRange::new(9.0, 6.0).is_err());
        assert!(MagnitudeRange::new(6.0, 6.0).is_err());
        assert!(MagnitudeRange::new(f64::NAN, 6.0).is_err());
    }

    #[test]
    fn normalize_saturates() {
        let r = MagnitudeRange::default();
        assert_eq!(r.normalize(7.5), 0.5);
        assert_eq!(r.normalize(2.0), 0.0);
        assert_eq!(r.normalize(9.9), 1.0);
    }

    #[test]
    fn create_scenario_at_origin() {
        let mut markers = set(100.0);
        let id = markers
            .create(&EarthquakeRecord::new(0.0, 0.0, 7.0, 0.0), 0.7)
            .unwrap();
        let m = markers.get(id).unwrap();
        assert_abs_diff_eq!(*m.map_position(), Point3::origin(), epsilon = 1e-12);
        assert_abs_diff_eq!(*m.globe_position(), Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
        assert_eq!(m.creation_time(), 0.0);
        assert_eq!(m.lifespan(), 100.0);
    }

    #[test]
    fn create_rejects_bad_record_without_inserting() {
        let mut markers = set(100.0);
        let err = markers.create(&EarthquakeRecord::new(120.0, 0.0, 7.0, 0.0), 0.5);
        assert!(matches!(err, Err(QuakeGlobeError::DataRange(_))));
        assert!(markers.is_empty());
    }

    #[test]
    fn create_rejects_bad_normalized_magnitude() {
        let mut markers = set(100.0);
        assert!(markers
            .create(&EarthquakeRecord::new(0.0, 0.0, 7.0, 0.0), -0.1)
            .is_err());
        assert!(markers.is_empty());
    }

    #[test]
    fn tick_interpolates_live_markers() {
        let mut markers = set(100.0);
        let id = markers
            .create(&EarthquakeRecord::new(-33.0, 151.0, 6.5, 0.0), 0.2)
            .unwrap();
        let expired = markers.tick(10.0, 0.5);
        assert!(expired.is_empty());
        let m = markers.get(id).unwrap();
        assert_eq!(
            *m.display_position(),
            lerp_point(m.map_position(), m.globe_position(), 0.5)
        );
    }

    #[test]
    fn expired_markers_are_removed_and_reported() {
        let mut markers = set(100.0);
        let old = markers
            .create(&EarthquakeRecord::new(0.0, 0.0, 7.0, 0.0), 0.5)
            .unwrap();
        let young = markers
            .create(&EarthquakeRecord::new(10.0, 10.0, 7.0, 50.0), 0.5)
            .unwrap();

        let expired = markers.tick(100.0, 0.0);
        assert_eq!(expired, vec![old]);
        assert!(!markers.contains(old));
        assert!(markers.contains(young));
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn removing_many_during_tick_skips_none() {
        let mut markers = set(10.0);
        let mut ids = Vec::new();
        for i in 0..20 {
            let t0 = if i % 2 == 0 { 0.0 } else { 5.0 };
            ids.push(
                markers
                    .create(&EarthquakeRecord::new(0.0, f64::from(i), 7.0, t0), 0.5)
                    .unwrap(),
            );
        }
        let expired = markers.tick(12.0, 1.0);
        assert_eq!(expired.len(), 10);
        assert_eq!(markers.len(), 10);
        for (id, m) in markers.iter() {
            assert!(ids.contains(&id));
            assert_eq!(m.creation_time(), 5.0);
            let expected = lerp_point(m.map_position(), m.globe_position(), 1.0);
            assert_eq!(*m.display_position(), expected);
        }
    }

    #[test]
    fn stale_id_does_not_alias_new_marker() {
        let mut markers = set(1.0);
        let first = markers
            .create(&EarthquakeRecord::new(0.0, 0.0, 7.0, 0.0), 0.5)
            .unwrap();
        markers.tick(2.0, 0.0);
        let second = markers
            .create(&EarthquakeRecord::new(0.0, 0.0, 7.0, 2.0), 0.5)
            .unwrap();
        assert_ne!(first, second);
        assert!(markers.get(first).is_none());
    }

    #[test]
    fn spawn_applies_current_blend() {
        let mut markers = set(10.0);
        let id = markers
            .spawn(&EarthquakeRecord::new(30.0, 60.0, 7.0, 0.0), 0.5, 5.0, 1.0)
            .unwrap();
        let m = markers.get(id).unwrap();
        assert_eq!(*m.display_position(), lerp_point(m.map_position(), m.globe_position(), 1.0));
        assert_abs_diff_eq!(m.display_scale().z, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn spawn_rejects_already_expired_event() {
        let mut markers = set(10.0);
        let err = markers.spawn(&EarthquakeRecord::new(30.0, 60.0, 7.0, 0.0), 0.5, 100.0, 1.0);
        assert!(matches!(
            err,
            Err(QuakeGlobeError::DataRange(DataRangeError::Expired { .. }))
        ));
        assert!(markers.is_empty());
    }

    #[test]
    fn clear_returns_all_ids() {
        let mut markers = set(10.0);
        markers
            .create(&EarthquakeRecord::new(0.0, 0.0, 7.0, 0.0), 0.5)
            .unwrap();
        markers
            .create(&EarthquakeRecord::new(1.0, 1.0, 8.0, 0.0), 0.5)
            .unwrap();
        assert_eq!(markers.clear().len(), 2);
        assert!(markers.is_empty());
    }
}
