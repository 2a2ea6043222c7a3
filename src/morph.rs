//! Time-driven blend between the flat map and the sphere.

use crate::error::{ConfigurationError, Result};

/// Default morph rate in blend units per second (a full morph takes ~1.3s).
pub const DEFAULT_MORPH_SPEED: f64 = 0.75;

/// Which representation a morph heads toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphTarget {
    /// The equirectangular map (`blend = 0`).
    Flat,
    /// The unit sphere (`blend = 1`).
    Sphere,
}

/// Sign of the blend factor's rate of change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphDirection {
    ToFlat,
    ToSphere,
}

impl MorphDirection {
    fn sign(self) -> f64 {
        match self {
            Self::ToFlat => -1.0,
            Self::ToSphere => 1.0,
        }
    }
}

impl From<MorphTarget> for MorphDirection {
    fn from(target: MorphTarget) -> Self {
        match target {
            MorphTarget::Flat => Self::ToFlat,
            MorphTarget::Sphere => Self::ToSphere,
        }
    }
}

/// Whether the controller is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphState {
    Inert,
    Morphing,
}

/// Drives the blend factor between the flat and spherical vertex sets.
///
/// Starts inert and flat. [`toggle`](Self::toggle) sets a direction and
/// starts morphing from wherever the blend currently is; the controller goes
/// inert again once an [`advance`](Self::advance) pushes the blend past
/// either end of `[0, 1]`, at which point the blend is pinned to that end.
#[derive(Debug, Clone)]
pub struct MorphController {
    blend: f64,
    direction: MorphDirection,
    state: MorphState,
    speed: f64,
}

impl MorphController {
    /// Creates an inert, fully flat controller.
    ///
    /// # Errors
    ///
    /// Returns an error if `speed` is not finite and positive.
    pub fn new(speed: f64) -> Result<Self> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "morph_speed",
                value: speed,
                reason: "must be finite and positive",
            }
            .into());
        }
        Ok(Self {
            blend: 0.0,
            direction: MorphDirection::ToFlat,
            state: MorphState::Inert,
            speed,
        })
    }

    /// Starts (or redirects) a morph toward `target`.
    ///
    /// The blend factor is left untouched, so toggling mid-morph reverses
    /// from the current value.
    pub fn toggle(&mut self, target: MorphTarget) {
        self.direction = target.into();
        self.state = MorphState::Morphing;
        tracing::debug!(?target, blend = self.blend, "morph toggled");
    }

    /// Advances the morph by `dt` seconds.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn advance(&mut self, dt: f64) {
        if self.state == MorphState::Inert {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let next = self.blend.clamp(0.0, 1.0) + self.speed * self.direction.sign() * dt;
        if (0.0..=1.0).contains(&next) {
            self.blend = next;
        } else {
            self.blend = next.clamp(0.0, 1.0);
            self.state = MorphState::Inert;
            tracing::debug!(blend = self.blend, "morph finished");
        }
    }

    /// Returns the current blend factor, always within `[0, 1]`.
    #[must_use]
    pub fn current_blend(&self) -> f64 {
        self.blend
    }

    /// Returns the current morph direction.
    #[must_use]
    pub fn direction(&self) -> MorphDirection {
        self.direction
    }

    /// Returns the representation the controller is heading toward.
    #[must_use]
    pub fn target(&self) -> MorphTarget {
        match self.direction {
            MorphDirection::ToFlat => MorphTarget::Flat,
            MorphDirection::ToSphere => MorphTarget::Sphere,
        }
    }

    /// Returns whether a morph is in flight.
    #[must_use]
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// Returns the morph rate in blend units per second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controller() -> MorphController {
        MorphController::new(DEFAULT_MORPH_SPEED).unwrap()
    }

    #[test]
    fn starts_inert_and_flat() {
        let m = controller();
        assert_eq!(m.state(), MorphState::Inert);
        assert_eq!(m.current_blend(), 0.0);
    }

    #[test]
    fn invalid_speed_fails() {
        assert!(MorphController::new(0.0).is_err());
        assert!(MorphController::new(-1.0).is_err());
        assert!(MorphController::new(f64::NAN).is_err());
    }

    #[test]
    fn advance_while_inert_is_noop() {
        let mut m = controller();
        m.advance(1.0);
        assert_eq!(m.current_blend(), 0.0);
        assert_eq!(m.state(), MorphState::Inert);
    }

    #[test]
    fn advance_zero_never_changes_blend() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        m.advance(0.4);
        let before = m.current_blend();
        for _ in 0..100 {
            m.advance(0.0);
        }
        assert_eq!(m.current_blend(), before);
        assert_eq!(m.state(), MorphState::Morphing);
    }

    #[test]
    fn advance_moves_at_speed() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        m.advance(0.5);
        assert_relative_eq!(m.current_blend(), 0.375);
    }

    #[test]
    fn toggle_round_trip_only_flips_direction() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        m.advance(0.2);
        let before = m.current_blend();
        m.toggle(MorphTarget::Sphere);
        m.toggle(MorphTarget::Flat);
        assert_eq!(m.current_blend(), before);
        assert_eq!(m.direction(), MorphDirection::ToFlat);
        assert_eq!(m.target(), MorphTarget::Flat);
    }

    #[test]
    fn overshoot_clamps_and_goes_inert_on_same_call() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        m.advance(10.0);
        assert_eq!(m.current_blend(), 1.0);
        assert_eq!(m.state(), MorphState::Inert);

        m.toggle(MorphTarget::Flat);
        m.advance(10.0);
        assert_eq!(m.current_blend(), 0.0);
        assert_eq!(m.state(), MorphState::Inert);
    }

    #[test]
    fn full_morph_takes_about_four_thirds_seconds() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        let mut frames = 0;
        while m.state() == MorphState::Morphing {
            m.advance(1.0 / 60.0);
            frames += 1;
            assert!((0.0..=1.0).contains(&m.current_blend()));
        }
        assert_eq!(m.current_blend(), 1.0);
        // 1 / 0.75 s at 60 fps, plus the frame that crosses the bound.
        assert!((80..=82).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn reversing_mid_morph_continues_from_current_blend() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        m.advance(1.0);
        m.toggle(MorphTarget::Flat);
        m.advance(0.5);
        assert_relative_eq!(m.current_blend(), 0.375);
        assert_eq!(m.state(), MorphState::Morphing);
    }

    #[test]
    fn toggling_toward_current_end_restarts_and_finishes() {
        let mut m = controller();
        m.toggle(MorphTarget::Flat);
        assert_eq!(m.state(), MorphState::Morphing);
        m.advance(0.016);
        assert_eq!(m.current_blend(), 0.0);
        assert_eq!(m.state(), MorphState::Inert);
    }

    #[test]
    fn negative_and_nan_dt_are_ignored() {
        let mut m = controller();
        m.toggle(MorphTarget::Sphere);
        m.advance(0.2);
        let before = m.current_blend();
        m.advance(-5.0);
        m.advance(f64::NAN);
        assert_eq!(m.current_blend(), before);
    }
}
