use crate::error::{ConfigurationError, Result};

/// Maps real frame time onto the data's playback timeline.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackClock {
    now: f64,
    speed: f64,
}

impl PlaybackClock {
    /// Creates a clock at `start` advancing `speed` playback seconds per
    /// real second.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not finite or `speed` is not finite and
    /// positive.
    pub fn new(start: f64, speed: f64) -> Result<Self> {
        if !start.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "playback_start",
                value: start,
                reason: "must be finite",
            }
            .into());
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "playback_speed",
                value: speed,
                reason: "must be finite and positive",
            }
            .into());
        }
        Ok(Self { now: start, speed })
    }

    /// Advances by `dt` real seconds. Negative or non-finite `dt` is ignored.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.now += self.speed * dt;
        }
    }

    /// Jumps to playback time `t`. Non-finite values are ignored.
    pub fn seek(&mut self, t: f64) {
        if t.is_finite() {
            self.now = t;
        }
    }

    /// Current playback time.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Playback seconds per real second.
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }
}
