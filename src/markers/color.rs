use super::MagnitudeRange;

/// Linear RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Creates a colour from its components.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Warm ramp keyed on magnitude: pale yellow at the bottom of `range`,
    /// pure red at the top. Magnitudes outside the range saturate.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_magnitude(magnitude: f64, range: MagnitudeRange) -> Self {
        let intensity = (1.0 - range.normalize(magnitude)) as f32;
        Self::new(1.0, intensity, 0.5 * intensity)
    }
}
