//! Rotation interval strings such as `"90deg"` or `"22.5degnot45deg"`.

const DEGREE_SUFFIX: &str = "deg";
const NOT_45_SUFFIX: &str = "not45deg";
const EPSILON: f32 = 1e-4;

/// A parsed rotation interval: a step size in degrees, optionally skipping
/// every angle that is a multiple of 45 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationInterval {
    step_degrees: f32,
    exclude_multiples_of_45: bool,
}

impl RotationInterval {
    /// Four quarter turns.
    pub const QUARTER_TURNS: RotationInterval = RotationInterval {
        step_degrees: 90.0,
        exclude_multiples_of_45: false,
    };

    /// Parse `<magnitude>deg` or `<magnitude>degnot45deg`.
    ///
    /// Returns `None` when the magnitude is not a positive number that divides
    /// a full turn, or when the exclusion would leave no angle at all.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();

        let (rest, exclude_multiples_of_45) = match s.strip_suffix(NOT_45_SUFFIX) {
            Some(rest) => (rest, true),
            None => (s.as_str(), false),
        };
        let magnitude = rest.strip_suffix(DEGREE_SUFFIX)?.trim();
        let step_degrees: f32 = magnitude.parse().ok()?;

        if !step_degrees.is_finite() || step_degrees <= 0.0 || step_degrees > 360.0 {
            return None;
        }
        let steps = 360.0 / step_degrees;
        if (steps - steps.round()).abs() > EPSILON {
            return None;
        }

        let interval = Self {
            step_degrees,
            exclude_multiples_of_45,
        };
        if interval.angles().is_empty() {
            return None;
        }
        Some(interval)
    }

    pub fn step_degrees(&self) -> f32 {
        self.step_degrees
    }

    pub fn excludes_multiples_of_45(&self) -> bool {
        self.exclude_multiples_of_45
    }

    /// Number of steps in one full turn, before any exclusion.
    pub fn steps(&self) -> usize {
        (360.0 / self.step_degrees).round() as usize
    }

    /// Angles for one full turn in ascending order, starting at 0.
    pub fn angles(&self) -> Vec<f32> {
        (0..self.steps())
            .map(|i| i as f32 * self.step_degrees)
            .filter(|&angle| !(self.exclude_multiples_of_45 && is_multiple_of_45(angle)))
            .collect()
    }
}

fn is_multiple_of_45(angle: f32) -> bool {
    let quotient = angle / 45.0;
    (quotient - quotient.round()).abs() < EPSILON
}
