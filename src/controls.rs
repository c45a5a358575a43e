//! Live smoke controls
//!
//! The UI layer owns a `SmokeControls` value and hands the latest copy to
//! the frame loop; the simulation never reads global state.

use serde::{Deserialize, Serialize};

use crate::config::controls;
use crate::math::clamp;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmokeControls {
    /// Spawn rate multiplier
    pub density: f32,
    /// Signed wind strength, positive blows right
    pub wind: f32,
}

impl SmokeControls {
    pub fn new(density: f32, wind: f32) -> Self {
        Self {
            density: clamp(density, controls::DENSITY_MIN, controls::DENSITY_MAX),
            wind: clamp(wind, controls::WIND_MIN, controls::WIND_MAX),
        }
    }

    /// Re-apply the allowed ranges, e.g. after loading from disk
    pub fn sanitized(self) -> Self {
        let density = if self.density.is_finite() {
            self.density
        } else {
            controls::DENSITY_DEFAULT
        };
        let wind = if self.wind.is_finite() {
            self.wind
        } else {
            controls::WIND_DEFAULT
        };
        Self::new(density, wind)
    }

    pub fn adjust_density(&mut self, delta: f32) {
        self.density = clamp(self.density + delta, controls::DENSITY_MIN, controls::DENSITY_MAX);
    }

    pub fn adjust_wind(&mut self, delta: f32) {
        self.wind = clamp(self.wind + delta, controls::WIND_MIN, controls::WIND_MAX);
    }
}

impl Default for SmokeControls {
    fn default() -> Self {
        Self {
            density: controls::DENSITY_DEFAULT,
            wind: controls::WIND_DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_sliders() {
        let c = SmokeControls::default();
        assert_eq!(c.density, 1.0);
        assert_eq!(c.wind, 0.18);
    }

    #[test]
    fn test_adjusters_saturate() {
        let mut c = SmokeControls::default();
        for _ in 0..100 {
            c.adjust_density(controls::DENSITY_STEP);
            c.adjust_wind(-controls::WIND_STEP);
        }
        assert_eq!(c.density, controls::DENSITY_MAX);
        assert_eq!(c.wind, controls::WIND_MIN);
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let c = SmokeControls {
            density: f32::NAN,
            wind: 4.0,
        }
        .sanitized();
        assert_eq!(c.density, controls::DENSITY_DEFAULT);
        assert_eq!(c.wind, controls::WIND_MAX);
    }
}
