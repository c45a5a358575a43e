//! Breathing cycle phase driver
//!
//! Maps a monotonically increasing time to a cycle phase and three
//! overlapping smoothstep envelopes. Nothing is stored between frames.

use crate::config::breath;
use crate::math::{fract, smoothstep};

/// Intensity signals for one instant of the breathing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BreathSignals {
    /// Normalized position in the cycle, `[0, 1)`
    pub phase: f32,
    pub inhale: f32,
    pub hold: f32,
    pub exhale: f32,
}

impl BreathSignals {
    /// Signals at `time` seconds with the default cycle frequency
    pub fn at(time: f32) -> Self {
        Self::from_phase(fract(time * breath::FREQUENCY))
    }

    pub fn from_phase(phase: f32) -> Self {
        Self {
            phase,
            inhale: inhale(phase),
            hold: hold(phase),
            exhale: exhale(phase),
        }
    }
}

pub fn inhale(phase: f32) -> f32 {
    smoothstep(breath::INHALE_START, breath::INHALE_END, phase)
        * (1.0 - smoothstep(breath::INHALE_END, breath::HOLD_END, phase))
}

pub fn hold(phase: f32) -> f32 {
    smoothstep(breath::INHALE_END, breath::HOLD_END, phase)
        * (1.0 - smoothstep(breath::HOLD_END, breath::HOLD_FADE_END, phase))
}

pub fn exhale(phase: f32) -> f32 {
    smoothstep(breath::HOLD_END, breath::EXHALE_END, phase)
}
