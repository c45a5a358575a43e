//! Centralized configuration constants for Ember Smoke
//!
//! All magic numbers and tunable parameters should be defined here.
//! Geometry ratios are relative to the logical canvas size so the scene
//! scales with the window.

/// Frame timing
pub mod timing {
    /// Largest simulation step in seconds; absorbs stalls and pause gaps
    pub const MAX_DT: f32 = 0.05;
    /// Device pixel ratio bounds handed to the canvas
    pub const MIN_PIXEL_RATIO: f32 = 1.0;
    pub const MAX_PIXEL_RATIO: f32 = 2.0;
}

/// Breathing cycle rhythm: quick inhale, brief hold, slow exhale, rest
pub mod breath {
    /// Cycles per second
    pub const FREQUENCY: f32 = 0.55;
    pub const INHALE_START: f32 = 0.02;
    pub const INHALE_END: f32 = 0.32;
    pub const HOLD_END: f32 = 0.46;
    pub const HOLD_FADE_END: f32 = 0.58;
    pub const EXHALE_END: f32 = 0.78;
}

/// Stick figure proportions (fractions of canvas width `w` / height `h`)
pub mod figure {
    pub const GROUND_Y: f32 = 0.82;
    pub const CENTER_X: f32 = 0.45;
    /// Head radius as a fraction of `min(w, h)`
    pub const HEAD_RADIUS: f32 = 0.055;
    /// Head height above the ground line, fraction of `h`
    pub const HEAD_LIFT: f32 = 0.38;
    pub const TORSO_LEN: f32 = 0.22;
    pub const LEG_LEN: f32 = 0.20;
    pub const ARM_LEN: f32 = 0.17;
    /// Foot spread from the hip, fraction of `w`
    pub const FOOT_SPREAD: f32 = 0.06;
    pub const UPPER_ARM: f32 = 0.55;
    pub const LOWER_ARM: f32 = 0.58;
    /// Sway amplitude, fraction of `w`
    pub const SWAY: f32 = 0.004;
    /// Breathing bob amplitude, fraction of `h`
    pub const BREATHE: f32 = 0.004;
    /// Weight of the hold signal when pulling the hand to the mouth
    pub const HOLD_REACH: f32 = 0.85;
    /// How far the hand drifts from the mouth while exhaling
    pub const EXHALE_AWAY: f32 = 0.18;
    /// Cigarette length as a fraction of the head radius
    pub const CIGARETTE_LEN: f32 = 0.95;
    /// Cigarette direction from the hand
    pub const CIGARETTE_DIR: (f32, f32) = (1.0, -0.10);
}

/// Cigarette-only scene geometry
pub mod cigarette {
    pub const CENTER_Y: f32 = 0.55;
    pub const FILTER_RATIO: f32 = 0.18;
    pub const CHAR_RATIO: f32 = 0.08;
    pub const CHAR_MIN_WIDTH: f32 = 18.0;
    /// Burn speed of the looping scene, fraction of the length per second
    pub const LOOP_BURN_SPEED: f32 = 0.012;
    pub const LOOP_WIDTH_RATIO: f32 = 0.55;
    pub const LOOP_MAX_LENGTH: f32 = 420.0;
    pub const LOOP_HEIGHT: f32 = 14.0;
    /// Fraction of the burn offset applied to the char segment in the loop scene
    pub const LOOP_CHAR_SHIFT: f32 = 0.15;
    pub const SESSION_WIDTH_RATIO: f32 = 0.7;
    pub const SESSION_MAX_LENGTH: f32 = 520.0;
    pub const SESSION_HEIGHT_RATIO: f32 = 0.08;
    pub const SESSION_MIN_HEIGHT: f32 = 12.0;
    /// Unburned stub kept past the filter when fully consumed
    pub const MIN_STUB: f32 = 24.0;
    pub const ASH_SCRATCHES: usize = 4;
    /// Smoke origin offset from the ember
    pub const SMOKE_OFFSET: (f32, f32) = (8.0, -6.0);
    /// Spawn rates (particles per second)
    pub const IDLE_RATE: f32 = 20.0;
    pub const INHALE_RATE: f32 = 4.0;
    /// Exhale fog lifetime in seconds
    pub const FOG_SECONDS: f32 = 1.4;
    pub const FOG_ALPHA: f32 = 0.35;
}

/// Smoke particle system
pub mod smoke {
    /// Maximum number of live particles
    pub const MAX_PARTICLES: usize = 1500;
    /// Spawn jitter around the origin (full width, in pixels)
    pub const SPAWN_JITTER: f32 = 4.0;
    /// Horizontal spawn velocity per unit of wind
    pub const SPAWN_WIND: f32 = 35.0;
    /// Horizontal acceleration per unit of wind
    pub const WIND_ACCEL: f32 = 22.0;
    /// Alpha below which a particle is removed
    pub const MIN_ALPHA: f32 = 0.01;
    /// Off-screen culling margins
    pub const MARGIN_X: f32 = 80.0;
    pub const MARGIN_TOP: f32 = 40.0;
    /// Figure scene spawn rate: `(BASE + EXHALE * exhale) * density`
    pub const FIGURE_BASE_RATE: f32 = 10.0;
    pub const FIGURE_EXHALE_RATE: f32 = 58.0;
}

/// Live control ranges
pub mod controls {
    pub const DENSITY_MIN: f32 = 0.5;
    pub const DENSITY_MAX: f32 = 2.0;
    pub const DENSITY_DEFAULT: f32 = 1.0;
    pub const DENSITY_STEP: f32 = 0.05;
    pub const WIND_MIN: f32 = -0.6;
    pub const WIND_MAX: f32 = 0.6;
    pub const WIND_DEFAULT: f32 = 0.18;
    pub const WIND_STEP: f32 = 0.02;
}

/// Session timing (in milliseconds)
pub mod session {
    /// One cigarette burns for six minutes
    pub const BURN_DURATION_MS: u64 = 6 * 60 * 1000;
    /// Exhale mode lasts this long after releasing an inhale
    pub const EXHALE_MODE_MS: u64 = 1800;
    /// Delay before the exhale sound cue starts
    pub const EXHALE_SOUND_DELAY_MS: u64 = 1000;
    /// How long the end screen lingers before the session is recorded
    pub const END_DWELL_MS: u64 = 900;
    /// Number of completed sessions kept in the log
    pub const MAX_RECORDS: usize = 100;
    pub const DEFAULT_MOTIVE: &str = "other";
}
