//! Burn progress models for the cigarette

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::config::cigarette;
use crate::math::{clamp, fract};

/// How burn progress (0 = fresh, 1 = consumed) is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnModel {
    /// Synthetic burn that restarts when it reaches the filter
    ContinuousLoop,
    /// Elapsed session time over a fixed total duration
    ElapsedDuration,
}

/// Looping burn ratio at animation `time` seconds
pub fn loop_progress(time: f32) -> f32 {
    fract(time * cigarette::LOOP_BURN_SPEED)
}

/// `clamp((now - start) / duration, 0, 1)`; zero when nothing was started
pub fn elapsed_progress(now: Instant, started_at: Option<Instant>, duration: Duration) -> f32 {
    let Some(start) = started_at else {
        return 0.0;
    };
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    clamp(elapsed.as_secs_f32() / duration.as_secs_f32(), 0.0, 1.0)
}
