//! Two-bone inverse kinematics for the arm holding the cigarette

use glam::Vec2;

use crate::math::clamp;

/// Smallest distance the solver works with. Keeps the bearing and the
/// law-of-cosines denominator away from zero.
const EPSILON: f32 = 0.0001;

/// Which side of the shoulder→target line the elbow folds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bend {
    /// Elbow rotated clockwise from the reach direction in screen space (y down).
    Positive,
    Negative,
}

impl Bend {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            Bend::Positive => 1.0,
            Bend::Negative => -1.0,
        }
    }
}

/// Solved joint positions for one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPose {
    pub elbow: Vec2,
    pub hand: Vec2,
}

/// Solve a two-bone chain anchored at `shoulder` reaching for `target`.
///
/// Targets beyond full extension stop at `upper + lower` along the
/// shoulder→target ray; targets closer than the bones can fold stop at
/// `|upper - lower|`. The hand always lies on that ray, so it tracks a moving
/// target smoothly while the elbow swings to keep the bone lengths.
pub fn solve(shoulder: Vec2, target: Vec2, upper: f32, lower: f32, bend: Bend) -> ArmPose {
    let delta = target - shoulder;
    let d = delta.length().max(EPSILON);

    let max_reach = upper + lower;
    let min_reach = (upper - lower).abs() + EPSILON;
    let cd = clamp(d, min_reach, max_reach);

    let cos_a = clamp(
        (upper * upper + cd * cd - lower * lower) / (2.0 * upper * cd),
        -1.0,
        1.0,
    );
    let ang_a = cos_a.acos();

    let base = delta.y.atan2(delta.x);
    let elbow_ang = base + bend.sign() * ang_a;

    let elbow = shoulder + Vec2::new(elbow_ang.cos(), elbow_ang.sin()) * upper;
    let hand = shoulder + delta / d * cd;

    ArmPose { elbow, hand }
}
