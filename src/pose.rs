//! Skeletal anchors, cigarette geometry and ember brightness
//!
//! Everything here is recomputed from scratch every frame from the canvas
//! size, the animation time and the breathing signals.

use glam::Vec2;

use crate::breath::BreathSignals;
use crate::burn::BurnModel;
use crate::config::{cigarette, figure};
use crate::ik::{self, ArmPose, Bend};
use crate::math::{clamp, lerp};

/// Stick figure anchors for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigurePose {
    pub ground_y: f32,
    pub head: Vec2,
    pub head_radius: f32,
    pub torso_top: Vec2,
    pub hip: Vec2,
    pub left_foot: Vec2,
    pub right_foot: Vec2,
    pub shoulder: Vec2,
    pub left_elbow: Vec2,
    pub left_hand: Vec2,
    pub right_arm: ArmPose,
    pub mouth: Vec2,
    pub eyes: [Vec2; 2],
    pub eye_radius: f32,
    /// Filter end (in the hand) and lit end of the held cigarette
    pub cigarette: (Vec2, Vec2),
    pub stroke_width: f32,
}

impl FigurePose {
    pub fn upper_arm_len(&self) -> f32 {
        self.right_arm.elbow.distance(self.shoulder)
    }
}

pub fn compose_figure(width: f32, height: f32, time: f32, signals: &BreathSignals) -> FigurePose {
    let (w, h) = (width, height);
    let ground_y = h * figure::GROUND_Y;
    let cx = w * figure::CENTER_X;

    // Micro tremor and breathing keep the pose from freezing
    let micro = (time * 3.2).sin() * 0.015 + (time * 1.7).sin() * 0.01;
    let breathe = (time * 0.9).sin() * figure::BREATHE;
    let sway = (time * 0.55).sin() * (w * figure::SWAY);

    let head_radius = w.min(h) * figure::HEAD_RADIUS;
    let head = Vec2::new(cx + sway, ground_y - h * figure::HEAD_LIFT + breathe * h);

    let torso_len = h * figure::TORSO_LEN;
    let leg_len = h * figure::LEG_LEN;
    let arm_len = h * figure::ARM_LEN;

    let neck_y = head.y + head_radius;
    let torso_top = Vec2::new(head.x, neck_y + head_radius * 0.35);
    let hip = Vec2::new(head.x, torso_top.y + torso_len);

    let left_foot = Vec2::new(hip.x - w * figure::FOOT_SPREAD - sway * 0.4, hip.y + leg_len);
    let right_foot = Vec2::new(hip.x + w * figure::FOOT_SPREAD - sway * 0.4, hip.y + leg_len);

    let shoulder = Vec2::new(torso_top.x, torso_top.y + torso_len * 0.25);

    let left_elbow = Vec2::new(
        shoulder.x - w * 0.08,
        shoulder.y + arm_len * (0.55 + 0.08 * (time * 1.1).sin()),
    );
    let left_hand = Vec2::new(left_elbow.x - w * 0.03, left_elbow.y + arm_len * 0.45);

    let mouth = Vec2::new(head.x + head_radius * 0.62, head.y + head_radius * 0.28);

    // Close to the mouth while inhaling and holding, drifting off while exhaling
    let to_mouth = clamp(signals.inhale + signals.hold * figure::HOLD_REACH, 0.0, 1.0);
    let away = figure::EXHALE_AWAY * signals.exhale;
    let mouth_target = Vec2::new(
        mouth.x - head_radius * (0.10 + away) + micro * w * 0.5,
        mouth.y + head_radius * (0.05 + away * 0.35) + micro * h * 0.3,
    );
    let rest = Vec2::new(shoulder.x + w * 0.11, shoulder.y + arm_len * 0.60);
    let reach_target = Vec2::new(
        lerp(rest.x, mouth_target.x, to_mouth),
        lerp(rest.y, mouth_target.y, to_mouth),
    );

    let right_arm = ik::solve(
        shoulder,
        reach_target,
        arm_len * figure::UPPER_ARM,
        arm_len * figure::LOWER_ARM,
        Bend::Positive,
    );

    let (dir_x, dir_y) = figure::CIGARETTE_DIR;
    let cig_len = head_radius * figure::CIGARETTE_LEN;
    let cig_start = right_arm.hand;
    let cig_end = cig_start + Vec2::new(dir_x, dir_y) * cig_len;

    let eye_y = head.y - head_radius * 0.15;
    let eyes = [
        Vec2::new(head.x - head_radius * 0.20, eye_y),
        Vec2::new(head.x + head_radius * 0.10, eye_y),
    ];

    FigurePose {
        ground_y,
        head,
        head_radius,
        torso_top,
        hip,
        left_foot,
        right_foot,
        shoulder,
        left_elbow,
        left_hand,
        right_arm,
        mouth,
        eyes,
        eye_radius: (head_radius * 0.08).max(1.5),
        cigarette: (cig_start, cig_end),
        stroke_width: clamp(w * 0.008, 3.0, 6.0),
    }
}

/// Cigarette-only scene geometry, laid out horizontally around the canvas center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CigaretteGeometry {
    /// Left edge (filter end)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub length: f32,
    pub height: f32,
    pub filter_len: f32,
    /// Unburned paper span `(start_x, end_x)`
    pub body: (f32, f32),
    pub char_x: f32,
    pub char_width: f32,
    pub ember: Vec2,
    pub glow_radius: f32,
    pub core_radius: f32,
    pub progress: f32,
}

pub fn compose_cigarette(width: f32, height: f32, burn: BurnModel, progress: f32) -> CigaretteGeometry {
    let progress = clamp(progress, 0.0, 1.0);
    let center_x = width * 0.5;
    let center_y = height * cigarette::CENTER_Y;

    match burn {
        BurnModel::ContinuousLoop => {
            let length = (width * cigarette::LOOP_WIDTH_RATIO).min(cigarette::LOOP_MAX_LENGTH);
            let cig_height = cigarette::LOOP_HEIGHT;
            let x = center_x - length / 2.0;
            let char_width = (length * cigarette::CHAR_RATIO).max(cigarette::CHAR_MIN_WIDTH);
            let burn_offset = length * progress;

            CigaretteGeometry {
                x,
                y: center_y - cig_height / 2.0,
                length,
                height: cig_height,
                filter_len: length * cigarette::FILTER_RATIO,
                body: (x, x + length),
                char_x: x + length - char_width - burn_offset * cigarette::LOOP_CHAR_SHIFT,
                char_width,
                ember: Vec2::new(x + length - 2.0, center_y),
                glow_radius: 18.0,
                core_radius: 4.5,
                progress,
            }
        }
        BurnModel::ElapsedDuration => {
            let length = (width * cigarette::SESSION_WIDTH_RATIO).min(cigarette::SESSION_MAX_LENGTH);
            let cig_height = (height * cigarette::SESSION_HEIGHT_RATIO).max(cigarette::SESSION_MIN_HEIGHT);
            let x = center_x - length / 2.0;
            let filter_len = length * cigarette::FILTER_RATIO;
            let min_end = x + filter_len + cigarette::MIN_STUB;
            let end = min_end.max(x + length - length * progress);
            let char_width = (length * cigarette::CHAR_RATIO).max(cigarette::CHAR_MIN_WIDTH);

            CigaretteGeometry {
                x,
                y: center_y - cig_height / 2.0,
                length,
                height: cig_height,
                filter_len,
                body: (x + filter_len, end),
                char_x: (x + filter_len).max(end - char_width),
                char_width,
                ember: Vec2::new(end + 2.0, center_y),
                glow_radius: 20.0,
                core_radius: 5.0,
                progress,
            }
        }
    }
}

/// Ember brightness blends. The two scenes pulse differently and are kept
/// as separate presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmberPulse {
    /// Inhale signal plus a fast flicker
    Figure,
    /// Full glow while drawing, slow breathing glow otherwise
    Cigarette,
}

impl EmberPulse {
    /// Brightness at `time` for an inhale intensity in `[0, 1]`.
    pub fn brightness(self, time: f32, inhale: f32) -> f32 {
        match self {
            EmberPulse::Figure => {
                0.25 + 0.75 * (0.6 * inhale + 0.4 * (0.5 + 0.5 * (time * 9.0).sin()))
            }
            EmberPulse::Cigarette => {
                let idle = 0.4 + 0.6 * (time * 2.5).sin() * 0.5 + 0.3;
                0.2 + 0.8 * lerp(idle, 1.0, clamp(inhale, 0.0, 1.0))
            }
        }
    }
}

/// Glowing tip state handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ember {
    pub position: Vec2,
    pub radius: f32,
    pub brightness: f32,
    pub pulse: EmberPulse,
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f32 = 720.0;
    const H: f32 = 420.0;

    #[test]
    fn test_figure_scales_with_canvas() {
        let signals = BreathSignals::from_phase(0.0);
        let small = compose_figure(W, H, 0.0, &signals);
        let large = compose_figure(W * 2.0, H * 2.0, 0.0, &signals);
        assert!((large.head_radius - small.head_radius * 2.0).abs() < 1e-3);
        assert!((large.ground_y - small.ground_y * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_right_arm_keeps_bone_lengths() {
        let arm_len = H * figure::ARM_LEN;
        for i in 0..50 {
            let time = i as f32 * 0.137;
            let pose = compose_figure(W, H, time, &BreathSignals::at(time));
            assert!((pose.upper_arm_len() - arm_len * figure::UPPER_ARM).abs() < 1e-2);
            assert!(pose.right_arm.hand.is_finite());
        }
    }

    #[test]
    fn test_inhale_brings_hand_to_mouth() {
        let rest = compose_figure(W, H, 0.0, &BreathSignals::from_phase(0.0));
        let inhaling = compose_figure(W, H, 0.0, &BreathSignals::from_phase(0.32));
        let rest_gap = rest.right_arm.hand.distance(rest.mouth);
        let inhale_gap = inhaling.right_arm.hand.distance(inhaling.mouth);
        assert!(inhale_gap < rest_gap);
    }

    #[test]
    fn test_held_cigarette_points_right() {
        let pose = compose_figure(W, H, 1.0, &BreathSignals::at(1.0));
        let (start, end) = pose.cigarette;
        assert_eq!(start, pose.right_arm.hand);
        assert!(end.x > start.x);
        let (dir_x, dir_y) = figure::CIGARETTE_DIR;
        assert_eq!((dir_x, dir_y), (1.0, -0.10));
        let tip = start + Vec2::new(dir_x, dir_y) * pose.head_radius * figure::CIGARETTE_LEN;
        assert!((end - tip).length() < 1e-3);
    }

    #[test]
    fn test_elapsed_burn_shrinks_body_and_moves_ember() {
        let fresh = compose_cigarette(W, H, BurnModel::ElapsedDuration, 0.0);
        let half = compose_cigarette(W, H, BurnModel::ElapsedDuration, 0.5);
        let done = compose_cigarette(W, H, BurnModel::ElapsedDuration, 1.0);

        assert!(half.body.1 < fresh.body.1);
        assert!((half.ember.x - (half.body.1 + 2.0)).abs() < 1e-4);
        assert!((done.body.1 - (done.x + done.filter_len + cigarette::MIN_STUB)).abs() < 1e-3);
        assert!(done.char_x >= done.x + done.filter_len);
    }

    #[test]
    fn test_loop_burn_keeps_full_body() {
        let a = compose_cigarette(W, H, BurnModel::ContinuousLoop, 0.1);
        let b = compose_cigarette(W, H, BurnModel::ContinuousLoop, 0.9);
        assert_eq!(a.body, b.body);
        assert_eq!(a.ember, b.ember);
        assert!(b.char_x < a.char_x);
    }

    #[test]
    fn test_progress_outside_unit_range_is_clamped() {
        let over = compose_cigarette(W, H, BurnModel::ElapsedDuration, 3.0);
        let done = compose_cigarette(W, H, BurnModel::ElapsedDuration, 1.0);
        assert_eq!(over, done);
    }

    #[test]
    fn test_ember_presets_stay_bounded() {
        for i in 0..200 {
            let t = i as f32 * 0.05;
            for inhale in [0.0, 0.5, 1.0] {
                for pulse in [EmberPulse::Figure, EmberPulse::Cigarette] {
                    let b = pulse.brightness(t, inhale);
                    assert!((0.2..=1.0 + 1e-6).contains(&b), "{pulse:?} {b}");
                }
            }
        }
    }

    #[test]
    fn test_cigarette_pulse_saturates_while_inhaling() {
        assert!((EmberPulse::Cigarette.brightness(3.3, 1.0) - 1.0).abs() < 1e-6);
    }
}
