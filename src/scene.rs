//! Scene composer
//!
//! One parameterized composer for every variant: the stick figure holding a
//! cigarette, the looping cigarette on its own, and the cigarette that burns
//! down over a timed session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::breath::BreathSignals;
use crate::burn::{self, BurnModel};
use crate::config::{cigarette, smoke};
use crate::controls::SmokeControls;
use crate::math::clamp;
use crate::pose::{self, CigaretteGeometry, Ember, EmberPulse, FigurePose};
use crate::smoke::SmokeProfile;

/// Variant selection for the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneMode {
    pub with_figure: bool,
    pub burn: BurnModel,
}

/// The scenes the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    #[default]
    Figure,
    Cigarette,
    Session,
}

impl SceneKind {
    pub fn mode(self) -> SceneMode {
        match self {
            SceneKind::Figure => SceneMode {
                with_figure: true,
                burn: BurnModel::ContinuousLoop,
            },
            SceneKind::Cigarette => SceneMode {
                with_figure: false,
                burn: BurnModel::ContinuousLoop,
            },
            SceneKind::Session => SceneMode {
                with_figure: false,
                burn: BurnModel::ElapsedDuration,
            },
        }
    }

    pub fn next(self) -> Self {
        match self {
            SceneKind::Figure => SceneKind::Cigarette,
            SceneKind::Cigarette => SceneKind::Session,
            SceneKind::Session => SceneKind::Figure,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::Figure => "figure",
            SceneKind::Cigarette => "cigarette",
            SceneKind::Session => "session",
        }
    }
}

/// Everything the composer reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneInput {
    /// Animation time in seconds
    pub time: f32,
    pub width: f32,
    pub height: f32,
    /// Externally driven inhale flag (cigarette scenes)
    pub inhaling: bool,
    /// Progress for `BurnModel::ElapsedDuration`
    pub elapsed_progress: f32,
    /// Seconds since the last inhale ended, if any
    pub exhale_since: Option<f32>,
    pub controls: SmokeControls,
    /// Cigarette smoke switch; the figure always smokes
    pub smoke_enabled: bool,
}

/// Composed frame: geometry to draw and where smoke comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub mode: SceneMode,
    pub signals: BreathSignals,
    pub figure: Option<FigurePose>,
    pub cigarette: Option<CigaretteGeometry>,
    pub ember: Ember,
    pub smoke_origin: Vec2,
    /// Particles per second
    pub spawn_rate: f32,
    pub profile: SmokeProfile,
    /// Full-screen exhale fog opacity
    pub fog_alpha: f32,
}

pub fn compose(mode: SceneMode, input: &SceneInput) -> Scene {
    if mode.with_figure {
        compose_figure_scene(mode, input)
    } else {
        compose_cigarette_scene(mode, input)
    }
}

fn compose_figure_scene(mode: SceneMode, input: &SceneInput) -> Scene {
    let signals = BreathSignals::at(input.time);
    let figure = pose::compose_figure(input.width, input.height, input.time, &signals);

    let ember = Ember {
        position: figure.cigarette.1,
        radius: (figure.head_radius * 0.14).max(2.2),
        brightness: EmberPulse::Figure.brightness(input.time, signals.inhale),
        pulse: EmberPulse::Figure,
    };

    // Exhaling thickens the plume; during the inhale only the base rate remains
    let spawn_rate =
        (smoke::FIGURE_BASE_RATE + smoke::FIGURE_EXHALE_RATE * signals.exhale) * input.controls.density;
    let smoke_origin = Vec2::new(
        figure.mouth.x + figure.head_radius * 0.12,
        figure.mouth.y - figure.head_radius * 0.02,
    );

    Scene {
        mode,
        signals,
        figure: Some(figure),
        cigarette: None,
        ember,
        smoke_origin,
        spawn_rate,
        profile: SmokeProfile::FIGURE,
        fog_alpha: 0.0,
    }
}

fn compose_cigarette_scene(mode: SceneMode, input: &SceneInput) -> Scene {
    let progress = match mode.burn {
        BurnModel::ContinuousLoop => burn::loop_progress(input.time),
        BurnModel::ElapsedDuration => input.elapsed_progress,
    };
    let geometry = pose::compose_cigarette(input.width, input.height, mode.burn, progress);

    let inhale = if input.inhaling { 1.0 } else { 0.0 };
    let ember = Ember {
        position: geometry.ember,
        radius: geometry.core_radius,
        brightness: EmberPulse::Cigarette.brightness(input.time, inhale),
        pulse: EmberPulse::Cigarette,
    };

    let base_rate = if input.inhaling {
        cigarette::INHALE_RATE
    } else {
        cigarette::IDLE_RATE
    };
    let spawn_rate = if input.smoke_enabled {
        base_rate * input.controls.density
    } else {
        0.0
    };
    let (ox, oy) = cigarette::SMOKE_OFFSET;

    let fog_alpha = match (mode.burn, input.exhale_since) {
        (BurnModel::ElapsedDuration, Some(since)) if since < cigarette::FOG_SECONDS => {
            clamp(1.0 - since / cigarette::FOG_SECONDS, 0.0, 1.0) * cigarette::FOG_ALPHA
        }
        _ => 0.0,
    };

    Scene {
        mode,
        signals: BreathSignals::at(input.time),
        figure: None,
        cigarette: Some(geometry),
        ember,
        smoke_origin: geometry.ember + Vec2::new(ox, oy),
        spawn_rate,
        profile: SmokeProfile::CIGARETTE,
        fog_alpha,
    }
}
