//! Theme colors for the scene

use femtovg::Color;

/// 8-bit RGB with a 0.0-1.0 alpha
pub type Rgba = (u8, u8, u8, f32);

pub struct Theme {
    /// Page background behind the canvas
    pub bg: Rgba,
    /// Vignette edge; the center alpha depends on the scene
    pub vignette: Rgba,
    pub ground: Rgba,
    /// Head and torso
    pub body: Rgba,
    /// Legs and free arm
    pub limbs: Rgba,
    /// Arm holding the cigarette
    pub reach_arm: Rgba,
    pub eyes: Rgba,
    /// Held cigarette stroke in the figure scene
    pub cigarette_stroke: Rgba,
    pub paper: Rgba,
    pub filter: Rgba,
    pub char_band: Rgba,
    pub ash: Rgba,
    /// Glow and figure ember hue; alpha is driven by brightness
    pub ember: Rgba,
    pub ember_core: Rgba,
    /// Smoke and exhale fog hue
    pub smoke: Rgba,
    pub hud: Rgba,
    pub hud_dim: Rgba,
}

impl Theme {
    /// Night theme (default)
    pub fn night() -> Self {
        Self {
            bg: (2, 6, 23, 1.0),                  // slate-950
            vignette: (2, 6, 23, 0.55),
            ground: (148, 163, 184, 0.25),
            body: (226, 232, 240, 0.9),
            limbs: (226, 232, 240, 0.85),
            reach_arm: (226, 232, 240, 0.95),
            eyes: (226, 232, 240, 0.85),
            cigarette_stroke: (248, 250, 252, 0.9),
            paper: (248, 250, 252, 0.95),
            filter: (251, 146, 60, 0.85),         // orange tip
            char_band: (30, 41, 59, 0.9),
            ash: (226, 232, 240, 0.35),
            ember: (255, 90, 60, 1.0),
            ember_core: (255, 120, 80, 1.0),
            smoke: (226, 232, 240, 1.0),
            hud: (226, 232, 240, 0.85),
            hud_dim: (148, 163, 184, 0.7),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::night()
    }
}

/// femtovg color for a theme entry
pub fn color(c: Rgba) -> Color {
    color_with_alpha(c, c.3)
}

/// Same hue with an explicit alpha
pub fn color_with_alpha(c: Rgba, alpha: f32) -> Color {
    Color::rgba(c.0, c.1, c.2, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}
