//! Heads-up text: scene name, control values and key hints

use ember_smoke::controls::SmokeControls;
use ember_smoke::scene::SceneKind;
use femtovg::{Align, Canvas, FontId, Paint, renderer::OpenGl};

use crate::theme::{Theme, color};

/// Values shown in the HUD for one frame
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub kind: SceneKind,
    pub controls: SmokeControls,
    pub smoke_enabled: bool,
    pub particles: usize,
    /// Session status text, session scene only
    pub session_status: &'a str,
    /// Time left before the cigarette burns out
    pub remaining_ms: Option<u64>,
    pub sessions_logged: usize,
}

pub struct HudRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    fonts: &'a [FontId],
    theme: &'a Theme,
}

impl<'a> HudRenderer<'a> {
    pub fn new(canvas: &'a mut Canvas<OpenGl>, fonts: &'a [FontId], theme: &'a Theme) -> Self {
        Self {
            canvas,
            fonts,
            theme,
        }
    }

    pub fn draw(&mut self, info: &HudInfo<'_>, width: f32, height: f32) {
        if self.fonts.is_empty() {
            return;
        }

        let x = width * 0.06;
        let mut paint = Paint::color(color(self.theme.hud));
        paint.set_font(self.fonts);
        paint.set_font_size(13.0);
        paint.set_text_align(Align::Left);
        let _ = self.canvas.fill_text(x, height * 0.10, status_line(info), &paint);

        if info.kind == SceneKind::Session {
            let _ = self
                .canvas
                .fill_text(x, height * 0.10 + 20.0, session_line(info), &paint);
        }

        let mut dim = Paint::color(color(self.theme.hud_dim));
        dim.set_font(self.fonts);
        dim.set_font_size(12.0);
        dim.set_text_align(Align::Left);
        let _ = self
            .canvas
            .fill_text(x, height - 18.0, hint_line(info.kind), &dim);
    }
}

pub fn status_line(info: &HudInfo<'_>) -> String {
    let mut line = format!(
        "{} · density {:.2} · wind {:+.2} · {} puffs",
        info.kind.label(),
        info.controls.density,
        info.controls.wind,
        info.particles
    );
    if info.kind == SceneKind::Cigarette && !info.smoke_enabled {
        line.push_str(" · smoke off");
    }
    line
}

fn session_line(info: &HudInfo<'_>) -> String {
    let mut line = info.session_status.to_string();
    if let Some(ms) = info.remaining_ms {
        line.push_str(" · ");
        line.push_str(&format_remaining(ms));
        line.push_str(" left");
    }
    if info.sessions_logged > 0 {
        line.push_str(&format!(" · {} logged", info.sessions_logged));
    }
    line
}

pub fn hint_line(kind: SceneKind) -> &'static str {
    match kind {
        SceneKind::Figure => "P pause · C clear · ↑↓ density · ←→ wind · Tab scene · Esc quit",
        SceneKind::Cigarette => {
            "Space inhale · S smoke · ↑↓ density · ←→ wind · Tab scene · Esc quit"
        }
        SceneKind::Session => "Enter light · hold Space to inhale · X extinguish · Tab scene",
    }
}

/// `m:ss`, rounding partial seconds up
pub fn format_remaining(ms: u64) -> String {
    let secs = ms.div_ceil(1000);
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(kind: SceneKind) -> HudInfo<'static> {
        HudInfo {
            kind,
            controls: SmokeControls::default(),
            smoke_enabled: true,
            particles: 42,
            session_status: "burning",
            remaining_ms: None,
            sessions_logged: 0,
        }
    }

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line(&info(SceneKind::Figure)),
            "figure · density 1.00 · wind +0.18 · 42 puffs"
        );

        let muted = HudInfo {
            smoke_enabled: false,
            ..info(SceneKind::Cigarette)
        };
        let line = status_line(&muted);
        assert!(line.ends_with("· smoke off"), "{line}");
    }

    #[test]
    fn test_session_line() {
        let running = HudInfo {
            remaining_ms: Some(359_500),
            sessions_logged: 3,
            ..info(SceneKind::Session)
        };
        assert_eq!(session_line(&running), "burning · 6:00 left · 3 logged");
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(1), "0:01");
        assert_eq!(format_remaining(61_000), "1:01");
        assert_eq!(format_remaining(360_000), "6:00");
    }
}
