//! GPU-accelerated rendering with femtovg

mod fonts;
mod hud;
mod scene;
mod smoke;

use ember_smoke::frame_loop::Frame;
use ember_smoke::surface::Surface;
use ember_smoke::{Error, Result};
use femtovg::{Canvas, FontId, renderer::OpenGl};

use crate::theme::{Theme, color};
use scene::SceneRenderer;

pub use hud::HudInfo;
use hud::HudRenderer;

pub struct Renderer {
    canvas: Canvas<OpenGl>,
    fonts: Vec<FontId>,
    theme: Theme,
    surface: Surface,
    /// Window framebuffer size in physical pixels
    physical: (u32, u32),
}

impl Renderer {
    pub fn new(renderer: OpenGl, surface: Surface, physical: (u32, u32)) -> Result<Self> {
        let mut canvas =
            Canvas::new(renderer).map_err(|err| Error::Canvas(format!("{err:?}")))?;

        // The animation runs fine without text
        let fonts = fonts::load_fonts(&mut canvas).unwrap_or_else(|err| {
            log::warn!("{err}; HUD disabled");
            Vec::new()
        });

        Ok(Self {
            canvas,
            fonts,
            theme: Theme::night(),
            surface,
            physical,
        })
    }

    pub fn resize(&mut self, surface: Surface, physical: (u32, u32)) {
        self.surface = surface;
        self.physical = physical;
    }

    pub fn render(&mut self, frame: &Frame<'_>, hud: &HudInfo<'_>) {
        let (pw, ph) = self.physical;
        if pw == 0 || ph == 0 || !self.surface.is_drawable() {
            return;
        }
        let (width, height) = (self.surface.width, self.surface.height);

        self.canvas.set_size(pw, ph, self.surface.pixel_ratio);
        self.canvas.clear_rect(0, 0, pw, ph, color(self.theme.bg));

        // Scene coordinates are logical pixels
        self.canvas.reset_transform();
        let scale = pw as f32 / width;
        self.canvas.scale(scale, scale);

        SceneRenderer::new(&mut self.canvas, &self.theme, width, height).draw(&frame.scene);

        smoke::draw_particles(&mut self.canvas, frame.particles, self.theme.smoke);

        SceneRenderer::new(&mut self.canvas, &self.theme, width, height)
            .draw_fog(frame.scene.fog_alpha);

        HudRenderer::new(&mut self.canvas, &self.fonts, &self.theme).draw(hud, width, height);

        self.canvas.flush();
    }
}
