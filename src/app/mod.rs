//! Application state and coordination

mod action;
pub mod keybindings;
mod state;

use std::time::Instant;

use ember_smoke::Result;
use ember_smoke::frame_loop::{FrameInput, FrameLoop};
use ember_smoke::persistence::{Preferences, Store, WindowState};
use ember_smoke::scene::SceneKind;
use ember_smoke::session::{self, Session, SessionEvent, SessionRecord};
use ember_smoke::surface::Surface;

use crate::renderer::{HudInfo, Renderer};

pub use action::InhaleSource;
pub use state::AppResult;
use state::InhaleInput;

pub struct App {
    renderer: Renderer,
    frame_loop: FrameLoop,
    session: Session,
    store: Store,
    inhale: InhaleInput,
    sessions_logged: usize,
}

impl App {
    pub fn new(
        gl_renderer: femtovg::renderer::OpenGl,
        physical_width: u32,
        physical_height: u32,
        scale: f32,
    ) -> Result<Self> {
        let store = Store::open_default();
        let prefs = store.load_preferences();
        let sessions_logged = store.load_sessions().len();
        log::info!(
            "data dir {}, scene {}, {} sessions logged",
            store.dir().display(),
            prefs.scene.label(),
            sessions_logged
        );

        let surface = Surface::from_physical(physical_width, physical_height, scale);
        let renderer = Renderer::new(gl_renderer, surface, (physical_width, physical_height))?;

        let mut frame_loop = FrameLoop::new(surface, prefs.scene, prefs.controls);
        frame_loop.set_smoke_enabled(prefs.smoke_enabled);

        Ok(Self {
            renderer,
            frame_loop,
            session: Session::default(),
            store,
            inhale: InhaleInput::default(),
            sessions_logged,
        })
    }

    // =========================================================================
    // Core lifecycle
    // =========================================================================

    /// Poll session timers. Asks for a redraw unless paused.
    pub fn tick(&mut self, now: Instant) -> AppResult {
        for event in self.session.poll(now) {
            match event {
                SessionEvent::Finished(record) => self.record_session(record),
                SessionEvent::BurnedOut | SessionEvent::ExhaleModeEnded => {}
            }
        }

        if self.frame_loop.is_paused() {
            AppResult::Ok
        } else {
            AppResult::Redraw
        }
    }

    pub fn resize(&mut self, physical_width: u32, physical_height: u32, scale: f32) {
        let surface = Surface::from_physical(physical_width, physical_height, scale);
        self.frame_loop.resize(surface);
        self.renderer
            .resize(surface, (physical_width, physical_height));
    }

    /// Simulate and draw one frame. Returns false when nothing was drawn,
    /// in which case the buffers must not be swapped.
    pub fn render(&mut self, now: Instant) -> bool {
        let kind = self.frame_loop.kind();
        let controls = self.frame_loop.controls();
        let smoke_enabled = self.frame_loop.smoke_enabled();
        let input = FrameInput {
            inhaling: self.is_inhaling(),
            elapsed_progress: self.session.burn_progress(now),
        };
        let remaining_ms = self
            .session
            .remaining(now)
            .map(|left| left.as_millis() as u64);
        let session_status = self.session.status_label();

        let Some(frame) = self.frame_loop.tick(now, input) else {
            return false;
        };

        let hud = HudInfo {
            kind,
            controls,
            smoke_enabled,
            particles: frame.particles.len(),
            session_status,
            remaining_ms,
            sessions_logged: self.sessions_logged,
        };
        self.renderer.render(&frame, &hud);
        true
    }

    pub fn title(&self) -> String {
        if self.frame_loop.is_paused() {
            "Ember Smoke (paused)".to_string()
        } else {
            "Ember Smoke".to_string()
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn is_inhaling(&self) -> bool {
        match self.frame_loop.kind() {
            // The figure breathes on its own clock
            SceneKind::Figure => false,
            SceneKind::Cigarette => self.inhale.is_held(),
            SceneKind::Session => self.session.is_inhaling(),
        }
    }

    /// Press or release one inhale source
    pub fn inhale(&mut self, source: InhaleSource, pressed: bool) -> AppResult {
        let was_held = self.inhale.is_held();
        match source {
            InhaleSource::Key => self.inhale.key = pressed,
            InhaleSource::Mouse => self.inhale.mouse = pressed,
        }
        let held = self.inhale.is_held();
        if held == was_held {
            return AppResult::Ok;
        }

        if self.frame_loop.kind() == SceneKind::Session {
            if held {
                self.session.inhale_start();
            } else {
                self.session.inhale_end(Instant::now());
            }
        }
        AppResult::Redraw
    }

    fn toggle_pause(&mut self) -> AppResult {
        self.frame_loop.toggle_pause();
        AppResult::Redraw
    }

    fn clear_smoke(&mut self) -> AppResult {
        self.frame_loop.clear_smoke();
        AppResult::Redraw
    }

    fn adjust_controls(&mut self, density_delta: f32, wind_delta: f32) -> AppResult {
        let mut controls = self.frame_loop.controls();
        controls.adjust_density(density_delta);
        controls.adjust_wind(wind_delta);
        log::debug!(
            "density {:.2}, wind {:+.2}",
            controls.density,
            controls.wind
        );
        self.frame_loop.set_controls(controls);
        AppResult::Redraw
    }

    fn toggle_cigarette_smoke(&mut self) -> AppResult {
        let enabled = !self.frame_loop.smoke_enabled();
        self.frame_loop.set_smoke_enabled(enabled);
        AppResult::Redraw
    }

    fn next_scene(&mut self) -> AppResult {
        self.switch_scene(self.frame_loop.kind().next());
        AppResult::Redraw
    }

    fn switch_scene(&mut self, kind: SceneKind) {
        if self.frame_loop.kind() == SceneKind::Session {
            self.session.inhale_end(Instant::now());
        }
        self.inhale = InhaleInput::default();
        self.frame_loop.set_kind(kind);
        log::debug!("scene {}", kind.label());
    }

    fn start_session(&mut self) -> AppResult {
        if self.frame_loop.kind() != SceneKind::Session {
            self.switch_scene(SceneKind::Session);
        }
        self.inhale = InhaleInput::default();
        if let Some(previous) = self
            .session
            .start(Instant::now(), session::wall_clock_ms(), "")
        {
            self.record_session(previous);
        }
        AppResult::Redraw
    }

    fn extinguish(&mut self) -> AppResult {
        self.session.extinguish(Instant::now());
        AppResult::Redraw
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn record_session(&mut self, record: SessionRecord) {
        match self.store.append_session(record) {
            Ok(sessions) => self.sessions_logged = sessions.len(),
            Err(err) => log::warn!("failed to record session: {err}"),
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            controls: self.frame_loop.controls(),
            scene: self.frame_loop.kind(),
            smoke_enabled: self.frame_loop.smoke_enabled(),
        }
    }

    /// Save preferences and, when known, the window geometry
    pub fn save_state(&self, window: Option<WindowState>) {
        if let Some(window) = window {
            if let Err(err) = self.store.save_window_state(window) {
                log::warn!("failed to save window state: {err}");
            }
        }
        if let Err(err) = self.store.save_preferences(&self.preferences()) {
            log::warn!("failed to save preferences: {err}");
        }
    }
}
