//! Frame loop driver
//!
//! Turns wall-clock ticks into `(time, dt)`, runs the scene composer and
//! steps the particle system in spawn → update order. The returned `Frame`
//! borrows the particles so the renderer draws exactly what was simulated.

use std::time::Instant;

use crate::config::timing;
use crate::controls::SmokeControls;
use crate::scene::{self, Scene, SceneInput, SceneKind, SceneMode};
use crate::smoke::{SmokeEnvironment, SmokeParticle, SmokeSystem};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Paused,
}

/// External signals sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    pub inhaling: bool,
    /// Burn progress for the session scene
    pub elapsed_progress: f32,
}

/// Everything the renderer needs for one frame
pub struct Frame<'a> {
    pub scene: Scene,
    pub particles: &'a [SmokeParticle],
    pub surface: Surface,
    pub time: f32,
    pub dt: f32,
}

pub struct FrameLoop {
    state: LoopState,
    last_tick: Option<Instant>,
    time: f32,
    surface: Surface,
    controls: SmokeControls,
    kind: SceneKind,
    smoke: SmokeSystem,
    smoke_enabled: bool,
    prev_inhaling: bool,
    exhale_at: Option<f32>,
}

impl FrameLoop {
    pub fn new(surface: Surface, kind: SceneKind, controls: SmokeControls) -> Self {
        Self::with_smoke(surface, kind, controls, SmokeSystem::default())
    }

    /// Frame loop around a prepared particle system, e.g. a seeded one
    pub fn with_smoke(
        surface: Surface,
        kind: SceneKind,
        controls: SmokeControls,
        smoke: SmokeSystem,
    ) -> Self {
        Self {
            state: LoopState::Running,
            last_tick: None,
            time: 0.0,
            surface,
            controls: controls.sanitized(),
            kind,
            smoke,
            smoke_enabled: true,
            prev_inhaling: false,
            exhale_at: None,
        }
    }

    /// Advance one frame. Returns `None` while paused or when the surface is
    /// empty; the caller skips presenting in that case.
    pub fn tick(&mut self, now: Instant, input: FrameInput) -> Option<Frame<'_>> {
        if self.state == LoopState::Paused {
            return None;
        }

        let elapsed = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        self.time += elapsed;
        let dt = elapsed.min(timing::MAX_DT);

        if self.prev_inhaling && !input.inhaling {
            self.exhale_at = Some(self.time);
        }
        self.prev_inhaling = input.inhaling;

        if !self.surface.is_drawable() {
            return None;
        }

        let scene_input = SceneInput {
            time: self.time,
            width: self.surface.width,
            height: self.surface.height,
            inhaling: input.inhaling,
            elapsed_progress: input.elapsed_progress,
            exhale_since: self.exhale_at.map(|at| self.time - at),
            controls: self.controls,
            smoke_enabled: self.smoke_enabled,
        };
        let scene = scene::compose(self.kind.mode(), &scene_input);

        self.smoke.set_profile(scene.profile);
        self.smoke
            .spawn(scene.spawn_rate, dt, scene.smoke_origin, self.controls.wind);
        self.smoke.update(
            dt,
            SmokeEnvironment {
                wind: self.controls.wind,
                width: self.surface.width,
            },
        );

        Some(Frame {
            scene,
            particles: self.smoke.particles(),
            surface: self.surface,
            time: self.time,
            dt,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }

    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("frame loop paused at t={:.2}", self.time);
            self.state = LoopState::Paused;
        }
    }

    /// Resume without a time jump: the next tick has `dt == 0`.
    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            log::debug!("frame loop resumed");
            self.state = LoopState::Running;
            self.last_tick = None;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            LoopState::Running => self.pause(),
            LoopState::Paused => self.resume(),
        }
    }

    /// Animation time in seconds, excluding paused intervals
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn resize(&mut self, surface: Surface) {
        log::debug!(
            "resize to {}x{} @{} ({}x{} backing)",
            surface.width,
            surface.height,
            surface.pixel_ratio,
            surface.backing_width,
            surface.backing_height
        );
        self.surface = surface;
    }

    pub fn clear_smoke(&mut self) {
        self.smoke.clear();
    }

    pub fn particle_count(&self) -> usize {
        self.smoke.len()
    }

    pub fn controls(&self) -> SmokeControls {
        self.controls
    }

    pub fn set_controls(&mut self, controls: SmokeControls) {
        self.controls = controls.sanitized();
    }

    pub fn kind(&self) -> SceneKind {
        self.kind
    }

    pub fn mode(&self) -> SceneMode {
        self.kind.mode()
    }

    /// Switch scenes. Smoke from the previous scene is dropped since its
    /// origin and profile no longer apply.
    pub fn set_kind(&mut self, kind: SceneKind) {
        if kind != self.kind {
            self.kind = kind;
            self.smoke.clear();
            self.exhale_at = None;
        }
    }

    pub fn smoke_enabled(&self) -> bool {
        self.smoke_enabled
    }

    pub fn set_smoke_enabled(&mut self, enabled: bool) {
        self.smoke_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::smoke::SmokeProfile;

    fn frame_loop(kind: SceneKind) -> FrameLoop {
        FrameLoop::with_smoke(
            Surface::default(),
            kind,
            SmokeControls::default(),
            SmokeSystem::seeded(SmokeProfile::FIGURE, 7),
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_tick_has_zero_dt() {
        let mut fl = frame_loop(SceneKind::Figure);
        let frame = fl.tick(Instant::now(), FrameInput::default()).unwrap();
        assert_eq!(frame.dt, 0.0);
        assert_eq!(frame.time, 0.0);
    }

    #[test]
    fn test_dt_is_clamped() {
        let t0 = Instant::now();
        let mut fl = frame_loop(SceneKind::Figure);
        fl.tick(t0, FrameInput::default());
        let frame = fl.tick(t0 + ms(16), FrameInput::default()).unwrap();
        assert!((frame.dt - 0.016).abs() < 1e-5);
        let frame = fl.tick(t0 + ms(1016), FrameInput::default()).unwrap();
        assert_eq!(frame.dt, 0.05);
    }

    #[test]
    fn test_pause_freezes_time_and_particles() {
        let t0 = Instant::now();
        let mut fl = frame_loop(SceneKind::Figure);
        for i in 0..59 {
            fl.tick(t0 + ms(i * 16), FrameInput::default());
        }
        let before = fl
            .tick(t0 + ms(59 * 16), FrameInput::default())
            .unwrap()
            .particles
            .to_vec();
        let time = fl.time();
        let count = fl.particle_count();
        assert!(count > 0);
        assert_eq!(before.len(), count);

        fl.pause();
        assert!(fl.tick(t0 + ms(5000), FrameInput::default()).is_none());
        assert_eq!(fl.time(), time);
        assert_eq!(fl.particle_count(), count);

        fl.resume();
        let frame = fl.tick(t0 + ms(10_000), FrameInput::default()).unwrap();
        assert_eq!(frame.dt, 0.0);
        assert_eq!(frame.time, time, "pose must be continuous across a pause");
        assert_eq!(
            frame.particles,
            before.as_slice(),
            "particles must resume where they stopped"
        );
    }

    #[test]
    fn test_toggle_pause() {
        let mut fl = frame_loop(SceneKind::Figure);
        fl.toggle_pause();
        assert_eq!(fl.state(), LoopState::Paused);
        fl.toggle_pause();
        assert_eq!(fl.state(), LoopState::Running);
    }

    #[test]
    fn test_exhale_edge_starts_fog() {
        let t0 = Instant::now();
        let mut fl = frame_loop(SceneKind::Session);
        let inhaling = FrameInput {
            inhaling: true,
            elapsed_progress: 0.1,
        };
        let released = FrameInput {
            inhaling: false,
            elapsed_progress: 0.1,
        };
        fl.tick(t0, inhaling);
        let frame = fl.tick(t0 + ms(16), inhaling).unwrap();
        assert_eq!(frame.scene.fog_alpha, 0.0);

        let frame = fl.tick(t0 + ms(32), released).unwrap();
        assert!(frame.scene.fog_alpha > 0.3);

        let frame = fl.tick(t0 + ms(3000), released).unwrap();
        assert_eq!(frame.scene.fog_alpha, 0.0);
    }

    #[test]
    fn test_clear_and_scene_switch_drop_smoke() {
        let t0 = Instant::now();
        let mut fl = frame_loop(SceneKind::Figure);
        for i in 0..60 {
            fl.tick(t0 + ms(i * 16), FrameInput::default());
        }
        assert!(fl.particle_count() > 0);
        fl.clear_smoke();
        assert_eq!(fl.particle_count(), 0);

        for i in 60..120 {
            fl.tick(t0 + ms(i * 16), FrameInput::default());
        }
        fl.set_kind(SceneKind::Cigarette);
        assert_eq!(fl.particle_count(), 0);
        let frame = fl.tick(t0 + ms(2000), FrameInput::default()).unwrap();
        assert!(frame.scene.cigarette.is_some());
        assert!(frame.scene.figure.is_none());
    }

    #[test]
    fn test_empty_surface_skips_frame() {
        let mut fl = frame_loop(SceneKind::Figure);
        fl.resize(Surface::new(0.0, 0.0, 1.0));
        assert!(fl.tick(Instant::now(), FrameInput::default()).is_none());
    }

    #[test]
    fn test_controls_are_sanitized() {
        let mut fl = frame_loop(SceneKind::Figure);
        fl.set_controls(SmokeControls {
            density: 9.0,
            wind: f32::NAN,
        });
        assert_eq!(fl.controls().density, 2.0);
        assert_eq!(fl.controls().wind, 0.18);
    }
}
