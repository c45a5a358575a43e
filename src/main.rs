//! Ember Smoke - a burning cigarette and its smoke, drawn in real time
//!
//! One window, one frame loop: winit drives a redraw per refresh, the frame
//! loop steps the scene and particles, femtovg draws them.

mod app;
mod renderer;
mod theme;

use app::keybindings::{self, Key, KeyEvent, Modifiers};
use app::{App, InhaleSource};
use ember_smoke::persistence::{Store, WindowState};
use ember_smoke::{Error, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

/// Poll interval while paused; session timers keep running
const PAUSED_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let event_loop = EventLoop::new().map_err(|err| Error::Window(err.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut handler = AppHandler::new();
    event_loop
        .run_app(&mut handler)
        .map_err(|err| Error::Window(err.to_string()))
}

struct AppHandler {
    state: Option<AppState>,
    modifiers: ModifiersState,
}

struct AppState {
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    app: App,
}

impl AppHandler {
    fn new() -> Self {
        Self {
            state: None,
            modifiers: ModifiersState::default(),
        }
    }
}

fn non_zero(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).unwrap_or(NonZeroU32::MIN)
}

fn create_state(event_loop: &ActiveEventLoop) -> Result<AppState> {
    let mut window_attrs = WindowAttributes::default()
        .with_title("Ember Smoke")
        .with_inner_size(LogicalSize::new(720.0, 420.0));

    if let Some(saved) = Store::open_default().load_window_state() {
        window_attrs = window_attrs
            .with_inner_size(PhysicalSize::new(saved.width, saved.height))
            .with_position(PhysicalPosition::new(saved.x, saved.y));
    }

    // 4x MSAA keeps the stick figure strokes smooth
    let config_template = ConfigTemplateBuilder::new()
        .with_alpha_size(8)
        .with_multisampling(4);

    let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

    let (window, gl_config) = display_builder
        .build(event_loop, config_template, |configs| {
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .expect("display offered no GL configs")
        })
        .map_err(|err| Error::Window(err.to_string()))?;

    let window = window.ok_or_else(|| Error::Window("window not created".to_string()))?;
    let gl_display = gl_config.display();

    let raw_handle = window
        .window_handle()
        .map_err(|err| Error::Window(err.to_string()))?
        .as_raw();

    let context_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(None))
        .build(Some(raw_handle));

    let gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attrs)
            .map_err(|err| Error::Window(err.to_string()))?
    };

    let size = window.inner_size();
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_handle,
        non_zero(size.width),
        non_zero(size.height),
    );

    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &surface_attrs)
            .map_err(|err| Error::Window(err.to_string()))?
    };

    let gl_context = gl_context
        .make_current(&gl_surface)
        .map_err(|err| Error::Window(err.to_string()))?;

    let renderer = unsafe {
        femtovg::renderer::OpenGl::new_from_function_cstr(|name| {
            gl_display.get_proc_address(name) as *const _
        })
        .map_err(|err| Error::Canvas(format!("{err:?}")))?
    };

    let scale = window.scale_factor() as f32;
    let app = App::new(renderer, size.width, size.height, scale)?;

    Ok(AppState {
        window,
        gl_context,
        gl_surface,
        app,
    })
}

/// Map winit's logical key to the keybinding registry's key
fn map_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(NamedKey::Escape) => Some(Key::Escape),
        WinitKey::Named(NamedKey::Enter) => Some(Key::Enter),
        WinitKey::Named(NamedKey::Tab) => Some(Key::Tab),
        WinitKey::Named(NamedKey::Space) => Some(Key::Space),
        WinitKey::Named(NamedKey::ArrowLeft) => Some(Key::ArrowLeft),
        WinitKey::Named(NamedKey::ArrowRight) => Some(Key::ArrowRight),
        WinitKey::Named(NamedKey::ArrowUp) => Some(Key::ArrowUp),
        WinitKey::Named(NamedKey::ArrowDown) => Some(Key::ArrowDown),
        WinitKey::Character(c) => c.chars().next().map(Key::Char),
        _ => None,
    }
}

fn save_and_exit(state: &AppState, event_loop: &ActiveEventLoop) {
    let size = state.window.inner_size();
    let window_state = state
        .window
        .outer_position()
        .ok()
        .map(|pos| WindowState {
            x: pos.x,
            y: pos.y,
            width: size.width,
            height: size.height,
        });
    state.app.save_state(window_state);
    event_loop.exit();
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("{err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(s) => s,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                save_and_exit(state, event_loop);
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    state.gl_surface.resize(
                        &state.gl_context,
                        non_zero(size.width),
                        non_zero(size.height),
                    );
                }
                let scale = state.window.scale_factor() as f32;
                state.app.resize(size.width, size.height, scale);
                state.window.request_redraw();
            }

            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = map_key(&event.logical_key) else {
                    return;
                };

                let action = match event.state {
                    ElementState::Pressed => {
                        let modifiers = Modifiers {
                            ctrl: self.modifiers.control_key(),
                            alt: self.modifiers.alt_key(),
                        };
                        let mut key_event = KeyEvent::new(key, modifiers);
                        if event.repeat {
                            key_event = key_event.repeated();
                        }
                        keybindings::resolve(&key_event)
                    }
                    ElementState::Released => keybindings::resolve_release(&key),
                };

                if let Some(action) = action {
                    let result = state.app.execute(action);
                    if result.should_exit() {
                        save_and_exit(state, event_loop);
                        return;
                    }
                    state.window.set_title(&state.app.title());
                    if result.needs_redraw() {
                        state.window.request_redraw();
                    }
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let pressed = button_state == ElementState::Pressed;
                if state.app.inhale(InhaleSource::Mouse, pressed).needs_redraw() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                if state.app.render(Instant::now()) {
                    if let Err(err) = state.gl_surface.swap_buffers(&state.gl_context) {
                        log::error!("failed to swap buffers: {err}");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        let now = Instant::now();
        if state.app.tick(now).needs_redraw() {
            state.window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Poll);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(now + PAUSED_POLL));
        }
    }
}
