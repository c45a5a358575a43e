//! Centralized action system
//!
//! All user-triggerable actions are defined here and dispatched through
//! `App::execute`. Keyboard and mouse input both resolve to an `Action`.

use ember_smoke::config::controls::{DENSITY_STEP, WIND_STEP};

use super::App;
use super::state::AppResult;

/// All actions that can be triggered by keyboard or mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // =========================================================================
    // Frame loop
    // =========================================================================
    TogglePause,
    ClearSmoke,

    // =========================================================================
    // Smoke controls
    // =========================================================================
    DensityUp,
    DensityDown,
    WindLeft,
    WindRight,
    ToggleCigaretteSmoke,

    // =========================================================================
    // Scene
    // =========================================================================
    NextScene,

    // =========================================================================
    // Session
    // =========================================================================
    StartSession,
    Extinguish,
    InhaleStart,
    InhaleEnd,

    Quit,
}

/// Which device an inhale came from; both may be held at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InhaleSource {
    Key,
    Mouse,
}

impl App {
    /// Execute an action and return whether a redraw is needed
    pub fn execute(&mut self, action: Action) -> AppResult {
        match action {
            Action::TogglePause => self.toggle_pause(),
            Action::ClearSmoke => self.clear_smoke(),

            Action::DensityUp => self.adjust_controls(DENSITY_STEP, 0.0),
            Action::DensityDown => self.adjust_controls(-DENSITY_STEP, 0.0),
            Action::WindLeft => self.adjust_controls(0.0, -WIND_STEP),
            Action::WindRight => self.adjust_controls(0.0, WIND_STEP),
            Action::ToggleCigaretteSmoke => self.toggle_cigarette_smoke(),

            Action::NextScene => self.next_scene(),

            Action::StartSession => self.start_session(),
            Action::Extinguish => self.extinguish(),
            Action::InhaleStart => self.inhale(InhaleSource::Key, true),
            Action::InhaleEnd => self.inhale(InhaleSource::Key, false),

            Action::Quit => AppResult::Exit,
        }
    }
}
