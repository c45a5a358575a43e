//! Keyboard shortcut registry
//!
//! Maps keyboard input to Actions. All keybindings are defined in one place
//! so the HUD hints and the handlers stay in sync.
//!
//! Presses and releases resolve separately: only the inhale key reacts to
//! being let go.

use super::action::Action;

/// Modifier key state
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

#[cfg(test)]
impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Represents a key that can be pressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
    Tab,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
}

/// A keyboard input event (key + modifiers)
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Auto-repeat from a key held down
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            repeat: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Resolve a key press to an action
///
/// Returns None if the key event doesn't map to any action.
pub fn resolve(event: &KeyEvent) -> Option<Action> {
    let KeyEvent {
        key,
        modifiers,
        repeat,
    } = event;
    let Modifiers { ctrl, alt } = *modifiers;

    if ctrl || alt {
        return None;
    }

    match key {
        Key::Escape => Some(Action::Quit),

        // Arrows keep adjusting while held
        Key::ArrowUp => Some(Action::DensityUp),
        Key::ArrowDown => Some(Action::DensityDown),
        Key::ArrowLeft => Some(Action::WindLeft),
        Key::ArrowRight => Some(Action::WindRight),

        _ if *repeat => None,

        Key::Space => Some(Action::InhaleStart),
        Key::Enter => Some(Action::StartSession),
        Key::Tab => Some(Action::NextScene),
        Key::Char(c) => resolve_char(*c),
    }
}

/// Resolve a key release to an action
pub fn resolve_release(key: &Key) -> Option<Action> {
    match key {
        Key::Space => Some(Action::InhaleEnd),
        _ => None,
    }
}

fn resolve_char(c: char) -> Option<Action> {
    match c.to_ascii_lowercase() {
        'p' => Some(Action::TogglePause),
        'c' => Some(Action::ClearSmoke),
        's' => Some(Action::ToggleCigaretteSmoke),
        'x' => Some(Action::Extinguish),
        _ => None,
    }
}
