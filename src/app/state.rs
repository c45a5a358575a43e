//! Application state types

/// Result type for application actions that may trigger UI updates
#[must_use = "Handle the AppResult to ensure the UI updates correctly"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppResult {
    /// No action needed
    Ok,
    /// Scene needs to be redrawn
    Redraw,
    /// Close the window
    Exit,
}

impl AppResult {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, AppResult::Redraw)
    }

    pub fn should_exit(&self) -> bool {
        matches!(self, AppResult::Exit)
    }
}

/// Inhale sources held down right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InhaleInput {
    pub key: bool,
    pub mouse: bool,
}

impl InhaleInput {
    pub fn is_held(&self) -> bool {
        self.key || self.mouse
    }
}
