use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::session;
use crate::controls::SmokeControls;
use crate::error::Result;
use crate::scene::SceneKind;
use crate::session::SessionRecord;

/// Get the data directory for saved state
/// - If running from source (binary path contains "target") or EMBER_SMOKE_DEV is set: ./tmp/ember-smoke
/// - If installed (binary path elsewhere): ~/.local/share/ember-smoke
pub fn get_data_dir() -> PathBuf {
    let use_local_storage = std::env::var("EMBER_SMOKE_DEV").is_ok()
        || std::env::current_exe()
            .map(|p| p.iter().any(|c| c == "target"))
            .unwrap_or(false);

    if use_local_storage {
        // cargo run sets CWD to the project root
        let mut path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        path.push("tmp");
        path.push("ember-smoke");
        path
    } else {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("ember-smoke")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Settings restored on the next launch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub controls: SmokeControls,
    pub scene: SceneKind,
    pub smoke_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            controls: SmokeControls::default(),
            scene: SceneKind::default(),
            smoke_enabled: true,
        }
    }
}

const WINDOW_STATE_FILE: &str = "window_state.json";
const PREFERENCES_FILE: &str = "preferences.json";
const SESSIONS_FILE: &str = "sessions.json";

/// JSON state files under one data directory
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `get_data_dir()`
    pub fn open_default() -> Self {
        Self::new(get_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn load_window_state(&self) -> Option<WindowState> {
        let state: WindowState = self.read_json(WINDOW_STATE_FILE)?;
        (state.width > 0 && state.height > 0).then_some(state)
    }

    pub fn save_window_state(&self, state: WindowState) -> Result<()> {
        self.write_json(WINDOW_STATE_FILE, &state)
    }

    /// Saved preferences, with controls forced back into range
    pub fn load_preferences(&self) -> Preferences {
        let mut prefs: Preferences = self.read_json(PREFERENCES_FILE).unwrap_or_default();
        prefs.controls = prefs.controls.sanitized();
        prefs
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> Result<()> {
        self.write_json(PREFERENCES_FILE, prefs)
    }

    /// Completed sessions, newest first
    pub fn load_sessions(&self) -> Vec<SessionRecord> {
        self.read_json(SESSIONS_FILE).unwrap_or_default()
    }

    /// Prepend a record and keep only the most recent ones.
    pub fn append_session(&self, record: SessionRecord) -> Result<Vec<SessionRecord>> {
        let mut sessions = self.load_sessions();
        sessions.insert(0, record);
        sessions.truncate(session::MAX_RECORDS);
        self.write_json(SESSIONS_FILE, &sessions)?;
        Ok(sessions)
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("ignoring unreadable {}: {err}", path.display());
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let dir = ensure_dir(&self.dir)?;
        let payload = serde_json::to_string_pretty(value)?;
        fs::write(dir.join(name), payload)?;
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u64) -> SessionRecord {
        SessionRecord {
            id: format!("s{n}"),
            started_at_ms: n * 1000,
            ended_at_ms: n * 1000 + 500,
            duration_ms: 500,
            motive: "other".to_string(),
        }
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path().join("nested"));
        assert_eq!(store.load_window_state(), None);
        assert_eq!(store.load_preferences(), Preferences::default());
        assert!(store.load_sessions().is_empty());
    }

    #[test]
    fn test_window_state_saved_and_restored() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path().join("nested"));
        let state = WindowState {
            x: 10,
            y: 20,
            width: 800,
            height: 500,
        };
        store.save_window_state(state).unwrap();
        assert_eq!(store.load_window_state(), Some(state));

        store
            .save_window_state(WindowState { width: 0, ..state })
            .unwrap();
        assert_eq!(store.load_window_state(), None);
    }

    #[test]
    fn test_preferences_are_sanitized_on_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());
        fs::write(
            tmp.path().join(PREFERENCES_FILE),
            r#"{"controls":{"density":5.0,"wind":-3.0},"scene":"session"}"#,
        )
        .unwrap();
        let prefs = store.load_preferences();
        assert_eq!(prefs.controls, SmokeControls::new(2.0, -0.6));
        assert_eq!(prefs.scene, SceneKind::Session);
        assert!(prefs.smoke_enabled);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());
        fs::write(tmp.path().join(SESSIONS_FILE), "not json").unwrap();
        assert!(store.load_sessions().is_empty());
        let sessions = store.append_session(record(1)).unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn test_session_log_is_newest_first_and_capped() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::new(tmp.path());
        for n in 0..(session::MAX_RECORDS as u64 + 5) {
            store.append_session(record(n)).unwrap();
        }
        let sessions = store.load_sessions();
        assert_eq!(sessions.len(), session::MAX_RECORDS);
        assert_eq!(sessions[0].id, format!("s{}", session::MAX_RECORDS + 4));
        assert_eq!(sessions.last().map(|r| r.id.as_str()), Some("s5"));
    }
}
