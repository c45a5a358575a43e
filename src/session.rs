//! Timed smoking session
//!
//! Owns the inhale flag the cigarette scene reads, the start timestamp the
//! burn progress is computed from, and every one-shot timer around them:
//! auto-extinguish when the cigarette burns down, exhale-mode expiry, the
//! delayed exhale sound cue and the end-screen dwell. Timers are polled from
//! the frame loop, so everything stays on the UI thread.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::burn;
use crate::config::session;
use crate::timer::OneShot;

/// Collaborator that plays the breathing sounds.
pub trait SoundCue {
    fn inhale_started(&mut self);
    fn inhale_stopped(&mut self);
    fn exhale_started(&mut self);
    fn exhale_stopped(&mut self);
}

/// Sound cue that only reports to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSoundCue;

impl SoundCue for LogSoundCue {
    fn inhale_started(&mut self) {
        log::debug!("sound: inhale start");
    }

    fn inhale_stopped(&mut self) {
        log::debug!("sound: inhale stop");
    }

    fn exhale_started(&mut self) {
        log::debug!("sound: exhale start");
    }

    fn exhale_stopped(&mut self) {
        log::debug!("sound: exhale stop");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Idle,
    Smoking,
    /// Extinguished or burned out; recorded after a short dwell
    Ended,
}

/// A completed session as written to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub started_at_ms: u64,
    pub ended_at_ms: u64,
    pub duration_ms: u64,
    pub motive: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The cigarette reached the filter
    BurnedOut,
    ExhaleModeEnded,
    Finished(SessionRecord),
}

pub struct Session<S: SoundCue = LogSoundCue> {
    step: SessionStep,
    burn_duration: Duration,
    started_at: Option<Instant>,
    started_wall_ms: u64,
    ended_at: Option<Instant>,
    motive: String,
    inhaling: bool,
    exhale_mode: bool,
    burn_out: OneShot,
    exhale_mode_end: OneShot,
    exhale_sound: OneShot,
    end_dwell: OneShot,
    sound: S,
}

impl<S: SoundCue> Session<S> {
    pub fn new(sound: S) -> Self {
        Self {
            step: SessionStep::Idle,
            burn_duration: Duration::from_millis(session::BURN_DURATION_MS),
            started_at: None,
            started_wall_ms: 0,
            ended_at: None,
            motive: String::new(),
            inhaling: false,
            exhale_mode: false,
            burn_out: OneShot::new(),
            exhale_mode_end: OneShot::new(),
            exhale_sound: OneShot::new(),
            end_dwell: OneShot::new(),
            sound,
        }
    }

    pub fn with_burn_duration(mut self, duration: Duration) -> Self {
        self.burn_duration = duration;
        self
    }

    pub fn step(&self) -> SessionStep {
        self.step
    }

    pub fn is_inhaling(&self) -> bool {
        self.inhaling
    }

    pub fn is_exhaling(&self) -> bool {
        self.exhale_mode
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    /// Short status for the HUD
    pub fn status_label(&self) -> &'static str {
        match self.step {
            SessionStep::Idle => "press Enter to light up",
            SessionStep::Ended => "extinguished",
            SessionStep::Smoking if self.inhaling => "inhale",
            SessionStep::Smoking if self.exhale_mode => "exhale",
            SessionStep::Smoking => "burning",
        }
    }

    /// Burn progress for the cigarette scene
    pub fn burn_progress(&self, now: Instant) -> f32 {
        let until = self.ended_at.unwrap_or(now);
        burn::elapsed_progress(until, self.started_at, self.burn_duration)
    }

    /// Time left before auto-extinguish while smoking
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match (self.step, self.started_at) {
            (SessionStep::Smoking, Some(start)) => Some(
                self.burn_duration
                    .saturating_sub(now.saturating_duration_since(start)),
            ),
            _ => None,
        }
    }

    /// Light a new cigarette. A running session is discarded.
    ///
    /// A session still dwelling on the end screen is finished first and its
    /// record returned, so relighting never loses it.
    pub fn start(&mut self, now: Instant, wall_ms: u64, motive: &str) -> Option<SessionRecord> {
        let previous = if self.step == SessionStep::Ended && self.end_dwell.is_pending() {
            self.finish()
        } else {
            None
        };

        self.cancel_timers();
        self.stop_sounds();

        self.step = SessionStep::Smoking;
        self.started_at = Some(now);
        self.started_wall_ms = wall_ms;
        self.ended_at = None;
        self.motive = if motive.trim().is_empty() {
            session::DEFAULT_MOTIVE.to_string()
        } else {
            motive.trim().to_string()
        };
        self.inhaling = false;
        self.exhale_mode = false;
        self.burn_out.schedule(now, self.burn_duration);

        log::info!("session started ({})", self.motive);
        previous
    }

    /// Begin drawing on the cigarette. Repeated presses are ignored.
    pub fn inhale_start(&mut self) -> bool {
        if self.step != SessionStep::Smoking || self.inhaling {
            return false;
        }
        self.inhaling = true;
        self.exhale_mode = false;
        self.exhale_mode_end.cancel();
        self.exhale_sound.cancel();
        self.sound.exhale_stopped();
        self.sound.inhale_started();
        true
    }

    /// Release the inhale; exhale mode runs for a while afterwards.
    pub fn inhale_end(&mut self, now: Instant) -> bool {
        if !self.inhaling {
            return false;
        }
        self.inhaling = false;
        self.exhale_mode = true;
        self.exhale_mode_end
            .schedule(now, Duration::from_millis(session::EXHALE_MODE_MS));
        self.sound.inhale_stopped();
        self.exhale_sound
            .schedule(now, Duration::from_millis(session::EXHALE_SOUND_DELAY_MS));
        true
    }

    /// Put the cigarette out early.
    pub fn extinguish(&mut self, now: Instant) {
        if self.step != SessionStep::Smoking {
            return;
        }
        log::info!("session extinguished");
        self.end(now);
    }

    /// Fire due timers. Call once per frame.
    pub fn poll(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.exhale_sound.fire(now) {
            self.sound.exhale_started();
        }

        if self.exhale_mode_end.fire(now) {
            self.exhale_mode = false;
            self.sound.exhale_stopped();
            events.push(SessionEvent::ExhaleModeEnded);
        }

        if self.burn_out.fire(now) && self.step == SessionStep::Smoking {
            log::info!("cigarette burned down");
            self.end(now);
            events.push(SessionEvent::BurnedOut);
        }

        if self.end_dwell.fire(now) {
            if let Some(record) = self.finish() {
                events.push(SessionEvent::Finished(record));
            }
        }

        events
    }

    /// Cancel all pending timers and silence the sound cue.
    pub fn teardown(&mut self) {
        self.cancel_timers();
        self.stop_sounds();
        self.inhaling = false;
        self.exhale_mode = false;
    }

    fn end(&mut self, now: Instant) {
        self.stop_sounds();
        self.inhaling = false;
        self.exhale_mode = false;
        self.ended_at = Some(now);
        self.step = SessionStep::Ended;
        self.burn_out.cancel();
        self.exhale_mode_end.cancel();
        self.exhale_sound.cancel();
        self.end_dwell
            .schedule(now, Duration::from_millis(session::END_DWELL_MS));
    }

    fn finish(&mut self) -> Option<SessionRecord> {
        let started_at = self.started_at?;
        let ended_at = self.ended_at.unwrap_or(started_at);
        let duration_ms = ended_at.saturating_duration_since(started_at).as_millis() as u64;

        self.step = SessionStep::Idle;
        self.started_at = None;
        self.ended_at = None;

        Some(SessionRecord {
            id: format!("s{:x}", self.started_wall_ms),
            started_at_ms: self.started_wall_ms,
            ended_at_ms: self.started_wall_ms + duration_ms,
            duration_ms,
            motive: std::mem::take(&mut self.motive),
        })
    }

    fn cancel_timers(&mut self) {
        self.burn_out.cancel();
        self.exhale_mode_end.cancel();
        self.exhale_sound.cancel();
        self.end_dwell.cancel();
    }

    fn stop_sounds(&mut self) {
        if self.inhaling {
            self.sound.inhale_stopped();
        }
        if self.exhale_mode {
            self.sound.exhale_stopped();
        }
    }
}

impl Default for Session<LogSoundCue> {
    fn default() -> Self {
        Self::new(LogSoundCue)
    }
}

impl<S: SoundCue> Drop for Session<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Milliseconds since the Unix epoch for session records
pub fn wall_clock_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingCue {
        calls: Vec<&'static str>,
    }

    impl SoundCue for RecordingCue {
        fn inhale_started(&mut self) {
            self.calls.push("inhale_started");
        }
        fn inhale_stopped(&mut self) {
            self.calls.push("inhale_stopped");
        }
        fn exhale_started(&mut self) {
            self.calls.push("exhale_started");
        }
        fn exhale_stopped(&mut self) {
            self.calls.push("exhale_stopped");
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_inhale_ignored_outside_session() {
        let mut s = Session::new(RecordingCue::default());
        assert!(!s.inhale_start());
        assert!(!s.is_inhaling());
    }

    #[test]
    fn test_inhale_edges_and_exhale_mode() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default());
        s.start(t0, 1_000, "coffee");
        assert!(s.inhale_start());
        assert!(!s.inhale_start(), "repeated press must be ignored");
        assert!(s.inhale_end(t0 + ms(500)));
        assert!(s.is_exhaling());

        assert!(s.poll(t0 + ms(1400)).is_empty());
        assert!(!s.sound().calls.contains(&"exhale_started"));
        assert!(s.poll(t0 + ms(1600)).is_empty());
        assert!(s.sound().calls.contains(&"exhale_started"));

        let events = s.poll(t0 + ms(2300));
        assert_eq!(events, vec![SessionEvent::ExhaleModeEnded]);
        assert!(!s.is_exhaling());
    }

    #[test]
    fn test_new_inhale_cancels_pending_exhale_timers() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default());
        s.start(t0, 0, "");
        s.inhale_start();
        s.inhale_end(t0 + ms(100));
        s.inhale_start();
        assert!(s.poll(t0 + ms(5000)).is_empty());
        assert!(!s.sound().calls.contains(&"exhale_started"));
        assert!(s.is_inhaling());
    }

    #[test]
    fn test_burn_out_ends_and_records_session() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default()).with_burn_duration(ms(1000));
        s.start(t0, 50_000, "");
        assert!((s.burn_progress(t0 + ms(500)) - 0.5).abs() < 1e-3);
        assert_eq!(s.remaining(t0 + ms(400)), Some(ms(600)));

        let events = s.poll(t0 + ms(1000));
        assert_eq!(events, vec![SessionEvent::BurnedOut]);
        assert_eq!(s.step(), SessionStep::Ended);
        assert_eq!(s.remaining(t0 + ms(1000)), None);
        assert_eq!(s.burn_progress(t0 + ms(9000)), 1.0);

        let events = s.poll(t0 + ms(1000 + session::END_DWELL_MS));
        let [SessionEvent::Finished(record)] = events.as_slice() else {
            panic!("expected a finished session, got {events:?}");
        };
        assert_eq!(record.duration_ms, 1000);
        assert_eq!(record.started_at_ms, 50_000);
        assert_eq!(record.ended_at_ms, 51_000);
        assert_eq!(record.motive, session::DEFAULT_MOTIVE);
        assert_eq!(s.step(), SessionStep::Idle);
    }

    #[test]
    fn test_extinguish_supersedes_burn_out() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default()).with_burn_duration(ms(1000));
        s.start(t0, 0, "stress");
        s.inhale_start();
        s.extinguish(t0 + ms(300));
        assert!(!s.is_inhaling());
        assert!(s.sound().calls.contains(&"inhale_stopped"));

        let events = s.poll(t0 + ms(1000));
        assert!(events.is_empty(), "burn-out timer must not fire after extinguish");

        let events = s.poll(t0 + ms(300 + session::END_DWELL_MS));
        assert!(matches!(
            events.as_slice(),
            [SessionEvent::Finished(r)] if r.duration_ms == 300 && r.motive == "stress"
        ));
    }

    #[test]
    fn test_restart_discards_running_session() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default()).with_burn_duration(ms(1000));
        s.start(t0, 0, "");
        s.start(t0 + ms(800), 800, "");
        assert!(s.poll(t0 + ms(1000)).is_empty());
        assert_eq!(s.step(), SessionStep::Smoking);
    }

    #[test]
    fn test_relight_on_end_screen_keeps_previous_record() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default());
        s.start(t0, 7_000, "coffee");
        s.extinguish(t0 + ms(3000));

        let previous = s.start(t0 + ms(3200), 10_200, "");
        let Some(record) = previous else {
            panic!("extinguished session was not recorded");
        };
        assert_eq!(record.motive, "coffee");
        assert_eq!(record.duration_ms, 3000);
        assert_eq!(record.started_at_ms, 7_000);
        assert_eq!(s.step(), SessionStep::Smoking);

        // The old dwell must not finish the new session
        assert!(s.poll(t0 + ms(3000 + session::END_DWELL_MS)).is_empty());
        assert_eq!(s.step(), SessionStep::Smoking);
    }

    #[test]
    fn test_start_while_smoking_returns_nothing() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default());
        assert_eq!(s.start(t0, 0, ""), None);
        assert_eq!(s.start(t0 + ms(100), 100, ""), None);
    }

    #[test]
    fn test_extinguish_cancels_pending_exhale() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default());
        s.start(t0, 0, "");
        s.inhale_start();
        s.inhale_end(t0 + ms(200));
        s.extinguish(t0 + ms(400));
        assert!(!s.is_exhaling());
        assert_eq!(s.sound().calls.last(), Some(&"exhale_stopped"));

        let events = s.poll(t0 + ms(5000));
        assert!(!events.contains(&SessionEvent::ExhaleModeEnded));
        assert!(!s.sound().calls.contains(&"exhale_started"));
    }

    #[test]
    fn test_teardown_silences_sound() {
        let t0 = Instant::now();
        let mut s = Session::new(RecordingCue::default());
        s.start(t0, 0, "");
        s.inhale_start();
        s.teardown();
        assert_eq!(s.sound().calls.last(), Some(&"inhale_stopped"));
        assert!(s.poll(t0 + ms(session::BURN_DURATION_MS)).is_empty());
    }
}
