use std::time::Instant;

use crate::clock::{PlaybackClock, format_time_of_day};
use crate::config::{MAX_FPS, MIN_FPS, ViewerConfig};

/// Which scene the viewer should switch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Following file, wrapping to the first.
    Next,
    /// Preceding file, wrapping to the last.
    Previous,
    /// Zero-based position in the playlist.
    Index(usize),
    /// Last file of the playlist.
    Last,
}

/// Commande de contrôle émise par la couche d'entrée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Toggle sub-step interpolation.
    ToggleBlend,
    /// Toggle on-screen notices.
    ToggleOsd,
    /// Change the target frame rate by a signed amount.
    AdjustFps(i32),
    /// Switch between normal speed and fast-forward.
    ToggleFastForward,
    /// Freeze or resume simulated time.
    TogglePause,
    /// Move simulated time by a signed number of seconds.
    Scrub(f64),
    /// Drop every manual offset and return to the live position.
    JumpToNow,
    /// Ask the driver for another scene.
    Navigate(Navigation),
}

/// Ce que le driver doit faire après une commande.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Nothing visible.
    None,
    /// Message for the OSD.
    Notice(String),
    /// Load another scene.
    Navigate(Navigation),
}

/// État de lecture d'un viewer : horloge, modes, cadence.
///
/// Un seul propriétaire, aucun état global. Toute commande passe par
/// [`ViewerSession::apply`], qui renvoie l'[`Effect`] à produire.
///
/// # Example
/// ```
/// use pc_core::config::ViewerConfig;
/// use pc_core::session::{Command, Effect, ViewerSession};
/// let mut session = ViewerSession::new(&ViewerConfig::default());
/// let effect = session.apply(Command::ToggleBlend);
/// assert!(session.blend());
/// assert_eq!(effect, Effect::Notice("Blend: on".into()));
/// ```
#[derive(Clone, Debug)]
pub struct ViewerSession {
    clock: PlaybackClock,
    blend: bool,
    osd: bool,
    target_fps: u32,
    fast_forward: bool,
    paused: bool,
    fast_forward_speed: f64,
}

impl ViewerSession {
    /// Session starting now, with modes taken from `config`.
    #[must_use]
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_clock(config, PlaybackClock::new())
    }

    /// Session driven by an existing clock.
    #[must_use]
    pub fn with_clock(config: &ViewerConfig, clock: PlaybackClock) -> Self {
        Self {
            clock,
            blend: config.blend,
            osd: config.osd,
            target_fps: config.target_fps.clamp(MIN_FPS, MAX_FPS),
            fast_forward: false,
            paused: false,
            fast_forward_speed: config.fast_forward_speed,
        }
    }

    /// Apply `command` at the current instant.
    pub fn apply(&mut self, command: Command) -> Effect {
        self.apply_at(command, Instant::now())
    }

    /// Apply `command` as if it happened at `instant`.
    pub fn apply_at(&mut self, command: Command, instant: Instant) -> Effect {
        match command {
            Command::ToggleBlend => {
                self.blend = !self.blend;
                Effect::Notice(format!("Blend: {}", on_off(self.blend)))
            }
            Command::ToggleOsd => {
                self.osd = !self.osd;
                Effect::Notice(format!("OSD: {}", on_off(self.osd)))
            }
            Command::AdjustFps(delta) => {
                let fps = i64::from(self.target_fps) + i64::from(delta);
                let fps = fps.clamp(i64::from(MIN_FPS), i64::from(MAX_FPS)) as u32;
                if fps == self.target_fps {
                    return Effect::None;
                }
                self.target_fps = fps;
                Effect::Notice(format!("Target FPS: {fps}"))
            }
            Command::ToggleFastForward => {
                self.fast_forward = !self.fast_forward;
                self.sync_speed(instant);
                Effect::Notice(format!("Fast forward: {}", on_off(self.fast_forward)))
            }
            Command::TogglePause => {
                self.paused = !self.paused;
                self.sync_speed(instant);
                Effect::Notice(if self.paused { "Paused" } else { "Playing" }.to_string())
            }
            Command::Scrub(delta) => {
                self.clock.scrub(delta);
                Effect::Notice(format!("Time: {}", format_time_of_day(self.clock.time_of_day_at(instant))))
            }
            Command::JumpToNow => {
                self.clock.jump_to_now_at(instant);
                Effect::Notice("Jump to now".to_string())
            }
            Command::Navigate(nav) => Effect::Navigate(nav),
        }
    }

    fn sync_speed(&mut self, instant: Instant) {
        let speed = if self.paused {
            0.0
        } else if self.fast_forward {
            self.fast_forward_speed
        } else {
            1.0
        };
        self.clock.set_speed_at(speed, instant);
        log::debug!("vitesse de lecture : {speed}");
    }

    /// Simulated time at the current instant.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Playback clock.
    #[must_use]
    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    /// Blend mode.
    #[must_use]
    pub fn blend(&self) -> bool {
        self.blend
    }

    /// OSD enabled.
    #[must_use]
    pub fn osd(&self) -> bool {
        self.osd
    }

    /// Target frame rate.
    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Fast-forward engaged.
    #[must_use]
    pub fn is_fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// Playback frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPS: f64 = 1e-6;

    fn session_at(t0: Instant) -> ViewerSession {
        ViewerSession::with_clock(&ViewerConfig::default(), PlaybackClock::starting_at(t0))
    }

    #[test]
    fn toggles_flip_flags() {
        let mut s = session_at(Instant::now());
        assert_eq!(s.apply(Command::ToggleOsd), Effect::Notice("OSD: on".into()));
        assert!(s.osd());
        s.apply(Command::ToggleBlend);
        s.apply(Command::ToggleBlend);
        assert!(!s.blend());
    }

    #[test]
    fn fps_adjustment_is_clamped() {
        let mut s = session_at(Instant::now());
        s.apply(Command::AdjustFps(1));
        assert_eq!(s.target_fps(), 61);
        s.apply(Command::AdjustFps(-1000));
        assert_eq!(s.target_fps(), MIN_FPS);
        assert_eq!(s.apply(Command::AdjustFps(-1)), Effect::None);
        s.apply(Command::AdjustFps(i32::MAX));
        assert_eq!(s.target_fps(), MAX_FPS);
    }

    #[test]
    fn fast_forward_keeps_time_continuous() {
        let t0 = Instant::now();
        let mut s = session_at(t0);
        let t1 = t0 + Duration::from_secs(2);
        let before = s.clock().now_at(t1);
        s.apply_at(Command::ToggleFastForward, t1);
        assert!(s.is_fast_forward());
        assert!((s.clock().now_at(t1) - before).abs() < EPS);
        assert!((s.clock().speed() - 10_000.0).abs() < EPS);

        s.apply_at(Command::ToggleFastForward, t1);
        assert!((s.clock().speed() - 1.0).abs() < EPS);
    }

    #[test]
    fn pause_freezes_and_resume_restores_mode() {
        let t0 = Instant::now();
        let mut s = session_at(t0);
        s.apply_at(Command::ToggleFastForward, t0);
        s.apply_at(Command::TogglePause, t0);
        assert!(s.clock().speed().abs() < EPS);
        let frozen = s.clock().now_at(t0 + Duration::from_secs(10));
        assert!(frozen.abs() < EPS);

        s.apply_at(Command::TogglePause, t0);
        assert!((s.clock().speed() - 10_000.0).abs() < EPS);
    }

    #[test]
    fn scrub_then_jump_to_now() {
        let t0 = Instant::now();
        let mut s = session_at(t0);
        let effect = s.apply_at(Command::Scrub(3_600.0), t0);
        assert_eq!(effect, Effect::Notice("Time: 01:00:00".into()));
        s.apply_at(Command::Scrub(-60.0), t0);
        assert!((s.clock().now_at(t0) - 3_540.0).abs() < EPS);

        let t1 = t0 + Duration::from_secs(1);
        s.apply_at(Command::JumpToNow, t1);
        assert!(s.clock().now_at(t1).abs() < EPS);
    }

    #[test]
    fn navigation_is_forwarded() {
        let mut s = session_at(Instant::now());
        assert_eq!(
            s.apply(Command::Navigate(Navigation::Index(3))),
            Effect::Navigate(Navigation::Index(3))
        );
    }
}
