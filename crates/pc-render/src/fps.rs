use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Durée d'une frame pour une cadence cible (au moins 1 fps).
///
/// # Example
/// ```
/// use pc_render::fps::frame_budget;
/// use std::time::Duration;
/// assert_eq!(frame_budget(50), Duration::from_millis(20));
/// assert_eq!(frame_budget(0), Duration::from_secs(1));
/// ```
#[must_use]
pub fn frame_budget(target_fps: u32) -> Duration {
    Duration::from_secs(1) / target_fps.max(1)
}

/// Statistiques de cadence : intervalles entre frames sur une fenêtre glissante.
///
/// La somme des intervalles est tenue à jour à chaque frame ; la cadence
/// et le temps moyen par frame en découlent sans reparcourir la fenêtre.
///
/// # Example
/// ```
/// use pc_render::fps::FrameStats;
/// let mut stats = FrameStats::new(60);
/// stats.tick();
/// assert!(stats.fps() >= 0.0);
/// ```
pub struct FrameStats {
    intervals: VecDeque<Duration>,
    window: usize,
    total: Duration,
    last: Option<Instant>,
}

impl FrameStats {
    /// Average over the last `window` intervals (at least 1).
    #[must_use]
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            intervals: VecDeque::with_capacity(window + 1),
            window,
            total: Duration::ZERO,
            last: None,
        }
    }

    /// Appeler une fois par frame, APRÈS le rendu.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// [`FrameStats::tick`] with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) {
        if let Some(last) = self.last.replace(now) {
            let dt = now.saturating_duration_since(last);
            self.intervals.push_back(dt);
            self.total += dt;
            if self.intervals.len() > self.window
                && let Some(old) = self.intervals.pop_front()
            {
                self.total = self.total.saturating_sub(old);
            }
        }
    }

    /// Temps moyen d'une frame en millisecondes, 0 avant le deuxième tick.
    #[must_use]
    pub fn frame_time_ms(&self) -> f64 {
        if self.intervals.is_empty() {
            return 0.0;
        }
        self.total.as_secs_f64() * 1000.0 / self.intervals.len() as f64
    }

    /// FPS moyen sur la fenêtre.
    #[must_use]
    pub fn fps(&self) -> f64 {
        let secs = self.total.as_secs_f64();
        if secs > 0.0 { self.intervals.len() as f64 / secs } else { 0.0 }
    }
}
