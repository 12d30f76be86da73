use std::time::Instant;

use chrono::Timelike;

/// Seconds in one day, the period of [`PlaybackClock::time_of_day`].
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Horloge de lecture : temps simulé = temps réel × vitesse + décalage.
///
/// `now()` vaut `elapsed(base_time) * speed + epoch_offset`. Chaque
/// opération qui touche la vitesse replie d'abord le temps écoulé dans
/// `epoch_offset` : le temps apparent ne saute jamais.
///
/// L'heure du jour affichée part de l'heure locale au démarrage
/// (`day_origin`) et suit ensuite le temps simulé.
///
/// Chaque méthode dépendante du temps réel a une variante `*_at(Instant)`
/// pour piloter l'horloge de façon déterministe.
///
/// # Example
/// ```
/// use pc_core::clock::PlaybackClock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut clock = PlaybackClock::starting_at(start);
/// clock.scrub(60.0);
/// let later = start + Duration::from_secs(2);
/// assert!((clock.now_at(later) - 62.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    base_time: Instant,
    epoch_offset: f64,
    speed: f64,
    /// Local seconds since midnight at `origin_instant`.
    day_origin: f64,
    origin_instant: Instant,
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackClock {
    /// Horloge démarrant maintenant, vitesse 1×, sans décalage, calée sur
    /// l'heure locale.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now()).with_day_origin(local_seconds_of_day())
    }

    /// Clock whose base time is `base_time`.
    #[must_use]
    pub fn starting_at(base_time: Instant) -> Self {
        Self {
            base_time,
            epoch_offset: 0.0,
            speed: 1.0,
            day_origin: 0.0,
            origin_instant: base_time,
        }
    }

    /// Set the time of day shown at the base time, in seconds since midnight.
    #[must_use]
    pub fn with_day_origin(mut self, secs: f64) -> Self {
        self.day_origin = secs.rem_euclid(SECONDS_PER_DAY);
        self.origin_instant = self.base_time;
        self
    }

    /// Simulated seconds at the current instant.
    #[inline]
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now_at(Instant::now())
    }

    /// Simulated seconds at `instant`. Instants before `base_time` count as zero elapsed.
    #[inline]
    #[must_use]
    pub fn now_at(&self, instant: Instant) -> f64 {
        let elapsed = instant.saturating_duration_since(self.base_time).as_secs_f64();
        elapsed * self.speed + self.epoch_offset
    }

    /// Reset to the live position: offset cleared, base time moved to now.
    pub fn jump_to_now(&mut self) {
        self.jump_to_now_at(Instant::now());
    }

    /// [`PlaybackClock::jump_to_now`] with an explicit instant. The speed is kept.
    ///
    /// L'heure du jour revient à l'heure murale : l'origine avance du temps
    /// réel écoulé depuis sa dernière capture.
    pub fn jump_to_now_at(&mut self, instant: Instant) {
        let real = instant.saturating_duration_since(self.origin_instant).as_secs_f64();
        self.day_origin = (self.day_origin + real).rem_euclid(SECONDS_PER_DAY);
        self.origin_instant = instant;
        self.epoch_offset = 0.0;
        self.base_time = instant;
    }

    /// Décale le temps simulé de `delta_secs` (négatif = retour arrière).
    ///
    /// Ne touche pas `base_time` : marche aussi en pause.
    pub fn scrub(&mut self, delta_secs: f64) {
        self.epoch_offset += delta_secs;
    }

    /// Change the speed multiplier without moving the apparent position.
    pub fn set_speed(&mut self, speed: f64) {
        self.set_speed_at(speed, Instant::now());
    }

    /// [`PlaybackClock::set_speed`] with an explicit instant.
    pub fn set_speed_at(&mut self, speed: f64, instant: Instant) {
        self.epoch_offset = self.now_at(instant);
        self.base_time = instant;
        self.speed = speed;
    }

    /// Current speed multiplier (0 means frozen).
    #[inline]
    #[must_use]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Accumulated manual offset in seconds.
    #[inline]
    #[must_use]
    pub fn epoch_offset(&self) -> f64 {
        self.epoch_offset
    }

    /// Time of day in `[0, 86400)`: day origin plus simulated time.
    #[must_use]
    pub fn time_of_day(&self) -> f64 {
        self.time_of_day_at(Instant::now())
    }

    /// [`PlaybackClock::time_of_day`] with an explicit instant.
    #[must_use]
    pub fn time_of_day_at(&self, instant: Instant) -> f64 {
        (self.day_origin + self.now_at(instant)).rem_euclid(SECONDS_PER_DAY)
    }
}

/// Secondes écoulées depuis minuit, heure locale.
fn local_seconds_of_day() -> f64 {
    let now = chrono::Local::now();
    f64::from(now.num_seconds_from_midnight()) + f64::from(now.nanosecond() % 1_000_000_000) / 1e9
}

/// Formate des secondes du jour en `HH:MM:SS`.
///
/// # Example
/// ```
/// use pc_core::clock::format_time_of_day;
/// assert_eq!(format_time_of_day(3_723.9), "01:02:03");
/// assert_eq!(format_time_of_day(-1.0), "23:59:59");
/// ```
#[must_use]
pub fn format_time_of_day(secs: f64) -> String {
    let total = secs.rem_euclid(SECONDS_PER_DAY).floor() as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}
