use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Diviseur historique des vitesses de cycle (outils DPaint / Canvas Cycle).
pub const LBM_CYCLE_RATE_DIVISOR: f64 = 280.0;

/// Bornes de la cadence cible.
pub const MIN_FPS: u32 = 1;
/// Upper bound of the target frame rate.
pub const MAX_FPS: u32 = 240;

/// Configuration complète du viewer.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use pc_core::config::ViewerConfig;
/// let config = ViewerConfig::default();
/// assert_eq!(config.target_fps, 60);
/// assert!(!config.blend);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ViewerConfig {
    // === Affichage ===
    /// Cadence cible en images par seconde, [1, 240].
    pub target_fps: u32,
    /// Interpolation entre deux pas de rotation.
    pub blend: bool,
    /// Afficher les notifications à l'écran.
    pub osd: bool,
    /// Durée d'affichage d'une notification, en secondes.
    pub osd_duration_secs: f64,

    // === Lecture ===
    /// Multiplicateur appliqué en avance rapide.
    pub fast_forward_speed: f64,
    /// Pas de déplacement temporel (touches a/d), en secondes.
    pub scrub_step_secs: f64,
    /// Pas fin (touches A/D), en secondes.
    pub fine_scrub_step_secs: f64,

    // === Formats ===
    /// Rate scaling per source format.
    pub formats: FormatConfig,
}

/// Conversion des vitesses brutes des fichiers en pas par seconde.
///
/// La vitesse d'une plage vaut `valeur_brute / diviseur`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct FormatConfig {
    /// Divisor for `CRNG` rates in IFF files.
    pub ilbm_rate_divisor: f64,
    /// Divisor for `rate` fields in JSON scenes.
    pub json_rate_divisor: f64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            ilbm_rate_divisor: LBM_CYCLE_RATE_DIVISOR,
            json_rate_divisor: LBM_CYCLE_RATE_DIVISOR,
        }
    }
}

impl FormatConfig {
    /// Replace non-positive or non-finite divisors with the default.
    pub fn sanitize(&mut self) {
        for (name, divisor) in [
            ("ilbm_rate_divisor", &mut self.ilbm_rate_divisor),
            ("json_rate_divisor", &mut self.json_rate_divisor),
        ] {
            if !divisor.is_finite() || *divisor <= 0.0 {
                log::warn!("{name} = {divisor} invalide, remplacé par {LBM_CYCLE_RATE_DIVISOR}");
                *divisor = LBM_CYCLE_RATE_DIVISOR;
            }
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            blend: false,
            osd: false,
            osd_duration_secs: 3.0,
            fast_forward_speed: 10_000.0,
            scrub_step_secs: 300.0,
            fine_scrub_step_secs: 60.0,
            formats: FormatConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        let fps = self.target_fps.clamp(MIN_FPS, MAX_FPS);
        if fps != self.target_fps {
            log::warn!("target_fps = {} hors limites, ramené à {fps}", self.target_fps);
            self.target_fps = fps;
        }
        self.osd_duration_secs = finite_or(self.osd_duration_secs, 3.0).clamp(0.1, 60.0);
        self.fast_forward_speed = finite_or(self.fast_forward_speed, 10_000.0).clamp(1.0, 1_000_000.0);
        self.scrub_step_secs = finite_or(self.scrub_step_secs, 300.0).clamp(0.0, 86_400.0);
        self.fine_scrub_step_secs = finite_or(self.fine_scrub_step_secs, 60.0).clamp(0.0, 86_400.0);
        self.formats.sanitize();
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    viewer: Option<ViewerSection>,
    playback: Option<PlaybackSection>,
    formats: Option<FormatsSection>,
}

/// `[viewer]` section, all fields optional for partial override.
#[derive(Deserialize)]
struct ViewerSection {
    target_fps: Option<u32>,
    blend: Option<bool>,
    osd: Option<bool>,
    osd_duration_secs: Option<f64>,
}

/// `[playback]` section.
#[derive(Deserialize)]
struct PlaybackSection {
    fast_forward_speed: Option<f64>,
    scrub_step_secs: Option<f64>,
    fine_scrub_step_secs: Option<f64>,
}

/// `[formats]` section.
#[derive(Deserialize)]
struct FormatsSection {
    ilbm_rate_divisor: Option<f64>,
    json_rate_divisor: Option<f64>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use pc_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ViewerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it onto the defaults.
///
/// # Errors
/// Returns an error if `content` is not valid TOML or a field has the wrong type.
///
/// # Example
/// ```
/// use pc_core::config::parse_config;
/// let config = parse_config("[viewer]\nblend = true\n").unwrap();
/// assert!(config.blend);
/// assert_eq!(config.target_fps, 60);
/// ```
pub fn parse_config(content: &str) -> Result<ViewerConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = ViewerConfig::default();

    if let Some(v) = file.viewer {
        if let Some(x) = v.target_fps {
            config.target_fps = x;
        }
        if let Some(x) = v.blend {
            config.blend = x;
        }
        if let Some(x) = v.osd {
            config.osd = x;
        }
        if let Some(x) = v.osd_duration_secs {
            config.osd_duration_secs = x;
        }
    }

    if let Some(p) = file.playback {
        if let Some(x) = p.fast_forward_speed {
            config.fast_forward_speed = x;
        }
        if let Some(x) = p.scrub_step_secs {
            config.scrub_step_secs = x;
        }
        if let Some(x) = p.fine_scrub_step_secs {
            config.fine_scrub_step_secs = x;
        }
    }

    if let Some(f) = file.formats {
        if let Some(x) = f.ilbm_rate_divisor {
            config.formats.ilbm_rate_divisor = x;
        }
        if let Some(x) = f.json_rate_divisor {
            config.formats.json_rate_divisor = x;
        }
    }

    config.clamp_all();
    Ok(config)
}
