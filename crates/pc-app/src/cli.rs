use std::path::PathBuf;

use clap::Parser;
use pc_core::config::ViewerConfig;

/// palcycle: palette-cycling animation viewer for the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Scènes à afficher : fichiers JSON / IFF (LBM) ou dossiers.
    pub paths: Vec<PathBuf>,

    /// FPS cible (1 à 240).
    #[arg(short, long)]
    pub fps: Option<u32>,

    /// Activer l'interpolation entre deux pas de rotation.
    #[arg(short, long, default_value_t = false)]
    pub blend: bool,

    /// Activer l'affichage à l'écran (ligne d'état et notifications).
    #[arg(short, long, default_value_t = false)]
    pub osd: bool,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Afficher la liste des raccourcis clavier et quitter.
    #[arg(long, default_value_t = false)]
    pub help_hotkeys: bool,
}

impl Cli {
    /// Applique les overrides de la ligne de commande sur la config chargée.
    ///
    /// Les flags booléens ne font qu'activer : absents, la valeur du fichier
    /// est conservée.
    pub fn apply_overrides(&self, config: &mut ViewerConfig) {
        if let Some(fps) = self.fps {
            config.target_fps = fps;
        }
        if self.blend {
            config.blend = true;
        }
        if self.osd {
            config.osd = true;
        }
        config.clamp_all();
    }

    /// Validate that there is something to show.
    ///
    /// # Errors
    /// Returns an error when no scene path was given.
    pub fn validate_paths(&self) -> anyhow::Result<()> {
        if self.paths.is_empty() {
            anyhow::bail!("No scene given. Pass one or more scene files or directories.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_touch_given_flags() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["palcycle", "--fps", "500", "-b", "scene.lbm"])?;
        let mut config = ViewerConfig { osd: true, ..ViewerConfig::default() };
        cli.apply_overrides(&mut config);
        assert_eq!(config.target_fps, 240);
        assert!(config.blend);
        assert!(config.osd);
        assert_eq!(cli.paths, vec![PathBuf::from("scene.lbm")]);
        Ok(())
    }

    #[test]
    fn defaults_and_empty_paths() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["palcycle"])?;
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
        assert_eq!(cli.log_level, "warn");
        assert!(cli.validate_paths().is_err());
        Ok(())
    }
}
