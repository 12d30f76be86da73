use anyhow::Result;
use clap::Parser;
use pc_core::config::{ViewerConfig, load_config};
use pc_source::playlist::Playlist;

pub mod app;
pub mod cli;
pub mod keymap;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    if cli.help_hotkeys {
        print!("{}", keymap::hotkeys_text());
        return Ok(());
    }

    // 3. Valider les chemins et construire la playlist
    cli.validate_paths()?;
    let playlist = Playlist::from_paths(&cli.paths)?;
    if playlist.is_empty() {
        anyhow::bail!("No scene file found in the given paths.");
    }

    // 4. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 5. Charger la première scène (un échec est affiché dans le viewer)
    let mut app_instance = app::App::new(config, playlist);

    // 6. Initialiser le terminal ratatui
    let terminal = ratatui::init();

    // 7. Boucle principale
    let result = app_instance.run(terminal);

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    result
}

/// Charge la config ; un fichier absent donne les défauts.
fn resolve_config(cli: &cli::Cli) -> Result<ViewerConfig> {
    if cli.config.exists() {
        load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ViewerConfig::default())
    }
}
