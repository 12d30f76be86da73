use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use pc_core::config::ViewerConfig;
use pc_core::palette::Palette;
use pc_core::scene::Scene;
use pc_core::session::{Effect, Navigation, ViewerSession};
use pc_render::canvas::view_size;
use pc_render::fps::{FrameStats, frame_budget};
use pc_render::ui::{self, DrawContext, canvas_area};
use pc_render::viewport::Viewport;
use pc_source::loader::load_scene;
use pc_source::playlist::Playlist;
use ratatui::DefaultTerminal;

use crate::keymap::{self, Action, HOTKEYS};

/// Message OSD avec son échéance.
struct Notice {
    text: String,
    until: Instant,
}

/// Application state : session de lecture, scène courante, affichage.
pub struct App {
    config: ViewerConfig,
    session: ViewerSession,
    playlist: Playlist,
    /// Scène affichée, `None` si le dernier chargement a échoué.
    scene: Option<Scene>,
    /// Erreur du dernier chargement, affichée à la place de la scène.
    error: Option<String>,
    viewport: Viewport,
    /// Taille de la zone image en pixels, mise à jour à chaque frame.
    view: (u32, u32),
    stats: FrameStats,
    notice: Option<Notice>,
    /// Palette noire utilisée tant qu'aucune scène n'est chargée.
    blank: Palette,
    show_help: bool,
    quitting: bool,
}

impl App {
    /// Build the viewer and load the first scene of `playlist`.
    #[must_use]
    pub fn new(config: ViewerConfig, playlist: Playlist) -> Self {
        let mut app = Self {
            session: ViewerSession::new(&config),
            stats: FrameStats::new(config.target_fps as usize),
            config,
            playlist,
            scene: None,
            error: None,
            viewport: Viewport::default(),
            view: (0, 0),
            notice: None,
            blank: Palette::default(),
            show_help: false,
            quitting: false,
        };
        app.load_current();
        app
    }

    /// Boucle principale : cadence, événements, palette, rendu.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            if self.quitting {
                break;
            }

            // === Calcul du frame timing ===
            let frame_duration = frame_budget(self.session.target_fps());
            let now = Instant::now();
            let elapsed = now - last_frame;

            if elapsed < frame_duration {
                // Dormir le temps restant, mais rester réactif aux événements
                let remaining = frame_duration.saturating_sub(elapsed);
                if event::poll(remaining)? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_frame = now;

            // === Polling événements non-bloquant ===
            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }
            if self.quitting {
                break;
            }

            self.render(&mut terminal)?;
            self.stats.tick();
        }
        Ok(())
    }

    /// Recalcule la palette pour l'instant courant puis dessine.
    fn render(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let t = self.session.now();
        let blend = self.session.blend();
        if let Some(scene) = self.scene.as_mut() {
            scene.palette_at(t, blend);
        }

        let instant = Instant::now();
        let Self {
            session,
            playlist,
            scene,
            error,
            viewport,
            view,
            stats,
            notice,
            blank,
            show_help,
            ..
        } = self;
        let descriptor = scene.as_ref().map(|s| &**s.descriptor());
        let palette = scene.as_ref().map_or(&*blank, Scene::current_palette);
        let notice = notice
            .as_ref()
            .filter(|n| instant < n.until)
            .map(|n| n.text.as_str());

        terminal.draw(|frame| {
            *view = view_size(canvas_area(frame.area(), session.osd()));
            if let Some(d) = descriptor {
                viewport.clamp((d.width(), d.height()), *view);
            }
            let ctx = DrawContext {
                scene: descriptor,
                palette,
                viewport,
                session,
                stats,
                position: (playlist.index(), playlist.len()),
                notice,
                error: error.as_deref(),
                show_help: *show_help,
                hotkeys: HOTKEYS,
            };
            ui::draw(frame, &ctx);
        })?;
        Ok(())
    }

    /// Handle a terminal event. Seuls les appuis de touches comptent.
    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = *event {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help && key.kind == KeyEventKind::Press && key.code == KeyCode::Esc {
            self.show_help = false;
            return;
        }
        if let Some(action) = keymap::map_key(key, &self.config) {
            self.handle_action(action);
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quitting = true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Pan(dx, dy) => {
                if let Some(scene) = &self.scene {
                    let d = scene.descriptor();
                    self.viewport.pan(dx, dy, (d.width(), d.height()), self.view);
                }
            }
            Action::Session(command) => match self.session.apply(command) {
                Effect::None => {}
                Effect::Notice(text) => self.notify(text),
                Effect::Navigate(nav) => self.navigate(nav),
            },
        }
    }

    fn navigate(&mut self, nav: Navigation) {
        if self.playlist.navigate(nav).is_some() {
            self.load_current();
        } else {
            self.notify(format!("Only {} files opened", self.playlist.len()));
        }
    }

    /// Charge l'entrée courante de la playlist. Un échec est journalisé et
    /// affiché ; la session continue.
    fn load_current(&mut self) {
        let Some(path) = self.playlist.current() else {
            self.scene = None;
            self.error = Some("Playlist is empty".to_string());
            return;
        };
        match load_scene(path, &self.config.formats) {
            Ok(descriptor) => {
                let label = descriptor.name().unwrap_or_default().to_string();
                self.scene = Some(Scene::new(descriptor));
                self.error = None;
                self.viewport = Viewport::default();
                self.notify(label);
            }
            Err(e) => {
                log::error!("{e:#}");
                self.scene = None;
                self.error = Some(format!("{e:#}"));
            }
        }
    }

    fn notify(&mut self, text: String) {
        let until = Instant::now() + Duration::from_secs_f64(self.config.osd_duration_secs);
        self.notice = Some(Notice { text, until });
    }
}
