use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pc_core::config::ViewerConfig;
use pc_core::session::{Command, Navigation};
use pc_render::ui::Hotkey;

/// Pas de déplacement du viewport, en pixels.
const PAN_STEP: i32 = 1;
/// Pas avec Ctrl.
const PAN_STEP_FAST: i32 = 5;
/// Pas de réglage du FPS cible.
const FPS_STEP: i32 = 1;

/// Ce qu'une touche déclenche dans le viewer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Forwarded to the session.
    Session(Command),
    /// Move the viewport by `(dx, dy)` pixels.
    Pan(i32, i32),
    ToggleHelp,
    Quit,
}

/// Table des raccourcis, affichée par `?` et `--help-hotkeys`.
pub const HOTKEYS: &[Hotkey] = &[
    Hotkey { keys: "b", action: "Toggle blend mode" },
    Hotkey { keys: "o", action: "Toggle on-screen display" },
    Hotkey { keys: "+ / -", action: "Target FPS up / down" },
    Hotkey { keys: "n / p", action: "Next / previous file" },
    Hotkey { keys: "1 .. 9", action: "Open file by index" },
    Hotkey { keys: "0", action: "Open last file" },
    Hotkey { keys: "w", action: "Toggle fast forward" },
    Hotkey { keys: "Space", action: "Pause / resume" },
    Hotkey { keys: "a / d", action: "Time back / forward 5 min" },
    Hotkey { keys: "A / D", action: "Time back / forward 1 min" },
    Hotkey { keys: "s", action: "Jump to current time" },
    Hotkey { keys: "Arrows", action: "Pan (Ctrl: 5 pixels)" },
    Hotkey { keys: "?", action: "Toggle help" },
    Hotkey { keys: "q / Esc", action: "Quit" },
];

/// Texte de `--help-hotkeys`.
#[must_use]
pub fn hotkeys_text() -> String {
    let mut text = String::from("Hotkeys\n=======\n");
    for hotkey in HOTKEYS {
        text.push_str(&format!("{:<10} {}\n", hotkey.keys, hotkey.action));
    }
    text
}

/// Traduit une touche en action. Les relâchements et touches inconnues
/// donnent `None`.
///
/// Les pas de déplacement temporel viennent de `config`.
#[must_use]
pub fn map_key(key: KeyEvent, config: &ViewerConfig) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let pan = if key.modifiers.contains(KeyModifiers::CONTROL) {
        PAN_STEP_FAST
    } else {
        PAN_STEP
    };
    let session = |command| Some(Action::Session(command));
    let navigate = |nav| Some(Action::Session(Command::Navigate(nav)));

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('b') => session(Command::ToggleBlend),
        KeyCode::Char('o') => session(Command::ToggleOsd),
        KeyCode::Char('+' | '=') => session(Command::AdjustFps(FPS_STEP)),
        KeyCode::Char('-') => session(Command::AdjustFps(-FPS_STEP)),
        KeyCode::Char('w') => session(Command::ToggleFastForward),
        KeyCode::Char(' ') => session(Command::TogglePause),
        KeyCode::Char('a') => session(Command::Scrub(-config.scrub_step_secs)),
        KeyCode::Char('d') => session(Command::Scrub(config.scrub_step_secs)),
        KeyCode::Char('A') => session(Command::Scrub(-config.fine_scrub_step_secs)),
        KeyCode::Char('D') => session(Command::Scrub(config.fine_scrub_step_secs)),
        KeyCode::Char('s') => session(Command::JumpToNow),
        KeyCode::Char('n') => navigate(Navigation::Next),
        KeyCode::Char('p') => navigate(Navigation::Previous),
        KeyCode::Char('0') => navigate(Navigation::Last),
        KeyCode::Char(c @ '1'..='9') => navigate(Navigation::Index(usize::from(c as u8 - b'1'))),
        KeyCode::Left => Some(Action::Pan(-pan, 0)),
        KeyCode::Right => Some(Action::Pan(pan, 0)),
        KeyCode::Up => Some(Action::Pan(0, -pan)),
        KeyCode::Down => Some(Action::Pan(0, pan)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_select_files() {
        let config = ViewerConfig::default();
        assert_eq!(
            map_key(press(KeyCode::Char('1')), &config),
            Some(Action::Session(Command::Navigate(Navigation::Index(0))))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('9')), &config),
            Some(Action::Session(Command::Navigate(Navigation::Index(8))))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('0')), &config),
            Some(Action::Session(Command::Navigate(Navigation::Last)))
        );
    }

    #[test]
    fn scrub_steps_come_from_config() {
        let config = ViewerConfig { scrub_step_secs: 120.0, ..ViewerConfig::default() };
        assert_eq!(
            map_key(press(KeyCode::Char('a')), &config),
            Some(Action::Session(Command::Scrub(-120.0)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D')), &config),
            Some(Action::Session(Command::Scrub(60.0)))
        );
    }

    #[test]
    fn ctrl_arrows_pan_faster() {
        let config = ViewerConfig::default();
        assert_eq!(map_key(press(KeyCode::Left), &config), Some(Action::Pan(-1, 0)));
        let fast = KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL);
        assert_eq!(map_key(fast, &config), Some(Action::Pan(0, 5)));
    }

    #[test]
    fn releases_and_unknown_keys_are_ignored() {
        let config = ViewerConfig::default();
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release, &config), None);
        assert_eq!(map_key(press(KeyCode::Char('z')), &config), None);
        assert_eq!(map_key(press(KeyCode::Esc), &config), Some(Action::Quit));
    }

    #[test]
    fn hotkey_text_lists_every_binding() {
        let text = hotkeys_text();
        assert_eq!(text.lines().count(), HOTKEYS.len() + 2);
        assert!(text.contains("Toggle fast forward"));
    }
}
