use pc_core::clock::format_time_of_day;
use pc_core::palette::Palette;
use pc_core::scene::SceneDescriptor;
use pc_core::session::ViewerSession;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::canvas;
use crate::fps::FrameStats;
use crate::viewport::Viewport;

/// Une ligne de l'aide : touches et effet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hotkey {
    /// Key label as shown to the user.
    pub keys: &'static str,
    /// What the key does.
    pub action: &'static str,
}

/// Tout ce qu'il faut pour dessiner une frame.
pub struct DrawContext<'a> {
    /// Scene on screen, `None` while nothing could be loaded.
    pub scene: Option<&'a SceneDescriptor>,
    /// Palette computed for this frame.
    pub palette: &'a Palette,
    pub viewport: &'a Viewport,
    pub session: &'a ViewerSession,
    pub stats: &'a FrameStats,
    /// Position in the playlist and its length.
    pub position: (usize, usize),
    /// Transient OSD message.
    pub notice: Option<&'a str>,
    /// Last load failure, shown in place of the scene.
    pub error: Option<&'a str>,
    pub show_help: bool,
    pub hotkeys: &'a [Hotkey],
}

/// Zone réservée à l'image : tout l'écran, moins la ligne d'état si l'OSD est actif.
#[must_use]
pub fn canvas_area(area: Rect, osd: bool) -> Rect {
    if osd && area.height > 1 {
        Rect { height: area.height - 1, ..area }
    } else {
        area
    }
}

/// Draw the full UI: scene, status line, notice, error and help.
pub fn draw(frame: &mut Frame, ctx: &DrawContext<'_>) {
    let area = frame.area();
    let osd = ctx.session.osd();
    let [scene_area, status_area] = if osd && area.height > 1 {
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area)
    } else {
        [area, Rect::default()]
    };

    // === Scène ===
    match (ctx.scene, ctx.error) {
        (_, Some(message)) => draw_error(frame, scene_area, message),
        (Some(scene), None) => {
            canvas::render_scene(frame.buffer_mut(), scene_area, scene, ctx.palette, ctx.viewport);
        }
        (None, None) => draw_error(frame, scene_area, "No scene loaded"),
    }

    // === OSD ===
    if osd {
        let status = Paragraph::new(status_text(ctx))
            .style(Style::default().bg(Color::Black).fg(Color::Gray));
        frame.render_widget(status, status_area);
        if let Some(notice) = ctx.notice {
            draw_notice(frame, scene_area, notice);
        }
    }

    if ctx.show_help {
        draw_help_overlay(frame, area, ctx.hotkeys);
    }
}

/// Texte de la ligne d'état.
#[must_use]
pub fn status_text(ctx: &DrawContext<'_>) -> String {
    let session = ctx.session;
    let name = ctx.scene.and_then(SceneDescriptor::name).unwrap_or("-");
    let (index, len) = ctx.position;
    let speed = if session.is_paused() {
        "paused".to_string()
    } else {
        format!("x{:.0}", session.clock().speed())
    };
    format!(
        " {name} [{}/{len}] | {} | {speed} | blend {} | {:.0}/{} fps {:.1} ms",
        index + 1,
        format_time_of_day(session.clock().time_of_day()),
        if session.blend() { "on" } else { "off" },
        ctx.stats.fps(),
        session.target_fps(),
        ctx.stats.frame_time_ms(),
    )
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_notice(frame: &mut Frame, area: Rect, notice: &str) {
    let width = u16::try_from(notice.chars().count()).unwrap_or(u16::MAX).saturating_add(4);
    let rect = Rect {
        y: area.y + area.height.min(1),
        ..centered(area, width, 3)
    };
    let widget = Paragraph::new(notice).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black).fg(Color::White)),
    );
    frame.render_widget(Clear, rect);
    frame.render_widget(widget, rect);
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let width = area.width.saturating_sub(4).min(72);
    let rect = centered(area, width, 7);
    let widget = Paragraph::new(message).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Error ")
            .style(Style::default().bg(Color::Black).fg(Color::Red)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(widget, rect);
}

/// Draw the help overlay listing every key binding.
fn draw_help_overlay(frame: &mut Frame, area: Rect, hotkeys: &[Hotkey]) {
    let mut help_text = vec![
        Line::from(Span::styled(" palcycle: Controls ", Style::default().fg(Color::Yellow))),
        Line::from(""),
    ];
    help_text.extend(
        hotkeys
            .iter()
            .map(|h| Line::from(format!(" {:<10} {}", h.keys, h.action))),
    );
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press ? or Esc to close ",
        Style::default().fg(Color::DarkGray),
    )));

    let help_height = u16::try_from(help_text.len()).unwrap_or(u16::MAX).saturating_add(2);
    let help_area = centered(area, 44, help_height);

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(Color::Black).fg(Color::White)),
    );

    frame.render_widget(Clear, help_area);
    frame.render_widget(help, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::config::ViewerConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use std::time::{Duration, Instant};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const KEYS: &[Hotkey] = &[Hotkey { keys: "q", action: "Quit" }];

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn render(ctx: &DrawContext<'_>, width: u16, height: u16) -> Result<Buffer, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|frame| draw(frame, ctx))?;
        Ok(terminal.backend().buffer().clone())
    }

    #[test]
    fn status_line_reports_scene_and_modes() -> TestResult {
        let config = ViewerConfig { osd: true, blend: true, ..ViewerConfig::default() };
        let session = ViewerSession::new(&config);
        let scene = SceneDescriptor::new(1, 1, Palette::default(), vec![0], Vec::new())?.with_name("lake");
        let mut stats = FrameStats::new(10);
        let start = Instant::now();
        for i in 0..5u64 {
            stats.tick_at(start + Duration::from_millis(i * 25));
        }
        let ctx = DrawContext {
            scene: Some(&scene),
            palette: scene.palette(),
            viewport: &Viewport::default(),
            session: &session,
            stats: &stats,
            position: (1, 3),
            notice: None,
            error: None,
            show_help: false,
            hotkeys: KEYS,
        };
        let text = status_text(&ctx);
        assert!(text.starts_with(" lake [2/3] |"), "{text}");
        assert!(text.ends_with("| x1 | blend on | 40/60 fps 25.0 ms"), "{text}");

        let buf = render(&ctx, 60, 4)?;
        assert!(row(&buf, 3).contains("lake [2/3]"));
        assert_eq!(buf[(0, 0)].symbol(), "▄");
        Ok(())
    }

    #[test]
    fn errors_replace_the_scene_and_osd_off_hides_status() -> TestResult {
        let config = ViewerConfig { osd: false, ..ViewerConfig::default() };
        let session = ViewerSession::new(&config);
        let stats = FrameStats::new(10);
        let palette = Palette::default();
        let ctx = DrawContext {
            scene: None,
            palette: &palette,
            viewport: &Viewport::default(),
            session: &session,
            stats: &stats,
            position: (0, 1),
            notice: Some("ignored"),
            error: Some("broken.lbm: truncated"),
            show_help: false,
            hotkeys: KEYS,
        };
        let buf = render(&ctx, 40, 10)?;
        let screen: String = (0..10).map(|y| row(&buf, y)).collect();
        assert!(screen.contains("Error"));
        assert!(screen.contains("broken.lbm"));
        assert!(!screen.contains("ignored"));
        Ok(())
    }

    #[test]
    fn help_lists_hotkeys() -> TestResult {
        let session = ViewerSession::new(&ViewerConfig::default());
        let stats = FrameStats::new(10);
        let palette = Palette::default();
        let scene = SceneDescriptor::new(1, 1, Palette::default(), vec![0], Vec::new())?;
        let ctx = DrawContext {
            scene: Some(&scene),
            palette: &palette,
            viewport: &Viewport::default(),
            session: &session,
            stats: &stats,
            position: (0, 1),
            notice: None,
            error: None,
            show_help: true,
            hotkeys: KEYS,
        };
        let buf = render(&ctx, 50, 12)?;
        let screen: String = (0..12).map(|y| row(&buf, y)).collect();
        assert!(screen.contains("Quit"));
        assert!(screen.contains("Help"));
        Ok(())
    }

    #[test]
    fn canvas_area_drops_the_status_row() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(canvas_area(area, true).height, 23);
        assert_eq!(canvas_area(area, false), area);
    }
}
