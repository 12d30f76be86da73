use pc_core::color::Rgb;
use pc_core::palette::Palette;
use pc_core::scene::SceneDescriptor;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use crate::viewport::Viewport;

/// Demi-bloc inférieur : fg = pixel du bas, bg = pixel du haut.
pub const HALF_BLOCK: char = '▄';

#[inline]
fn term_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Taille de la zone en pixels : une cellule = 1×2 pixels.
#[inline]
#[must_use]
pub fn view_size(area: Rect) -> (u32, u32) {
    (u32::from(area.width), u32::from(area.height) * 2)
}

/// Écrit l'image indexée, colorée par `palette`, directement dans le buffer.
///
/// Chaque cellule couvre deux pixels verticaux. Les marges autour d'une
/// image plus petite que la zone sont noires.
///
/// # Example
/// ```
/// use pc_core::palette::Palette;
/// use pc_core::scene::SceneDescriptor;
/// use pc_render::canvas::render_scene;
/// use pc_render::viewport::Viewport;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let scene = SceneDescriptor::new(2, 2, Palette::default(), vec![0; 4], Vec::new()).unwrap();
/// let area = Rect::new(0, 0, 4, 2);
/// let mut buf = Buffer::empty(area);
/// render_scene(&mut buf, area, &scene, scene.palette(), &Viewport::default());
/// assert_eq!(buf[(1, 0)].symbol(), "▄");
/// ```
pub fn render_scene(
    buf: &mut Buffer,
    area: Rect,
    scene: &SceneDescriptor,
    palette: &Palette,
    viewport: &Viewport,
) {
    let placement = viewport.place((scene.width(), scene.height()), view_size(area));
    let pixel = |vx: u32, vy: u32| {
        placement
            .image_pixel(vx, vy)
            .and_then(|(x, y)| scene.index_at(x, y))
            .map_or(Rgb::BLACK, |i| palette[i])
    };

    for cy in 0..area.height {
        let top_y = u32::from(cy) * 2;
        for cx in 0..area.width {
            let vx = u32::from(cx);
            let top = pixel(vx, top_y);
            let bottom = pixel(vx, top_y + 1);
            if let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) {
                cell.set_char(HALF_BLOCK)
                    .set_fg(term_color(bottom))
                    .set_bg(term_color(top));
            }
        }
    }
}
