/// Fenêtre de visualisation sur une image plus grande que le terminal.
///
/// `x`/`y` sont l'origine (en pixels image) de la zone visible. Une image
/// plus petite que la zone est centrée et l'origine reste à 0.
///
/// # Example
/// ```
/// use pc_render::viewport::Viewport;
/// let mut vp = Viewport::default();
/// vp.pan(10, -3, (100, 50), (40, 20));
/// assert_eq!((vp.x, vp.y), (10, 0));
/// vp.pan(500, 500, (100, 50), (40, 20));
/// assert_eq!((vp.x, vp.y), (60, 30));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Left edge in image pixels.
    pub x: u32,
    /// Top edge in image pixels.
    pub y: u32,
}

/// Where the image lands on screen, in pixel units of the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// View column where image column `src_x` is drawn.
    pub screen_x: u32,
    /// View row where image row `src_y` is drawn.
    pub screen_y: u32,
    /// First visible image column.
    pub src_x: u32,
    /// First visible image row.
    pub src_y: u32,
    /// Visible width in pixels.
    pub width: u32,
    /// Visible height in pixels.
    pub height: u32,
}

impl Placement {
    /// Image pixel shown at view position `(vx, vy)`, `None` on the margins.
    #[inline]
    #[must_use]
    pub fn image_pixel(&self, vx: u32, vy: u32) -> Option<(u32, u32)> {
        let dx = vx.checked_sub(self.screen_x)?;
        let dy = vy.checked_sub(self.screen_y)?;
        (dx < self.width && dy < self.height).then_some((self.src_x + dx, self.src_y + dy))
    }
}

fn axis(offset: u32, image: u32, view: u32) -> (u32, u32, u32) {
    if image <= view {
        ((view - image) / 2, 0, image)
    } else {
        (0, offset.min(image - view), view)
    }
}

impl Viewport {
    /// Déplace la fenêtre de `(dx, dy)` pixels, bornée à l'image.
    pub fn pan(&mut self, dx: i32, dy: i32, image: (u32, u32), view: (u32, u32)) {
        let shift = |pos: u32, delta: i32, image: u32, view: u32| {
            let max = image.saturating_sub(view);
            pos.saturating_add_signed(delta).min(max)
        };
        self.x = shift(self.x, dx, image.0, view.0);
        self.y = shift(self.y, dy, image.1, view.1);
    }

    /// Re-clamp after the image or the terminal changed size.
    pub fn clamp(&mut self, image: (u32, u32), view: (u32, u32)) {
        self.pan(0, 0, image, view);
    }

    /// Compute where an `image`-sized picture lands in a `view`-sized area.
    #[must_use]
    pub fn place(&self, image: (u32, u32), view: (u32, u32)) -> Placement {
        let (screen_x, src_x, width) = axis(self.x, image.0, view.0);
        let (screen_y, src_y, height) = axis(self.y, image.1, view.1);
        Placement {
            screen_x,
            screen_y,
            src_x,
            src_y,
            width,
            height,
        }
    }
}
