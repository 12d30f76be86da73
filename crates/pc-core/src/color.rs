use std::fmt;

/// Couleur RGB 8 bits par canal, sans alpha.
///
/// # Example
/// ```
/// use pc_core::color::Rgb;
/// let c = Rgb::new(255, 128, 0);
/// assert_eq!(c.to_string(), "#FF8000");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black, the fill color for palette slots a file leaves undefined.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Build a color from its three channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolation linéaire canal par canal, arrondie à l'entier le plus proche.
    ///
    /// `t = 0.0` rend `self` exactement, `t = 1.0` rend `other` exactement.
    ///
    /// # Example
    /// ```
    /// use pc_core::color::Rgb;
    /// let red = Rgb::new(255, 0, 0);
    /// let green = Rgb::new(0, 255, 0);
    /// assert_eq!(red.lerp(green, 0.0), red);
    /// assert_eq!(red.lerp(green, 1.0), green);
    /// assert_eq!(red.lerp(green, 0.5), Rgb::new(128, 128, 0));
    /// ```
    #[inline]
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let inv = 1.0 - t;
        let mix = |a: u8, b: u8| (f64::from(a) * inv + f64::from(b) * t).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
