use std::ops::{Index, IndexMut};

use crate::color::Rgb;

/// Number of slots in an indexed palette.
pub const PALETTE_SIZE: usize = 256;

/// Palette indexée de 256 couleurs.
///
/// Sert à la fois de palette initiale d'une scène et de palette calculée
/// (recalculée à chaque frame par le compositor).
///
/// # Example
/// ```
/// use pc_core::color::Rgb;
/// use pc_core::palette::Palette;
/// let p = Palette::from_colors(&[Rgb::new(255, 0, 0)]);
/// assert_eq!(p[0], Rgb::new(255, 0, 0));
/// assert_eq!(p[1], Rgb::BLACK);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Palette([Rgb; PALETTE_SIZE]);

impl Default for Palette {
    fn default() -> Self {
        Self([Rgb::BLACK; PALETTE_SIZE])
    }
}

impl Palette {
    /// Remplit les index bas avec `colors`, le reste reste noir.
    ///
    /// Les couleurs au-delà de 256 sont ignorées.
    #[must_use]
    pub fn from_colors(colors: &[Rgb]) -> Self {
        let mut palette = Self::default();
        let len = colors.len().min(PALETTE_SIZE);
        palette.0[..len].copy_from_slice(&colors[..len]);
        palette
    }

    /// Inclusive sub-range `[low, high]`.
    #[inline]
    #[must_use]
    pub fn span(&self, low: u8, high: u8) -> &[Rgb] {
        &self.0[usize::from(low)..=usize::from(high)]
    }

    /// Mutable inclusive sub-range `[low, high]`.
    #[inline]
    pub fn span_mut(&mut self, low: u8, high: u8) -> &mut [Rgb] {
        &mut self.0[usize::from(low)..=usize::from(high)]
    }
}

impl Index<u8> for Palette {
    type Output = Rgb;

    #[inline]
    fn index(&self, index: u8) -> &Rgb {
        &self.0[usize::from(index)]
    }
}

impl IndexMut<u8> for Palette {
    #[inline]
    fn index_mut(&mut self, index: u8) -> &mut Rgb {
        &mut self.0[usize::from(index)]
    }
}
