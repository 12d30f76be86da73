use std::sync::Arc;

use crate::compositor::Compositor;
use crate::cycle::CycleRange;
use crate::error::ValidationError;
use crate::palette::Palette;

/// Scène décodée : image indexée, palette initiale et plages de cycle.
///
/// Immuable une fois construite. `new` est le seul point d'entrée et
/// vérifie que le buffer d'index couvre exactement `width × height` pixels ;
/// les index eux-mêmes sont des `u8`, donc toujours valides.
///
/// # Example
/// ```
/// use pc_core::palette::Palette;
/// use pc_core::scene::SceneDescriptor;
/// let scene = SceneDescriptor::new(2, 1, Palette::default(), vec![0, 1], Vec::new()).unwrap();
/// assert_eq!(scene.index_at(1, 0), Some(1));
/// assert_eq!(scene.index_at(2, 0), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescriptor {
    name: Option<String>,
    width: u32,
    height: u32,
    palette: Palette,
    pixels: Box<[u8]>,
    cycles: Box<[CycleRange]>,
}

impl SceneDescriptor {
    /// Assemble a scene from already-validated parts.
    ///
    /// # Errors
    /// [`ValidationError::PixelCount`] if `pixels.len() != width * height`.
    pub fn new(
        width: u32,
        height: u32,
        palette: Palette,
        pixels: Vec<u8>,
        cycles: Vec<CycleRange>,
    ) -> Result<Self, ValidationError> {
        let expected = u64::from(width) * u64::from(height);
        if pixels.len() as u64 != expected {
            return Err(ValidationError::PixelCount {
                width,
                height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            name: None,
            width,
            height,
            palette,
            pixels: pixels.into_boxed_slice(),
            cycles: cycles.into_boxed_slice(),
        })
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if the file or its dialect carried one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette before any animation.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Row-major index buffer, `width × height` entries.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Cycle ranges in declaration order.
    #[must_use]
    pub fn cycles(&self) -> &[CycleRange] {
        &self.cycles
    }

    /// Palette index at `(x, y)`, `None` outside the image.
    #[inline]
    #[must_use]
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.width as usize + x as usize;
        self.pixels.get(offset).copied()
    }
}

/// Une scène chargée, prête à être animée.
///
/// Le descripteur est partagé en lecture seule (`Arc`) ; la palette calculée
/// appartient à cette instance seule.
#[derive(Clone, Debug)]
pub struct Scene {
    descriptor: Arc<SceneDescriptor>,
    compositor: Compositor,
}

impl Scene {
    /// Wrap a descriptor for playback.
    #[must_use]
    pub fn new(descriptor: impl Into<Arc<SceneDescriptor>>) -> Self {
        Self {
            descriptor: descriptor.into(),
            compositor: Compositor::new(),
        }
    }

    /// Shared read-only scene data.
    #[must_use]
    pub fn descriptor(&self) -> &Arc<SceneDescriptor> {
        &self.descriptor
    }

    /// Recompute and return the palette at simulated time `t`.
    pub fn palette_at(&mut self, t: f64, blend: bool) -> &Palette {
        let d = &self.descriptor;
        self.compositor.compose(&d.palette, &d.cycles, t, blend)
    }

    /// Palette from the latest [`Scene::palette_at`] call.
    #[must_use]
    pub fn current_palette(&self) -> &Palette {
        self.compositor.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn rejects_pixel_count_mismatch() {
        let err = SceneDescriptor::new(3, 2, Palette::default(), vec![0; 5], Vec::new());
        assert_eq!(
            err,
            Err(ValidationError::PixelCount {
                width: 3,
                height: 2,
                found: 5
            })
        );
    }

    #[test]
    fn empty_image_is_allowed() -> Result<(), ValidationError> {
        let scene = SceneDescriptor::new(0, 0, Palette::default(), Vec::new(), Vec::new())?;
        assert!(scene.pixels().is_empty());
        assert_eq!(scene.index_at(0, 0), None);
        Ok(())
    }

    #[test]
    fn scene_shares_descriptor_and_animates() -> Result<(), ValidationError> {
        let palette = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
        let cycles = vec![CycleRange::new(0, 1, 1.0, false)?];
        let descriptor = Arc::new(SceneDescriptor::new(1, 1, palette, vec![0], cycles)?.with_name("duo"));

        let mut a = Scene::new(Arc::clone(&descriptor));
        let mut b = Scene::new(Arc::clone(&descriptor));
        assert_eq!(a.palette_at(1.0, false)[0], Rgb::new(0, 255, 0));
        assert_eq!(b.palette_at(0.0, false)[0], Rgb::new(255, 0, 0));
        assert_eq!(a.current_palette()[0], Rgb::new(0, 255, 0));
        assert_eq!(a.descriptor().name(), Some("duo"));
        assert_eq!(Arc::strong_count(&descriptor), 3);
        Ok(())
    }
}
