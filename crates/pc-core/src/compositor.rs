use crate::cycle::CycleRange;
use crate::palette::Palette;

/// Compositor de palette : calcule la palette active à un instant simulé.
///
/// Garde une palette de travail pré-allouée, réécrite à chaque appel :
/// zéro allocation en hot path. Toutes les entrées étant validées au
/// chargement, le calcul ne peut pas échouer.
///
/// # Example
/// ```
/// use pc_core::color::Rgb;
/// use pc_core::compositor::Compositor;
/// use pc_core::cycle::CycleRange;
/// use pc_core::palette::Palette;
///
/// let initial = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
/// let cycles = [CycleRange::new(0, 1, 1.0, false).unwrap()];
/// let mut compositor = Compositor::new();
/// let palette = compositor.compose(&initial, &cycles, 1.0, false);
/// assert_eq!(palette[0], Rgb::new(0, 255, 0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Compositor {
    working: Palette,
}

impl Compositor {
    /// Create a compositor with an all-black working palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the palette for simulated time `t` and return it.
    ///
    /// The returned reference stays valid until the next call.
    pub fn compose(&mut self, initial: &Palette, cycles: &[CycleRange], t: f64, blend: bool) -> &Palette {
        compose_into(initial, cycles, t, blend, &mut self.working);
        &self.working
    }

    /// Palette produced by the most recent [`Compositor::compose`] call.
    #[must_use]
    pub fn current(&self) -> &Palette {
        &self.working
    }
}

/// Écrit dans `out` la palette `initial` animée par `cycles` au temps `t`.
///
/// Les plages sont appliquées dans l'ordre de déclaration ; sur un
/// chevauchement, la dernière plage écrite l'emporte. Chaque plage lit ses
/// couleurs sources dans `initial`, jamais dans le résultat d'une plage
/// précédente.
pub fn compose_into(initial: &Palette, cycles: &[CycleRange], t: f64, blend: bool, out: &mut Palette) {
    out.clone_from(initial);
    for cycle in cycles.iter().filter(|c| c.is_active()) {
        apply_cycle(initial, cycle, t, blend, out);
    }
}

/// Apply a single active range to `out`, reading source colors from `initial`.
#[inline]
pub fn apply_cycle(initial: &Palette, cycle: &CycleRange, t: f64, blend: bool, out: &mut Palette) {
    let src = initial.span(cycle.low(), cycle.high());
    let dest = out.span_mut(cycle.low(), cycle.high());
    let phase = cycle.phase_at(t);

    if blend {
        let next = phase.whole + 1;
        for (i, slot) in dest.iter_mut().enumerate() {
            let from = src[cycle.source_offset(i, phase.whole)];
            let to = src[cycle.source_offset(i, next)];
            *slot = from.lerp(to, phase.frac);
        }
    } else {
        for (i, slot) in dest.iter_mut().enumerate() {
            *slot = src[cycle.source_offset(i, phase.whole)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::error::ValidationError;

    fn gradient() -> Palette {
        let colors: Vec<Rgb> = (0..=255u8).map(|i| Rgb::new(i, 255 - i, i / 2)).collect();
        Palette::from_colors(&colors)
    }

    fn compose(initial: &Palette, cycles: &[CycleRange], t: f64, blend: bool) -> Palette {
        let mut out = Palette::default();
        compose_into(initial, cycles, t, blend, &mut out);
        out
    }

    #[test]
    fn full_period_returns_to_start() -> Result<(), ValidationError> {
        let initial = gradient();
        let range = CycleRange::new(10, 17, 2.0, false)?;
        let cycles = [range];
        let period = 8.0 / 2.0;
        for blend in [false, true] {
            for t in [0.0, 0.25, 1.5, 3.75] {
                let a = compose(&initial, &cycles, t, blend);
                let b = compose(&initial, &cycles, t + period, blend);
                assert_eq!(a.span(10, 17), b.span(10, 17), "t={t} blend={blend}");
            }
            let start = compose(&initial, &cycles, 0.0, blend);
            assert_eq!(start.span(10, 17), initial.span(10, 17));
        }
        Ok(())
    }

    #[test]
    fn stepped_mode_is_constant_within_a_step() -> Result<(), ValidationError> {
        let initial = gradient();
        let cycles = [CycleRange::new(0, 31, 4.0, true)?];
        let a = compose(&initial, &cycles, 1.0, false);
        for t in [1.01, 1.1, 1.2, 1.249] {
            assert_eq!(compose(&initial, &cycles, t, false), a, "t={t}");
        }
        assert_ne!(compose(&initial, &cycles, 1.25, false), a);
        Ok(())
    }

    #[test]
    fn blend_matches_stepped_on_step_boundaries() -> Result<(), ValidationError> {
        let initial = gradient();
        let cycles = [CycleRange::new(40, 90, 3.0, false)?, CycleRange::new(100, 101, 2.0, true)?];
        for step in 0..12 {
            let t = f64::from(step);
            assert_eq!(compose(&initial, &cycles, t, true), compose(&initial, &cycles, t, false));
        }
        Ok(())
    }

    #[test]
    fn blend_moves_monotonically_between_steps() -> Result<(), ValidationError> {
        let initial = Palette::from_colors(&[Rgb::new(0, 200, 7), Rgb::new(250, 0, 7)]);
        let cycles = [CycleRange::new(0, 1, 1.0, false)?];
        let mut prev = compose(&initial, &cycles, 0.0, true)[0];
        for k in 1..10 {
            let c = compose(&initial, &cycles, f64::from(k) / 10.0, true)[0];
            assert!(c.r >= prev.r && c.g <= prev.g && c.b == 7, "k={k}: {prev:?} -> {c:?}");
            prev = c;
        }
        Ok(())
    }

    #[test]
    fn zero_rate_leaves_span_untouched() -> Result<(), ValidationError> {
        let initial = gradient();
        let cycles = [CycleRange::new(0, 255, 0.0, false)?];
        for t in [-100.0, 0.0, 0.5, 12345.678] {
            for blend in [false, true] {
                assert_eq!(compose(&initial, &cycles, t, blend), initial);
            }
        }
        Ok(())
    }

    #[test]
    fn later_range_wins_on_overlap() -> Result<(), ValidationError> {
        let initial = gradient();
        let late = CycleRange::new(20, 29, 1.0, true)?;
        let alone = compose(&initial, &[late], 3.3, true);
        for early_rate in [0.5, 7.0, 100.0] {
            let early = CycleRange::new(15, 25, early_rate, false)?;
            let both = compose(&initial, &[early, late], 3.3, true);
            assert_eq!(both.span(20, 29), alone.span(20, 29), "early rate {early_rate}");
        }
        Ok(())
    }

    #[test]
    fn sources_come_from_the_initial_palette() -> Result<(), ValidationError> {
        // Two identical ranges must not compound their shifts.
        let initial = gradient();
        let range = CycleRange::new(0, 9, 1.0, false)?;
        let once = compose(&initial, &[range], 2.0, false);
        let twice = compose(&initial, &[range, range], 2.0, false);
        assert_eq!(once, twice);
        assert_eq!(once[0], initial[2]);
        Ok(())
    }

    #[test]
    fn two_color_midpoint_and_full_step() -> Result<(), ValidationError> {
        let initial = Palette::from_colors(&[Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)]);
        let cycles = [CycleRange::new(0, 1, 1.0, false)?];
        let mid = compose(&initial, &cycles, 0.5, true)[0];
        assert!((127..=128).contains(&mid.r) && (127..=128).contains(&mid.g) && mid.b == 0);
        assert_eq!(compose(&initial, &cycles, 1.0, true)[0], Rgb::new(0, 255, 0));
        Ok(())
    }

    #[test]
    fn compositor_reuses_its_buffer() -> Result<(), ValidationError> {
        let initial = gradient();
        let cycles = [CycleRange::new(0, 3, 1.0, false)?];
        let mut compositor = Compositor::new();
        let first = compositor.compose(&initial, &cycles, 1.0, false).clone();
        compositor.compose(&initial, &cycles, 0.0, false);
        assert_eq!(compositor.current(), &initial);
        assert_ne!(&first, &initial);
        Ok(())
    }
}
