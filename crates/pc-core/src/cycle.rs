use crate::error::ValidationError;

/// Une plage de palette animée : `[low, high]` tourne à `rate` pas par seconde.
///
/// Construite uniquement via [`CycleRange::new`] ou [`CycleRange::from_raw`],
/// qui valident les invariants : `low <= high`, `rate` fini et positif ou nul.
/// Une plage validée ne peut plus faire échouer le compositor.
///
/// # Example
/// ```
/// use pc_core::cycle::CycleRange;
/// let range = CycleRange::new(16, 31, 4.0, false).unwrap();
/// assert_eq!(range.span(), 16);
/// assert!(range.is_active());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleRange {
    low: u8,
    high: u8,
    rate: f64,
    reverse: bool,
}

/// Position of a range inside its rotation at a given instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase {
    /// Whole steps elapsed, folded into `[0, span)`.
    pub whole: usize,
    /// Fractional progress towards the next step, in `[0, 1)`.
    pub frac: f64,
}

impl CycleRange {
    /// Validate and build a range from typed bounds.
    ///
    /// # Errors
    /// [`ValidationError::RangeBounds`] if `low > high`,
    /// [`ValidationError::Rate`] if `rate` is negative, NaN or infinite.
    pub fn new(low: u8, high: u8, rate: f64, reverse: bool) -> Result<Self, ValidationError> {
        if low > high {
            return Err(ValidationError::RangeBounds {
                low: i64::from(low),
                high: i64::from(high),
            });
        }
        if !rate.is_finite() || rate < 0.0 {
            return Err(ValidationError::Rate(rate));
        }
        Ok(Self {
            low,
            high,
            rate,
            reverse,
        })
    }

    /// Validate bounds coming from a loosely typed source (JSON numbers).
    ///
    /// # Errors
    /// [`ValidationError::RangeBounds`] if either bound falls outside `[0, 255]`
    /// or `low > high`; [`ValidationError::Rate`] as in [`CycleRange::new`].
    pub fn from_raw(low: i64, high: i64, rate: f64, reverse: bool) -> Result<Self, ValidationError> {
        let bounds = ValidationError::RangeBounds { low, high };
        let low = u8::try_from(low).map_err(|_| bounds.clone())?;
        let high = u8::try_from(high).map_err(|_| bounds)?;
        Self::new(low, high, rate, reverse)
    }

    /// First palette index of the span.
    #[inline]
    #[must_use]
    pub fn low(&self) -> u8 {
        self.low
    }

    /// Last palette index of the span (inclusive).
    #[inline]
    #[must_use]
    pub fn high(&self) -> u8 {
        self.high
    }

    /// Steps per second.
    #[inline]
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// `true` when the rotation runs towards higher indices.
    #[inline]
    #[must_use]
    pub fn reverse(&self) -> bool {
        self.reverse
    }

    /// A zero rate marks the range inactive; the compositor skips it.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.rate != 0.0
    }

    /// Number of palette slots in the span (`high - low + 1`, at least 1).
    #[inline]
    #[must_use]
    pub fn span(&self) -> usize {
        usize::from(self.high) - usize::from(self.low) + 1
    }

    /// Phase de rotation au temps simulé `t` (secondes, peut être négatif).
    ///
    /// Modulo floor : le résultat est toujours dans `[0, span)`.
    ///
    /// # Example
    /// ```
    /// use pc_core::cycle::CycleRange;
    /// let range = CycleRange::new(0, 3, 2.0, false).unwrap();
    /// let phase = range.phase_at(-0.25);
    /// assert_eq!(phase.whole, 3);
    /// assert!((phase.frac - 0.5).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn phase_at(&self, t: f64) -> Phase {
        let raw_steps = t * self.rate;
        let floor = raw_steps.floor();
        let n = self.span() as f64;
        let whole = (floor.rem_euclid(n) as usize).min(self.span() - 1);
        Phase {
            whole,
            frac: (raw_steps - floor).clamp(0.0, 1.0),
        }
    }

    /// Offset inside the initial span whose color lands on offset `i`
    /// after `steps` whole rotation steps.
    ///
    /// Forward ranges shift colors towards lower indices over time,
    /// reverse ranges towards higher indices.
    #[inline]
    #[must_use]
    pub fn source_offset(&self, i: usize, steps: usize) -> usize {
        let n = self.span();
        let steps = steps % n;
        if self.reverse {
            (i + n - steps) % n
        } else {
            (i + steps) % n
        }
    }
}
