use thiserror::Error;

/// Structural errors raised while decoding a scene file.
///
/// Fatal for the file being decoded, never for the process.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed document structure (bad JSON, missing field, wrong type).
    #[error("Structure invalide : {0}")]
    Malformed(String),

    /// An array or table does not have the length the format requires.
    #[error("Longueur incorrecte pour {field} : {found} au lieu de {expected}")]
    LengthMismatch {
        /// Name of the offending field.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Length actually found.
        found: usize,
    },

    /// Binary data ends before a structure is complete.
    #[error("Données tronquées dans {what} : {needed} octets requis, {available} disponibles")]
    Truncated {
        /// What was being read (chunk tag or structure name).
        what: String,
        /// Bytes needed.
        needed: usize,
        /// Bytes left.
        available: usize,
    },

    /// A mandatory chunk never appeared in the container.
    #[error("Chunk obligatoire absent : {0}")]
    MissingChunk(&'static str),

    /// Format, dialect version, bit depth or compression not supported.
    #[error("Format non supporté : {0}")]
    Unsupported(String),

    /// A compressed packet writes past the end of its row (ByteRun) or plane (VDAT).
    #[error("Compression corrompue : {written} octets pour un bloc de {row_len}")]
    RunOverflow {
        /// Bytes the packet would have produced up to this point.
        written: usize,
        /// Length of the row or plane in bytes.
        row_len: usize,
    },
}

/// Semantic errors: the data parsed, but breaks an invariant of the scene model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Cycle bounds outside `[0, 255]` or `low > high`.
    #[error("Plage de cycle invalide : {low}..={high}")]
    RangeBounds {
        /// Declared low index.
        low: i64,
        /// Declared high index.
        high: i64,
    },

    /// Negative, NaN or infinite cycle rate.
    #[error("Vitesse de cycle invalide : {0}")]
    Rate(f64),

    /// A pixel references a palette slot that does not exist.
    #[error("Pixel {position} : index de palette {value} hors limites")]
    PixelIndex {
        /// Offset of the pixel in the index buffer.
        position: usize,
        /// Offending value.
        value: i64,
    },

    /// Index buffer length disagrees with the declared dimensions.
    #[error("Buffer de pixels : {found} entrées pour {width}×{height}")]
    PixelCount {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Entries actually present.
        found: usize,
    },

    /// Unknown encoding of the reverse/direction flag.
    #[error("Direction de cycle inconnue : {0}")]
    ReverseFlag(i64),
}

/// Any failure to turn bytes or a file into a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Structural decode failure.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invariant violation in otherwise well-formed data.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Underlying I/O failure.
    #[error("Erreur d'E/S : {0}")]
    Io(#[from] std::io::Error),
}

impl SceneError {
    /// Shorthand for a [`ParseError::Malformed`] wrapped in a `SceneError`.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Parse(ParseError::Malformed(msg.into()))
    }

    /// Shorthand for a [`ParseError::Unsupported`] wrapped in a `SceneError`.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Parse(ParseError::Unsupported(msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_keep_the_inner_message() {
        let inner = ValidationError::RangeBounds { low: 10, high: 3 };
        let expected = inner.to_string();
        let err: SceneError = inner.into();
        assert_eq!(err.to_string(), expected);
        assert!(matches!(err, SceneError::Validation(_)));
    }

    #[test]
    fn shorthands_pick_the_parse_variant() {
        assert!(matches!(
            SceneError::malformed("x"),
            SceneError::Parse(ParseError::Malformed(_))
        ));
        assert!(matches!(
            SceneError::unsupported("24 bits"),
            SceneError::Parse(ParseError::Unsupported(_))
        ));
    }
}
