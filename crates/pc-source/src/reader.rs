use pc_core::error::ParseError;

/// Curseur big-endian sur un buffer en mémoire.
///
/// Chaque lecture vérifie la longueur restante et renvoie
/// [`ParseError::Truncated`] plutôt que de paniquer.
///
/// # Example
/// ```
/// use pc_source::reader::ByteReader;
/// let mut r = ByteReader::new(&[0x00, 0x2A, 0xFF]);
/// assert_eq!(r.u16_be("demo").unwrap(), 42);
/// assert_eq!(r.remaining(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the first byte of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes left.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// `true` once every byte is consumed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    ///
    /// # Errors
    /// [`ParseError::Truncated`] if fewer than `len` bytes remain.
    pub fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8], ParseError> {
        if len > self.remaining() {
            return Err(ParseError::Truncated {
                what: what.to_string(),
                needed: len,
                available: self.remaining(),
            });
        }
        let data = self.data;
        let slice = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Advance by `len` bytes without looking at them.
    ///
    /// # Errors
    /// [`ParseError::Truncated`] if fewer than `len` bytes remain.
    pub fn skip(&mut self, len: usize, what: &str) -> Result<(), ParseError> {
        self.take(len, what).map(|_| ())
    }

    /// Read a fixed-size array.
    ///
    /// # Errors
    /// [`ParseError::Truncated`] if fewer than `N` bytes remain.
    pub fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N], ParseError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    /// # Errors
    /// [`ParseError::Truncated`] at end of data.
    pub fn u8(&mut self, what: &str) -> Result<u8, ParseError> {
        Ok(self.array::<1>(what)?[0])
    }

    /// # Errors
    /// [`ParseError::Truncated`] if fewer than 2 bytes remain.
    pub fn u16_be(&mut self, what: &str) -> Result<u16, ParseError> {
        self.array(what).map(u16::from_be_bytes)
    }

    /// # Errors
    /// [`ParseError::Truncated`] if fewer than 2 bytes remain.
    pub fn i16_be(&mut self, what: &str) -> Result<i16, ParseError> {
        self.array(what).map(i16::from_be_bytes)
    }

    /// # Errors
    /// [`ParseError::Truncated`] if fewer than 4 bytes remain.
    pub fn u32_be(&mut self, what: &str) -> Result<u32, ParseError> {
        self.array(what).map(u32::from_be_bytes)
    }
}
