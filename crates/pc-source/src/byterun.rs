use pc_core::error::ParseError;

use crate::reader::ByteReader;

/// Décompresse une ligne ByteRun1 (PackBits) dans `row`.
///
/// Octet de contrôle `n` :
/// - `0..=127` : copier les `n + 1` octets suivants,
/// - `129..=255` : répéter l'octet suivant `257 - n` fois,
/// - `128` : ignoré.
///
/// La ligne doit être remplie exactement ; un paquet qui déborde est une
/// erreur, jamais tronqué en silence.
///
/// # Errors
/// [`ParseError::RunOverflow`] if a packet crosses the row end,
/// [`ParseError::Truncated`] if the input ends mid-row.
///
/// # Example
/// ```
/// use pc_source::byterun::unpack_row;
/// use pc_source::reader::ByteReader;
/// let mut src = ByteReader::new(&[0x01, 0xAA, 0xBB, 0xFE, 0x07]);
/// let mut row = [0u8; 5];
/// unpack_row(&mut src, &mut row).unwrap();
/// assert_eq!(row, [0xAA, 0xBB, 7, 7, 7]);
/// ```
pub fn unpack_row(src: &mut ByteReader<'_>, row: &mut [u8]) -> Result<(), ParseError> {
    let row_len = row.len();
    let mut pos = 0;
    while pos < row_len {
        let control = src.u8("BODY")?;
        match control {
            0..=0x7F => {
                let count = usize::from(control) + 1;
                let end = pos + count;
                if end > row_len {
                    return Err(ParseError::RunOverflow { written: end, row_len });
                }
                row[pos..end].copy_from_slice(src.take(count, "BODY")?);
                pos = end;
            }
            0x80 => {}
            _ => {
                let count = 257 - usize::from(control);
                let end = pos + count;
                if end > row_len {
                    return Err(ParseError::RunOverflow { written: end, row_len });
                }
                let value = src.u8("BODY")?;
                row[pos..end].fill(value);
                pos = end;
            }
        }
    }
    Ok(())
}
