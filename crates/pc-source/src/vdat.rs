use pc_core::error::ParseError;

use crate::reader::ByteReader;

/// Décompresse un sous-chunk `VDAT` (Atari ST, compression BMHD 2) dans `out`.
///
/// Le sous-chunk commence par `cmd_cnt` (u16), qui compte ses propres deux
/// octets plus les octets de commande ; les mots de données suivent. Chaque
/// commande, lue comme `i8` :
/// - `0` : le compte est le mot suivant, copier ce nombre de mots,
/// - `1` : le compte est le mot suivant, répéter le mot d'après,
/// - `< 0` : copier `-cmd` mots,
/// - `> 1` : répéter le mot suivant `cmd` fois.
///
/// Le décodage s'arrête quand les données sont épuisées, même s'il reste
/// des commandes.
///
/// # Errors
/// [`ParseError::Malformed`] if `cmd_cnt < 2`, [`ParseError::Truncated`] if
/// a command needs more words than remain, [`ParseError::RunOverflow`] if the
/// output would exceed `limit` bytes.
///
/// # Example
/// ```
/// use pc_source::vdat::unpack_plane;
/// // cmd_cnt = 3, commande 2 : répéter 0xABCD deux fois
/// let data = [0x00, 0x03, 0x02, 0xAB, 0xCD];
/// let mut out = Vec::new();
/// unpack_plane(&data, 16, &mut out).unwrap();
/// assert_eq!(out, [0xAB, 0xCD, 0xAB, 0xCD]);
/// ```
pub fn unpack_plane(data: &[u8], limit: usize, out: &mut Vec<u8>) -> Result<(), ParseError> {
    out.clear();
    let cmd_cnt = usize::from(ByteReader::new(data).u16_be("VDAT")?);
    if cmd_cnt < 2 {
        return Err(ParseError::Malformed(format!("VDAT : cmd_cnt {cmd_cnt} < 2")));
    }
    if cmd_cnt > data.len() {
        return Err(ParseError::Truncated {
            what: "commandes VDAT".into(),
            needed: cmd_cnt,
            available: data.len(),
        });
    }

    let mut words = ByteReader::new(&data[cmd_cnt..]);
    for &byte in &data[2..cmd_cnt] {
        if words.is_empty() {
            break;
        }
        let (count, repeat) = match i8::from_be_bytes([byte]) {
            0 => (usize::from(words.u16_be("VDAT")?), false),
            1 => (usize::from(words.u16_be("VDAT")?), true),
            n => (usize::from(n.unsigned_abs()), n > 0),
        };
        let written = out.len() + count * 2;
        if written > limit {
            return Err(ParseError::RunOverflow { written, row_len: limit });
        }
        if repeat {
            let word = words.array::<2>("VDAT")?;
            for _ in 0..count {
                out.extend_from_slice(&word);
            }
        } else {
            out.extend_from_slice(words.take(count * 2, "VDAT")?);
        }
    }
    Ok(())
}
