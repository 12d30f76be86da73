use pc_core::color::Rgb;
use pc_core::config::LBM_CYCLE_RATE_DIVISOR;
use pc_core::cycle::CycleRange;
use pc_core::error::{ParseError, SceneError, ValidationError};
use pc_core::palette::{PALETTE_SIZE, Palette};
use pc_core::scene::SceneDescriptor;
use pc_core::traits::SceneDecoder;

use crate::byterun::unpack_row;
use crate::reader::ByteReader;
use crate::vdat::unpack_plane;

/// Magic of every IFF container.
pub const FORM_MAGIC: &[u8; 4] = b"FORM";

const BMHD_LEN: usize = 20;
const CRNG_LEN: usize = 8;
const CCRT_LEN: usize = 14;
const MAX_PLANES: u8 = 8;

/// BMHD compression codes.
const COMPRESSION_BYTERUN: u8 = 1;
const COMPRESSION_VDAT: u8 = 2;

/// CRNG flag bits.
const CRNG_ACTIVE: u16 = 1;
const CRNG_REVERSE: u16 = 2;

/// Layout of the `BODY` rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormType {
    /// `ILBM`: one bit per plane, planes interleaved row by row.
    Planar,
    /// `PBM `: one byte per pixel.
    Chunky,
}

/// Contenu utile du chunk `BMHD`.
#[derive(Clone, Copy, Debug)]
struct BitmapHeader {
    width: u16,
    height: u16,
    planes: u8,
    mask: u8,
    compression: u8,
}

impl BitmapHeader {
    fn read(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < BMHD_LEN {
            return Err(ParseError::Truncated {
                what: "BMHD".into(),
                needed: BMHD_LEN,
                available: data.len(),
            });
        }
        let mut r = ByteReader::new(data);
        let width = r.u16_be("BMHD")?;
        let height = r.u16_be("BMHD")?;
        r.skip(4, "BMHD")?; // origine x/y
        let planes = r.u8("BMHD")?;
        let mask = r.u8("BMHD")?;
        let compression = r.u8("BMHD")?;
        Ok(Self {
            width,
            height,
            planes,
            mask,
            compression,
        })
    }

    /// Bytes per plane per row, rounded up to a 16-bit word.
    fn plane_len(&self) -> usize {
        usize::from(self.width).div_ceil(16) * 2
    }

    fn row_len(&self, form: FormType) -> usize {
        match form {
            FormType::Planar => self.plane_len() * (usize::from(self.planes) + usize::from(self.mask == 1)),
            FormType::Chunky => usize::from(self.width).next_multiple_of(2),
        }
    }

    fn check_supported(&self, form: FormType) -> Result<(), ParseError> {
        if self.planes > MAX_PLANES {
            return Err(ParseError::Unsupported(format!(
                "{} plans de bits (8 maximum, images indexées seulement)",
                self.planes
            )));
        }
        if self.planes == 0 {
            return Err(ParseError::Unsupported("image sans plan de bits".into()));
        }
        if form == FormType::Chunky && self.planes != MAX_PLANES {
            return Err(ParseError::Unsupported(format!("PBM en {} bits", self.planes)));
        }
        match self.compression {
            0 | COMPRESSION_BYTERUN => {}
            COMPRESSION_VDAT if form == FormType::Planar => {}
            COMPRESSION_VDAT => return Err(ParseError::Unsupported("PBM compressé en VDAT".into())),
            other => return Err(ParseError::Unsupported(format!("compression BODY {other}"))),
        }
        Ok(())
    }
}

/// Décodeur IFF `FORM ILBM` / `FORM PBM ` (Deluxe Paint, Graphicraft).
///
/// Lit `BMHD`, le premier `CMAP`, le `BODY` et les plages `CRNG`/`CCRT`.
/// Les autres chunks sont sautés grâce à leur longueur déclarée.
#[derive(Clone, Copy, Debug)]
pub struct IlbmDecoder {
    rate_divisor: f64,
}

impl Default for IlbmDecoder {
    fn default() -> Self {
        Self::new(LBM_CYCLE_RATE_DIVISOR)
    }
}

impl IlbmDecoder {
    /// Decoder converting `CRNG` rates with `rate / rate_divisor`.
    #[must_use]
    pub fn new(rate_divisor: f64) -> Self {
        Self { rate_divisor }
    }

    fn crng(&self, data: &[u8]) -> Result<Option<CycleRange>, SceneError> {
        if data.len() < CRNG_LEN {
            return Err(truncated("CRNG", CRNG_LEN, data.len()));
        }
        let mut r = ByteReader::new(data);
        r.skip(2, "CRNG")?;
        let rate = r.u16_be("CRNG")?;
        let flags = r.u16_be("CRNG")?;
        let low = r.u8("CRNG")?;
        let high = r.u8("CRNG")?;
        if flags & CRNG_ACTIVE == 0 {
            log::debug!("CRNG {low}..={high} inactif, ignoré");
            return Ok(None);
        }
        let range = CycleRange::new(low, high, f64::from(rate) / self.rate_divisor, flags & CRNG_REVERSE != 0)?;
        Ok(Some(range))
    }
}

fn ccrt(data: &[u8]) -> Result<Option<CycleRange>, SceneError> {
    if data.len() < CCRT_LEN {
        return Err(truncated("CCRT", CCRT_LEN, data.len()));
    }
    let mut r = ByteReader::new(data);
    let direction = r.i16_be("CCRT")?;
    let low = r.u8("CCRT")?;
    let high = r.u8("CCRT")?;
    let delay_sec = r.u32_be("CCRT")?;
    let delay_usec = r.u32_be("CCRT")?;
    match direction {
        0 => {
            log::debug!("CCRT {low}..={high} inactif, ignoré");
            Ok(None)
        }
        -1 | 1 => {
            let delay = f64::from(delay_sec) + f64::from(delay_usec) / 1_000_000.0;
            if delay <= 0.0 {
                log::debug!("CCRT {low}..={high} sans délai, ignoré");
                return Ok(None);
            }
            Ok(Some(CycleRange::new(low, high, 1.0 / delay, direction == 1)?))
        }
        other => Err(ValidationError::ReverseFlag(i64::from(other)).into()),
    }
}

fn truncated(what: &str, needed: usize, available: usize) -> SceneError {
    ParseError::Truncated {
        what: what.into(),
        needed,
        available,
    }
    .into()
}

fn cmap(data: &[u8]) -> Palette {
    let colors: Vec<Rgb> = data
        .chunks_exact(3)
        .take(PALETTE_SIZE)
        .map(|c| Rgb::new(c[0], c[1], c[2]))
        .collect();
    Palette::from_colors(&colors)
}

/// Décode les lignes du `BODY` en buffer d'index chunky.
fn decode_body(body: &[u8], header: &BitmapHeader, form: FormType) -> Result<Vec<u8>, ParseError> {
    let width = usize::from(header.width);
    let height = usize::from(header.height);
    let row_len = header.row_len(form);
    let plane_len = header.plane_len();

    let mut src = ByteReader::new(body);
    let mut row = vec![0u8; row_len];
    // L'en-tête n'est pas fiable : la capacité suit aussi la taille du BODY.
    let mut pixels = Vec::with_capacity((width * height).min(body.len().saturating_mul(8)));

    for _ in 0..height {
        if header.compression == COMPRESSION_BYTERUN {
            unpack_row(&mut src, &mut row)?;
        } else {
            row.copy_from_slice(src.take(row_len, "BODY")?);
        }
        match form {
            FormType::Chunky => pixels.extend_from_slice(&row[..width]),
            FormType::Planar => {
                for x in 0..width {
                    let byte = x / 8;
                    let shift = 7 - (x % 8);
                    let mut value = 0u8;
                    for plane in 0..usize::from(header.planes) {
                        let bit = (row[plane * plane_len + byte] >> shift) & 1;
                        value |= bit << plane;
                    }
                    pixels.push(value);
                }
            }
        }
    }
    if !src.is_empty() {
        log::debug!("BODY : {} octets en trop ignorés", src.remaining());
    }
    Ok(pixels)
}

/// Corps Atari ST : un sous-chunk `VDAT` par plan.
///
/// Chaque plan décompressé est rangé par colonnes de 16 pixels, de haut
/// en bas : l'octet `b` couvre 8 pixels à partir de
/// `x = (b / 2 / height) * 16 + 8 * (b & 1)`, ligne `(b / 2) % height`.
fn decode_vdat_body(body: &[u8], header: &BitmapHeader) -> Result<Vec<u8>, ParseError> {
    let width = usize::from(header.width);
    let height = usize::from(header.height);
    let plane_size = header.plane_len() * height;

    let mut src = ByteReader::new(body);
    let mut plane_data = Vec::with_capacity(plane_size.min(body.len()));
    let mut pixels = Vec::new();

    for plane in 0..header.planes {
        let tag = src.array::<4>("VDAT")?;
        if &tag != b"VDAT" {
            return Err(ParseError::Malformed(format!(
                "sous-chunk VDAT attendu, {:?} trouvé",
                String::from_utf8_lossy(&tag)
            )));
        }
        let len = src.u32_be("VDAT")? as usize;
        unpack_plane(src.take(len, "VDAT")?, plane_size, &mut plane_data)?;
        if plane_data.len() < plane_size {
            return Err(ParseError::Truncated {
                what: format!("plan VDAT {plane}"),
                needed: plane_size,
                available: plane_data.len(),
            });
        }
        if pixels.is_empty() {
            pixels = vec![0u8; width * height];
        }

        for (b, &value) in plane_data.iter().enumerate() {
            let word = b / 2;
            let x0 = (word / height) * 16 + 8 * (b & 1);
            let row = (word % height) * width;
            for bit in 0..8 {
                let x = x0 + bit;
                if x >= width {
                    break;
                }
                pixels[row + x] |= ((value >> (7 - bit)) & 1) << plane;
            }
        }
    }
    if !src.is_empty() {
        log::debug!("BODY VDAT : {} octets en trop ignorés", src.remaining());
    }
    Ok(pixels)
}

impl SceneDecoder for IlbmDecoder {
    fn name(&self) -> &'static str {
        "IFF ILBM/PBM"
    }

    fn can_decode(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(FORM_MAGIC)
    }

    fn decode(&self, bytes: &[u8]) -> Result<SceneDescriptor, SceneError> {
        let mut r = ByteReader::new(bytes);
        if &r.array::<4>("FORM")? != FORM_MAGIC {
            return Err(SceneError::unsupported("conteneur IFF attendu (FORM)"));
        }
        let form_len = r.u32_be("FORM")? as usize;
        let form = match &r.array::<4>("FORM")? {
            b"ILBM" => FormType::Planar,
            b"PBM " => FormType::Chunky,
            other => {
                return Err(SceneError::unsupported(format!(
                    "type IFF {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
        };

        let declared = form_len.saturating_sub(4);
        if declared > r.remaining() {
            log::debug!("FORM déclare {declared} octets, {} présents", r.remaining());
        }
        let mut chunks = ByteReader::new(r.take(declared.min(r.remaining()), "FORM")?);

        let mut header = None;
        let mut palette = None;
        let mut body = None;
        let mut name = None;
        let mut cycles = Vec::new();

        while chunks.remaining() >= 8 {
            let tag = chunks.array::<4>("en-tête de chunk")?;
            let len = chunks.u32_be("en-tête de chunk")? as usize;
            let tag_str = String::from_utf8_lossy(&tag).into_owned();
            let data = chunks.take(len, &tag_str)?;
            if len % 2 == 1 && !chunks.is_empty() {
                chunks.skip(1, &tag_str)?;
            }

            match &tag {
                b"BMHD" => header = Some(BitmapHeader::read(data)?),
                b"CMAP" => {
                    if palette.is_none() {
                        palette = Some(cmap(data));
                    } else {
                        log::debug!("CMAP supplémentaire ignoré");
                    }
                }
                b"BODY" => body = Some(data),
                b"CRNG" => cycles.extend(self.crng(data)?),
                b"CCRT" => cycles.extend(ccrt(data)?),
                b"NAME" => {
                    let text = String::from_utf8_lossy(data);
                    let text = text.trim_end_matches('\0').trim();
                    if !text.is_empty() {
                        name = Some(text.to_string());
                    }
                }
                _ => log::debug!("chunk {tag_str:?} ({len} octets) ignoré"),
            }
        }
        if !chunks.is_empty() {
            log::debug!("FORM : {} octets finaux ignorés", chunks.remaining());
        }

        let header = header.ok_or(ParseError::MissingChunk("BMHD"))?;
        let palette = palette.ok_or(ParseError::MissingChunk("CMAP"))?;
        let body = body.ok_or(ParseError::MissingChunk("BODY"))?;
        header.check_supported(form)?;

        let pixels = if header.compression == COMPRESSION_VDAT {
            decode_vdat_body(body, &header)?
        } else {
            decode_body(body, &header, form)?
        };
        let scene = SceneDescriptor::new(
            u32::from(header.width),
            u32::from(header.height),
            palette,
            pixels,
            cycles,
        )?;
        Ok(match name {
            Some(name) => scene.with_name(name),
            None => scene,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(data);
        if data.len() % 2 == 1 {
            out.push(0);
        }
        out
    }

    fn form(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
        let inner: Vec<u8> = chunks.concat();
        let mut out = FORM_MAGIC.to_vec();
        out.extend_from_slice(&((inner.len() + 4) as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(&inner);
        out
    }

    fn bmhd(width: u16, height: u16, planes: u8, mask: u8, compression: u8) -> Vec<u8> {
        let mut d = Vec::with_capacity(BMHD_LEN);
        d.extend_from_slice(&width.to_be_bytes());
        d.extend_from_slice(&height.to_be_bytes());
        d.extend_from_slice(&[0, 0, 0, 0, planes, mask, compression, 0, 0, 0, 10, 11]);
        d.extend_from_slice(&width.to_be_bytes());
        d.extend_from_slice(&height.to_be_bytes());
        chunk(b"BMHD", &d)
    }

    fn cmap_chunk(colors: &[[u8; 3]]) -> Vec<u8> {
        chunk(b"CMAP", &colors.concat())
    }

    fn crng(rate: u16, flags: u16, low: u8, high: u8) -> Vec<u8> {
        let mut d = vec![0, 0];
        d.extend_from_slice(&rate.to_be_bytes());
        d.extend_from_slice(&flags.to_be_bytes());
        d.extend_from_slice(&[low, high]);
        chunk(b"CRNG", &d)
    }

    fn decode(bytes: &[u8]) -> Result<SceneDescriptor, SceneError> {
        IlbmDecoder::new(1.0).decode(bytes)
    }

    /// 2×1 PBM, uncompressed, row padded to 2 bytes.
    fn minimal_pbm(extra: &[Vec<u8>]) -> Vec<u8> {
        let mut chunks = vec![bmhd(2, 1, 8, 0, 0)];
        chunks.extend_from_slice(extra);
        chunks.push(cmap_chunk(&[[255, 0, 0], [0, 255, 0]]));
        chunks.push(chunk(b"BODY", &[1, 0]));
        form(b"PBM ", &chunks)
    }

    #[test]
    fn unknown_chunk_is_skipped_by_length() -> Result<(), SceneError> {
        let unknown = chunk(b"XYZW", &[0xAB; 7]);
        let scene = decode(&minimal_pbm(&[unknown]))?;
        assert_eq!(scene.pixels(), &[1, 0]);
        assert_eq!(scene.palette()[0], Rgb::new(255, 0, 0));
        assert_eq!(scene.palette()[1], Rgb::new(0, 255, 0));
        assert_eq!(scene.palette()[2], Rgb::BLACK);
        Ok(())
    }

    #[test]
    fn missing_mandatory_chunks() {
        let only_header = form(b"PBM ", &[bmhd(2, 1, 8, 0, 0), chunk(b"BODY", &[1, 0])]);
        assert!(matches!(
            decode(&only_header),
            Err(SceneError::Parse(ParseError::MissingChunk("CMAP")))
        ));
        let no_body = form(b"PBM ", &[bmhd(2, 1, 8, 0, 0), cmap_chunk(&[[0, 0, 0]])]);
        assert!(matches!(
            decode(&no_body),
            Err(SceneError::Parse(ParseError::MissingChunk("BODY")))
        ));
        let no_header = form(b"ILBM", &[cmap_chunk(&[[0, 0, 0]]), chunk(b"BODY", &[0, 0])]);
        assert!(matches!(
            decode(&no_header),
            Err(SceneError::Parse(ParseError::MissingChunk("BMHD")))
        ));
    }

    #[test]
    fn deep_images_are_unsupported() {
        let bytes = form(
            b"ILBM",
            &[bmhd(1, 1, 24, 0, 0), cmap_chunk(&[[0, 0, 0]]), chunk(b"BODY", &[0; 48])],
        );
        assert!(matches!(decode(&bytes), Err(SceneError::Parse(ParseError::Unsupported(_)))));
    }

    #[test]
    fn other_form_types_are_unsupported() {
        let bytes = form(b"8SVX", &[chunk(b"VHDR", &[0; 20])]);
        assert!(matches!(decode(&bytes), Err(SceneError::Parse(ParseError::Unsupported(_)))));
    }

    #[test]
    fn truncated_chunk_is_reported() {
        let mut bytes = minimal_pbm(&[]);
        let len = bytes.len();
        bytes.truncate(len - 1);
        // The FORM length now overstates the data: the BODY chunk is cut short.
        assert!(matches!(decode(&bytes), Err(SceneError::Parse(ParseError::Truncated { .. }))));
    }

    #[test]
    fn planar_rows_become_chunky_indices() -> Result<(), SceneError> {
        // 3 pixels, 2 planes: plane 0 = 101, plane 1 = 011 -> indices 1, 2, 3.
        let body = [0b1010_0000, 0, 0b0110_0000, 0];
        let bytes = form(
            b"ILBM",
            &[
                bmhd(3, 1, 2, 0, 0),
                cmap_chunk(&[[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]]),
                chunk(b"BODY", &body),
            ],
        );
        assert_eq!(decode(&bytes)?.pixels(), &[1, 2, 3]);
        Ok(())
    }

    #[test]
    fn mask_plane_is_skipped() -> Result<(), SceneError> {
        // 1 plane + mask plane per row, 2 rows.
        let body = [0b1000_0000, 0, 0xFF, 0xFF, 0b0100_0000, 0, 0xFF, 0xFF];
        let bytes = form(
            b"ILBM",
            &[bmhd(2, 2, 1, 1, 0), cmap_chunk(&[[0, 0, 0], [9, 9, 9]]), chunk(b"BODY", &body)],
        );
        assert_eq!(decode(&bytes)?.pixels(), &[1, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn compressed_body_and_chunk_order() -> Result<(), SceneError> {
        // BODY before BMHD: decoding waits for every chunk.
        // Row of 4 bytes: repeat 7 three times, then literal 2.
        let body = [0xFE, 7, 0x00, 2, 0xFF, 5, 0x01, 6, 8];
        let bytes = form(
            b"PBM ",
            &[
                chunk(b"BODY", &body),
                cmap_chunk(&[[0, 0, 0]]),
                bmhd(4, 2, 8, 0, 1),
            ],
        );
        assert_eq!(decode(&bytes)?.pixels(), &[7, 7, 7, 2, 5, 5, 6, 8]);
        Ok(())
    }

    #[test]
    fn huge_header_with_tiny_body_is_truncated() {
        let bytes = form(
            b"PBM ",
            &[bmhd(u16::MAX, u16::MAX, 8, 0, 0), cmap_chunk(&[[0, 0, 0]]), chunk(b"BODY", &[0; 8])],
        );
        assert!(matches!(decode(&bytes), Err(SceneError::Parse(ParseError::Truncated { .. }))));
    }

    fn vdat(payload: &[u8]) -> Vec<u8> {
        let mut out = b"VDAT".to_vec();
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn vdat_planes_fill_sixteen_pixel_columns() -> Result<(), SceneError> {
        // 20×2, 2 plans : deux colonnes de 16 pixels, la seconde coupée à 4.
        // Plan 0, mots par colonne : FFFF 0000 | F000 8000
        let plane0 = [
            0x00, 0x05, 0xFF, 0x01, 0x00, // cmd_cnt, commandes -1, 1, 0
            0xFF, 0xFF, // copie 1
            0x00, 0x01, 0x00, 0x00, // répétition comptée : 1 × 0000
            0x00, 0x02, 0xF0, 0x00, 0x80, 0x00, // copie comptée : 2 mots
        ];
        // Plan 1 : 0000 0000 | 0000 FFFF
        let plane1 = [0x00, 0x04, 0x03, 0xFF, 0x00, 0x00, 0xFF, 0xFF];
        let body = [vdat(&plane0), vdat(&plane1)].concat();
        let bytes = form(
            b"ILBM",
            &[
                bmhd(20, 2, 2, 0, COMPRESSION_VDAT),
                cmap_chunk(&[[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]]),
                chunk(b"BODY", &body),
            ],
        );
        let mut expected = vec![1u8; 20];
        expected.extend_from_slice(&[0; 16]);
        expected.extend_from_slice(&[3, 2, 2, 2]);
        assert_eq!(decode(&bytes)?.pixels(), expected.as_slice());
        Ok(())
    }

    #[test]
    fn vdat_body_needs_one_subchunk_per_plane() {
        let plane = [0x00, 0x03, 0xFF, 0x00, 0x00];
        let header = bmhd(16, 1, 2, 0, COMPRESSION_VDAT);
        let palette = cmap_chunk(&[[0, 0, 0]]);
        let short = form(b"ILBM", &[header.clone(), palette.clone(), chunk(b"BODY", &vdat(&plane))]);
        assert!(matches!(decode(&short), Err(SceneError::Parse(ParseError::Truncated { .. }))));

        let mut wrong = [vdat(&plane), vdat(&plane)].concat();
        wrong[13..17].copy_from_slice(b"BODY");
        let wrong = form(b"ILBM", &[header, palette, chunk(b"BODY", &wrong)]);
        assert!(matches!(decode(&wrong), Err(SceneError::Parse(ParseError::Malformed(_)))));
    }

    #[test]
    fn vdat_is_planar_only_and_higher_codes_unsupported() {
        let pbm = form(
            b"PBM ",
            &[bmhd(2, 1, 8, 0, COMPRESSION_VDAT), cmap_chunk(&[[0, 0, 0]]), chunk(b"BODY", &[0; 2])],
        );
        assert!(matches!(decode(&pbm), Err(SceneError::Parse(ParseError::Unsupported(_)))));
        let unknown = form(
            b"ILBM",
            &[bmhd(2, 1, 1, 0, 3), cmap_chunk(&[[0, 0, 0]]), chunk(b"BODY", &[0; 2])],
        );
        assert!(matches!(decode(&unknown), Err(SceneError::Parse(ParseError::Unsupported(_)))));
    }

    #[test]
    fn crng_rates_flags_and_order() -> Result<(), SceneError> {
        let bytes = minimal_pbm(&[
            crng(560, CRNG_ACTIVE, 0, 1),
            crng(280, 0, 4, 9),
            crng(280, CRNG_ACTIVE | CRNG_REVERSE, 2, 5),
        ]);
        let scene = IlbmDecoder::new(280.0).decode(&bytes)?;
        let cycles = scene.cycles();
        assert_eq!(cycles.len(), 2);
        assert!((cycles[0].rate() - 2.0).abs() < 1e-12);
        assert!(!cycles[0].reverse());
        assert_eq!((cycles[1].low(), cycles[1].high()), (2, 5));
        assert!(cycles[1].reverse());
        Ok(())
    }

    #[test]
    fn crng_with_inverted_bounds_is_rejected() {
        let bytes = minimal_pbm(&[crng(280, CRNG_ACTIVE, 9, 3)]);
        assert!(matches!(
            decode(&bytes),
            Err(SceneError::Validation(ValidationError::RangeBounds { low: 9, high: 3 }))
        ));
    }

    #[test]
    fn ccrt_uses_delay_and_direction() -> Result<(), SceneError> {
        let mut d = 1i16.to_be_bytes().to_vec();
        d.extend_from_slice(&[3, 7]);
        d.extend_from_slice(&0u32.to_be_bytes());
        d.extend_from_slice(&250_000u32.to_be_bytes());
        d.extend_from_slice(&[0, 0]);
        let off = {
            let mut o = d.clone();
            o[..2].copy_from_slice(&0i16.to_be_bytes());
            o
        };
        let scene = decode(&minimal_pbm(&[chunk(b"CCRT", &d), chunk(b"CCRT", &off)]))?;
        assert_eq!(scene.cycles().len(), 1);
        let range = scene.cycles()[0];
        assert!((range.rate() - 4.0).abs() < 1e-9);
        assert!(range.reverse());
        Ok(())
    }

    #[test]
    fn name_chunk_sets_the_scene_name() -> Result<(), SceneError> {
        let scene = decode(&minimal_pbm(&[chunk(b"NAME", b"Jungle\0")]))?;
        assert_eq!(scene.name(), Some("Jungle"));
        Ok(())
    }

    #[test]
    fn sniffs_form_magic() {
        let decoder = IlbmDecoder::default();
        assert!(decoder.can_decode(b"FORM\0\0\0\x04ILBM"));
        assert!(!decoder.can_decode(b"{\"width\": 1}"));
    }
}
