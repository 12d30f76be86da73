use serde::Deserialize;
use serde::de::IgnoredAny;

use pc_core::color::Rgb;
use pc_core::config::LBM_CYCLE_RATE_DIVISOR;
use pc_core::cycle::CycleRange;
use pc_core::error::{ParseError, SceneError, ValidationError};
use pc_core::palette::{PALETTE_SIZE, Palette};
use pc_core::scene::SceneDescriptor;
use pc_core::traits::SceneDecoder;

/// Only Living Worlds version understood.
const WORLD_FORMAT_VERSION: u32 = 2;

/// Flag de direction : entier `0`/`2` (outils d'origine) ou booléen.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(untagged)]
enum ReverseFlag {
    Bool(bool),
    Int(i64),
}

impl Default for ReverseFlag {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl ReverseFlag {
    fn resolve(self) -> Result<bool, ValidationError> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::Int(0) => Ok(false),
            Self::Int(2) => Ok(true),
            Self::Int(other) => Err(ValidationError::ReverseFlag(other)),
        }
    }
}

#[derive(Deserialize, Debug)]
struct RawCycle {
    low: i64,
    high: i64,
    #[serde(default)]
    rate: f64,
    #[serde(default)]
    reverse: ReverseFlag,
}

/// Pixels as one flat array or as an array of rows.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawPixels {
    Flat(Vec<i64>),
    Rows(Vec<Vec<i64>>),
}

/// Scène au format Canvas Cycle (aussi utilisée pour `base`).
#[derive(Deserialize, Debug)]
struct CanvasScene {
    width: u32,
    height: u32,
    colors: Vec<[u8; 3]>,
    #[serde(default)]
    cycles: Vec<RawCycle>,
    pixels: RawPixels,
    #[serde(default)]
    filename: Option<String>,
}

#[derive(Deserialize, Debug)]
struct FormatInfo {
    version: u32,
}

#[derive(Deserialize, Debug)]
struct PaletteInfo {
    colors: Vec<[u8; 3]>,
    #[serde(default)]
    cycles: Vec<RawCycle>,
}

#[derive(Deserialize, Debug)]
struct WorldData {
    #[serde(default)]
    name: Option<String>,
    width: u32,
    height: u32,
    #[serde(rename = "paletteInfos")]
    palette_infos: Vec<PaletteInfo>,
    pixels: RawPixels,
}

/// Document de premier niveau : toutes les formes connues, champs optionnels.
///
/// Les champs inconnus sont ignorés.
#[derive(Deserialize, Debug)]
struct Document {
    base: Option<CanvasScene>,
    palettes: Option<IgnoredAny>,
    timeline: Option<IgnoredAny>,
    format: Option<FormatInfo>,
    data: Option<serde_json::Value>,
    name: Option<String>,
    filename: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    colors: Option<Vec<[u8; 3]>>,
    cycles: Option<Vec<RawCycle>>,
    pixels: Option<RawPixels>,
}

/// Décodeur des scènes JSON (Canvas Cycle et Living Worlds).
///
/// Ordre de priorité : `base`, puis `format`/`data`, puis champs à plat.
///
/// # Example
/// ```
/// use pc_core::traits::SceneDecoder;
/// use pc_source::json::JsonDecoder;
///
/// let colors = vec![[0u8, 0, 0]; 256];
/// let doc = serde_json::json!({
///     "width": 2, "height": 1, "colors": colors,
///     "cycles": [{ "low": 0, "high": 1, "rate": 280, "reverse": 2 }],
///     "pixels": [0, 1]
/// });
/// let scene = JsonDecoder::default().decode(doc.to_string().as_bytes()).unwrap();
/// assert!((scene.cycles()[0].rate() - 1.0).abs() < 1e-12);
/// assert!(scene.cycles()[0].reverse());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct JsonDecoder {
    rate_divisor: f64,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new(LBM_CYCLE_RATE_DIVISOR)
    }
}

impl JsonDecoder {
    /// Decoder converting `rate` fields with `rate / rate_divisor`.
    #[must_use]
    pub fn new(rate_divisor: f64) -> Self {
        Self { rate_divisor }
    }

    fn build(
        &self,
        width: u32,
        height: u32,
        colors: &[[u8; 3]],
        cycles: &[RawCycle],
        pixels: RawPixels,
    ) -> Result<SceneDescriptor, SceneError> {
        let palette = palette_from(colors)?;
        let cycles = cycles
            .iter()
            .map(|c| {
                let reverse = c.reverse.resolve()?;
                CycleRange::from_raw(c.low, c.high, c.rate / self.rate_divisor, reverse)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let pixels = pixels_from(pixels)?;
        Ok(SceneDescriptor::new(width, height, palette, pixels, cycles)?)
    }

    fn canvas(&self, scene: CanvasScene) -> Result<SceneDescriptor, SceneError> {
        let name = scene.filename;
        let descriptor = self.build(scene.width, scene.height, &scene.colors, &scene.cycles, scene.pixels)?;
        Ok(named(descriptor, name))
    }

    fn world(&self, version: u32, data: Option<serde_json::Value>) -> Result<SceneDescriptor, SceneError> {
        if version != WORLD_FORMAT_VERSION {
            return Err(SceneError::unsupported(format!(
                "Living Worlds version {version} (attendu : {WORLD_FORMAT_VERSION})"
            )));
        }
        let data = data.ok_or_else(|| SceneError::malformed("champ manquant : data"))?;
        let data: WorldData = serde_json::from_value(data).map_err(|e| SceneError::malformed(e.to_string()))?;
        let extra = data.palette_infos.len().saturating_sub(1);
        let info = data
            .palette_infos
            .into_iter()
            .next()
            .ok_or_else(|| SceneError::malformed("paletteInfos vide"))?;
        if extra > 0 {
            log::debug!("{extra} palettes supplémentaires ignorées");
        }
        let descriptor = self.build(data.width, data.height, &info.colors, &info.cycles, data.pixels)?;
        Ok(named(descriptor, data.name))
    }
}

fn named(scene: SceneDescriptor, name: Option<String>) -> SceneDescriptor {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => scene.with_name(name),
        None => scene,
    }
}

fn palette_from(colors: &[[u8; 3]]) -> Result<Palette, ParseError> {
    if colors.len() != PALETTE_SIZE {
        return Err(ParseError::LengthMismatch {
            field: "colors",
            expected: PALETTE_SIZE,
            found: colors.len(),
        });
    }
    let colors: Vec<Rgb> = colors.iter().copied().map(Rgb::from).collect();
    Ok(Palette::from_colors(&colors))
}

fn pixels_from(raw: RawPixels) -> Result<Vec<u8>, ValidationError> {
    let values = match raw {
        RawPixels::Flat(values) => values,
        RawPixels::Rows(rows) => rows.concat(),
    };
    values
        .into_iter()
        .enumerate()
        .map(|(position, value)| u8::try_from(value).map_err(|_| ValidationError::PixelIndex { position, value }))
        .collect()
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, SceneError> {
    value.ok_or_else(|| SceneError::malformed(format!("champ manquant : {field}")))
}

impl SceneDecoder for JsonDecoder {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn can_decode(&self, bytes: &[u8]) -> bool {
        bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{')
    }

    fn decode(&self, bytes: &[u8]) -> Result<SceneDescriptor, SceneError> {
        let doc: Document = serde_json::from_slice(bytes).map_err(|e| SceneError::malformed(e.to_string()))?;

        if let Some(base) = doc.base {
            if doc.palettes.is_some() || doc.timeline.is_some() {
                log::debug!("palettes/timeline Living Worlds ignorées, seule la base est animée");
            }
            let name = doc.name.or_else(|| base.filename.clone());
            let scene = self.canvas(base)?;
            return Ok(named(scene, name));
        }

        if let Some(format) = doc.format {
            return self.world(format.version, doc.data);
        }

        let scene = CanvasScene {
            width: required(doc.width, "width")?,
            height: required(doc.height, "height")?,
            colors: required(doc.colors, "colors")?,
            cycles: doc.cycles.unwrap_or_default(),
            pixels: required(doc.pixels, "pixels")?,
            filename: doc.filename.or(doc.name),
        };
        self.canvas(scene)
    }
}
