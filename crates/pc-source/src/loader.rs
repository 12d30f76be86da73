use std::path::Path;

use anyhow::{Context, Result};
use pc_core::config::FormatConfig;
use pc_core::error::SceneError;
use pc_core::scene::SceneDescriptor;
use pc_core::traits::SceneDecoder;

use crate::ilbm::IlbmDecoder;
use crate::json::JsonDecoder;

/// Extensions de fichiers de scène reconnues (comparaison insensible à la casse).
pub const SCENE_EXTS: &[&str] = &["json", "lbm", "ilbm", "iff", "bbm"];

/// Décode une scène en choisissant le format d'après les premiers octets.
///
/// Un conteneur `FORM` part vers le décodeur IFF ; tout le reste est tenté
/// en JSON.
///
/// # Errors
/// Whatever the selected decoder reports.
///
/// # Example
/// ```
/// use pc_core::config::FormatConfig;
/// use pc_source::loader::decode_scene;
/// let err = decode_scene(b"FORM\0\0\0\x04ABCD", &FormatConfig::default());
/// assert!(err.is_err());
/// ```
pub fn decode_scene(bytes: &[u8], formats: &FormatConfig) -> Result<SceneDescriptor, SceneError> {
    let ilbm = IlbmDecoder::new(formats.ilbm_rate_divisor);
    let json = JsonDecoder::new(formats.json_rate_divisor);
    let decoder: &dyn SceneDecoder = if ilbm.can_decode(bytes) { &ilbm } else { &json };
    log::debug!("décodeur {} sélectionné", decoder.name());
    decoder.decode(bytes)
}

/// Read `path` and decode it with [`decode_scene`].
///
/// # Errors
/// [`SceneError::Io`] if the file cannot be read, otherwise whatever the
/// decoder reports.
pub fn read_scene(path: &Path, formats: &FormatConfig) -> Result<SceneDescriptor, SceneError> {
    let bytes = std::fs::read(path)?;
    decode_scene(&bytes, formats)
}

/// Lit et décode un fichier de scène.
///
/// Sans nom interne, la scène prend le nom du fichier.
///
/// # Errors
/// Returns an error if the file cannot be read or does not decode.
pub fn load_scene(path: &Path, formats: &FormatConfig) -> Result<SceneDescriptor> {
    let scene = read_scene(path, formats).with_context(|| format!("Chargement impossible : {}", path.display()))?;
    let scene = if scene.name().is_some() {
        scene
    } else {
        let stem = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        scene.with_name(stem)
    };
    log::info!(
        "scène chargée : {} ({}×{}, {} plages)",
        path.display(),
        scene.width(),
        scene.height(),
        scene.cycles().len()
    );
    Ok(scene)
}

/// `true` if `path` has one of [`SCENE_EXTS`].
#[must_use]
pub fn is_scene_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| SCENE_EXTS.contains(&ext.to_lowercase().as_str()))
}
