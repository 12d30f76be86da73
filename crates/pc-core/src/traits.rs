use crate::error::SceneError;
use crate::scene::SceneDescriptor;

/// Décode un format de fichier source en [`SceneDescriptor`].
///
/// Implémenté par : `JsonDecoder`, `IlbmDecoder`.
///
/// # Example
/// ```
/// use pc_core::error::SceneError;
/// use pc_core::palette::Palette;
/// use pc_core::scene::SceneDescriptor;
/// use pc_core::traits::SceneDecoder;
///
/// struct BlankDecoder;
/// impl SceneDecoder for BlankDecoder {
///     fn name(&self) -> &'static str { "blank" }
///     fn can_decode(&self, bytes: &[u8]) -> bool { bytes.is_empty() }
///     fn decode(&self, _bytes: &[u8]) -> Result<SceneDescriptor, SceneError> {
///         Ok(SceneDescriptor::new(0, 0, Palette::default(), Vec::new(), Vec::new())?)
///     }
/// }
/// assert!(BlankDecoder.can_decode(&[]));
/// ```
pub trait SceneDecoder: Send + Sync {
    /// Nom lisible pour les logs.
    fn name(&self) -> &'static str;

    /// Sniff the leading bytes. Cheap; must not parse the whole file.
    fn can_decode(&self, bytes: &[u8]) -> bool;

    /// Décode le fichier complet.
    ///
    /// CONTRAT : ne panique jamais, quelle que soit l'entrée. Toute donnée
    /// qui viole un invariant est rejetée ici.
    ///
    /// # Errors
    /// [`SceneError::Parse`] for structural problems, [`SceneError::Validation`]
    /// for well-formed data that breaks a scene invariant.
    fn decode(&self, bytes: &[u8]) -> Result<SceneDescriptor, SceneError>;
}
